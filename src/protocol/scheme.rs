//! Capability interface between the protocol and the encryption scheme.
//!
//! The agents and the orchestrator only ever talk to this trait, so any
//! approximate-arithmetic scheme offering packed encryption, slot-sum
//! reduction, and public-scalar multiplication can stand in for the bundled
//! toy CKKS provider.

use crate::ckks::{Ciphertext, CkksContext, CkksError, CkksParams, EvalContext};
use crate::error::ProtocolError;
use rand::Rng;

pub trait HeScheme {
    type Params;
    /// Full context including secret key material; stays with the data owner.
    type Context;
    /// Public evaluation material: enough for homomorphic operations and
    /// deserialization, structurally incapable of decryption.
    type EvalContext;
    type Ciphertext;
    type Error: std::error::Error + Into<ProtocolError> + Send + Sync + 'static;

    /// Builds a context with fresh key material, including whatever
    /// auxiliary keys the sum reduction needs. Parameter combinations the
    /// scheme cannot support must fail here, before any data is touched.
    fn create_context<R: Rng>(
        params: &Self::Params,
        rng: &mut R,
    ) -> Result<Self::Context, Self::Error>;

    fn eval_context(context: &Self::Context) -> Self::EvalContext;

    fn slot_capacity(context: &Self::Context) -> usize;

    fn encrypt<R: Rng>(
        context: &Self::Context,
        values: &[f64],
        rng: &mut R,
    ) -> Result<Self::Ciphertext, Self::Error>;

    fn decrypt(
        context: &Self::Context,
        ciphertext: &Self::Ciphertext,
    ) -> Result<Vec<f64>, Self::Error>;

    /// Ciphertext whose first slot holds (approximately) the sum of every
    /// slot of the input.
    fn sum_slots(
        eval: &Self::EvalContext,
        ciphertext: &Self::Ciphertext,
    ) -> Result<Self::Ciphertext, Self::Error>;

    fn multiply_scalar(
        eval: &Self::EvalContext,
        ciphertext: &Self::Ciphertext,
        scalar: f64,
    ) -> Result<Self::Ciphertext, Self::Error>;

    /// Deterministic binary encoding of a ciphertext.
    fn serialize(ciphertext: &Self::Ciphertext) -> Result<Vec<u8>, Self::Error>;

    /// Rebinds serialized bytes to a context sharing the producer's scheme
    /// parameters. Needs no secret key.
    fn deserialize(
        eval: &Self::EvalContext,
        bytes: &[u8],
    ) -> Result<Self::Ciphertext, Self::Error>;
}

/// The bundled toy CKKS provider.
pub struct CkksScheme;

impl HeScheme for CkksScheme {
    type Params = CkksParams;
    type Context = CkksContext;
    type EvalContext = EvalContext;
    type Ciphertext = Ciphertext;
    type Error = CkksError;

    fn create_context<R: Rng>(
        params: &CkksParams,
        rng: &mut R,
    ) -> Result<CkksContext, CkksError> {
        CkksContext::create(params, rng)
    }

    fn eval_context(context: &CkksContext) -> EvalContext {
        context.eval_context()
    }

    fn slot_capacity(context: &CkksContext) -> usize {
        context.slot_capacity()
    }

    fn encrypt<R: Rng>(
        context: &CkksContext,
        values: &[f64],
        rng: &mut R,
    ) -> Result<Ciphertext, CkksError> {
        context.encrypt(values, rng)
    }

    fn decrypt(context: &CkksContext, ciphertext: &Ciphertext) -> Result<Vec<f64>, CkksError> {
        context.decrypt(ciphertext)
    }

    fn sum_slots(eval: &EvalContext, ciphertext: &Ciphertext) -> Result<Ciphertext, CkksError> {
        eval.sum_slots(ciphertext)
    }

    fn multiply_scalar(
        eval: &EvalContext,
        ciphertext: &Ciphertext,
        scalar: f64,
    ) -> Result<Ciphertext, CkksError> {
        eval.multiply_scalar(ciphertext, scalar)
    }

    fn serialize(ciphertext: &Ciphertext) -> Result<Vec<u8>, CkksError> {
        bincode::serialize(ciphertext).map_err(|e| CkksError::CiphertextFormat {
            message: e.to_string(),
        })
    }

    fn deserialize(eval: &EvalContext, bytes: &[u8]) -> Result<Ciphertext, CkksError> {
        let ciphertext: Ciphertext =
            bincode::deserialize(bytes).map_err(|e| CkksError::CiphertextFormat {
                message: e.to_string(),
            })?;
        eval.check_compatible(&ciphertext)?;
        Ok(ciphertext)
    }
}
