//! A toy CKKS-style approximate homomorphic encryption scheme.
//!
//! Just enough of the scheme for the encrypted-average protocol: packed
//! encryption of real vectors, slot-sum reduction via Galois rotations, and
//! multiplication by a public scalar. Single word-sized coefficient modulus,
//! schoolbook ring arithmetic; not hardened, not constant-time, not for
//! production data.

pub mod ciphertext;
pub mod context;
pub mod encoding;
pub mod keys;
pub mod params;
pub mod rings;
pub mod sampling;

pub use ciphertext::Ciphertext;
pub use context::{CkksContext, CkksContextBuilder, EvalContext};
pub use keys::{PublicKey, RotationKeys, SecretKey};
pub use params::CkksParams;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CkksError {
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    #[error("Input too long: got {got} values, slot capacity is {capacity}")]
    SlotCapacityExceeded { got: usize, capacity: usize },

    #[error("Value {value} does not fit the configured scale")]
    ValueOutOfRange { value: f64 },

    #[error("Scale mismatch: expected 2^{expected}, got 2^{actual}")]
    ScaleMismatch { expected: u32, actual: u32 },

    #[error("No rotation key for step {step}")]
    MissingRotationKey { step: usize },

    #[error(
        "Level budget exhausted: scale 2^{scale_bits} does not fit a \
         {modulus_bits}-bit modulus"
    )]
    LevelBudgetExhausted { scale_bits: u32, modulus_bits: u32 },

    #[error("Context mismatch: {message}")]
    ContextMismatch { message: String },

    #[error("Malformed ciphertext: {message}")]
    CiphertextFormat { message: String },
}

pub type CkksResult<T> = Result<T, CkksError>;
