//! Context objects: the secret-side [`CkksContext`] and the public-side
//! [`EvalContext`].
//!
//! The split enforces the protocol's confidentiality property structurally:
//! an `EvalContext` carries parameters and rotation keys only, so the party
//! holding it can run homomorphic operations but has no decryption path.

use crate::ckks::CkksError;
use crate::ckks::ciphertext::Ciphertext;
use crate::ckks::encoding::SlotEncoder;
use crate::ckks::keys::{PublicKey, RotationKeys, SecretKey};
use crate::ckks::params::{CkksParams, VALUE_MARGIN_BITS};
use crate::ckks::rings::PolyRing;
use crate::ckks::sampling::{sample_gaussian, sample_ternary};
use rand::Rng;
use std::sync::Arc;

pub struct CkksContext {
    params: CkksParams,
    encoder: SlotEncoder,
    secret_key: SecretKey,
    public_key: PublicKey,
    rotation_keys: Arc<RotationKeys>,
}

pub struct CkksContextBuilder {
    params: CkksParams,
    rotation_steps: Option<Vec<usize>>,
}

impl CkksContextBuilder {
    pub fn new(params: CkksParams) -> Self {
        Self {
            params,
            rotation_steps: None,
        }
    }

    /// Overrides the rotation steps to generate keys for. The default is
    /// every power-of-two step below the slot capacity, which is what the
    /// sum reduction needs.
    pub fn rotation_steps(mut self, steps: &[usize]) -> Self {
        self.rotation_steps = Some(steps.to_vec());
        self
    }

    pub fn build<R: Rng>(self, rng: &mut R) -> Result<CkksContext, CkksError> {
        self.params.validate()?;

        let encoder = SlotEncoder::new(self.params.ring_degree)?;
        let secret_key = SecretKey::generate(&self.params, rng);
        let public_key = PublicKey::from_secret_key(&secret_key, &self.params, rng);

        let steps = self.rotation_steps.unwrap_or_else(|| {
            RotationKeys::power_of_two_steps(self.params.slot_capacity())
        });
        let rotation_keys =
            Arc::new(RotationKeys::generate(&secret_key, &self.params, &steps, rng));

        Ok(CkksContext {
            params: self.params,
            encoder,
            secret_key,
            public_key,
            rotation_keys,
        })
    }
}

impl CkksContext {
    /// Fresh context with fully generated key material, including the
    /// rotation keys the sum reduction depends on.
    pub fn create<R: Rng>(params: &CkksParams, rng: &mut R) -> Result<Self, CkksError> {
        Self::builder(params.clone()).build(rng)
    }

    pub fn builder(params: CkksParams) -> CkksContextBuilder {
        CkksContextBuilder::new(params)
    }

    pub fn params(&self) -> &CkksParams {
        &self.params
    }

    pub fn slot_capacity(&self) -> usize {
        self.params.slot_capacity()
    }

    /// Public-side view: parameters and rotation keys, no secret key.
    pub fn eval_context(&self) -> EvalContext {
        EvalContext {
            params: self.params.clone(),
            rotation_keys: Arc::clone(&self.rotation_keys),
        }
    }

    /// Encodes `values` at the context scale and encrypts under the public
    /// key.
    pub fn encrypt<R: Rng>(
        &self,
        values: &[f64],
        rng: &mut R,
    ) -> Result<Ciphertext, CkksError> {
        if values.len() > self.slot_capacity() {
            return Err(CkksError::SlotCapacityExceeded {
                got: values.len(),
                capacity: self.slot_capacity(),
            });
        }

        let coeffs = self.encoder.encode(values, self.params.scale_bits)?;
        let m = PolyRing::from_signed_coeffs(
            &coeffs,
            self.params.modulus,
            self.params.ring_degree,
        );

        let u = sample_ternary(
            self.params.modulus,
            self.params.ring_degree,
            self.params.hamming_weight,
            rng,
        );
        let e0 = sample_gaussian(
            self.params.modulus,
            self.params.ring_degree,
            self.params.error_std,
            rng,
        );
        let e1 = sample_gaussian(
            self.params.modulus,
            self.params.ring_degree,
            self.params.error_std,
            rng,
        );

        // c0 = b * u + e0 + m
        let mut c0 = self.public_key.b.clone();
        c0 *= &u;
        c0 += &e0;
        c0 += &m;

        // c1 = a * u + e1
        let mut c1 = self.public_key.a.clone();
        c1 *= &u;
        c1 += &e1;

        Ok(Ciphertext {
            c0,
            c1,
            scale_bits: self.params.scale_bits,
        })
    }

    /// m ≈ c0 + c1 * s, decoded at the ciphertext's recorded scale.
    pub fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Vec<f64>, CkksError> {
        self.check_compatible(ciphertext)?;

        let mut m = ciphertext.c1.clone();
        m *= &self.secret_key.poly;
        m += &ciphertext.c0;

        Ok(self
            .encoder
            .decode(&m.to_signed_coeffs(), ciphertext.scale_bits))
    }

    fn check_compatible(&self, ciphertext: &Ciphertext) -> Result<(), CkksError> {
        check_params(&self.params, ciphertext)
    }
}

/// Evaluation-only context handed to the computing party.
pub struct EvalContext {
    params: CkksParams,
    rotation_keys: Arc<RotationKeys>,
}

impl EvalContext {
    pub fn params(&self) -> &CkksParams {
        &self.params
    }

    pub fn slot_capacity(&self) -> usize {
        self.params.slot_capacity()
    }

    /// Replaces every slot with the sum over all slots by a
    /// rotate-and-add tree; slot 0 carries the protocol's result. Fails with
    /// a missing-rotation-key error when the context was built without the
    /// reduction keys.
    pub fn sum_slots(&self, ciphertext: &Ciphertext) -> Result<Ciphertext, CkksError> {
        self.check_compatible(ciphertext)?;

        let mut acc = ciphertext.clone();
        let mut step = 1;
        while step < self.slot_capacity() {
            let rotated = acc.rotate(step, &self.rotation_keys)?;
            acc = acc.add(&rotated)?;
            step <<= 1;
        }
        Ok(acc)
    }

    /// Entrywise product with a public plaintext scalar. Consumes the one
    /// multiplicative level the parameters budget for; the resulting
    /// ciphertext records the grown scale.
    pub fn multiply_scalar(
        &self,
        ciphertext: &Ciphertext,
        scalar: f64,
    ) -> Result<Ciphertext, CkksError> {
        self.check_compatible(ciphertext)?;

        if !scalar.is_finite() {
            return Err(CkksError::InvalidParameter {
                message: format!("scalar {} is not finite", scalar),
            });
        }

        let added_bits = self.params.scalar_scale_bits;
        let new_scale = ciphertext.scale_bits + added_bits;
        if new_scale + VALUE_MARGIN_BITS > self.params.modulus_bits() {
            return Err(CkksError::LevelBudgetExhausted {
                scale_bits: new_scale,
                modulus_bits: self.params.modulus_bits(),
            });
        }

        let scaled = scalar * (added_bits as f64).exp2();
        if scaled.abs() >= (1u64 << 62) as f64 {
            return Err(CkksError::ValueOutOfRange { value: scaled });
        }

        let q = self.params.modulus;
        let factor = scaled.round() as i64;
        let factor_mod_q = if factor < 0 {
            (q - factor.unsigned_abs() % q) % q
        } else {
            factor as u64 % q
        };

        Ok(ciphertext.scalar_mul_raw(factor_mod_q, added_bits))
    }

    pub(crate) fn check_compatible(&self, ciphertext: &Ciphertext) -> Result<(), CkksError> {
        check_params(&self.params, ciphertext)
    }
}

fn check_params(params: &CkksParams, ciphertext: &Ciphertext) -> Result<(), CkksError> {
    if ciphertext.ring_dim() != params.ring_degree {
        return Err(CkksError::ContextMismatch {
            message: format!(
                "ciphertext ring degree {} does not match context degree {}",
                ciphertext.ring_dim(),
                params.ring_degree
            ),
        });
    }
    if ciphertext.modulus() != params.modulus {
        return Err(CkksError::ContextMismatch {
            message: format!(
                "ciphertext modulus {} does not match context modulus {}",
                ciphertext.modulus(),
                params.modulus
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn test_params() -> CkksParams {
        CkksParams::with_degree(64)
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let context = CkksContext::create(&test_params(), &mut rng).unwrap();

        let values = vec![120.0, 130.0, 125.0, 140.0, 115.0, 135.0];
        let ct = context.encrypt(&values, &mut rng).unwrap();
        let decrypted = context.decrypt(&ct).unwrap();

        for (expected, actual) in values.iter().zip(&decrypted) {
            assert!(
                (expected - actual).abs() < 1e-2,
                "roundtrip error too large: expected {}, got {}",
                expected,
                actual
            );
        }
    }

    #[test]
    fn test_capacity_boundary() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let context = CkksContext::create(&test_params(), &mut rng).unwrap();
        let capacity = context.slot_capacity();

        let at_capacity = vec![1.0; capacity];
        assert!(context.encrypt(&at_capacity, &mut rng).is_ok());

        let over_capacity = vec![1.0; capacity + 1];
        assert!(matches!(
            context.encrypt(&over_capacity, &mut rng),
            Err(CkksError::SlotCapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_sum_then_scalar_gives_average() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let context = CkksContext::create(&test_params(), &mut rng).unwrap();
        let eval = context.eval_context();

        let values = vec![120.0, 130.0, 125.0, 140.0, 115.0, 135.0];
        let ct = context.encrypt(&values, &mut rng).unwrap();

        let summed = eval.sum_slots(&ct).unwrap();
        let averaged = eval
            .multiply_scalar(&summed, 1.0 / values.len() as f64)
            .unwrap();
        let decrypted = context.decrypt(&averaged).unwrap();

        assert!(
            (decrypted[0] - 127.5).abs() < 0.5,
            "average off: got {}",
            decrypted[0]
        );
    }

    #[test]
    fn test_sum_fails_without_rotation_keys() {
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let context = CkksContext::builder(test_params())
            .rotation_steps(&[])
            .build(&mut rng)
            .unwrap();
        let eval = context.eval_context();

        let ct = context.encrypt(&[1.0, 2.0], &mut rng).unwrap();
        assert!(matches!(
            eval.sum_slots(&ct),
            Err(CkksError::MissingRotationKey { step: 1 })
        ));
    }

    #[test]
    fn test_second_multiplication_exhausts_budget() {
        let mut rng = ChaCha20Rng::seed_from_u64(13);
        let context = CkksContext::create(&test_params(), &mut rng).unwrap();
        let eval = context.eval_context();

        let ct = context.encrypt(&[4.0], &mut rng).unwrap();
        let once = eval.multiply_scalar(&ct, 0.5).unwrap();
        assert!(matches!(
            eval.multiply_scalar(&once, 0.5),
            Err(CkksError::LevelBudgetExhausted { .. })
        ));
    }

    #[test]
    fn test_decrypt_foreign_ciphertext_fails() {
        let mut rng = ChaCha20Rng::seed_from_u64(21);
        let context = CkksContext::create(&test_params(), &mut rng).unwrap();

        let other = CkksContext::create(&CkksParams::with_degree(32), &mut rng).unwrap();
        let foreign = other.encrypt(&[1.0], &mut rng).unwrap();

        assert!(matches!(
            context.decrypt(&foreign),
            Err(CkksError::ContextMismatch { .. })
        ));
    }

    #[test]
    fn test_scalar_multiply_negative() {
        let mut rng = ChaCha20Rng::seed_from_u64(33);
        let context = CkksContext::create(&test_params(), &mut rng).unwrap();
        let eval = context.eval_context();

        let ct = context.encrypt(&[10.0, -4.0], &mut rng).unwrap();
        let negated = eval.multiply_scalar(&ct, -0.5).unwrap();
        let decrypted = context.decrypt(&negated).unwrap();

        assert!((decrypted[0] + 5.0).abs() < 1e-2);
        assert!((decrypted[1] - 2.0).abs() < 1e-2);
    }
}
