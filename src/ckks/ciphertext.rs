//! Ciphertexts and the homomorphic operations on them.

use crate::ckks::CkksError;
use crate::ckks::keys::{DIGIT_BITS, RotationKeys};
use crate::ckks::rings::{PolyRing, galois_element};
use serde::{Deserialize, Serialize};

/// A CKKS ciphertext (c0, c1) satisfying c0 + c1 * s ≈ m at the recorded
/// scale. Operations produce new ciphertexts; `scale_bits` grows by the
/// scalar's scale on plaintext-scalar multiplication and decoding divides
/// the combined scale back out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ciphertext {
    pub(crate) c0: PolyRing,
    pub(crate) c1: PolyRing,
    pub(crate) scale_bits: u32,
}

impl Ciphertext {
    pub fn ring_dim(&self) -> usize {
        self.c0.ring_dim()
    }

    pub fn modulus(&self) -> u64 {
        self.c0.modulus()
    }

    pub fn scale_bits(&self) -> u32 {
        self.scale_bits
    }

    /// Homomorphic addition. Both operands must share parameters and scale.
    pub fn add(&self, other: &Self) -> Result<Self, CkksError> {
        if self.scale_bits != other.scale_bits {
            return Err(CkksError::ScaleMismatch {
                expected: self.scale_bits,
                actual: other.scale_bits,
            });
        }
        if self.ring_dim() != other.ring_dim() || self.modulus() != other.modulus() {
            return Err(CkksError::ContextMismatch {
                message: "ciphertexts come from different parameter sets".into(),
            });
        }

        let mut c0 = self.c0.clone();
        c0 += &other.c0;
        let mut c1 = self.c1.clone();
        c1 += &other.c1;

        Ok(Self {
            c0,
            c1,
            scale_bits: self.scale_bits,
        })
    }

    /// Multiplication by an integer scalar already reduced mod q. The caller
    /// accounts for the extra scale the scalar carries.
    pub(crate) fn scalar_mul_raw(&self, factor: u64, added_scale_bits: u32) -> Self {
        Self {
            c0: self.c0.scalar_mul(factor),
            c1: self.c1.scalar_mul(factor),
            scale_bits: self.scale_bits + added_scale_bits,
        }
    }

    /// Rotation by `step` slots: Galois automorphism of both halves followed
    /// by a gadget key switch of the rotated c1 back under the main secret.
    pub(crate) fn rotate(
        &self,
        step: usize,
        keys: &RotationKeys,
    ) -> Result<Self, CkksError> {
        let switch_key = keys
            .key_for(step)
            .ok_or(CkksError::MissingRotationKey { step })?;

        let g = galois_element(step, self.ring_dim());
        let c0_rot = self.c0.automorphism(g);
        let c1_rot = self.c1.automorphism(g);

        let digits = c1_rot.base_digits(DIGIT_BITS, keys.num_digits());

        let mut acc0 = c0_rot;
        let mut acc1 = PolyRing::zero(self.modulus(), self.ring_dim());
        for (digit, (a_i, b_i)) in digits.iter().zip(switch_key.pairs.iter()) {
            let mut term = b_i.clone();
            term *= digit;
            acc0 += &term;

            let mut term = a_i.clone();
            term *= digit;
            acc1 += &term;
        }

        Ok(Self {
            c0: acc0,
            c1: acc1,
            scale_bits: self.scale_bits,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy(scale_bits: u32) -> Ciphertext {
        let q = (1u64 << 61) - 1;
        Ciphertext {
            c0: PolyRing::zero(q, 8),
            c1: PolyRing::zero(q, 8),
            scale_bits,
        }
    }

    #[test]
    fn test_add_rejects_scale_mismatch() {
        let ct1 = dummy(32);
        let ct2 = dummy(52);
        assert!(matches!(
            ct1.add(&ct2),
            Err(CkksError::ScaleMismatch {
                expected: 32,
                actual: 52
            })
        ));
    }

    #[test]
    fn test_rotate_without_key_fails() {
        let params = crate::ckks::CkksParams::with_degree(8);
        let mut rng = {
            use rand::SeedableRng;
            rand_chacha::ChaCha20Rng::seed_from_u64(3)
        };
        let sk = crate::ckks::keys::SecretKey::generate(&params, &mut rng);
        let keys = RotationKeys::generate(&sk, &params, &[], &mut rng);

        let ct = dummy(32);
        assert!(matches!(
            ct.rotate(1, &keys),
            Err(CkksError::MissingRotationKey { step: 1 })
        ));
    }
}
