//! Scheme parameters and their validation.

use crate::ckks::CkksError;

/// Headroom (in bits) reserved above the combined scale for the magnitude of
/// decoded values. With the defaults this allows results up to ~2^8.
pub(crate) const VALUE_MARGIN_BITS: u32 = 8;

/// Parameter set for the toy CKKS scheme.
///
/// A single word-sized coefficient modulus stands in for a modulus chain:
/// instead of rescaling after the one plaintext-scalar multiplication the
/// protocol needs, the ciphertext records its grown scale and decoding
/// divides it back out. `validate` fails when that one level does not fit
/// the modulus, which is this scheme's version of "not enough coefficient
/// modulus for the requested depth".
#[derive(Debug, Clone, PartialEq)]
pub struct CkksParams {
    /// Ring degree n, a power of two. Slot capacity is n / 2.
    pub ring_degree: usize,
    /// Coefficient modulus q, at most 62 bits.
    pub modulus: u64,
    /// Encoding scale is 2^scale_bits.
    pub scale_bits: u32,
    /// Scale used for the public scalar in scalar multiplication.
    pub scalar_scale_bits: u32,
    /// Standard deviation of the error distribution.
    pub error_std: f64,
    /// Hamming weight of ternary secrets.
    pub hamming_weight: usize,
}

impl CkksParams {
    /// Default parameters for the demo protocol run.
    pub fn recommended() -> Self {
        Self::with_degree(512)
    }

    /// Same profile at a caller-chosen ring degree.
    pub fn with_degree(ring_degree: usize) -> Self {
        Self {
            ring_degree,
            modulus: (1u64 << 61) - 1, // Mersenne prime
            scale_bits: 32,
            scalar_scale_bits: 20,
            error_std: 3.2,
            hamming_weight: ring_degree / 2,
        }
    }

    pub fn slot_capacity(&self) -> usize {
        self.ring_degree / 2
    }

    pub fn modulus_bits(&self) -> u32 {
        64 - self.modulus.leading_zeros()
    }

    pub fn validate(&self) -> Result<(), CkksError> {
        if !self.ring_degree.is_power_of_two() || self.ring_degree < 8 {
            return Err(CkksError::InvalidParameter {
                message: format!(
                    "ring degree {} must be a power of two >= 8",
                    self.ring_degree
                ),
            });
        }
        if self.modulus_bits() < 32 || self.modulus_bits() > 62 {
            return Err(CkksError::InvalidParameter {
                message: format!(
                    "modulus must be 32..=62 bits, got {} bits",
                    self.modulus_bits()
                ),
            });
        }
        if self.scale_bits < 16 {
            return Err(CkksError::InvalidParameter {
                message: format!("scale of 2^{} is too coarse", self.scale_bits),
            });
        }
        if self.scalar_scale_bits < 8 {
            return Err(CkksError::InvalidParameter {
                message: format!(
                    "scalar scale of 2^{} is too coarse",
                    self.scalar_scale_bits
                ),
            });
        }
        // One multiplicative level plus value headroom must fit the modulus,
        // otherwise results silently wrap instead of degrading gracefully.
        let needed = self.scale_bits + self.scalar_scale_bits + VALUE_MARGIN_BITS;
        if needed > self.modulus_bits() {
            return Err(CkksError::InvalidParameter {
                message: format!(
                    "scale 2^{} with scalar scale 2^{} needs {} modulus bits, \
                     only {} available",
                    self.scale_bits,
                    self.scalar_scale_bits,
                    needed,
                    self.modulus_bits()
                ),
            });
        }
        if self.hamming_weight == 0 || self.hamming_weight > self.ring_degree {
            return Err(CkksError::InvalidParameter {
                message: format!(
                    "hamming weight {} out of range for degree {}",
                    self.hamming_weight, self.ring_degree
                ),
            });
        }
        if !(self.error_std > 0.0) {
            return Err(CkksError::InvalidParameter {
                message: format!("error std {} must be positive", self.error_std),
            });
        }
        Ok(())
    }
}
