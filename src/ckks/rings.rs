//! Polynomials in the ring Z_q[X]/(X^n + 1) where:
//! q - coefficient modulus
//! n - ring dimension, a power of 2
//!
//! In this quotient ring polynomials have degree at most n-1, and X^n = -1
//! (used during multiplication and by the Galois automorphisms).

use serde::{Deserialize, Serialize};
use std::ops::{AddAssign, MulAssign, Neg};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolyRing {
    coeffs: Vec<u64>,
    modulus: u64,
}

impl PolyRing {
    pub fn zero(modulus: u64, ring_dim: usize) -> Self {
        Self {
            coeffs: vec![0; ring_dim],
            modulus,
        }
    }

    pub(crate) fn from_raw(coeffs: Vec<u64>, modulus: u64) -> Self {
        debug_assert!(coeffs.iter().all(|&c| c < modulus));
        Self { coeffs, modulus }
    }

    /// Builds a polynomial from signed coefficients, lifting negative values
    /// into [0, q) the usual way.
    pub fn from_signed_coeffs(coeffs: &[i64], modulus: u64, ring_dim: usize) -> Self {
        let mut poly = Self::zero(modulus, ring_dim);
        for (slot, &value) in poly.coeffs.iter_mut().zip(coeffs.iter()) {
            let reduced = value.rem_euclid(modulus as i64);
            *slot = reduced as u64;
        }
        poly
    }

    /// Centered lift back to signed coefficients in (-q/2, q/2].
    pub fn to_signed_coeffs(&self) -> Vec<i64> {
        let half = self.modulus / 2;
        self.coeffs
            .iter()
            .map(|&c| {
                if c > half {
                    -((self.modulus - c) as i64)
                } else {
                    c as i64
                }
            })
            .collect()
    }

    pub fn ring_dim(&self) -> usize {
        self.coeffs.len()
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    pub fn coeffs(&self) -> &[u64] {
        &self.coeffs
    }

    /// Multiplication by an integer scalar already reduced mod q.
    pub fn scalar_mul(&self, factor: u64) -> Self {
        let coeffs = self
            .coeffs
            .iter()
            .map(|&c| ((c as u128 * factor as u128) % self.modulus as u128) as u64)
            .collect();
        Self {
            coeffs,
            modulus: self.modulus,
        }
    }

    /// Galois automorphism X -> X^g for odd g, the slot-rotation map.
    ///
    /// Coefficient j moves to exponent g*j mod 2n; exponents past n pick up a
    /// sign because X^n = -1.
    pub fn automorphism(&self, g: usize) -> Self {
        let n = self.ring_dim();
        let two_n = 2 * n;
        debug_assert!(g % 2 == 1, "Galois element must be odd");

        let mut out = vec![0u64; n];
        for (j, &c) in self.coeffs.iter().enumerate() {
            let k = (g * j) % two_n;
            if k < n {
                out[k] = (out[k] + c) % self.modulus;
            } else {
                out[k - n] = (out[k - n] + self.modulus - c) % self.modulus;
            }
        }
        Self {
            coeffs: out,
            modulus: self.modulus,
        }
    }

    /// Base-2^digit_bits decomposition: returns `count` polynomials d_i with
    /// small coefficients such that sum_i d_i * 2^(digit_bits * i) == self.
    pub(crate) fn base_digits(&self, digit_bits: u32, count: usize) -> Vec<Self> {
        let mask = (1u64 << digit_bits) - 1;
        (0..count)
            .map(|i| {
                let shift = digit_bits * i as u32;
                let coeffs = self
                    .coeffs
                    .iter()
                    .map(|&c| (c >> shift) & mask)
                    .collect();
                Self {
                    coeffs,
                    modulus: self.modulus,
                }
            })
            .collect()
    }
}

impl AddAssign<&PolyRing> for PolyRing {
    fn add_assign(&mut self, rhs: &PolyRing) {
        assert_eq!(self.modulus, rhs.modulus, "Incompatible moduli");
        assert_eq!(self.ring_dim(), rhs.ring_dim(), "Incompatible ring degrees");

        for (lhs, &r) in self.coeffs.iter_mut().zip(rhs.coeffs.iter()) {
            // both operands < q < 2^62, no overflow in u64
            *lhs = (*lhs + r) % self.modulus;
        }
    }
}

impl MulAssign<&PolyRing> for PolyRing {
    fn mul_assign(&mut self, rhs: &PolyRing) {
        assert_eq!(self.modulus, rhs.modulus, "Incompatible moduli");
        assert_eq!(self.ring_dim(), rhs.ring_dim(), "Incompatible ring degrees");

        let n = self.ring_dim();
        let q = self.modulus as u128;
        let mut result = vec![0u64; n];

        // Schoolbook multiplication with X^n + 1 reduction
        for (i, &a) in self.coeffs.iter().enumerate() {
            if a == 0 {
                continue;
            }
            for (j, &b) in rhs.coeffs.iter().enumerate() {
                let prod = (a as u128 * b as u128) % q;
                let pos = i + j;
                if pos < n {
                    result[pos] = ((result[pos] as u128 + prod) % q) as u64;
                } else {
                    // X^n = -1, so X^(n+k) = -X^k
                    let wrapped = pos - n;
                    result[wrapped] =
                        ((result[wrapped] as u128 + q - prod) % q) as u64;
                }
            }
        }

        self.coeffs = result;
    }
}

impl Neg for PolyRing {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        for coeff in &mut self.coeffs {
            *coeff = (self.modulus - *coeff) % self.modulus;
        }
        self
    }
}

/// 5^step mod 2n, the Galois element for a rotation by `step` slots.
pub(crate) fn galois_element(step: usize, ring_dim: usize) -> usize {
    let modulus = 2 * ring_dim as u64;
    let mut acc = 1u64;
    let mut base = 5u64 % modulus;
    let mut exp = step as u64;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = (acc * base) % modulus;
        }
        base = (base * base) % modulus;
        exp >>= 1;
    }
    acc as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addition() {
        // p1 = 3 + 2x, p2 = 7 + 5x mod 17
        let mut p1 = PolyRing::from_signed_coeffs(&[3, 2], 17, 4);
        let p2 = PolyRing::from_signed_coeffs(&[7, 5], 17, 4);

        p1 += &p2;
        assert_eq!(p1.coeffs()[0], 10); // (3 + 7) mod 17
        assert_eq!(p1.coeffs()[1], 7); // (2 + 5) mod 17
    }

    #[test]
    fn test_negacyclic_multiplication() {
        // p1 = 2 + x, p2 = 3 + x in Z_17[X]/(X^2 + 1)
        let mut p1 = PolyRing::from_signed_coeffs(&[2, 1], 17, 2);
        let p2 = PolyRing::from_signed_coeffs(&[3, 1], 17, 2);

        p1 *= &p2;
        // x^2 + 5x + 6 with X^2 = -1 gives 5 + 5x
        assert_eq!(p1.coeffs()[0], 5);
        assert_eq!(p1.coeffs()[1], 5);
    }

    #[test]
    fn test_signed_roundtrip() {
        let p = PolyRing::from_signed_coeffs(&[3, -2, 0, -8], 17, 4);
        assert_eq!(p.to_signed_coeffs(), vec![3, -2, 0, -8]);
    }

    #[test]
    fn test_automorphism_wraps_with_sign() {
        let modulus = 97;
        // m = x, g = 3, n = 4: X -> X^3
        let m = PolyRing::from_signed_coeffs(&[0, 1], modulus, 4);
        let rotated = m.automorphism(3);
        assert_eq!(rotated.to_signed_coeffs(), vec![0, 0, 0, 1]);

        // m = x^2, g = 3: X^6 = -X^2
        let m = PolyRing::from_signed_coeffs(&[0, 0, 1], modulus, 4);
        let rotated = m.automorphism(3);
        assert_eq!(rotated.to_signed_coeffs(), vec![0, 0, -1, 0]);
    }

    #[test]
    fn test_base_digits_recompose() {
        let modulus = (1u64 << 61) - 1;
        let p = PolyRing::from_raw(vec![123_456_789_012_345, 7, 0, modulus - 1], modulus);
        let digits = p.base_digits(8, 8);

        let mut recomposed = PolyRing::zero(modulus, 4);
        for (i, digit) in digits.iter().enumerate() {
            let factor = 1u64 << (8 * i as u32);
            recomposed += &digit.scalar_mul(factor % modulus);
        }
        assert_eq!(recomposed, p);
    }

    #[test]
    fn test_galois_element_order() {
        // 5 has multiplicative order n/2 mod 2n, so a full cycle of slot
        // rotations returns to the identity.
        let n = 16;
        assert_eq!(galois_element(0, n), 1);
        assert_eq!(galois_element(n / 2, n), 1);
        assert_ne!(galois_element(1, n), 1);
    }
}
