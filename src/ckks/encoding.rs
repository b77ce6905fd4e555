//! Canonical-embedding CKKS encoder.
//!
//! A vector of reals is packed into the slots of a polynomial in
//! R[X]/(X^n + 1): slot h is the evaluation of the polynomial at the
//! primitive 2n-th root of unity psi^(5^h mod 2n), psi = e^(i*pi/n).
//! Conjugate symmetry over the remaining roots keeps coefficients real, and
//! the 5^h ordering makes a rotation by r slots coincide with the Galois
//! automorphism X -> X^(5^r).
//!
//! Evaluation at the odd powers psi^(2k+1) factors into a coefficient twist
//! by psi^j followed by a plain n-point FFT, so the whole transform runs
//! through rustfft instead of a Vandermonde product.

use crate::ckks::CkksError;
use crate::ckks::rings::galois_element;
use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

#[derive(Clone)]
pub struct SlotEncoder {
    ring_dim: usize,
    /// h -> FFT bin of psi^(5^h)
    slot_bins: Vec<usize>,
    /// h -> FFT bin of the conjugate root psi^(-5^h)
    conj_bins: Vec<usize>,
    twist: Vec<Complex64>,
    untwist: Vec<Complex64>,
    fft_forward: Arc<dyn Fft<f64>>,
    fft_inverse: Arc<dyn Fft<f64>>,
}

impl SlotEncoder {
    pub fn new(ring_dim: usize) -> Result<Self, CkksError> {
        if !ring_dim.is_power_of_two() || ring_dim < 8 {
            return Err(CkksError::InvalidParameter {
                message: format!(
                    "ring degree {} must be a power of two >= 8",
                    ring_dim
                ),
            });
        }

        let two_n = 2 * ring_dim;
        let slots = ring_dim / 2;
        let mut slot_bins = Vec::with_capacity(slots);
        let mut conj_bins = Vec::with_capacity(slots);
        for h in 0..slots {
            let exponent = galois_element(h, ring_dim);
            slot_bins.push((exponent - 1) / 2);
            conj_bins.push((two_n - exponent - 1) / 2);
        }

        let angle = std::f64::consts::PI / ring_dim as f64;
        let twist: Vec<Complex64> = (0..ring_dim)
            .map(|j| Complex64::from_polar(1.0, angle * j as f64))
            .collect();
        let untwist: Vec<Complex64> = twist.iter().map(|t| t.conj()).collect();

        let mut planner = FftPlanner::new();
        Ok(Self {
            ring_dim,
            slot_bins,
            conj_bins,
            twist,
            untwist,
            fft_forward: planner.plan_fft_forward(ring_dim),
            fft_inverse: planner.plan_fft_inverse(ring_dim),
        })
    }

    pub fn max_slots(&self) -> usize {
        self.ring_dim / 2
    }

    /// Encodes `values` at scale 2^scale_bits into integer coefficients.
    pub fn encode(&self, values: &[f64], scale_bits: u32) -> Result<Vec<i64>, CkksError> {
        if values.len() > self.max_slots() {
            return Err(CkksError::SlotCapacityExceeded {
                got: values.len(),
                capacity: self.max_slots(),
            });
        }

        let delta = (scale_bits as f64).exp2();
        let mut spectrum = vec![Complex64::new(0.0, 0.0); self.ring_dim];
        for (h, &value) in values.iter().enumerate() {
            let scaled = Complex64::new(value * delta, 0.0);
            spectrum[self.slot_bins[h]] = scaled;
            spectrum[self.conj_bins[h]] = scaled.conj();
        }

        // Interpolation: forward FFT inverts the evaluation transform below,
        // up to the 1/n normalization and the psi twist.
        self.fft_forward.process(&mut spectrum);

        let norm = (self.ring_dim as f64).recip();
        let mut coeffs = Vec::with_capacity(self.ring_dim);
        for (bin, untwist) in spectrum.iter().zip(self.untwist.iter()) {
            let real = (bin * untwist).re * norm;
            if !real.is_finite() || real.abs() > i64::MAX as f64 {
                return Err(CkksError::ValueOutOfRange { value: real });
            }
            coeffs.push(real.round() as i64);
        }

        Ok(coeffs)
    }

    /// Evaluates the coefficients at the slot roots and rescales by
    /// 2^-scale_bits. Returns all max_slots() slot values.
    pub fn decode(&self, coeffs: &[i64], scale_bits: u32) -> Vec<f64> {
        let mut buffer: Vec<Complex64> = coeffs
            .iter()
            .zip(self.twist.iter())
            .map(|(&c, twist)| twist * c as f64)
            .collect();
        buffer.resize(self.ring_dim, Complex64::new(0.0, 0.0));

        self.fft_inverse.process(&mut buffer);

        let delta = (scale_bits as f64).exp2();
        self.slot_bins
            .iter()
            .map(|&bin| buffer[bin].re / delta)
            .collect()
    }
}
