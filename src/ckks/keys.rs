//! Key material: secret and public keys plus the rotation (key-switching)
//! keys that back the slot-sum reduction.

use crate::ckks::params::CkksParams;
use crate::ckks::rings::{PolyRing, galois_element};
use crate::ckks::sampling::{sample_gaussian, sample_ternary, sample_uniform};
use rand::Rng;
use std::collections::HashMap;

/// Digit width of the gadget decomposition used by key switching. Smaller
/// digits mean more keys but less switching noise.
pub(crate) const DIGIT_BITS: u32 = 8;

pub struct SecretKey {
    pub(crate) poly: PolyRing,
}

impl SecretKey {
    pub fn generate<R: Rng>(params: &CkksParams, rng: &mut R) -> Self {
        let poly = sample_ternary(
            params.modulus,
            params.ring_degree,
            params.hamming_weight,
            rng,
        );
        Self { poly }
    }
}

pub struct PublicKey {
    pub(crate) a: PolyRing,
    pub(crate) b: PolyRing,
}

impl PublicKey {
    /// b = -(a * s + e), so that b + a * s is small.
    pub fn from_secret_key<R: Rng>(
        secret_key: &SecretKey,
        params: &CkksParams,
        rng: &mut R,
    ) -> Self {
        let a = sample_uniform(params.modulus, params.ring_degree, rng);
        let e = sample_gaussian(params.modulus, params.ring_degree, params.error_std, rng);

        let mut b = a.clone();
        b *= &secret_key.poly;
        b += &e;
        let b = -b;

        Self { a, b }
    }
}

/// Key-switching key from a target secret t to the main secret s: pairs
/// (a_i, b_i = -(a_i * s + e_i) + 2^(DIGIT_BITS * i) * t).
pub(crate) struct KeySwitchKey {
    pub(crate) pairs: Vec<(PolyRing, PolyRing)>,
}

impl KeySwitchKey {
    fn generate<R: Rng>(
        target: &PolyRing,
        secret_key: &SecretKey,
        params: &CkksParams,
        num_digits: usize,
        rng: &mut R,
    ) -> Self {
        let q = params.modulus;
        let pairs = (0..num_digits)
            .map(|i| {
                let a = sample_uniform(q, params.ring_degree, rng);
                let e = sample_gaussian(q, params.ring_degree, params.error_std, rng);

                let mut b = a.clone();
                b *= &secret_key.poly;
                b += &e;
                let mut b = -b;

                let gadget = ((1u128 << (DIGIT_BITS * i as u32)) % q as u128) as u64;
                b += &target.scalar_mul(gadget);

                (a, b)
            })
            .collect();
        Self { pairs }
    }
}

/// One gadget key per supported rotation step.
pub struct RotationKeys {
    num_digits: usize,
    keys: HashMap<usize, KeySwitchKey>,
}

impl RotationKeys {
    /// Generates keys for the given rotation steps. The sum reduction needs
    /// every power-of-two step below the slot capacity; see
    /// [`RotationKeys::power_of_two_steps`].
    pub fn generate<R: Rng>(
        secret_key: &SecretKey,
        params: &CkksParams,
        steps: &[usize],
        rng: &mut R,
    ) -> Self {
        let num_digits = params.modulus_bits().div_ceil(DIGIT_BITS) as usize;
        let keys = steps
            .iter()
            .map(|&step| {
                let g = galois_element(step, params.ring_degree);
                let rotated_secret = secret_key.poly.automorphism(g);
                let key = KeySwitchKey::generate(
                    &rotated_secret,
                    secret_key,
                    params,
                    num_digits,
                    rng,
                );
                (step, key)
            })
            .collect();

        Self { num_digits, keys }
    }

    /// The steps the slot-sum reduction rotates by: 1, 2, 4, ... capacity/2.
    pub fn power_of_two_steps(slot_capacity: usize) -> Vec<usize> {
        let mut steps = Vec::new();
        let mut step = 1;
        while step < slot_capacity {
            steps.push(step);
            step <<= 1;
        }
        steps
    }

    pub(crate) fn key_for(&self, step: usize) -> Option<&KeySwitchKey> {
        self.keys.get(&step)
    }

    pub(crate) fn num_digits(&self) -> usize {
        self.num_digits
    }

    pub fn supported_steps(&self) -> impl Iterator<Item = usize> + '_ {
        self.keys.keys().copied()
    }
}
