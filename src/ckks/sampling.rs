//! Random polynomial sampling for key generation and encryption.

use crate::ckks::rings::PolyRing;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Polynomial with uniformly random coefficients in [0, q).
pub fn sample_uniform<R: Rng>(modulus: u64, ring_dim: usize, rng: &mut R) -> PolyRing {
    let coeffs = (0..ring_dim).map(|_| rng.random_range(0..modulus)).collect();
    PolyRing::from_raw(coeffs, modulus)
}

/// Polynomial with coefficients from a rounded discrete Gaussian.
pub fn sample_gaussian<R: Rng>(
    modulus: u64,
    ring_dim: usize,
    std_dev: f64,
    rng: &mut R,
) -> PolyRing {
    let normal = Normal::new(0.0, std_dev).expect("Invalid standard deviation");
    let mut coeffs = Vec::with_capacity(ring_dim);

    for _ in 0..ring_dim {
        let noise = normal.sample(rng).round() as i64;
        let coeff = if noise < 0 {
            modulus - (noise.unsigned_abs() % modulus)
        } else {
            noise as u64 % modulus
        };
        coeffs.push(coeff % modulus);
    }

    PolyRing::from_raw(coeffs, modulus)
}

/// Sparse ternary polynomial with exactly `hamming_weight` nonzero
/// coefficients, each +1 or -1 with equal probability.
pub fn sample_ternary<R: Rng>(
    modulus: u64,
    ring_dim: usize,
    hamming_weight: usize,
    rng: &mut R,
) -> PolyRing {
    assert!(hamming_weight <= ring_dim);

    let mut coeffs = vec![0u64; ring_dim];
    let mut placed = 0;
    while placed < hamming_weight {
        let idx = rng.random_range(0..ring_dim);
        if coeffs[idx] == 0 {
            coeffs[idx] = if rng.random_bool(0.5) { 1 } else { modulus - 1 };
            placed += 1;
        }
    }

    PolyRing::from_raw(coeffs, modulus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    const Q: u64 = (1 << 61) - 1;

    #[test]
    fn test_ternary_hamming_weight() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);

        for &weight in &[0, 1, 8, 32] {
            let poly = sample_ternary(Q, 64, weight, &mut rng);
            let nonzero = poly.coeffs().iter().filter(|&&c| c != 0).count();
            assert_eq!(nonzero, weight, "wrong weight for {}", weight);
            for &c in poly.coeffs() {
                assert!(c == 0 || c == 1 || c == Q - 1);
            }
        }
    }

    #[test]
    fn test_gaussian_is_small_and_centered() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let std_dev = 3.2;
        let poly = sample_gaussian(Q, 4096, std_dev, &mut rng);

        let signed = poly.to_signed_coeffs();
        let mean: f64 =
            signed.iter().map(|&c| c as f64).sum::<f64>() / signed.len() as f64;
        let var: f64 = signed
            .iter()
            .map(|&c| (c as f64 - mean).powi(2))
            .sum::<f64>()
            / signed.len() as f64;

        assert!(mean.abs() < 0.5, "mean deviates too much: {}", mean);
        assert!(
            (var.sqrt() - std_dev).abs() < 0.5,
            "std dev deviates too much: actual {}, expected {}",
            var.sqrt(),
            std_dev
        );
    }

    #[test]
    fn test_deterministic_with_same_seed() {
        let mut rng1 = ChaCha20Rng::seed_from_u64(7);
        let mut rng2 = ChaCha20Rng::seed_from_u64(7);

        let p1 = sample_uniform(Q, 32, &mut rng1);
        let p2 = sample_uniform(Q, 32, &mut rng2);
        assert_eq!(p1, p2);
    }
}
