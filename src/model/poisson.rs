// src/model/poisson.rs

use crate::model::rng::uniform;
use rand::Rng;
use rand_distr::Distribution;

/// Poisson sampler using Knuth's multiplicative method.
///
/// Each sample multiplies uniforms together until the product falls to or
/// below `e^-lambda` and returns the number of draws minus one. Cost grows
/// linearly with `lambda`, which is fine for daily referral counts in the
/// tens. `rand_distr::Poisson` is not used because its draws would not line
/// up with the frozen uniform stream.
#[derive(Debug, Clone, Copy)]
pub struct KnuthPoisson {
    lambda: f64,
    threshold: f64,
}

impl KnuthPoisson {
    /// A non-positive `lambda` gives a sampler that always returns 0
    /// without consuming any randomness.
    pub fn new(lambda: f64) -> Self {
        Self {
            lambda,
            threshold: (-lambda).exp(),
        }
    }
}

impl Distribution<u32> for KnuthPoisson {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        if self.lambda <= 0.0 {
            return 0;
        }

        let mut draws: u32 = 0;
        let mut product = 1.0;
        loop {
            draws += 1;
            product *= uniform(rng);
            if product <= self.threshold {
                break;
            }
        }
        draws - 1
    }
}

/// Convenience form of [`KnuthPoisson`] for one-off draws.
pub fn sample_poisson<R: Rng + ?Sized>(lambda: f64, rng: &mut R) -> u32 {
    KnuthPoisson::new(lambda).sample(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::rng::Mulberry32;

    #[test]
    fn test_zero_lambda_consumes_nothing() {
        let mut rng = Mulberry32::new(5);
        assert_eq!(sample_poisson(0.0, &mut rng), 0);
        assert_eq!(sample_poisson(-3.0, &mut rng), 0);
        // Stream untouched
        assert_eq!(rng, Mulberry32::new(5));
    }

    #[test]
    fn test_known_draws() {
        let mut rng = Mulberry32::new(7);
        let dist = KnuthPoisson::new(4.0);
        let draws: Vec<u32> = (0..10).map(|_| dist.sample(&mut rng)).collect();
        assert_eq!(draws, vec![0, 4, 4, 3, 3, 4, 4, 8, 3, 3]);
    }

    #[test]
    fn test_free_function_matches_distribution() {
        let mut a = Mulberry32::new(99);
        let mut b = Mulberry32::new(99);
        let dist = KnuthPoisson::new(12.5);
        for _ in 0..100 {
            assert_eq!(sample_poisson(12.5, &mut a), dist.sample(&mut b));
        }
    }

    #[test]
    fn test_sample_mean_is_close_to_lambda() {
        let mut rng = Mulberry32::new(2024);
        let dist = KnuthPoisson::new(18.0);
        let n = 20_000;
        let total: u64 = (0..n).map(|_| u64::from(dist.sample(&mut rng))).sum();
        let mean = total as f64 / n as f64;
        assert!((mean - 18.0).abs() < 0.3, "sample mean {mean}");
    }
}
