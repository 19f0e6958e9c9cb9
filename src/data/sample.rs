//! Synthetic samples from the offset exponential model with injected outliers.
//!
//! Each observation is `a + b·exp(c·t) + noise·z` with `z ~ N(0, 1)`. A number
//! of indices (drawn uniformly, with replacement) have their error term
//! multiplied by [`OUTLIER_FACTOR`], which is what makes robust fitting worth
//! testing against.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::error::{Error, Result};
use crate::models::exponential;

/// Error multiplier applied at outlier indices.
pub const OUTLIER_FACTOR: f64 = 10.0;

/// Noise and outlier settings for sample generation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleOptions {
    /// Standard deviation of the Gaussian noise.
    pub noise: f64,
    /// Number of outlier draws; an index may be drawn more than once.
    pub n_outliers: usize,
    /// RNG seed. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

/// Generate observations of `a + b·exp(c·t)` at each `t`.
pub fn generate_exponential(t: &[f64], a: f64, b: f64, c: f64, opts: &SampleOptions) -> Result<Vec<f64>> {
    if !(opts.noise.is_finite() && opts.noise >= 0.0) {
        return Err(Error::invalid(format!("noise must be finite and >= 0, got {}", opts.noise)));
    }
    if opts.n_outliers > 0 && t.is_empty() {
        return Err(Error::invalid("cannot place outliers in an empty sample"));
    }

    let mut rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let normal = Normal::new(0.0, 1.0).map_err(|e| Error::Distribution(e.to_string()))?;

    let mut error: Vec<f64> = (0..t.len()).map(|_| opts.noise * normal.sample(&mut rng)).collect();
    for _ in 0..opts.n_outliers {
        let idx = rng.gen_range(0..t.len());
        error[idx] *= OUTLIER_FACTOR;
    }

    let params = [a, b, c];
    Ok(t
        .iter()
        .zip(error)
        .map(|(&ti, e)| exponential::predict(ti, &params) + e)
        .collect())
}
