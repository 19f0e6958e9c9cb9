//! Example model collaborators.
//!
//! The estimators only need a model and its parameter Jacobian as plain
//! functions; the models here are small, pure functions so they can be
//! passed straight to `prediction_intervals` and `FitResult::from_model`.

pub mod exponential;

/// `n` evenly spaced points from `min` to `max` inclusive.
///
/// Returns `[min]` for `n == 1` and an empty grid for `n == 0`.
pub fn linspace(min: f64, max: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (n as f64 - 1.0);
            (0..n)
                .map(|i| if i == n - 1 { max } else { min + step * i as f64 })
                .collect()
        }
    }
}
