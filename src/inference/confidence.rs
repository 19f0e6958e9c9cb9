//! Per-parameter confidence intervals.
//!
//! For parameter `i` with standard error `se_i = sqrt(Cov[i][i])`:
//!
//! ```text
//! [params_i - t* se_i, params_i + t* se_i],   t* = t_{dof}^{-1}((1 + level) / 2)
//! ```

use crate::domain::{ConfidenceLevel, FitResult, IntervalBounds, IntervalOptions, ParameterInterval};
use crate::error::{Error, Result};
use crate::math::{ParameterCovariance, t_critical};

/// Confidence interval for each fitted parameter at `level`.
///
/// `level` must lie strictly in `(0, 1)`.
pub fn confidence_interval(fit: &FitResult, level: f64) -> Result<IntervalBounds> {
    let opts = IntervalOptions::with_level(level)?;
    confidence_interval_with_options(fit, &opts)
}

/// Like [`confidence_interval`] with explicit options.
pub fn confidence_interval_with_options(fit: &FitResult, opts: &IntervalOptions) -> Result<IntervalBounds> {
    let cov = ParameterCovariance::from_fit(fit, opts.rank_tolerance)?;
    intervals_from_covariance(&fit.params, &cov, opts.level)
}

/// Build intervals from a precomputed covariance.
///
/// Useful when the same fit is queried at several levels.
pub fn intervals_from_covariance(
    params: &[f64],
    cov: &ParameterCovariance,
    level: ConfidenceLevel,
) -> Result<IntervalBounds> {
    if params.len() != cov.n_params() {
        return Err(Error::invalid(format!(
            "{} parameters but covariance is {}x{}",
            params.len(),
            cov.n_params(),
            cov.n_params()
        )));
    }

    let t = t_critical(cov.dof, level)?;
    let intervals = params
        .iter()
        .zip(cov.standard_errors())
        .map(|(&estimate, se)| {
            let half = t * se;
            ParameterInterval {
                estimate,
                lower: estimate - half,
                upper: estimate + half,
            }
        })
        .collect();

    Ok(IntervalBounds { level, intervals })
}
