//! Delta-method bands on model predictions.
//!
//! At each prediction point `k`, with `g_k` the gradient of the model output
//! with respect to the parameters:
//!
//! ```text
//! var_k   = g_k · Cov · g_k^T              (BandKind::Mean)
//! var_k   = g_k · Cov · g_k^T + sigma2     (BandKind::Observation)
//! delta_k = t* · sqrt(var_k)
//! ```
//!
//! Only the diagonal of `Jp · Cov · Jp^T` is evaluated; cross terms between
//! prediction points are never formed.

use nalgebra::DMatrix;
use rayon::prelude::*;

use crate::domain::{BandKind, FitResult, IntervalOptions, PredictionBand};
use crate::error::{Error, Result};
use crate::math::{ParameterCovariance, t_critical};

/// Predicted values and band half-widths at `points`.
///
/// - `model(points, params)` must return one value per point.
/// - `model_jacobian(params, points)` must return an `m × p` matrix whose row
///   `k` is the gradient of the model at `points[k]`.
///
/// `level` defaults to 0.95 when `None`. The band covers the fitted mean
/// curve ([`BandKind::Mean`]); use [`prediction_intervals_with_options`] with
/// [`BandKind::Observation`] to include the residual noise variance.
pub fn prediction_intervals<F, G>(
    model: F,
    model_jacobian: G,
    points: &[f64],
    fit: &FitResult,
    level: Option<f64>,
) -> Result<PredictionBand>
where
    F: Fn(&[f64], &[f64]) -> Vec<f64>,
    G: Fn(&[f64], &[f64]) -> DMatrix<f64>,
{
    let opts = match level {
        Some(level) => IntervalOptions::with_level(level)?,
        None => IntervalOptions::default(),
    };
    prediction_intervals_with_options(model, model_jacobian, points, fit, &opts)
}

/// Like [`prediction_intervals`] with explicit options.
pub fn prediction_intervals_with_options<F, G>(
    model: F,
    model_jacobian: G,
    points: &[f64],
    fit: &FitResult,
    opts: &IntervalOptions,
) -> Result<PredictionBand>
where
    F: Fn(&[f64], &[f64]) -> Vec<f64>,
    G: Fn(&[f64], &[f64]) -> DMatrix<f64>,
{
    let cov = ParameterCovariance::from_fit(fit, opts.rank_tolerance)?;

    let values = model(points, &fit.params);
    if values.len() != points.len() {
        return Err(Error::invalid(format!(
            "model returned {} values for {} prediction points",
            values.len(),
            points.len()
        )));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(Error::invalid("model returned non-finite predictions"));
    }

    let jp = model_jacobian(&fit.params, points);
    band_from_covariance(values, &jp, &cov, opts)
}

/// Build a band from predicted values, their parameter gradients, and a
/// precomputed covariance.
pub fn band_from_covariance(
    values: Vec<f64>,
    jp: &DMatrix<f64>,
    cov: &ParameterCovariance,
    opts: &IntervalOptions,
) -> Result<PredictionBand> {
    let m = values.len();
    let p = cov.n_params();
    if jp.nrows() != m || jp.ncols() != p {
        return Err(Error::invalid(format!(
            "model Jacobian is {}x{} but expected {m}x{p}",
            jp.nrows(),
            jp.ncols()
        )));
    }
    if jp.iter().any(|v| !v.is_finite()) {
        return Err(Error::invalid("model Jacobian contains non-finite values"));
    }

    let t = t_critical(cov.dof, opts.level)?;
    let noise = match opts.band {
        BandKind::Mean => 0.0,
        BandKind::Observation => cov.sigma2,
    };

    // Rows are independent, so the per-point quadratic forms parallelize
    // without changing results or order.
    let deltas: Vec<f64> = (0..m)
        .into_par_iter()
        .map(|k| {
            let gradient: Vec<f64> = jp.row(k).iter().copied().collect();
            let var = cov.quadratic_form(&gradient) + noise;
            t * var.sqrt()
        })
        .collect();

    Ok(PredictionBand {
        level: opts.level,
        kind: opts.band,
        values,
        deltas,
    })
}
