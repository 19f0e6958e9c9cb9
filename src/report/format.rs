//! Formatted terminal output.
//!
//! Formatting is kept apart from the estimators so the numerical code stays
//! free of presentation concerns and output changes stay localized.

use crate::domain::{IntervalBounds, PredictionBand};
use crate::error::{Error, Result};

/// One line per parameter:
///
/// ```text
/// beta[0]:   0.500, 95% CI: [  0.412,   0.588]
/// ```
pub fn format_parameter_intervals(bounds: &IntervalBounds) -> String {
    let label = bounds.level.percent_label();
    let mut out = String::new();
    for (i, iv) in bounds.iter().enumerate() {
        out.push_str(&format!(
            "beta[{i}]: {:>7.3}, {label} CI: [{:>7.3}, {:>7.3}]\n",
            iv.estimate, iv.lower, iv.upper
        ));
    }
    out
}

/// Table of `point, value, lower, upper` rows for a prediction band.
pub fn format_prediction_band(points: &[f64], band: &PredictionBand) -> Result<String> {
    if points.len() != band.len() {
        return Err(Error::invalid(format!(
            "{} points but band has {} values",
            points.len(),
            band.len()
        )));
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{} {:?} band ({} points)\n",
        band.level.percent_label(),
        band.kind,
        band.len()
    ));
    out.push_str(&format!(
        "{:>10}  {:>12}  {:>12}  {:>12}\n",
        "x", "value", "lower", "upper"
    ));
    for ((x, v), d) in points.iter().zip(&band.values).zip(&band.deltas) {
        out.push_str(&format!(
            "{:>10.4}  {:>12.5}  {:>12.5}  {:>12.5}\n",
            x,
            v,
            v - d,
            v + d
        ));
    }
    Ok(out)
}
