//! Two-sided Student-t critical values.
//!
//! With `T ~ t(ν)`, `T² / (ν + T²) ~ Beta(1/2, ν/2)`, so
//!
//! ```text
//! P(|T| <= t) = I_x(1/2, ν/2),   x = t² / (ν + t²)
//! ```
//!
//! Inverting the regularized incomplete beta at `level` directly keeps full
//! relative precision for small levels, where `(1 + level) / 2` would round
//! onto 0.5. Below [`SERIES_LEVEL`] the first-order expansion
//! `level ≈ 2 f(0) t` is used instead, with `f` the t density.

use statrs::function::beta::inv_beta_reg;
use statrs::function::gamma::ln_gamma;

use crate::domain::ConfidenceLevel;
use crate::error::{Error, Result};

/// Levels below this use the small-`t` expansion; its relative error is `O(t²)`.
const SERIES_LEVEL: f64 = 1e-4;

/// Critical value `t*` with `P(|T| <= t*) = level` for `T ~ t(dof)`.
///
/// Equivalent to the quantile at cumulative probability `(1 + level) / 2`.
pub fn t_critical(dof: usize, level: ConfidenceLevel) -> Result<f64> {
    if dof == 0 {
        return Err(Error::invalid("Student-t critical value needs dof > 0"));
    }

    let nu = dof as f64;
    let level = level.value();

    let t = if level < SERIES_LEVEL {
        level / (2.0 * density_at_zero(nu))
    } else {
        let x = inv_beta_reg(0.5, 0.5 * nu, level);
        (nu * x / (1.0 - x)).sqrt()
    };

    if !t.is_finite() {
        return Err(Error::Distribution(format!(
            "non-finite t quantile for dof={dof}, level={level}"
        )));
    }
    Ok(t.max(0.0))
}

/// Student-t density at zero, `Γ((ν+1)/2) / (sqrt(νπ) Γ(ν/2))`.
fn density_at_zero(nu: f64) -> f64 {
    (ln_gamma(0.5 * (nu + 1.0)) - ln_gamma(0.5 * nu)).exp() / (nu * std::f64::consts::PI).sqrt()
}
