//! Offset exponential model `y(t) = b0 + b1 · exp(b2 · t)`.
//!
//! Parameter order is `[b0, b1, b2]`. The gradient with respect to the
//! parameters is `[1, e, b1 · t · e]` with `e = exp(b2 · t)`.

use nalgebra::DMatrix;

use crate::error::{Error, Result};

/// Number of parameters.
pub const N_PARAMS: usize = 3;

/// Evaluate the model at a single point.
///
/// # Panics
/// Panics if `b` has fewer than [`N_PARAMS`] entries.
pub fn predict(t: f64, b: &[f64]) -> f64 {
    b[0] + b[1] * (b[2] * t).exp()
}

/// Evaluate the model at every point.
///
/// Argument order matches the `model(points, params)` collaborator shape.
/// With the wrong number of parameters this returns an empty vector, which the
/// estimators reject as a length mismatch.
pub fn predict_all(points: &[f64], b: &[f64]) -> Vec<f64> {
    if b.len() != N_PARAMS {
        return Vec::new();
    }
    points.iter().map(|&t| predict(t, b)).collect()
}

/// Fill the parameter gradient at `t`.
///
/// # Panics
/// Panics if `out` or `b` has fewer than [`N_PARAMS`] entries.
pub fn fill_jacobian_row(t: f64, b: &[f64], out: &mut [f64]) {
    let e = (b[2] * t).exp();
    out[0] = 1.0;
    out[1] = e;
    out[2] = b[1] * t * e;
}

/// `m × 3` model Jacobian at `points`.
///
/// Argument order matches the `model_jacobian(params, points)` collaborator shape.
/// With the wrong number of parameters this returns a `0 × 3` matrix, which
/// the estimators reject as a shape mismatch.
pub fn jacobian(b: &[f64], points: &[f64]) -> DMatrix<f64> {
    if b.len() != N_PARAMS {
        return DMatrix::zeros(0, N_PARAMS);
    }
    let mut j = DMatrix::zeros(points.len(), N_PARAMS);
    let mut row = [0.0; N_PARAMS];
    for (k, &t) in points.iter().enumerate() {
        fill_jacobian_row(t, b, &mut row);
        for (c, v) in row.iter().enumerate() {
            j[(k, c)] = *v;
        }
    }
    j
}

/// Residuals `model(t_i) - y_i`.
pub fn residuals(b: &[f64], t: &[f64], y: &[f64]) -> Result<Vec<f64>> {
    check_params(b)?;
    if t.len() != y.len() {
        return Err(Error::invalid(format!(
            "t ({}) and y ({}) differ in length",
            t.len(),
            y.len()
        )));
    }
    Ok(t.iter().zip(y).map(|(&ti, &yi)| predict(ti, b) - yi).collect())
}

/// Jacobian of [`residuals`]; the observations drop out, so this is the model Jacobian.
pub fn residual_jacobian(b: &[f64], t: &[f64]) -> Result<DMatrix<f64>> {
    check_params(b)?;
    Ok(jacobian(b, t))
}

fn check_params(b: &[f64]) -> Result<()> {
    if b.len() != N_PARAMS {
        return Err(Error::invalid(format!(
            "exponential model takes {N_PARAMS} parameters, got {}",
            b.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn predict_at_origin_is_offset_plus_scale() {
        assert_relative_eq!(predict(0.0, &[0.5, 2.0, -1.0]), 2.5);
    }

    #[test]
    fn jacobian_matches_finite_differences() {
        let b = [0.5, 2.0, -1.0];
        let t = [0.0, 0.7, 3.0];
        let j = jacobian(&b, &t);
        let h = 1e-6;

        for (k, &tk) in t.iter().enumerate() {
            for c in 0..N_PARAMS {
                let mut up = b;
                let mut dn = b;
                up[c] += h;
                dn[c] -= h;
                let fd = (predict(tk, &up) - predict(tk, &dn)) / (2.0 * h);
                assert_relative_eq!(j[(k, c)], fd, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn residuals_are_model_minus_observed() {
        let b = [0.5, 2.0, -1.0];
        let t = [0.0, 1.0];
        let y = [2.0, 1.0];
        let r = residuals(&b, &t, &y).unwrap();
        assert_relative_eq!(r[0], 0.5);
        assert_relative_eq!(r[1], 0.5 + 2.0 * (-1.0_f64).exp() - 1.0);
    }

    #[test]
    fn collaborators_return_empty_for_wrong_param_count() {
        assert!(predict_all(&[0.0, 1.0], &[1.0, 2.0]).is_empty());
        assert_eq!(jacobian(&[1.0, 2.0], &[0.0, 1.0]).shape(), (0, N_PARAMS));
    }

    #[test]
    fn wrong_param_count_is_rejected() {
        assert!(residuals(&[1.0, 2.0], &[0.0], &[0.0]).is_err());
        assert!(residual_jacobian(&[1.0; 4], &[0.0]).is_err());
    }
}
