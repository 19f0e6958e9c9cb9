//! The completed nonlinear least-squares solution.
//!
//! Conventions follow the usual solver output:
//! - `residuals[i] = model(t_i) - y_i` at the optimum
//! - `jacobian[(i, j)] = ∂ residuals[i] / ∂ params[j]`, evaluated at `params`
//!
//! A `FitResult` is treated as immutable input; both estimators only read it.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Outcome of a nonlinear least-squares solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// Point estimate, `p` values.
    pub params: Vec<f64>,
    /// Residual vector at the optimum, `n` values.
    pub residuals: Vec<f64>,
    /// `n × p` Jacobian of the residuals at `params`.
    pub jacobian: DMatrix<f64>,
}

impl FitResult {
    /// Build a fit result, checking shapes and finiteness.
    pub fn new(params: Vec<f64>, residuals: Vec<f64>, jacobian: DMatrix<f64>) -> Result<Self> {
        let fit = Self {
            params,
            residuals,
            jacobian,
        };
        fit.validate()?;
        Ok(fit)
    }

    /// Assemble a fit result from a model, its Jacobian and the observations.
    ///
    /// Residuals are `model(points, params) - observed`. Since the observations
    /// do not depend on the parameters, the residual Jacobian equals the model
    /// Jacobian at the training points.
    pub fn from_model<F, G>(
        params: Vec<f64>,
        points: &[f64],
        observed: &[f64],
        model: F,
        model_jacobian: G,
    ) -> Result<Self>
    where
        F: Fn(&[f64], &[f64]) -> Vec<f64>,
        G: Fn(&[f64], &[f64]) -> DMatrix<f64>,
    {
        if points.len() != observed.len() {
            return Err(Error::invalid(format!(
                "points ({}) and observations ({}) differ in length",
                points.len(),
                observed.len()
            )));
        }

        let fitted = model(points, &params);
        if fitted.len() != points.len() {
            return Err(Error::invalid(format!(
                "model returned {} values for {} points",
                fitted.len(),
                points.len()
            )));
        }
        let residuals = fitted
            .iter()
            .zip(observed)
            .map(|(f, y)| f - y)
            .collect();
        let jacobian = model_jacobian(&params, points);

        Self::new(params, residuals, jacobian)
    }

    /// Number of observations `n`.
    pub fn n_obs(&self) -> usize {
        self.residuals.len()
    }

    /// Number of parameters `p`.
    pub fn n_params(&self) -> usize {
        self.params.len()
    }

    /// Residual sum of squares.
    pub fn rss(&self) -> f64 {
        self.residuals.iter().map(|r| r * r).sum()
    }

    /// Solver cost, `0.5 * RSS`.
    pub fn cost(&self) -> f64 {
        0.5 * self.rss()
    }

    /// Check shapes and finiteness.
    ///
    /// Degrees of freedom are checked separately by the covariance helper so
    /// that an underdetermined fit surfaces as `Error::InvalidFit`.
    pub fn validate(&self) -> Result<()> {
        let n = self.residuals.len();
        let p = self.params.len();
        if p == 0 {
            return Err(Error::invalid("fit has no parameters"));
        }
        if self.jacobian.nrows() != n || self.jacobian.ncols() != p {
            return Err(Error::invalid(format!(
                "Jacobian is {}x{} but fit has n={n} residuals and p={p} parameters",
                self.jacobian.nrows(),
                self.jacobian.ncols()
            )));
        }
        if self.params.iter().any(|v| !v.is_finite()) {
            return Err(Error::invalid("parameters contain non-finite values"));
        }
        if self.residuals.iter().any(|v| !v.is_finite()) {
            return Err(Error::invalid("residuals contain non-finite values"));
        }
        if self.jacobian.iter().any(|v| !v.is_finite()) {
            return Err(Error::invalid("Jacobian contains non-finite values"));
        }
        Ok(())
    }
}
