//! Parameter covariance from a completed least-squares fit.
//!
//! Under the usual linearization around the optimum:
//!
//! ```text
//! dof    = n - p
//! sigma2 = RSS / dof
//! Cov    = sigma2 · (J^T J)^{-1}
//! ```
//!
//! Implementation choices:
//! - Rank is checked on `J` itself via SVD before forming `J^T J`, since
//!   squaring the Jacobian squares its condition number and can hide exact
//!   redundancy behind rounding noise.
//! - The inverse is obtained by a Cholesky solve against the identity rather
//!   than an explicit inverse formula.

use log::{debug, warn};
use nalgebra::DMatrix;

use crate::domain::FitResult;
use crate::error::{Error, Result};

/// Cosine threshold above which two Jacobian columns are reported as parallel
/// in a singular-Jacobian diagnostic.
const PARALLEL_COS: f64 = 1.0 - 1e-10;

/// Noise variance and parameter covariance derived from a fit.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterCovariance {
    /// `p × p` symmetric covariance matrix.
    pub covariance: DMatrix<f64>,
    /// Residual degrees of freedom, `n - p`.
    pub dof: usize,
    /// Unbiased noise variance estimate, `RSS / dof`.
    pub sigma2: f64,
    /// Residual sum of squares.
    pub rss: f64,
}

impl ParameterCovariance {
    /// Compute the covariance of `fit`'s parameters.
    ///
    /// `rank_tolerance` is the relative singular-value cutoff for the rank
    /// test; `None` uses `max(n, p) * f64::EPSILON`.
    pub fn from_fit(fit: &FitResult, rank_tolerance: Option<f64>) -> Result<Self> {
        let n = fit.n_obs();
        let p = fit.n_params();
        if n <= p {
            return Err(Error::InvalidFit { n, p });
        }
        fit.validate()?;

        let dof = n - p;
        let rss = fit.rss();
        let sigma2 = rss / dof as f64;

        let jtj_inv = normal_matrix_inverse(&fit.jacobian, rank_tolerance)?;
        let mut covariance = jtj_inv * sigma2;
        symmetrize(&mut covariance);

        debug!("covariance: n={n} p={p} dof={dof} rss={rss:.6e} sigma2={sigma2:.6e}");

        Ok(Self {
            covariance,
            dof,
            sigma2,
            rss,
        })
    }

    pub fn n_params(&self) -> usize {
        self.covariance.nrows()
    }

    /// Standard error of each parameter, `sqrt(Cov[i][i])`.
    pub fn standard_errors(&self) -> Vec<f64> {
        let ses: Vec<f64> = self
            .covariance
            .diagonal()
            .iter()
            .map(|v| v.max(0.0).sqrt())
            .collect();

        for (i, se) in ses.iter().enumerate() {
            if *se == 0.0 {
                warn!("parameter {i} has zero standard error; its interval collapses to a point");
            }
        }
        ses
    }

    /// Quadratic form `g · Cov · g^T` for a gradient row `g` of length `p`.
    ///
    /// Rounding can push the result slightly below zero for a PSD matrix; it is
    /// clamped at zero.
    pub fn quadratic_form(&self, gradient: &[f64]) -> f64 {
        let p = self.n_params();
        debug_assert_eq!(gradient.len(), p);

        let mut acc = 0.0;
        for i in 0..p {
            let gi = gradient[i];
            if gi == 0.0 {
                continue;
            }
            let mut row = 0.0;
            for j in 0..p {
                row += self.covariance[(i, j)] * gradient[j];
            }
            acc += gi * row;
        }
        acc.max(0.0)
    }
}

/// Invert `J^T J`, failing with diagnostics if `J` is rank deficient.
///
/// The rank test on `J` and the Cholesky factorization of `J^T J` are the only
/// rejection criteria; zero and parallel columns are reported as context.
pub fn normal_matrix_inverse(jacobian: &DMatrix<f64>, rank_tolerance: Option<f64>) -> Result<DMatrix<f64>> {
    let (n, p) = jacobian.shape();
    if p == 0 {
        return Err(Error::invalid("Jacobian has no columns"));
    }

    let rank = numerical_rank(jacobian, rank_tolerance)?;
    if rank < p {
        return Err(singular_error(jacobian, rank));
    }

    let jtj = jacobian.transpose() * jacobian;
    let Some(chol) = jtj.cholesky() else {
        debug!("Cholesky of J^T J failed for n={n} p={p} despite full SVD rank");
        return Err(singular_error(jacobian, rank));
    };

    let inv = chol.solve(&DMatrix::identity(p, p));
    if inv.iter().any(|v| !v.is_finite()) {
        return Err(singular_error(jacobian, rank));
    }
    Ok(inv)
}

/// Count singular values above `tol * s_max`.
///
/// `rank_tolerance` must be finite and non-negative; `None` uses
/// `max(n, p) * f64::EPSILON`.
pub fn numerical_rank(jacobian: &DMatrix<f64>, rank_tolerance: Option<f64>) -> Result<usize> {
    let (n, p) = jacobian.shape();
    let tol = match rank_tolerance {
        Some(tol) if tol.is_finite() && tol >= 0.0 => tol,
        Some(tol) => {
            return Err(Error::invalid(format!(
                "rank tolerance must be finite and >= 0, got {tol}"
            )));
        }
        None => n.max(p) as f64 * f64::EPSILON,
    };

    let sv = jacobian.singular_values();
    let s_max = sv.iter().copied().fold(0.0_f64, f64::max);
    if s_max <= 0.0 {
        return Ok(0);
    }
    Ok(sv.iter().filter(|&&s| s > tol * s_max).count())
}

#[derive(Debug)]
struct DegenerateColumns {
    zero: Vec<usize>,
    parallel: Vec<(usize, usize)>,
}

/// Zero and mutually parallel Jacobian columns.
fn degenerate_columns(jacobian: &DMatrix<f64>) -> DegenerateColumns {
    let p = jacobian.ncols();
    let norms: Vec<f64> = jacobian.column_iter().map(|c| c.norm()).collect();

    let zero: Vec<usize> = norms
        .iter()
        .enumerate()
        .filter_map(|(j, &nrm)| (nrm == 0.0).then_some(j))
        .collect();

    let mut parallel = Vec::new();
    for a in 0..p {
        for b in (a + 1)..p {
            if norms[a] == 0.0 || norms[b] == 0.0 {
                continue;
            }
            let cos = jacobian.column(a).dot(&jacobian.column(b)) / (norms[a] * norms[b]);
            if cos.abs() >= PARALLEL_COS {
                parallel.push((a, b));
            }
        }
    }

    DegenerateColumns { zero, parallel }
}

fn singular_error(jacobian: &DMatrix<f64>, rank: usize) -> Error {
    let columns = degenerate_columns(jacobian);
    Error::SingularJacobian {
        rank,
        p: jacobian.ncols(),
        zero_columns: columns.zero,
        duplicate_columns: columns.parallel,
    }
}

fn symmetrize(m: &mut DMatrix<f64>) {
    let p = m.nrows();
    for i in 0..p {
        for j in (i + 1)..p {
            let avg = 0.5 * (m[(i, j)] + m[(j, i)]);
            m[(i, j)] = avg;
            m[(j, i)] = avg;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Straight line `y = a + b x` on x = 0..n with the given residuals.
    fn line_fit(residuals: Vec<f64>) -> FitResult {
        let n = residuals.len();
        let mut jac = DMatrix::zeros(n, 2);
        for i in 0..n {
            jac[(i, 0)] = 1.0;
            jac[(i, 1)] = i as f64;
        }
        FitResult::new(vec![1.0, 2.0], residuals, jac).unwrap()
    }

    #[test]
    fn matches_closed_form_for_line() {
        // x = 0,1,2,3: sum x = 6, sum x^2 = 14, det(J^T J) = 4*14 - 36 = 20.
        let fit = line_fit(vec![0.1, -0.2, 0.2, -0.1]);
        let cov = ParameterCovariance::from_fit(&fit, None).unwrap();

        assert_eq!(cov.dof, 2);
        assert_relative_eq!(cov.rss, 0.1, epsilon = 1e-12);
        assert_relative_eq!(cov.sigma2, 0.05, epsilon = 1e-12);

        let s2 = cov.sigma2;
        assert_relative_eq!(cov.covariance[(0, 0)], s2 * 14.0 / 20.0, epsilon = 1e-12);
        assert_relative_eq!(cov.covariance[(1, 1)], s2 * 4.0 / 20.0, epsilon = 1e-12);
        assert_relative_eq!(cov.covariance[(0, 1)], -s2 * 6.0 / 20.0, epsilon = 1e-12);
        assert_eq!(cov.covariance[(0, 1)], cov.covariance[(1, 0)]);
    }

    #[test]
    fn zero_dof_is_invalid_fit() {
        let fit = line_fit(vec![0.0, 0.0]);
        let err = ParameterCovariance::from_fit(&fit, None).unwrap_err();
        assert_eq!(err, Error::InvalidFit { n: 2, p: 2 });
    }

    #[test]
    fn duplicate_columns_are_singular() {
        let n = 6;
        let mut jac = DMatrix::zeros(n, 3);
        for i in 0..n {
            let x = i as f64 * 0.5;
            jac[(i, 0)] = 1.0;
            jac[(i, 1)] = x.exp();
            jac[(i, 2)] = x.exp();
        }
        let fit = FitResult::new(vec![0.0; 3], vec![0.1; n], jac).unwrap();

        match ParameterCovariance::from_fit(&fit, None).unwrap_err() {
            Error::SingularJacobian {
                rank,
                p,
                zero_columns,
                duplicate_columns,
            } => {
                assert_eq!(p, 3);
                assert_eq!(rank, 2);
                assert!(zero_columns.is_empty());
                assert_eq!(duplicate_columns, vec![(1, 2)]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn zero_column_is_reported() {
        let n = 5;
        let mut jac = DMatrix::zeros(n, 2);
        for i in 0..n {
            jac[(i, 0)] = 1.0;
        }
        let fit = FitResult::new(vec![0.0; 2], vec![0.1; n], jac).unwrap();

        match ParameterCovariance::from_fit(&fit, None).unwrap_err() {
            Error::SingularJacobian { zero_columns, .. } => assert_eq!(zero_columns, vec![1]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    /// Line with a large x offset: nearly parallel columns but well posed.
    fn offset_line_fit() -> FitResult {
        let n = 10;
        let mut jac = DMatrix::zeros(n, 2);
        let mut residuals = Vec::with_capacity(n);
        for i in 0..n {
            jac[(i, 0)] = 1.0;
            jac[(i, 1)] = 3e5 + i as f64;
            residuals.push(if i % 2 == 0 { 0.1 } else { -0.1 });
        }
        FitResult::new(vec![1.0, 2.0], residuals, jac).unwrap()
    }

    #[test]
    fn large_offset_line_is_not_singular() {
        // Sxx = 82.5 for x = 3e5 + 0..9, sigma2 = 10 * 0.01 / 8.
        let cov = ParameterCovariance::from_fit(&offset_line_fit(), None).unwrap();
        assert_relative_eq!(cov.covariance[(1, 1)], 0.0125 / 82.5, max_relative = 1e-4);
    }

    #[test]
    fn custom_rank_tolerance_is_honoured() {
        let fit = offset_line_fit();
        assert!(ParameterCovariance::from_fit(&fit, Some(1e-13)).is_ok());

        match ParameterCovariance::from_fit(&fit, Some(1e-4)).unwrap_err() {
            Error::SingularJacobian {
                rank,
                p,
                duplicate_columns,
                ..
            } => {
                assert_eq!((rank, p), (1, 2));
                assert_eq!(duplicate_columns, vec![(0, 1)]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_rank_tolerance_is_rejected() {
        let fit = offset_line_fit();
        for tol in [f64::NAN, -1e-8, f64::INFINITY] {
            assert!(matches!(
                ParameterCovariance::from_fit(&fit, Some(tol)),
                Err(Error::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn quadratic_form_matches_matrix_product() {
        let fit = line_fit(vec![0.3, -0.1, 0.2, -0.4, 0.1]);
        let cov = ParameterCovariance::from_fit(&fit, None).unwrap();

        let g = [1.0, 2.5];
        let gv = nalgebra::DVector::from_row_slice(&g);
        let expected = (gv.transpose() * &cov.covariance * &gv)[(0, 0)];
        assert_relative_eq!(cov.quadratic_form(&g), expected, epsilon = 1e-14);
    }

    #[test]
    fn zero_residuals_give_zero_covariance() {
        let fit = line_fit(vec![0.0; 5]);
        let cov = ParameterCovariance::from_fit(&fit, None).unwrap();
        assert_eq!(cov.sigma2, 0.0);
        assert!(cov.standard_errors().iter().all(|&se| se == 0.0));
    }
}
