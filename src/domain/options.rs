//! Estimator configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Two-sided probability mass an interval should enclose, strictly in `(0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ConfidenceLevel(f64);

impl ConfidenceLevel {
    pub const P90: Self = Self(0.90);
    pub const P95: Self = Self(0.95);
    pub const P99: Self = Self(0.99);

    /// Validate a confidence level.
    pub fn new(level: f64) -> Result<Self> {
        if level.is_finite() && level > 0.0 && level < 1.0 {
            Ok(Self(level))
        } else {
            Err(Error::invalid(format!(
                "confidence level must lie strictly between 0 and 1, got {level}"
            )))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Cumulative probability of the upper critical value, `(1 + level) / 2`.
    pub fn upper_tail_probability(self) -> f64 {
        0.5 * (1.0 + self.0)
    }

    /// Level as a percentage label, e.g. `"95%"` or `"97.5%"`.
    pub fn percent_label(self) -> String {
        let pct = format!("{:.4}", self.0 * 100.0);
        let pct = pct.trim_end_matches('0').trim_end_matches('.');
        format!("{pct}%")
    }
}

impl Default for ConfidenceLevel {
    fn default() -> Self {
        Self::P95
    }
}

impl TryFrom<f64> for ConfidenceLevel {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ConfidenceLevel> for f64 {
    fn from(level: ConfidenceLevel) -> Self {
        level.0
    }
}

/// Which variance the prediction band propagates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandKind {
    /// Uncertainty of the fitted mean curve only: `var_k = J_k Cov J_k^T`.
    #[default]
    Mean,
    /// Uncertainty of a new noisy observation: `var_k + sigma2`.
    Observation,
}

/// Options shared by both estimators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalOptions {
    pub level: ConfidenceLevel,
    pub band: BandKind,
    /// Relative singular-value cutoff used for the Jacobian rank test.
    ///
    /// `None` uses `max(n, p) * f64::EPSILON`.
    pub rank_tolerance: Option<f64>,
}

impl Default for IntervalOptions {
    fn default() -> Self {
        Self {
            level: ConfidenceLevel::default(),
            band: BandKind::Mean,
            rank_tolerance: None,
        }
    }
}

impl IntervalOptions {
    pub fn with_level(level: f64) -> Result<Self> {
        Ok(Self {
            level: ConfidenceLevel::new(level)?,
            ..Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_bounds_are_exclusive() {
        assert!(ConfidenceLevel::new(0.0).is_err());
        assert!(ConfidenceLevel::new(1.0).is_err());
        assert!(ConfidenceLevel::new(f64::NAN).is_err());
        assert!(ConfidenceLevel::new(1e-9).is_ok());
        assert!(ConfidenceLevel::new(0.999).is_ok());
    }

    #[test]
    fn default_level_is_95() {
        assert_eq!(ConfidenceLevel::default().value(), 0.95);
        assert_eq!(IntervalOptions::default().level, ConfidenceLevel::P95);
        assert_eq!(IntervalOptions::default().band, BandKind::Mean);
    }

    #[test]
    fn upper_tail_probability() {
        let level = ConfidenceLevel::new(0.9).unwrap();
        assert!((level.upper_tail_probability() - 0.95).abs() < 1e-15);
    }

    #[test]
    fn percent_label() {
        assert_eq!(ConfidenceLevel::P95.percent_label(), "95%");
        assert_eq!(ConfidenceLevel::new(0.975).unwrap().percent_label(), "97.5%");
    }
}
