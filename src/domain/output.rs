//! Estimator outputs.
//!
//! Both outputs are plain, serializable containers so they can be printed,
//! exported to JSON, or handed to a plotting layer.

use serde::{Deserialize, Serialize};

use crate::domain::{BandKind, ConfidenceLevel};

/// Interval for a single parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterInterval {
    pub estimate: f64,
    pub lower: f64,
    pub upper: f64,
}

impl ParameterInterval {
    pub fn half_width(&self) -> f64 {
        0.5 * (self.upper - self.lower)
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// Per-parameter intervals, in the same order as `FitResult::params`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalBounds {
    pub level: ConfidenceLevel,
    pub intervals: Vec<ParameterInterval>,
}

impl IntervalBounds {
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParameterInterval> {
        self.intervals.iter()
    }

    /// `(lower, upper)` pairs.
    pub fn as_pairs(&self) -> Vec<(f64, f64)> {
        self.intervals.iter().map(|i| (i.lower, i.upper)).collect()
    }
}

impl std::ops::Index<usize> for IntervalBounds {
    type Output = ParameterInterval;

    fn index(&self, index: usize) -> &Self::Output {
        &self.intervals[index]
    }
}

/// Predicted values and symmetric half-widths over a grid of points.
///
/// The band at point `k` is `[values[k] - deltas[k], values[k] + deltas[k]]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionBand {
    pub level: ConfidenceLevel,
    pub kind: BandKind,
    pub values: Vec<f64>,
    pub deltas: Vec<f64>,
}

impl PredictionBand {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn lower(&self) -> Vec<f64> {
        self.values.iter().zip(&self.deltas).map(|(v, d)| v - d).collect()
    }

    pub fn upper(&self) -> Vec<f64> {
        self.values.iter().zip(&self.deltas).map(|(v, d)| v + d).collect()
    }

    /// Split into `(values, deltas)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.values, self.deltas)
    }
}
