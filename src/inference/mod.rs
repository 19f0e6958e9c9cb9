//! Interval estimators built on the shared covariance helper.
//!
//! - `confidence`: per-parameter confidence intervals
//! - `prediction`: delta-method bands on model predictions

pub mod confidence;
pub mod prediction;

pub use confidence::*;
pub use prediction::*;
