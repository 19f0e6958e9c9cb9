//! `nls-intervals` library crate.
//!
//! Turns a completed nonlinear least-squares solution (parameters, residuals,
//! residual Jacobian) into calibrated uncertainty estimates:
//!
//! - per-parameter confidence intervals (`confidence_interval`)
//! - delta-method bands on model predictions (`prediction_intervals`)
//!
//! The solver itself is an external collaborator; anything that can produce a
//! [`FitResult`] works.

pub mod data;
pub mod domain;
pub mod error;
pub mod inference;
pub mod io;
pub mod math;
pub mod models;
pub mod report;

pub use domain::{
    BandKind, ConfidenceLevel, FitResult, IntervalBounds, IntervalOptions, ParameterInterval,
    PredictionBand,
};
pub use error::{Error, Result};
pub use inference::{
    confidence_interval, confidence_interval_with_options, prediction_intervals,
    prediction_intervals_with_options,
};
pub use math::ParameterCovariance;
