//! Domain types shared by the estimators.
//!
//! This module defines:
//!
//! - the solver output consumed by everything else (`FitResult`)
//! - validated configuration (`ConfidenceLevel`, `BandKind`, `IntervalOptions`)
//! - estimator outputs (`IntervalBounds`, `PredictionBand`)

pub mod fit;
pub mod options;
pub mod output;

pub use fit::*;
pub use options::*;
pub use output::*;
