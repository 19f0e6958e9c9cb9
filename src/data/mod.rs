//! Synthetic data for exercising the estimators.

pub mod sample;

pub use sample::*;
