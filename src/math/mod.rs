//! Numerical building blocks: parameter covariance and Student-t quantiles.

pub mod covariance;
pub mod quantile;

pub use covariance::*;
pub use quantile::*;
