//! Plain-text reporting of interval results.

pub mod format;

pub use format::*;
