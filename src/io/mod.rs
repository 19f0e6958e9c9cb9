//! Input/output helpers.
//!
//! - fit result and interval JSON read/write (`json`)

pub mod json;

pub use json::*;
