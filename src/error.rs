//! Error types for interval estimation.
//!
//! Every public operation validates its inputs up front and either returns a
//! complete result or one of these errors; no partial interval sequences are
//! ever produced.

/// Errors that can occur while deriving intervals from a fit.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Not enough observations to estimate the noise variance.
    ///
    /// Degrees of freedom are `n - p` and must be strictly positive.
    #[error("Fit has no residual degrees of freedom: n={n} observations, p={p} parameters")]
    InvalidFit {
        /// Number of residuals
        n: usize,
        /// Number of parameters
        p: usize,
    },

    /// The normal-equations matrix `J^T J` is not invertible.
    ///
    /// Usually a parameter has no influence on the residuals (zero column) or
    /// two parameters are redundant (parallel columns).
    #[error(
        "Normal matrix J^T J is not invertible (numerical rank {rank} of {p}); zero columns: {zero_columns:?}, parallel columns: {duplicate_columns:?}"
    )]
    SingularJacobian {
        /// Numerical rank of the Jacobian from its singular values
        rank: usize,
        /// Number of parameters
        p: usize,
        /// Columns that are identically zero
        zero_columns: Vec<usize>,
        /// Pairs of columns that are parallel to each other
        duplicate_columns: Vec<(usize, usize)>,
    },

    /// A caller-supplied argument is out of range or has the wrong shape.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A probability distribution could not be constructed.
    #[error("Distribution error: {0}")]
    Distribution(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(String),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// Result type for interval estimation.
pub type Result<T> = std::result::Result<T, Error>;
