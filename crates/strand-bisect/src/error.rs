//! Error types for insertion-point search.

/// Errors produced by the bounded search and insert functions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BisectError {
    /// The `[lo, hi)` window does not fit inside the sequence.
    ///
    /// Raised when `lo > hi` or `hi > len`.
    #[error("invalid search bounds: lo={lo}, hi={hi}, len={len}")]
    InvalidBound {
        /// Requested lower bound.
        lo: usize,
        /// Effective upper bound (the sequence length when none was given).
        hi: usize,
        /// Length of the searched sequence.
        len: usize,
    },
}
