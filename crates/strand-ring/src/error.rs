//! Error types for ring operations.

/// Errors produced by [`HashRing`](crate::HashRing) operations.
///
/// Every failing call leaves the ring exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RingError {
    /// The node is already on the ring.
    #[error("node already present: {0}")]
    DuplicateNode(String),

    /// The node is not on the ring.
    #[error("node not present: {0}")]
    UnknownNode(String),

    /// A lookup was attempted on a ring with no positions.
    #[error("ring is empty")]
    EmptyRing,

    /// The ring configuration is unusable.
    #[error("invalid ring config: {0}")]
    InvalidConfig(String),
}
