//! Ring configuration.

use serde::Deserialize;

use crate::error::RingError;
use crate::hasher::DEFAULT_HASH_LABEL;
use crate::ring::DEFAULT_REPLICAS;

/// Parameters fixed at ring construction.
///
/// Deserializes from a `[ring]` TOML table; missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Virtual positions computed per node.
    pub replicas: usize,
    /// Label the default hasher is seeded with.
    pub hash_label: String,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            replicas: DEFAULT_REPLICAS,
            hash_label: DEFAULT_HASH_LABEL.to_string(),
        }
    }
}

impl RingConfig {
    /// Reject configurations that cannot place any node.
    pub fn validate(&self) -> Result<(), RingError> {
        if self.replicas == 0 {
            return Err(RingError::InvalidConfig(
                "replicas must be at least 1".to_string(),
            ));
        }
        if self.hash_label.is_empty() {
            return Err(RingError::InvalidConfig(
                "hash_label must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
