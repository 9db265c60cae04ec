//! Hash functions that place keys and replicas on the ring.

/// Label the default hasher is seeded with.
pub const DEFAULT_HASH_LABEL: &str = "consistent-hashring";

/// Maps a string onto a ring position.
///
/// Implementations must be deterministic for the lifetime of the ring: the
/// same input always yields the same `u32`. Output should be spread roughly
/// uniformly over the full `u32` range. No cryptographic strength is needed.
///
/// Any `Fn(&str) -> u32` is a `KeyHasher`, so tests and callers can inject a
/// closure directly.
pub trait KeyHasher {
    /// Hash `key` to a ring position.
    fn hash(&self, key: &str) -> u32;
}

impl<F> KeyHasher for F
where
    F: Fn(&str) -> u32,
{
    fn hash(&self, key: &str) -> u32 {
        self(key)
    }
}

/// Default hasher: BLAKE3 keyed by a label, truncated to 32 bits.
///
/// The 32-byte key is `blake3(label)`. Two hashers built from the same label
/// produce identical positions; different labels give unrelated rings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelHasher {
    label: String,
    key: [u8; 32],
}

impl LabelHasher {
    /// Create a hasher seeded with `label`.
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let key = blake3::hash(label.as_bytes()).into();
        Self { label, key }
    }

    /// The label this hasher was seeded with.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Default for LabelHasher {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_LABEL)
    }
}

impl KeyHasher for LabelHasher {
    fn hash(&self, key: &str) -> u32 {
        let hash = blake3::keyed_hash(&self.key, key.as_bytes());
        let b = hash.as_bytes();
        u32::from_le_bytes([b[0], b[1], b[2], b[3]])
    }
}
