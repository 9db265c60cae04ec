//! Consistent hash ring for key-to-node placement.
//!
//! A [`HashRing`] maps string keys onto a dynamic set of nodes so that adding
//! or removing a node only remaps the keys that node owned (or now owns).
//!
//! Each node is placed on a `u32` ring at several virtual positions, computed
//! as `hash("<node>_<i>")` for `i in 0..replicas`. A key is owned by the node
//! holding the first position strictly after `hash(key)`, wrapping around to
//! the smallest position when the key hashes past the end of the ring.
//!
//! Positions that collide with an existing one are dropped (and logged), so a
//! node may hold slightly fewer than `replicas` positions.
//!
//! The hash function is pluggable through [`KeyHasher`]; the default
//! [`LabelHasher`] is a BLAKE3 keyed hash truncated to 32 bits.

mod config;
mod error;
mod hasher;
mod ring;

pub use config::RingConfig;
pub use error::RingError;
pub use hasher::{DEFAULT_HASH_LABEL, KeyHasher, LabelHasher};
pub use ring::{DEFAULT_REPLICAS, HashRing, Position, ReplicaPositions};
