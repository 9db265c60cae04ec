//! Consistent hash ring implementation.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use strand_bisect::{insert_right, remove_sorted, search_right};
use tracing::{debug, warn};

use crate::config::RingConfig;
use crate::error::RingError;
use crate::hasher::{KeyHasher, LabelHasher};

/// A point on the ring.
pub type Position = u32;

/// Virtual positions computed per node unless configured otherwise.
pub const DEFAULT_REPLICAS: usize = 100;

/// Consistent hash ring with virtual replica positions.
///
/// Three structures are kept in lockstep:
/// - `positions`: every occupied position, strictly ascending.
/// - `owners`: position -> owning node, one entry per element of `positions`.
/// - `node_positions`: node -> the positions it actually holds. A node is on
///   the ring iff it has an entry here, even an empty one (all of its
///   replicas collided).
///
/// Mutation takes `&mut self` and lookups take `&self`; callers sharing a
/// ring across threads wrap it in a lock themselves.
#[derive(Debug, Clone)]
pub struct HashRing<H = LabelHasher> {
    positions: Vec<Position>,
    owners: HashMap<Position, Arc<str>>,
    node_positions: HashMap<Arc<str>, Vec<Position>>,
    hasher: H,
    replicas: usize,
}

impl HashRing<LabelHasher> {
    /// Create an empty ring with the default hasher and replica count.
    pub fn new() -> Self {
        Self::with_hasher(LabelHasher::default())
    }

    /// Create an empty ring from a validated configuration.
    pub fn with_config(config: &RingConfig) -> Result<Self, RingError> {
        config.validate()?;
        Ok(Self::with_hasher_and_replicas(
            LabelHasher::new(config.hash_label.clone()),
            config.replicas,
        ))
    }
}

impl Default for HashRing<LabelHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: KeyHasher> HashRing<H> {
    /// Create an empty ring using `hasher` and the default replica count.
    pub fn with_hasher(hasher: H) -> Self {
        Self::with_hasher_and_replicas(hasher, DEFAULT_REPLICAS)
    }

    /// Create an empty ring using `hasher`, placing up to `replicas`
    /// positions per node.
    ///
    /// With `replicas == 0` nodes are tracked but never hold a position.
    pub fn with_hasher_and_replicas(hasher: H, replicas: usize) -> Self {
        Self {
            positions: Vec::new(),
            owners: HashMap::new(),
            node_positions: HashMap::new(),
            hasher,
            replicas,
        }
    }

    /// Candidate positions for `node`.
    ///
    /// If the node already holds positions, those are replayed as recorded.
    /// Otherwise `hash("<node>_<i>")` is computed lazily for each
    /// `i in 0..replicas`.
    pub fn replica_positions<'a>(&'a self, node: &'a str) -> ReplicaPositions<'a, H> {
        match self.node_positions.get(node) {
            Some(recorded) if !recorded.is_empty() => ReplicaPositions::Recorded(recorded.iter()),
            _ => ReplicaPositions::Computed {
                hasher: &self.hasher,
                node,
                next: 0,
                count: self.replicas,
            },
        }
    }

    /// Place `node` on the ring.
    ///
    /// Each replica position already owned by some node (including an earlier
    /// replica of this one) is skipped with a warning, so the node may end up
    /// with fewer than `replicas` positions, or none at all. It is tracked
    /// either way.
    pub fn add_node(&mut self, node: &str) -> Result<(), RingError> {
        if self.node_positions.contains_key(node) {
            return Err(RingError::DuplicateNode(node.to_string()));
        }

        let candidates: Vec<Position> = self.replica_positions(node).collect();
        let node: Arc<str> = Arc::from(node);
        let mut placed = Vec::with_capacity(candidates.len());

        for position in candidates {
            match self.owners.entry(position) {
                Entry::Occupied(existing) => {
                    warn!(
                        node = %node,
                        position,
                        owner = %existing.get(),
                        "replica position collides, skipping"
                    );
                }
                Entry::Vacant(slot) => {
                    slot.insert(Arc::clone(&node));
                    insert_right(&mut self.positions, position);
                    placed.push(position);
                }
            }
        }

        debug!(
            node = %node,
            placed = placed.len(),
            skipped = self.replicas.saturating_sub(placed.len()),
            "added node to ring"
        );
        self.node_positions.insert(node, placed);
        Ok(())
    }

    /// Take `node` and every position it holds off the ring.
    ///
    /// Keys owned by other nodes keep their owner.
    pub fn remove_node(&mut self, node: &str) -> Result<(), RingError> {
        let Some(held) = self.node_positions.remove(node) else {
            return Err(RingError::UnknownNode(node.to_string()));
        };

        for position in &held {
            self.owners.remove(position);
            let removed = remove_sorted(&mut self.positions, position);
            debug_assert!(removed.is_some(), "position {position} missing from ring");
        }

        debug!(node = %node, removed = held.len(), "removed node from ring");
        Ok(())
    }

    /// The node owning `key`.
    ///
    /// That is the owner of the first position strictly greater than
    /// `hash(key)`, or of the smallest position if `hash(key)` is at or past
    /// the largest one.
    pub fn lookup(&self, key: &str) -> Result<&str, RingError> {
        let idx = self.successor_index(key)?;
        Ok(self.owner_at(idx))
    }

    /// Up to `count` distinct nodes met walking clockwise from `key`.
    ///
    /// The first entry is always [`lookup`](Self::lookup)'s answer. Fewer than
    /// `count` nodes are returned when the ring holds fewer distinct owners.
    pub fn lookup_n(&self, key: &str, count: usize) -> Result<Vec<&str>, RingError> {
        let start = self.successor_index(key)?;
        let mut nodes: Vec<&str> = Vec::with_capacity(count.min(self.node_positions.len()));
        if count == 0 {
            return Ok(nodes);
        }

        let after = self.positions[start..].iter();
        let before = self.positions[..start].iter();
        for position in after.chain(before) {
            let owner = &*self.owners[position];
            if !nodes.contains(&owner) {
                nodes.push(owner);
                if nodes.len() == count {
                    break;
                }
            }
        }

        Ok(nodes)
    }

    /// Count how many of `keys` each node owns.
    ///
    /// Every tracked node appears in the result, with zero if it owns none of
    /// the keys.
    pub fn distribution<I, K>(&self, keys: I) -> Result<HashMap<&str, usize>, RingError>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        if self.positions.is_empty() {
            return Err(RingError::EmptyRing);
        }

        let mut counts: HashMap<&str, usize> = self.nodes().map(|n| (n, 0)).collect();
        for key in keys {
            let owner = self.lookup(key.as_ref())?;
            *counts.entry(owner).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// The node holding exactly `position`, if any.
    pub fn owner_of(&self, position: Position) -> Option<&str> {
        self.owners.get(&position).map(|n| &**n)
    }

    /// The positions `node` holds, in the order they were placed.
    pub fn positions_of(&self, node: &str) -> Option<&[Position]> {
        self.node_positions.get(node).map(Vec::as_slice)
    }

    /// Whether `node` is on the ring (possibly with zero positions).
    pub fn contains_node(&self, node: &str) -> bool {
        self.node_positions.contains_key(node)
    }

    /// Number of tracked nodes.
    pub fn node_count(&self) -> usize {
        self.node_positions.len()
    }

    /// Number of occupied positions.
    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    /// Whether the ring has no positions (lookups would fail).
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Replica positions computed per node.
    pub fn replica_count(&self) -> usize {
        self.replicas
    }

    /// Tracked node ids, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.node_positions.keys().map(|n| &**n)
    }

    /// All occupied positions, ascending.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// `(position, owner)` pairs in ring order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &str)> {
        self.positions
            .iter()
            .map(|p| (*p, &*self.owners[p]))
    }

    /// The hasher placing keys and replicas.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Index into `positions` of the first position after `hash(key)`, wrapped.
    fn successor_index(&self, key: &str) -> Result<usize, RingError> {
        if self.positions.is_empty() {
            return Err(RingError::EmptyRing);
        }
        let hash = self.hasher.hash(key);
        let idx = search_right(&self.positions, &hash);
        Ok(if idx == self.positions.len() { 0 } else { idx })
    }

    /// Owner of `positions[idx]`. Every ring position has an owner.
    fn owner_at(&self, idx: usize) -> &str {
        &self.owners[&self.positions[idx]]
    }
}

/// Iterator over a node's candidate ring positions.
///
/// Returned by [`HashRing::replica_positions`]. Finite: yields at most the
/// ring's replica count.
#[derive(Debug, Clone)]
pub enum ReplicaPositions<'a, H> {
    /// Replays positions the node already holds.
    Recorded(std::slice::Iter<'a, Position>),
    /// Hashes `"<node>_<i>"` for `i` in `next..count`.
    Computed {
        /// Hasher used for each replica.
        hasher: &'a H,
        /// Node being placed.
        node: &'a str,
        /// Next replica index.
        next: usize,
        /// Replica count.
        count: usize,
    },
}

impl<H: KeyHasher> Iterator for ReplicaPositions<'_, H> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        match self {
            Self::Recorded(iter) => iter.next().copied(),
            Self::Computed {
                hasher,
                node,
                next,
                count,
            } => {
                if *next >= *count {
                    return None;
                }
                let position = KeyHasher::hash(*hasher, &format!("{node}_{next}"));
                *next += 1;
                Some(position)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self {
            Self::Recorded(iter) => iter.len(),
            Self::Computed { next, count, .. } => count.saturating_sub(*next),
        };
        (remaining, Some(remaining))
    }
}

impl<H: KeyHasher> ExactSizeIterator for ReplicaPositions<'_, H> {}
