//! Shared helpers for strand integration tests.
//!
//! Provides ring builders over generated node ids, reproducible random keys,
//! and ownership snapshots for comparing placement before and after a
//! membership change.

use std::collections::HashMap;

use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strand_ring::{HashRing, KeyHasher, LabelHasher};

/// Node id for index `i`.
pub fn node_name(i: usize) -> String {
    format!("node_{i}")
}

/// Ring with the default hasher holding `node_0 .. node_{nodes-1}`.
pub fn ring_with_nodes(nodes: usize, replicas: usize) -> HashRing {
    let mut ring = HashRing::with_hasher_and_replicas(LabelHasher::default(), replicas);
    for i in 0..nodes {
        ring.add_node(&node_name(i)).unwrap();
    }
    ring
}

/// `count` random 26-character alphanumeric keys, reproducible from `seed`.
pub fn random_keys(count: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            (&mut rng)
                .sample_iter(Alphanumeric)
                .take(26)
                .map(char::from)
                .collect()
        })
        .collect()
}

/// Owner of every key, in key order.
pub fn owners<H: KeyHasher>(ring: &HashRing<H>, keys: &[String]) -> Vec<String> {
    keys.iter()
        .map(|k| ring.lookup(k).unwrap().to_string())
        .collect()
}

/// Keys per node for the given owners.
pub fn counts(owners: &[String]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for owner in owners {
        *counts.entry(owner.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Population standard deviation.
pub fn std_dev(values: &[usize]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<usize>() as f64 / n;
    let variance = values
        .iter()
        .map(|&v| (v as f64 - mean).powi(2))
        .sum::<f64>()
        / n;
    variance.sqrt()
}
