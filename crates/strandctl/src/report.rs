//! Load statistics over per-node key counts.

use std::fmt;

use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Summary of how many keys each node received.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadStats {
    /// Number of nodes counted.
    pub nodes: usize,
    /// Total keys placed.
    pub keys: usize,
    /// Fewest keys on any node.
    pub min: usize,
    /// Most keys on any node.
    pub max: usize,
    /// Mean keys per node.
    pub mean: f64,
    /// Population standard deviation of keys per node.
    pub std_dev: f64,
}

impl LoadStats {
    /// Compute statistics from per-node counts. Returns `None` for no nodes.
    pub fn from_counts<I>(counts: I) -> Option<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        let counts: Vec<usize> = counts.into_iter().collect();
        let min = *counts.iter().min()?;
        let max = *counts.iter().max()?;
        let keys: usize = counts.iter().sum();
        let n = counts.len() as f64;
        let mean = keys as f64 / n;
        let variance = counts
            .iter()
            .map(|&c| (c as f64 - mean).powi(2))
            .sum::<f64>()
            / n;

        Some(Self {
            nodes: counts.len(),
            keys,
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
        })
    }
}

impl fmt::Display for LoadStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  nodes:   {}", self.nodes)?;
        writeln!(f, "  keys:    {}", self.keys)?;
        writeln!(f, "  min:     {}", self.min)?;
        writeln!(f, "  max:     {}", self.max)?;
        writeln!(f, "  mean:    {:.2}", self.mean)?;
        write!(f, "  std dev: {:.2}", self.std_dev)
    }
}

/// Node ids `node_0 .. node_{count-1}`.
pub fn node_ids(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("node_{i}")).collect()
}

/// `count` pseudo-random 26-character alphanumeric keys, reproducible from `seed`.
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
