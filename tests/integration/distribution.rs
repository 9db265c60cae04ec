//! Integration test: load distribution.
//!
//! 1000 nodes with 100 virtual positions each receive 100 000 random keys.
//! Per-node key counts should cluster tightly around the mean.

use strand_integration_tests::{counts, owners, random_keys, ring_with_nodes, std_dev};

/// Standard deviation of keys per node stays below 20 (mean is 100).
#[test]
fn test_distributes_evenly() {
    let ring = ring_with_nodes(1000, 100);
    let keys = random_keys(100_000, 1);

    let owners = owners(&ring, &keys);
    let per_node: Vec<usize> = counts(&owners).into_values().collect();

    let sd = std_dev(&per_node);
    assert!(sd < 20.0, "standard deviation too high: {sd:.2}");
}

/// Every position was placed and every node received some keys.
#[test]
fn test_full_ring_populated() {
    let ring = ring_with_nodes(1000, 100);
    assert_eq!(ring.node_count(), 1000);
    // A handful of 32-bit collisions among 100k positions is expected.
    assert!(
        ring.position_count() > 99_900,
        "too many dropped replicas: {}",
        ring.position_count()
    );

    let keys = random_keys(100_000, 2);
    let distribution = ring.distribution(&keys).unwrap();
    assert_eq!(distribution.len(), 1000);
    assert!(distribution.values().all(|&c| c > 0), "a node received no keys");
    assert_eq!(distribution.values().sum::<usize>(), keys.len());
}

/// More virtual positions smooth the load.
#[test]
fn test_more_replicas_lower_spread() {
    let keys = random_keys(50_000, 3);

    let coarse = ring_with_nodes(100, 4);
    let fine = ring_with_nodes(100, 200);

    let coarse_sd = std_dev(&counts(&owners(&coarse, &keys)).into_values().collect::<Vec<_>>());
    let fine_sd = std_dev(&counts(&owners(&fine, &keys)).into_values().collect::<Vec<_>>());

    assert!(
        fine_sd < coarse_sd,
        "200 replicas ({fine_sd:.2}) should beat 4 replicas ({coarse_sd:.2})"
    );
}
