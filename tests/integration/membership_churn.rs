//! Integration test: membership churn.
//!
//! Adding or removing a node only remaps the keys that node owns.

use strand_integration_tests::{node_name, owners, random_keys, ring_with_nodes};

/// 1000 nodes, remove one: only its keys move.
#[test]
fn test_only_removed_node_keys_redistribute() {
    let mut ring = ring_with_nodes(1000, 100);
    let keys = random_keys(100_000, 11);
    let before = owners(&ring, &keys);

    let removed = node_name(50);
    ring.remove_node(&removed).unwrap();
    let after = owners(&ring, &keys);

    let mut moved = 0;
    for ((key, b), a) in keys.iter().zip(&before).zip(&after) {
        if *b != removed {
            assert_eq!(b, a, "key {key} moved from {b} to {a}");
        } else {
            assert_ne!(*a, removed, "key {key} still maps to the removed node");
            moved += 1;
        }
    }
    assert!(moved > 0, "the removed node owned no keys");
}

/// Removing a node then adding it back restores every key's owner.
#[test]
fn test_remove_then_readd_restores_placement() {
    let mut ring = ring_with_nodes(200, 100);
    let keys = random_keys(20_000, 12);
    let before = owners(&ring, &keys);
    let positions_before = ring.positions_of("node_7").unwrap().to_vec();

    ring.remove_node("node_7").unwrap();
    ring.add_node("node_7").unwrap();

    assert_eq!(ring.positions_of("node_7").unwrap(), positions_before.as_slice());
    assert_eq!(owners(&ring, &keys), before);
}

/// A node added to a live ring only takes keys; nobody else trades.
#[test]
fn test_added_node_only_gains_keys() {
    let mut ring = ring_with_nodes(200, 100);
    let keys = random_keys(20_000, 13);
    let before = owners(&ring, &keys);

    ring.add_node("late-joiner").unwrap();
    let after = owners(&ring, &keys);

    let mut gained = 0;
    for (b, a) in before.iter().zip(&after) {
        if b != a {
            assert_eq!(a, "late-joiner");
            gained += 1;
        }
    }
    // Expect roughly 1/201 of the keys.
    assert!((20..=300).contains(&gained), "late joiner gained {gained} keys");
}

/// Removing every node empties the ring; lookups then fail.
#[test]
fn test_drain_ring() {
    let mut ring = ring_with_nodes(20, 50);
    for i in 0..20 {
        ring.remove_node(&node_name(i)).unwrap();
    }
    assert!(ring.is_empty());
    assert_eq!(ring.node_count(), 0);
    assert!(ring.lookup("any").is_err());
}
