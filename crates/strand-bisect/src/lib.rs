//! Insertion-point search over sorted sequences.
//!
//! This crate provides the ordered index underneath the hash ring:
//!
//! - [`search_right`] / [`search_left`] — binary search for the rightmost or
//!   leftmost insertion point of a value in a sorted slice.
//! - [`insert_right`] / [`insert_left`] — insert a value into a sorted `Vec`
//!   at that insertion point, keeping it sorted.
//! - `*_within` variants that restrict the search to a `[lo, hi)` window and
//!   reject windows that do not fit the sequence with [`BisectError`].
//!
//! Searches take `O(log n)` comparisons. Insertion and removal shift the tail
//! of the vector and are `O(n)`.
//!
//! Nothing here knows about nodes or hashes: every function is generic over
//! `T: Ord`.

mod error;
mod search;

pub use error::BisectError;
pub use search::{
    contains_sorted, insert_left, insert_left_within, insert_right, insert_right_within,
    remove_sorted, search_left, search_left_within, search_right, search_right_within,
};
