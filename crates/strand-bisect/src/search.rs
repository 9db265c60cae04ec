//! Binary search for insertion points and ordered insertion.

use crate::error::BisectError;

/// Resolve `hi` (defaulting to the sequence length) and validate the window.
fn window<T>(seq: &[T], lo: usize, hi: Option<usize>) -> Result<usize, BisectError> {
    let len = seq.len();
    let hi = hi.unwrap_or(len);
    if lo > hi || hi > len {
        return Err(BisectError::InvalidBound { lo, hi, len });
    }
    Ok(hi)
}

/// Rightmost insertion point of `x` in the sorted slice `seq`.
///
/// The returned index `i` satisfies: every element of `seq[..i]` is `<= x`
/// and every element of `seq[i..]` is `> x`. If `x` is already present, the
/// index points just past the last occurrence.
pub fn search_right<T: Ord>(seq: &[T], x: &T) -> usize {
    seq.partition_point(|e| e <= x)
}

/// Leftmost insertion point of `x` in the sorted slice `seq`.
///
/// The returned index `i` satisfies: every element of `seq[..i]` is `< x`
/// and every element of `seq[i..]` is `>= x`. If `x` is already present, the
/// index points at the first occurrence.
pub fn search_left<T: Ord>(seq: &[T], x: &T) -> usize {
    seq.partition_point(|e| e < x)
}

/// [`search_right`] restricted to the window `seq[lo..hi]`.
///
/// `hi = None` means `seq.len()`. The result lies in `[lo, hi]`.
pub fn search_right_within<T: Ord>(
    seq: &[T],
    x: &T,
    lo: usize,
    hi: Option<usize>,
) -> Result<usize, BisectError> {
    let hi = window(seq, lo, hi)?;
    Ok(lo + search_right(&seq[lo..hi], x))
}

/// [`search_left`] restricted to the window `seq[lo..hi]`.
///
/// `hi = None` means `seq.len()`. The result lies in `[lo, hi]`.
pub fn search_left_within<T: Ord>(
    seq: &[T],
    x: &T,
    lo: usize,
    hi: Option<usize>,
) -> Result<usize, BisectError> {
    let hi = window(seq, lo, hi)?;
    Ok(lo + search_left(&seq[lo..hi], x))
}

/// Insert `x` after any equal elements, keeping `seq` sorted.
///
/// Returns the index `x` was inserted at.
pub fn insert_right<T: Ord>(seq: &mut Vec<T>, x: T) -> usize {
    let idx = search_right(seq, &x);
    seq.insert(idx, x);
    idx
}

/// Insert `x` before any equal elements, keeping `seq` sorted.
///
/// Returns the index `x` was inserted at.
pub fn insert_left<T: Ord>(seq: &mut Vec<T>, x: T) -> usize {
    let idx = search_left(seq, &x);
    seq.insert(idx, x);
    idx
}

/// [`insert_right`] with the insertion point searched in `seq[lo..hi]`.
pub fn insert_right_within<T: Ord>(
    seq: &mut Vec<T>,
    x: T,
    lo: usize,
    hi: Option<usize>,
) -> Result<usize, BisectError> {
    let idx = search_right_within(seq, &x, lo, hi)?;
    seq.insert(idx, x);
    Ok(idx)
}

/// [`insert_left`] with the insertion point searched in `seq[lo..hi]`.
pub fn insert_left_within<T: Ord>(
    seq: &mut Vec<T>,
    x: T,
    lo: usize,
    hi: Option<usize>,
) -> Result<usize, BisectError> {
    let idx = search_left_within(seq, &x, lo, hi)?;
    seq.insert(idx, x);
    Ok(idx)
}

/// Whether the sorted slice contains `x`.
pub fn contains_sorted<T: Ord>(seq: &[T], x: &T) -> bool {
    let idx = search_left(seq, x);
    seq.get(idx) == Some(x)
}

/// Remove the first occurrence of `x` from the sorted vector.
///
/// Returns the index it was removed from, or `None` if `x` was absent
/// (in which case `seq` is untouched).
pub fn remove_sorted<T: Ord>(seq: &mut Vec<T>, x: &T) -> Option<usize> {
    let idx = search_left(seq, x);
    if seq.get(idx) != Some(x) {
        return None;
    }
    seq.remove(idx);
    Some(idx)
}
