//! The placement rule: is a candidate card correct at a given timeline slot?
//!
//! A slot is correct when the candidate's key is not below its left
//! neighbour and not above its right neighbour. Equal keys are accepted on
//! either side. This is the only place correctness is decided.

use std::ops::RangeInclusive;

use crate::domain::cards::Ordered;

/// Decide whether inserting `candidate` at `index` keeps `timeline` ordered.
///
/// `index` ranges over `0..=timeline.len()`; anything past the end is
/// rejected.
pub fn is_valid_placement<C: Ordered>(timeline: &[C], candidate: &C, index: usize) -> bool {
    if index > timeline.len() {
        return false;
    }
    let key = candidate.ordering_key();

    let left_ok = index
        .checked_sub(1)
        .and_then(|i| timeline.get(i))
        .is_none_or(|left| key >= left.ordering_key());
    let right_ok = timeline
        .get(index)
        .is_none_or(|right| key <= right.ordering_key());

    left_ok && right_ok
}

/// Every slot at which `candidate` would be accepted.
///
/// Requires `timeline` to be sorted; the result is never empty.
pub fn valid_indices<C: Ordered>(timeline: &[C], candidate: &C) -> RangeInclusive<usize> {
    let key = candidate.ordering_key();
    let first = timeline.partition_point(|c| c.ordering_key() < key);
    let last = timeline.partition_point(|c| c.ordering_key() <= key);
    first..=last
}

/// Timelines are sorted non-decreasingly; equal keys may be adjacent.
pub fn is_sorted_timeline<C: Ordered>(timeline: &[C]) -> bool {
    timeline
        .windows(2)
        .all(|pair| pair[0].ordering_key() <= pair[1].ordering_key())
}
