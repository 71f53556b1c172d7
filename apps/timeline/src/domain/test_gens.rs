// Proptest generators for timeline domain types.

use proptest::prelude::*;

use crate::domain::cards::Card;

/// Ordering keys in a year-like range; narrow enough that ties are common.
pub fn year() -> impl Strategy<Value = i64> {
    1950_i64..=2030
}

/// A sorted timeline of plain keys.
pub fn sorted_keys(max_len: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(year(), 0..=max_len).prop_map(|mut keys| {
        keys.sort();
        keys
    })
}

/// A sorted timeline plus an in-range insertion index.
pub fn timeline_and_index(max_len: usize) -> impl Strategy<Value = (Vec<i64>, usize)> {
    sorted_keys(max_len).prop_flat_map(|keys| {
        let len = keys.len();
        (Just(keys), 0..=len)
    })
}

/// A pool of cards with unique ids and arbitrary (possibly repeated) years.
pub fn card_pool(min: usize, max: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(year(), min..=max).prop_map(|years| {
        years
            .into_iter()
            .enumerate()
            .map(|(i, y)| Card::new(format!("p{i}"), format!("Song {i}"), "Artist", y))
            .collect()
    })
}

/// One scripted move for the engine.
#[derive(Debug, Clone, Copy)]
pub enum Move {
    /// Place at `slot % (len + 1)` of the active timeline.
    Place(usize),
    DrawAnother,
    LockIn,
    StartTurn,
}

pub fn moves(max: usize) -> impl Strategy<Value = Vec<Move>> {
    prop::collection::vec(
        prop_oneof![
            4 => (0usize..64).prop_map(Move::Place),
            2 => Just(Move::DrawAnother),
            2 => Just(Move::LockIn),
            2 => Just(Move::StartTurn),
        ],
        1..=max,
    )
}
