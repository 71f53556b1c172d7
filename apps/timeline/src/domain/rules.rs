use crate::domain::cards::TeamId;

/// Fewest teams a session can be configured with.
pub const MIN_TEAMS: usize = 2;
/// A pool smaller than this cannot seed the default two teams.
pub const MIN_SOURCE_CARDS: usize = 2;
pub const DEFAULT_DECK_SIZE: usize = 100;

/// Team whose turn follows `current` (round robin over `team_count` teams).
#[inline]
pub fn next_team(current: TeamId, team_count: usize) -> TeamId {
    debug_assert!(team_count >= MIN_TEAMS, "team_count must be >= {MIN_TEAMS}");
    (current + 1) % team_count
}

/// Cards a single fetch must yield to seed `team_count` teams.
#[inline]
pub fn required_seed_cards(team_count: usize) -> usize {
    team_count.max(MIN_SOURCE_CARDS)
}
