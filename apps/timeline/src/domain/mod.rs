//! Domain layer: pure timeline game logic.

pub mod cards;
pub mod catalog;
pub mod deck;
pub mod engine;
pub mod events;
pub mod placement;
pub mod rules;
pub mod snapshot;
pub mod state;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_engine;

// Re-exports for ergonomics
pub use cards::{Card, Ordered, TeamId};
pub use catalog::{Catalog, Category};
pub use deck::{DeckProvider, FixedOrderPool, ShuffledPool};
pub use engine::Engine;
pub use events::GameEvent;
pub use placement::{is_sorted_timeline, is_valid_placement, valid_indices};
pub use snapshot::GameSnapshot;
pub use state::{Command, GameSession, Phase, Team};
