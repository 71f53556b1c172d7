#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod errors;
pub mod telemetry;

// Re-exports for public API
pub use config::game::{DeckEmptyPolicy, GameConfig};
pub use domain::{
    Card, Catalog, Category, Command, DeckProvider, Engine, FixedOrderPool, GameEvent,
    GameSession, GameSnapshot, Phase, ShuffledPool, Team, TeamId,
};
pub use errors::{DomainError, ErrorCode};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    timeline_test_support::logging::init();
}
