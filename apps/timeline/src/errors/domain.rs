//! Domain-level error type for the timeline engine.
//!
//! Wrong guesses are not errors (they are `PlacedWrong` events) and commands
//! issued in the wrong phase are ignored, so this type only covers the
//! recoverable deck failures plus catalog and configuration problems.

use thiserror::Error;

use crate::errors::ErrorCode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The card pool cannot supply the minimum needed to seed every team.
    #[error("insufficient source data: {available} card(s) available, {required} required")]
    InsufficientSourceData { available: usize, required: usize },
    /// The deck ran dry mid-game and the deck-empty policy could not refill it.
    #[error("deck exhausted")]
    DeckExhausted,
    #[error("catalog error: {0}")]
    Catalog(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn insufficient(available: usize, required: usize) -> Self {
        Self::InsufficientSourceData {
            available,
            required,
        }
    }

    pub fn catalog(detail: impl Into<String>) -> Self {
        Self::Catalog(detail.into())
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config(detail.into())
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::InsufficientSourceData { .. } => ErrorCode::InsufficientSourceData,
            DomainError::DeckExhausted => ErrorCode::DeckExhausted,
            DomainError::Catalog(_) => ErrorCode::CatalogInvalid,
            DomainError::Config(_) => ErrorCode::ConfigInvalid,
            DomainError::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Deck failures leave the session usable; a retry may succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DomainError::InsufficientSourceData { .. } | DomainError::DeckExhausted
        )
    }
}
