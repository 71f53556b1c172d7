//! Stable error codes for timeline failures.
//!
//! Codes are SCREAMING_SNAKE_CASE and are what callers (a UI adapter, the
//! simulator's result files) key on. Add new codes here; never pass ad-hoc
//! strings as error codes.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Card pool too small to seed every team
    InsufficientSourceData,
    /// Deck ran out mid-game and could not be topped up
    DeckExhausted,
    /// Catalog could not be parsed or a category is missing
    CatalogInvalid,
    /// Configuration value missing or malformed
    ConfigInvalid,
    /// Internal invariant or lock failure
    Internal,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 5] = [
        ErrorCode::InsufficientSourceData,
        ErrorCode::DeckExhausted,
        ErrorCode::CatalogInvalid,
        ErrorCode::ConfigInvalid,
        ErrorCode::Internal,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InsufficientSourceData => "INSUFFICIENT_SOURCE_DATA",
            Self::DeckExhausted => "DECK_EXHAUSTED",
            Self::CatalogInvalid => "CATALOG_INVALID",
            Self::ConfigInvalid => "CONFIG_INVALID",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
