//! Edge-triggered notifications returned by engine commands.
//!
//! An empty event list means the command was ignored for the current phase.

use serde::Serialize;

use crate::domain::cards::{Card, TeamId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    /// Teams seeded; `dealt` cards remain in the deck.
    GameStarted { teams: usize, dealt: usize },
    /// Session returned to setup.
    GameReset,
    /// The turn passed to `team`.
    TurnBecame { team: TeamId },
    CardDrawn { team: TeamId, card: Card },
    /// Empty deck refilled with `added` fresh cards.
    DeckToppedUp { added: usize },
    PlacedCorrect { team: TeamId, index: usize },
    /// Wrong guess: the card went to the discard pile and the timeline was
    /// restored.
    PlacedWrong { team: TeamId, card: Card, index: usize },
    LockedIn { team: TeamId, score: u32 },
    GameOver { winner: TeamId },
}

impl GameEvent {
    /// Team the turn moved to, if this event hands over the turn.
    pub fn turn_became(&self) -> Option<TeamId> {
        match self {
            GameEvent::TurnBecame { team } => Some(*team),
            _ => None,
        }
    }
}
