use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::domain::cards::{Card, TeamId};
use crate::errors::DomainError;

/// Turn-based game phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Session created, no cards dealt yet.
    Setup,
    /// Active team may draw.
    TurnStart,
    /// A card is in hand and waiting to be placed.
    Drawn,
    /// Last placement was correct: draw another or lock in.
    ChoiceAfterCorrect,
    /// Transient: a wrong placement was rolled back. The engine moves on to
    /// the next team within the same command, so this is never observed at
    /// rest; callers see a `PlacedWrong` event instead.
    PlacedWrong,
    /// A team reached the configured target score.
    GameOver,
}

/// Player-facing commands, used to gate what a UI offers per phase.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    StartGame,
    StartTurn,
    PlaceAt,
    DrawAnother,
    LockIn,
}

impl Command {
    pub const ALL: [Command; 5] = [
        Command::StartGame,
        Command::StartTurn,
        Command::PlaceAt,
        Command::DrawAnother,
        Command::LockIn,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Accepted cards, sorted by ordering key.
    pub timeline: Vec<Card>,
    pub score: u32,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            timeline: Vec::new(),
            score: 0,
        }
    }
}

/// Entire game container. Mutated only by the engine.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub phase: Phase,
    /// Undealt cards in deal order.
    pub deck: VecDeque<Card>,
    /// Cards removed from play by a wrong placement.
    pub discard: Vec<Card>,
    pub teams: Vec<Team>,
    pub current_team: TeamId,
    /// Card in hand; `Some` exactly while the phase is `Drawn`.
    pub current_card: Option<Card>,
    /// Active team's timeline as it was when the current card was drawn.
    pub round_baseline: Vec<Card>,
    /// Deck failure from the last command, cleared by the next success.
    pub last_error: Option<DomainError>,
    pub winner: Option<TeamId>,
}

impl GameSession {
    pub fn new(team_names: &[String]) -> Self {
        Self {
            phase: Phase::Setup,
            deck: VecDeque::new(),
            discard: Vec::new(),
            teams: team_names
                .iter()
                .enumerate()
                .map(|(id, name)| Team::new(id, name.clone()))
                .collect(),
            current_team: 0,
            current_card: None,
            round_baseline: Vec::new(),
            last_error: None,
            winner: None,
        }
    }

    pub fn active_team(&self) -> &Team {
        &self.teams[self.current_team]
    }

    /// Whether `command` would be acted on rather than ignored.
    pub fn allows(&self, command: Command) -> bool {
        match command {
            Command::StartGame => {
                matches!(self.phase, Phase::Setup | Phase::GameOver) || self.last_error.is_some()
            }
            Command::StartTurn => self.phase == Phase::TurnStart,
            Command::PlaceAt => self.phase == Phase::Drawn && self.current_card.is_some(),
            Command::DrawAnother | Command::LockIn => self.phase == Phase::ChoiceAfterCorrect,
        }
    }

    pub fn available_commands(&self) -> Vec<Command> {
        Command::ALL
            .into_iter()
            .filter(|c| self.allows(*c))
            .collect()
    }

    /// Ids of every card on a timeline, in hand, or discarded.
    pub fn ids_out_of_deck(&self) -> impl Iterator<Item = &str> {
        self.teams
            .iter()
            .flat_map(|t| t.timeline.iter())
            .chain(self.current_card.iter())
            .chain(self.discard.iter())
            .map(|c| c.id.as_str())
    }
}
