//! Public snapshot API for observing a session without exposing internals.

use serde::Serialize;

use crate::domain::cards::{Card, TeamId};
use crate::domain::state::{Command, GameSession, Phase, Team};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSnapshot {
    pub id: TeamId,
    pub name: String,
    pub score: u32,
    pub timeline: Vec<Card>,
}

impl From<&Team> for TeamSnapshot {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id,
            name: team.name.clone(),
            score: team.score,
            timeline: team.timeline.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ErrorSnapshot {
    pub code: &'static str,
    pub message: String,
}

/// Read-only view handed to the presentation layer after every command.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub phase: Phase,
    pub current_team: TeamId,
    pub teams: Vec<TeamSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_card: Option<Card>,
    pub deck_remaining: usize,
    pub discard: Vec<Card>,
    pub available_commands: Vec<Command>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<ErrorSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<TeamId>,
}

impl GameSnapshot {
    pub fn of(session: &GameSession) -> Self {
        Self {
            phase: session.phase,
            current_team: session.current_team,
            teams: session.teams.iter().map(TeamSnapshot::from).collect(),
            current_card: session.current_card.clone(),
            deck_remaining: session.deck.len(),
            discard: session.discard.clone(),
            available_commands: session.available_commands(),
            last_error: session.last_error.as_ref().map(|e| ErrorSnapshot {
                code: e.code().as_str(),
                message: e.to_string(),
            }),
            winner: session.winner,
        }
    }
}
