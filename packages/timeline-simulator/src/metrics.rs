//! Per-game records and the aggregate summary printed at the end of a run.

use serde::Serialize;
use timeline::TeamId;

use crate::simulator::GameResult;
use crate::types::{EndReason, Strategy};

/// One JSON line per simulated game.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_id: u32,
    pub seed: u64,
    pub config: RunConfig,
    pub result: GameResultMetrics,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunConfig {
    pub strategy: Strategy,
    pub category: String,
    pub teams: usize,
    pub target_score: Option<u32>,
    pub total_games: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResultMetrics {
    pub final_scores: Vec<u32>,
    pub timeline_lengths: Vec<usize>,
    pub winner: Option<TeamId>,
    pub end_reason: EndReason,
    pub turns: u32,
    pub draws: u32,
    pub correct: u32,
    pub wrong: u32,
    pub top_ups: u32,
    /// Share of placements that were correct, 0.0 when nothing was placed.
    pub accuracy: f64,
    pub duration_ms: f64,
}

pub fn build_game_metrics(
    game_id: u32,
    seed: u64,
    config: RunConfig,
    result: &GameResult,
    duration_ms: f64,
) -> GameMetrics {
    GameMetrics {
        game_id,
        seed,
        config,
        result: GameResultMetrics {
            final_scores: result.final_scores.clone(),
            timeline_lengths: result.timeline_lengths.clone(),
            winner: result.winner,
            end_reason: result.end_reason,
            turns: result.turns,
            draws: result.draws,
            correct: result.correct,
            wrong: result.wrong,
            top_ups: result.top_ups,
            accuracy: accuracy(result.correct, result.wrong),
            duration_ms,
        },
    }
}

fn accuracy(correct: u32, wrong: u32) -> f64 {
    let placed = correct + wrong;
    if placed == 0 {
        0.0
    } else {
        correct as f64 / placed as f64
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamStats {
    pub wins: u32,
    pub total_score: u64,
    pub min_score: Option<u32>,
    pub max_score: Option<u32>,
}

/// Totals across every completed game of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub games: u32,
    pub draws_no_winner: u32,
    pub deck_exhausted: u32,
    pub turn_limit: u32,
    pub correct: u64,
    pub wrong: u64,
    pub teams: Vec<TeamStats>,
}

impl Summary {
    pub fn record(&mut self, result: &GameResult) {
        self.games += 1;
        self.correct += u64::from(result.correct);
        self.wrong += u64::from(result.wrong);
        match result.end_reason {
            EndReason::TargetReached => {}
            EndReason::DeckExhausted => self.deck_exhausted += 1,
            EndReason::TurnLimit => self.turn_limit += 1,
        }
        if result.final_scores.len() > self.teams.len() {
            self.teams
                .resize(result.final_scores.len(), TeamStats::default());
        }
        for (stats, &score) in self.teams.iter_mut().zip(&result.final_scores) {
            stats.total_score += u64::from(score);
            stats.min_score = Some(stats.min_score.map_or(score, |m| m.min(score)));
            stats.max_score = Some(stats.max_score.map_or(score, |m| m.max(score)));
        }
        match result.winner.and_then(|w| self.teams.get_mut(w)) {
            Some(stats) => stats.wins += 1,
            None => self.draws_no_winner += 1,
        }
    }

    pub fn accuracy(&self) -> f64 {
        let placed = self.correct + self.wrong;
        if placed == 0 {
            0.0
        } else {
            self.correct as f64 / placed as f64
        }
    }

    pub fn average_score(&self, team: TeamId) -> f64 {
        match self.teams.get(team) {
            Some(stats) if self.games > 0 => stats.total_score as f64 / f64::from(self.games),
            _ => 0.0,
        }
    }
}
