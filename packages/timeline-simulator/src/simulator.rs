//! Headless game loop driving the engine with a guessing strategy.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use timeline::domain::valid_indices;
use timeline::{DeckProvider, DomainError, Engine, GameEvent, Phase, TeamId};
use tracing::{debug, trace};

use crate::types::{EndReason, Strategy, PERFECT_STREAK};

/// Hard stop for games without a target score.
pub const DEFAULT_MAX_TURNS: u32 = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct GameResult {
    pub winner: Option<TeamId>,
    pub final_scores: Vec<u32>,
    pub timeline_lengths: Vec<usize>,
    pub turns: u32,
    pub draws: u32,
    pub correct: u32,
    pub wrong: u32,
    pub top_ups: u32,
    pub end_reason: EndReason,
}

pub struct Simulator {
    strategy: Strategy,
    rng: StdRng,
    max_turns: u32,
}

#[derive(Default)]
struct Tally {
    turns: u32,
    draws: u32,
    correct: u32,
    wrong: u32,
    top_ups: u32,
    /// Correct placements in the running turn.
    streak: u32,
}

impl Tally {
    fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::CardDrawn { .. } => self.draws += 1,
                GameEvent::PlacedCorrect { .. } => {
                    self.correct += 1;
                    self.streak += 1;
                }
                GameEvent::PlacedWrong { .. } => self.wrong += 1,
                GameEvent::DeckToppedUp { .. } => self.top_ups += 1,
                GameEvent::TurnBecame { .. } => {
                    self.turns += 1;
                    self.streak = 0;
                }
                _ => {}
            }
        }
    }
}

impl Simulator {
    pub fn new(strategy: Strategy, seed: u64) -> Self {
        Self {
            strategy,
            rng: StdRng::seed_from_u64(seed),
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Play one game to completion.
    ///
    /// A deck that runs dry ends the game; the highest score wins unless it
    /// is shared. Any other deck failure is returned.
    pub async fn simulate_game<P: DeckProvider>(
        &mut self,
        engine: &mut Engine<P>,
    ) -> Result<GameResult, DomainError> {
        let mut tally = Tally::default();
        tally.record(&engine.start_game().await?);

        let end_reason = loop {
            if tally.turns >= self.max_turns {
                break EndReason::TurnLimit;
            }
            let step = match engine.phase() {
                Phase::TurnStart => engine.start_turn().await,
                Phase::Drawn => {
                    let index = self.choose_index(engine);
                    Ok(engine.place_at(index))
                }
                Phase::ChoiceAfterCorrect => {
                    if self.keep_drawing(tally.streak) {
                        engine.draw_another().await
                    } else {
                        Ok(engine.lock_in())
                    }
                }
                Phase::GameOver => break EndReason::TargetReached,
                Phase::Setup | Phase::PlacedWrong => {
                    return Err(DomainError::internal(format!(
                        "engine at rest in {:?}",
                        engine.phase()
                    )))
                }
            };
            match step {
                Ok(events) => {
                    trace!(?events, "step");
                    tally.record(&events);
                }
                // A deck failure mid-game means the pool has nothing left to deal.
                Err(e) if e.is_recoverable() => break EndReason::DeckExhausted,
                Err(e) => return Err(e),
            }
        };

        let session = engine.session();
        let final_scores: Vec<u32> = session.teams.iter().map(|t| t.score).collect();
        let winner = session.winner.or_else(|| leader(&final_scores));
        debug!(?end_reason, ?final_scores, turns = tally.turns, "game finished");

        Ok(GameResult {
            winner,
            timeline_lengths: session.teams.iter().map(|t| t.timeline.len()).collect(),
            final_scores,
            turns: tally.turns,
            draws: tally.draws,
            correct: tally.correct,
            wrong: tally.wrong,
            top_ups: tally.top_ups,
            end_reason,
        })
    }

    fn choose_index<P: DeckProvider>(&mut self, engine: &Engine<P>) -> usize {
        let session = engine.session();
        let timeline = session.active_team().timeline.as_slice();
        match (self.strategy, session.current_card.as_ref()) {
            (Strategy::Perfect, Some(card)) => *valid_indices(timeline, card).start(),
            _ => self.rng.random_range(0..=timeline.len()),
        }
    }

    fn keep_drawing(&mut self, streak: u32) -> bool {
        match self.strategy {
            Strategy::Perfect => streak < PERFECT_STREAK,
            Strategy::Random => self.rng.random_bool(0.5),
            Strategy::Cautious => false,
        }
    }
}

/// Unique top scorer, if any.
fn leader(scores: &[u32]) -> Option<TeamId> {
    let best = *scores.iter().max()?;
    let mut at_best = scores.iter().enumerate().filter(|(_, &s)| s == best);
    match (at_best.next(), at_best.next()) {
        (Some((team, _)), None) => Some(team),
        _ => None,
    }
}
