//! Turn engine: the state machine driving a timeline game.
//!
//! The engine is an ordinary value owned by its caller. Commands either act
//! and return the events they caused, or are ignored (empty event list) when
//! the current phase does not offer them. Only the deck-facing commands can
//! fail, and those failures are recorded on the session so the caller can
//! offer a retry.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, info, warn};

use crate::config::game::{DeckEmptyPolicy, GameConfig};
use crate::domain::cards::{Card, TeamId};
use crate::domain::deck::DeckProvider;
use crate::domain::events::GameEvent;
use crate::domain::placement::is_valid_placement;
use crate::domain::rules::{next_team, required_seed_cards};
use crate::domain::snapshot::GameSnapshot;
use crate::domain::state::{Command, GameSession, Phase};
use crate::errors::DomainError;

/// Turn engine for one game session, drawing cards from `P`.
pub struct Engine<P> {
    provider: P,
    config: GameConfig,
    session: GameSession,
}

impl<P: DeckProvider> Engine<P> {
    pub fn new(provider: P, config: GameConfig) -> Result<Self, DomainError> {
        config.validate()?;
        let session = GameSession::new(&config.team_names);
        Ok(Self {
            provider,
            config,
            session,
        })
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::of(&self.session)
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    /// Deal a fresh game: one seed card per team, scores at zero, team 0 up.
    ///
    /// Offered from `Setup` and `GameOver`, and as a retry after any deck
    /// failure. A failed fetch leaves the session as it was, with the error
    /// recorded.
    pub async fn start_game(&mut self) -> Result<Vec<GameEvent>, DomainError> {
        if !self.accepts(Command::StartGame) {
            return Ok(Vec::new());
        }

        let team_count = self.config.team_count();
        let required = required_seed_cards(team_count);
        let fetched = match self.provider.fetch(self.config.deck_size.max(required)).await {
            Ok(cards) => cards,
            Err(e) => return Err(self.fail(e)),
        };
        if fetched.len() < required {
            return Err(self.fail(DomainError::insufficient(fetched.len(), required)));
        }

        let mut deck: VecDeque<Card> = fetched.into();
        let mut session = GameSession::new(&self.config.team_names);
        for (team, seed) in session.teams.iter_mut().zip(deck.drain(..team_count)) {
            team.timeline.push(seed);
        }
        session.deck = deck;
        session.phase = Phase::TurnStart;
        self.session = session;

        let dealt = self.session.deck.len();
        info!(teams = team_count, deck = dealt, "game started");
        Ok(vec![
            GameEvent::GameStarted {
                teams: team_count,
                dealt,
            },
            GameEvent::TurnBecame { team: 0 },
        ])
    }

    /// Draw the next card for the active team.
    pub async fn start_turn(&mut self) -> Result<Vec<GameEvent>, DomainError> {
        if !self.accepts(Command::StartTurn) {
            return Ok(Vec::new());
        }
        self.draw().await
    }

    /// Same team keeps going after a correct placement.
    pub async fn draw_another(&mut self) -> Result<Vec<GameEvent>, DomainError> {
        if !self.accepts(Command::DrawAnother) {
            return Ok(Vec::new());
        }
        self.draw().await
    }

    /// Place the card in hand at `index` of the active team's timeline.
    ///
    /// A correct placement keeps the turn (`ChoiceAfterCorrect`). A wrong one
    /// restores the timeline to the round baseline, discards the card and
    /// hands the turn to the next team.
    pub fn place_at(&mut self, index: usize) -> Vec<GameEvent> {
        if !self.accepts(Command::PlaceAt) {
            return Vec::new();
        }
        let Some(card) = self.session.current_card.take() else {
            return Vec::new();
        };
        let team = self.session.current_team;
        self.session.last_error = None;

        let timeline = &mut self.session.teams[team].timeline;
        if is_valid_placement(timeline.as_slice(), &card, index) {
            debug!(team, index, card = %card.id, "placed correctly");
            timeline.insert(index, card);
            self.session.phase = Phase::ChoiceAfterCorrect;
            return vec![GameEvent::PlacedCorrect { team, index }];
        }

        debug!(team, index, card = %card.id, "placed wrong, rolling back");
        *timeline = std::mem::take(&mut self.session.round_baseline);
        self.session.discard.push(card.clone());
        self.session.phase = Phase::PlacedWrong;

        let mut events = vec![GameEvent::PlacedWrong { team, card, index }];
        events.extend(self.advance_turn());
        events
    }

    /// Bank the turn: +1 score, then either the game ends or the next team
    /// is up.
    pub fn lock_in(&mut self) -> Vec<GameEvent> {
        if !self.accepts(Command::LockIn) {
            return Vec::new();
        }
        let team_id = self.session.current_team;
        let team = &mut self.session.teams[team_id];
        team.score += 1;
        let score = team.score;
        self.session.last_error = None;

        let mut events = vec![GameEvent::LockedIn {
            team: team_id,
            score,
        }];

        if self.config.target_score.is_some_and(|target| score >= target) {
            self.session.phase = Phase::GameOver;
            self.session.winner = Some(team_id);
            info!(winner = team_id, score, "game over");
            events.push(GameEvent::GameOver { winner: team_id });
            return events;
        }

        self.session.phase = Phase::TurnStart;
        events.extend(self.advance_turn());
        events
    }

    /// Drop the current game and return to `Setup`.
    pub fn reset(&mut self) -> Vec<GameEvent> {
        self.session = GameSession::new(&self.config.team_names);
        info!("session reset");
        vec![GameEvent::GameReset]
    }

    fn accepts(&self, command: Command) -> bool {
        let allowed = self.session.allows(command);
        if !allowed {
            warn!(
                ?command,
                phase = ?self.session.phase,
                "command ignored in current phase"
            );
        }
        allowed
    }

    async fn draw(&mut self) -> Result<Vec<GameEvent>, DomainError> {
        let mut events = Vec::new();
        if self.session.deck.is_empty() {
            events.extend(self.refill_deck().await?);
        }
        let Some(card) = self.session.deck.pop_front() else {
            return Err(self.fail(DomainError::DeckExhausted));
        };

        let team = self.session.current_team;
        self.session.round_baseline = self.session.teams[team].timeline.clone();
        self.session.current_card = Some(card.clone());
        self.session.last_error = None;
        self.session.phase = Phase::Drawn;

        debug!(team, card = %card.id, remaining = self.session.deck.len(), "card drawn");
        events.push(GameEvent::CardDrawn { team, card });
        Ok(events)
    }

    /// Apply the deck-empty policy. Team state is never reset here.
    async fn refill_deck(&mut self) -> Result<Vec<GameEvent>, DomainError> {
        if self.config.on_deck_empty == DeckEmptyPolicy::Fail {
            return Err(self.fail(DomainError::DeckExhausted));
        }

        let out_of_deck: HashSet<String> =
            self.session.ids_out_of_deck().map(str::to_owned).collect();
        // Over-ask by the dealt count so a batch truncated by the provider
        // still holds `deck_size` fresh cards while the pool has them.
        let request = self.config.deck_size.saturating_add(out_of_deck.len());
        let fetched = match self.provider.fetch(request).await {
            Ok(cards) => cards,
            Err(e) => return Err(self.fail(e)),
        };
        let fresh: VecDeque<Card> = fetched
            .into_iter()
            .filter(|c| !out_of_deck.contains(&c.id))
            .take(self.config.deck_size)
            .collect();

        if fresh.is_empty() {
            return Err(self.fail(DomainError::DeckExhausted));
        }

        let added = fresh.len();
        self.session.deck = fresh;
        info!(added, "deck topped up");
        Ok(vec![GameEvent::DeckToppedUp { added }])
    }

    fn advance_turn(&mut self) -> Vec<GameEvent> {
        let team: TeamId = next_team(self.session.current_team, self.session.teams.len());
        self.session.current_team = team;
        self.session.current_card = None;
        self.session.phase = Phase::TurnStart;
        vec![GameEvent::TurnBecame { team }]
    }

    fn fail(&mut self, err: DomainError) -> DomainError {
        warn!(code = %err.code(), error = %err, "deck failure");
        self.session.last_error = Some(err.clone());
        err
    }
}
