//! Game configuration.
//!
//! `GameConfig` can be built in code, deserialized from JSON, or read from
//! `TIMELINE_*` environment variables. Every field has a default so a caller
//! only sets what it cares about.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::rules::{DEFAULT_DECK_SIZE, MIN_TEAMS};
use crate::errors::DomainError;

/// What `start_turn` does when the deck has run dry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeckEmptyPolicy {
    /// Fetch a fresh batch, dropping cards that were already dealt.
    #[default]
    TopUp,
    /// Surface `DeckExhausted` and leave team state untouched.
    Fail,
}

impl FromStr for DeckEmptyPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top-up" | "topup" => Ok(DeckEmptyPolicy::TopUp),
            "fail" => Ok(DeckEmptyPolicy::Fail),
            other => Err(DomainError::config(format!(
                "unknown deck-empty policy '{other}' (expected 'top-up' or 'fail')"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Display names, one per team. Team ids are positions in this list.
    pub team_names: Vec<String>,
    /// Cards requested from the deck provider per fetch.
    pub deck_size: usize,
    /// When set, the first team whose score reaches this value wins.
    pub target_score: Option<u32>,
    pub on_deck_empty: DeckEmptyPolicy,
    /// Seed for callers that build a shuffled pool from this config.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            team_names: vec!["Team A".to_string(), "Team B".to_string()],
            deck_size: DEFAULT_DECK_SIZE,
            target_score: None,
            on_deck_empty: DeckEmptyPolicy::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Read configuration from `TIMELINE_*` environment variables.
    ///
    /// - `TIMELINE_TEAMS`: comma separated team names
    /// - `TIMELINE_DECK_SIZE`: cards per fetch
    /// - `TIMELINE_TARGET_SCORE`: score that ends the game
    /// - `TIMELINE_ON_DECK_EMPTY`: `top-up` or `fail`
    /// - `TIMELINE_SEED`: shuffle seed
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Parse the environment without validating, for callers that layer
    /// their own overrides on top and call [`GameConfig::validate`] after.
    pub fn read_env() -> Result<Self, DomainError> {
        Self::read_lookup(|name| env::var(name).ok())
    }

    /// Same as [`GameConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self::read_lookup(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Malformed values are still errors; cross-field checks are skipped.
    pub fn read_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = GameConfig::default();

        if let Some(raw) = non_empty(lookup("TIMELINE_TEAMS")) {
            config.team_names = raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(raw) = non_empty(lookup("TIMELINE_DECK_SIZE")) {
            config.deck_size = parse_var("TIMELINE_DECK_SIZE", &raw)?;
        }
        if let Some(raw) = non_empty(lookup("TIMELINE_TARGET_SCORE")) {
            config.target_score = Some(parse_var("TIMELINE_TARGET_SCORE", &raw)?);
        }
        if let Some(raw) = non_empty(lookup("TIMELINE_ON_DECK_EMPTY")) {
            config.on_deck_empty = raw.parse()?;
        }
        if let Some(raw) = non_empty(lookup("TIMELINE_SEED")) {
            config.seed = Some(parse_var("TIMELINE_SEED", &raw)?);
        }
        Ok(config)
    }

    pub fn with_teams<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.team_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_target_score(mut self, target: u32) -> Self {
        self.target_score = Some(target);
        self
    }

    pub fn with_deck_size(mut self, deck_size: usize) -> Self {
        self.deck_size = deck_size;
        self
    }

    pub fn with_deck_empty_policy(mut self, policy: DeckEmptyPolicy) -> Self {
        self.on_deck_empty = policy;
        self
    }

    pub fn team_count(&self) -> usize {
        self.team_names.len()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.team_names.len() < MIN_TEAMS {
            return Err(DomainError::config(format!(
                "at least {MIN_TEAMS} teams are required, got {}",
                self.team_names.len()
            )));
        }
        // Seeding needs one card per team plus at least one to draw.
        if self.deck_size <= self.team_names.len() {
            return Err(DomainError::config(format!(
                "deck_size must exceed the team count ({}), got {}",
                self.team_names.len(),
                self.deck_size
            )));
        }
        if self.target_score == Some(0) {
            return Err(DomainError::config("target_score must be at least 1"));
        }
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_var<T: FromStr>(name: &str, raw: &str) -> Result<T, DomainError> {
    raw.trim()
        .parse()
        .map_err(|_| DomainError::config(format!("{name} has an invalid value: '{raw}'")))
}
