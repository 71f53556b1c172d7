//! Shared types for the simulator.

use clap::ValueEnum;
use serde::Serialize;

/// How a simulated team guesses and when it banks its streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Knows every year; keeps drawing until the streak reaches
    /// [`PERFECT_STREAK`].
    Perfect,
    /// Uniform index, draws again on a coin flip.
    Random,
    /// Uniform index, locks in after every correct placement.
    Cautious,
}

pub const PERFECT_STREAK: u32 = 3;

/// Why a simulated game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndReason {
    TargetReached,
    DeckExhausted,
    TurnLimit,
}
