//! Game phase sequencing
//!
//! Phases and the events that move between them are closed enums; the
//! transition table below is the only way to change phase.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Paytable and session being configured
    #[default]
    Configuration,
    /// Waiting for a play
    Idle,
    /// Spin in progress
    Play,
    /// Presenting and paying a win
    PayWin,
    /// Session finished
    GameOver,
}

/// Event driving a phase change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseEvent {
    /// Configuration finished
    Configured,
    /// Player started a spin
    Play,
    /// Spin evaluated with at least one win
    Win,
    /// Spin evaluated with no win
    NoWin,
    /// Win fully paid
    WinPaid,
    /// Session ended
    End,
}

/// Phase transition errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("No transition from {from} on {event:?}")]
pub struct PhaseError {
    pub from: GamePhase,
    pub event: PhaseEvent,
}

impl GamePhase {
    /// Apply `event`, returning the next phase
    pub fn next(self, event: PhaseEvent) -> Result<GamePhase, PhaseError> {
        use GamePhase::*;
        use PhaseEvent as E;

        let next = match (self, event) {
            (Configuration, E::Configured) => Idle,
            (Idle, E::Play) => Play,
            (Play, E::Win) => PayWin,
            (Play, E::NoWin) => Idle,
            (PayWin, E::WinPaid) => Idle,
            (Configuration | Idle, E::End) => GameOver,
            _ => return Err(PhaseError { from: self, event }),
        };
        log::debug!("[Phase] {} --{:?}--> {}", self, event, next);
        Ok(next)
    }

    /// Check if a spin is being played or paid
    pub fn is_in_game(&self) -> bool {
        matches!(self, Self::Play | Self::PayWin)
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GamePhase::Configuration => "configuration",
            GamePhase::Idle => "idle",
            GamePhase::Play => "play",
            GamePhase::PayWin => "pay_win",
            GamePhase::GameOver => "game_over",
        };
        f.write_str(name)
    }
}
