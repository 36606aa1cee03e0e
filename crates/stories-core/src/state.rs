//! Playback State Machine
//!
//! ```text
//! Idle (no items, terminal)
//!
//! Paused  --appear / press end-->  Playing
//!         <--press begin / disappear--
//! ```
//!
//! Taps move the selection without leaving the current state.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Nothing to show
    Idle,
    /// Tick driver running
    Playing,
    /// Tick driver stopped, selection kept
    Paused,
}

impl PlaybackState {
    /// Check if transition to another state is valid
    pub fn can_transition_to(&self, target: PlaybackState) -> bool {
        match (self, target) {
            (PlaybackState::Paused, PlaybackState::Playing) => true,
            (PlaybackState::Playing, PlaybackState::Paused) => true,
            // Same state is always valid (no-op)
            (a, b) if *a == b => true,
            // An empty sequence never leaves Idle, and nothing returns to it
            _ => false,
        }
    }

    /// Returns true if ticks are being delivered
    pub fn is_ticking(&self) -> bool {
        matches!(self, PlaybackState::Playing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackState::Idle => "idle",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
        }
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PlaybackState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "idle" => Ok(PlaybackState::Idle),
            "playing" => Ok(PlaybackState::Playing),
            "paused" => Ok(PlaybackState::Paused),
            _ => Err(format!("Unknown playback state: {}", s)),
        }
    }
}
