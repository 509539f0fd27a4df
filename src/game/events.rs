//! Session Events
//!
//! Events recorded by every session mutation, for logging and replay.

use serde::{Deserialize, Serialize};

/// Session event data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    /// Session created with a fresh fuse
    SessionStarted {
        total_questions: u32,
        fuse_seconds: f64,
    },

    /// An answer was submitted
    AnswerRecorded {
        correct: bool,
        points: u32,
        /// Signed change applied to the fuse (0 once exploded)
        time_delta: f64,
        new_score: u32,
        time_remaining: f64,
    },

    /// Pause flag changed
    PauseChanged { paused: bool },

    /// Fuse reached zero
    FuseExploded {
        questions_answered: u32,
        score: u32,
    },
}

/// A session event with its position in the session's history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Monotonic per-session sequence number
    pub sequence: u64,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(sequence: u64, data: GameEventData) -> Self {
        Self { sequence, data }
    }

    /// Whether this is the explosion event.
    pub fn is_explosion(&self) -> bool {
        matches!(self.data, GameEventData::FuseExploded { .. })
    }
}
