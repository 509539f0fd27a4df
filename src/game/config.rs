//! Fuse Configuration
//!
//! Tunable rules for a session. Defaults match the shipped game:
//! a 20 second fuse, 10 points and +5s per correct answer, -10s per
//! wrong answer, driven by elapsed-time deltas.

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Fuse length in seconds.
pub const MAX_GAME_TIME: f64 = 20.0;

/// Points awarded per correct answer.
pub const CORRECT_ANSWER_POINTS: u32 = 10;

/// Seconds added to the fuse per correct answer.
pub const TIME_FOR_CORRECT_ANSWER: f64 = 5.0;

/// Seconds removed from the fuse per wrong answer.
pub const TIME_PENALTY_FOR_WRONG: f64 = 10.0;

/// How `advance_timer` interprets its input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingMode {
    /// Input is elapsed seconds since the previous call.
    #[default]
    Delta,
    /// Input is an absolute timestamp in seconds.
    AbsoluteClock,
}

/// Rules for a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuseConfig {
    /// Full fuse length in seconds (also the cap)
    pub max_game_time: f64,
    /// Score per correct answer
    pub correct_answer_points: u32,
    /// Fuse bonus per correct answer
    pub time_for_correct_answer: f64,
    /// Fuse penalty per wrong answer
    pub time_penalty_for_wrong: f64,
    /// Timer input interpretation
    pub timing: TimingMode,
}

impl Default for FuseConfig {
    fn default() -> Self {
        Self {
            max_game_time: MAX_GAME_TIME,
            correct_answer_points: CORRECT_ANSWER_POINTS,
            time_for_correct_answer: TIME_FOR_CORRECT_ANSWER,
            time_penalty_for_wrong: TIME_PENALTY_FOR_WRONG,
            timing: TimingMode::Delta,
        }
    }
}

impl FuseConfig {
    /// Default rules with absolute-clock timing.
    pub fn absolute_clock() -> Self {
        Self {
            timing: TimingMode::AbsoluteClock,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, SessionError> {
        let config: FuseConfig = serde_json::from_str(json)
            .map_err(|e| SessionError::invalid("config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field against its contract.
    pub fn validate(&self) -> Result<(), SessionError> {
        if !self.max_game_time.is_finite() || self.max_game_time <= 0.0 {
            return Err(SessionError::invalid(
                "max_game_time",
                format!("must be a positive number of seconds, got {}", self.max_game_time),
            ));
        }
        check_adjustment("time_for_correct_answer", self.time_for_correct_answer)?;
        check_adjustment("time_penalty_for_wrong", self.time_penalty_for_wrong)?;
        Ok(())
    }
}

fn check_adjustment(name: &'static str, value: f64) -> Result<(), SessionError> {
    if !value.is_finite() || value < 0.0 {
        return Err(SessionError::invalid(
            name,
            format!("must be a non-negative number of seconds, got {value}"),
        ));
    }
    Ok(())
}
