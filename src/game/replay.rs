//! Session Replay
//!
//! Re-runs a recorded input script against a fresh session. Sessions are
//! pure functions of their inputs, so replaying the same script yields the
//! same fingerprint.

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::game::config::FuseConfig;
use crate::game::events::GameEvent;
use crate::game::state::Session;
use crate::game::tick::tick;

/// One recorded caller action.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionInput {
    /// Submit an answer
    Answer(bool),
    /// Advance the timer (delta or timestamp, per the config)
    Advance(f64),
    /// Set the pause flag
    Pause(bool),
}

/// Replay `inputs` against a new session.
///
/// Returns the final session and every event it produced. Inputs after
/// the explosion are still applied, matching live play.
pub fn replay_session(
    config: FuseConfig,
    total_questions: u32,
    inputs: &[SessionInput],
) -> Result<(Session, Vec<GameEvent>), SessionError> {
    let mut session = Session::new(config, total_questions)?;
    let mut all_events = Vec::new();

    for input in inputs {
        match *input {
            SessionInput::Answer(correct) => session.answer_question(correct),
            SessionInput::Pause(paused) => session.set_paused(paused),
            SessionInput::Advance(value) => {
                let result = tick(&mut session, value);
                all_events.extend(result.events);
            }
        }
    }
    all_events.extend(session.take_events());

    Ok((session, all_events))
}
