//! Session Slot
//!
//! Holds zero or one session on behalf of an embedding host and exposes
//! the flat call surface the host binds to. When the slot is empty every
//! operation except `initialize` is a no-op returning a neutral value
//! (`false`, `0.0`), so hosts may poll before the first game starts.
//!
//! The slot is a plain value owned by the caller. It does no locking: a
//! multi-threaded host must serialize whole call sequences itself.

use tracing::{debug, info};

use crate::error::SessionError;
use crate::game::config::FuseConfig;
use crate::game::events::GameEvent;
use crate::game::state::Session;

/// Zero-or-one session holder.
#[derive(Debug, Default)]
pub struct GameSlot {
    /// Rules applied to every new session.
    config: FuseConfig,
    /// Live session, if any.
    session: Option<Session>,
}

impl GameSlot {
    /// Create an empty slot.
    pub fn new(config: FuseConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// Start a new session, discarding any current one.
    ///
    /// The replacement is fully built before the old session is dropped,
    /// so on error the current session is left untouched.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `total_questions` is negative or does not fit
    /// in a `u32`, or the slot's config is invalid. `Allocation` if session
    /// storage cannot be obtained.
    pub fn initialize(&mut self, total_questions: i64) -> Result<(), SessionError> {
        let total = u32::try_from(total_questions).map_err(|_| {
            SessionError::invalid(
                "total_questions",
                format!("must be between 0 and {}, got {total_questions}", u32::MAX),
            )
        })?;

        let session = Session::new(self.config.clone(), total)?;
        info!(
            session = %hex::encode(&session.id()[..4]),
            total_questions = total,
            replaced = self.session.is_some(),
            "Session initialized"
        );
        self.session = Some(session);
        Ok(())
    }

    /// Submit an answer. No-op without a session.
    pub fn answer(&mut self, is_correct: bool) {
        if let Some(session) = self.session.as_mut() {
            session.answer_question(is_correct);
            debug!(
                correct = is_correct,
                score = session.score(),
                time_remaining = session.time_remaining(),
                "Answer recorded"
            );
        }
    }

    /// Advance the fuse. Returns whether the session is exploded;
    /// `false` without a session.
    pub fn advance_timer(&mut self, value: f64) -> bool {
        self.session
            .as_mut()
            .is_some_and(|session| session.advance_timer(value))
    }

    /// Remaining fuse percentage; `0.0` without a session.
    pub fn get_fuse_percentage(&self) -> f64 {
        self.session.as_ref().map_or(0.0, Session::fuse_percentage)
    }

    /// Set the pause flag. No-op without a session.
    pub fn set_paused(&mut self, paused: bool) {
        if let Some(session) = self.session.as_mut() {
            session.set_paused(paused);
            debug!(paused, "Pause flag set");
        }
    }

    /// Pause flag; `false` without a session.
    pub fn is_paused(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_paused)
    }

    /// Drop the current session, if any.
    pub fn free(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(session = %hex::encode(&session.id()[..4]), "Session freed");
        }
    }

    /// Whether a session is live.
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Borrow the live session.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Drain the live session's pending events; empty without a session.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.session
            .as_mut()
            .map(Session::take_events)
            .unwrap_or_default()
    }

    /// Rules applied to new sessions.
    pub fn config(&self) -> &FuseConfig {
        &self.config
    }
}
