//! Session State
//!
//! The live state of one quiz session: score, answer counts and the fuse.
//!
//! ## Fuse accounting
//!
//! The stored fuse is capped at `max_game_time` after every change. A wrong
//! answer may overdraw it below zero; the overdraw is reported as 0 by every
//! accessor and is turned into an explosion by the next `advance_timer` call.
//! An overdrawn fuse is frozen: later answers neither extend nor shorten it,
//! so the pending explosion cannot be undone.
//! Once exploded, the fuse is stored as exactly 0 and never rises again.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::clock::ClockSample;
use crate::core::hash::{compute_state_hash, StateHash};
use crate::error::SessionError;
use crate::game::config::FuseConfig;
use crate::game::events::{GameEvent, GameEventData};

/// Events reserved up front.
const EVENT_CAPACITY: usize = 16;

/// Undrained events kept per session. Oldest are dropped beyond this.
pub const MAX_PENDING_EVENTS: usize = 256;

/// Unique session identifier (UUID bytes).
pub type SessionId = [u8; 16];

// =============================================================================
// FUSE PHASE
// =============================================================================

/// Phase of a live session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FusePhase {
    /// Fuse is burning
    #[default]
    Active,
    /// Fuse reached zero. Terminal until the session is replaced.
    Exploded,
}

// =============================================================================
// SESSION SUMMARY
// =============================================================================

/// Snapshot of a session's results.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Accumulated score
    pub score: u32,
    /// Answers submitted
    pub questions_answered: u32,
    /// Correct answers submitted
    pub correct_answers: u32,
    /// Wrong answers submitted
    pub wrong_answers: u32,
    /// Configured question count
    pub total_questions: u32,
    /// Whether the fuse ran out
    pub exploded: bool,
    /// Remaining fuse, 0-100
    pub fuse_percentage: f64,
}

// =============================================================================
// SESSION
// =============================================================================

/// One quiz session.
#[derive(Clone, Debug)]
pub struct Session {
    pub(crate) id: SessionId,
    pub(crate) config: FuseConfig,
    pub(crate) score: u32,
    pub(crate) questions_answered: u32,
    pub(crate) correct_answers: u32,
    pub(crate) total_questions: u32,
    /// Raw fuse; may be negative between a wrong answer and the next tick.
    pub(crate) time_remaining: f64,
    pub(crate) phase: FusePhase,
    pub(crate) paused: bool,
    pub(crate) last_sample: ClockSample,
    pub(crate) next_sequence: u64,
    pub(crate) pending_events: Vec<GameEvent>,
}

impl Session {
    /// Create a fresh session with a full fuse.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `config` fails validation, `Allocation` if the
    /// event buffer cannot be reserved.
    pub fn new(config: FuseConfig, total_questions: u32) -> Result<Self, SessionError> {
        config.validate()?;

        let mut pending_events = Vec::new();
        pending_events
            .try_reserve(EVENT_CAPACITY)
            .map_err(|_| SessionError::Allocation)?;

        let fuse_seconds = config.max_game_time;
        let mut session = Self {
            id: uuid::Uuid::new_v4().into_bytes(),
            config,
            score: 0,
            questions_answered: 0,
            correct_answers: 0,
            total_questions,
            time_remaining: fuse_seconds,
            phase: FusePhase::Active,
            paused: false,
            last_sample: ClockSample::UNSET,
            next_sequence: 0,
            pending_events,
        };
        session.push_event(GameEventData::SessionStarted {
            total_questions,
            fuse_seconds,
        });
        Ok(session)
    }

    /// Submit an answer.
    ///
    /// Always counts the answer. A correct answer scores and extends the
    /// fuse up to the cap; a wrong answer shortens it and may overdraw it.
    /// Once the fuse is at or below zero it no longer moves.
    /// Never detonates: explosion is detected by `advance_timer`.
    /// `total_questions` is not enforced.
    pub fn answer_question(&mut self, is_correct: bool) {
        self.questions_answered = self.questions_answered.saturating_add(1);

        let before = self.time_remaining;
        let mut points = 0;
        if is_correct {
            points = self.config.correct_answer_points;
            self.score = self.score.saturating_add(points);
            self.correct_answers = self.correct_answers.saturating_add(1);
        }

        if !self.is_exploded() && self.time_remaining > 0.0 {
            if is_correct {
                self.time_remaining = (self.time_remaining + self.config.time_for_correct_answer)
                    .min(self.config.max_game_time);
            } else {
                self.time_remaining -= self.config.time_penalty_for_wrong;
            }
        }

        self.push_event(GameEventData::AnswerRecorded {
            correct: is_correct,
            points,
            time_delta: self.time_remaining - before,
            new_score: self.score,
            time_remaining: self.time_remaining(),
        });
    }

    /// Suspend or resume elapsed-time accounting.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            self.paused = paused;
            self.push_event(GameEventData::PauseChanged { paused });
        }
    }

    /// Whether elapsed-time accounting is suspended.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Remaining fuse as a percentage in `[0, 100]`.
    pub fn fuse_percentage(&self) -> f64 {
        (self.time_remaining / self.config.max_game_time * 100.0).clamp(0.0, 100.0)
    }

    /// Remaining fuse in seconds, in `[0, max_game_time]`.
    pub fn time_remaining(&self) -> f64 {
        self.time_remaining.clamp(0.0, self.config.max_game_time)
    }

    /// Whether a wrong answer has pushed the fuse to zero or below and the
    /// explosion has not been detected yet.
    pub fn is_overdrawn(&self) -> bool {
        !self.is_exploded() && self.time_remaining <= 0.0
    }

    /// Whether the fuse has run out.
    #[inline]
    pub fn is_exploded(&self) -> bool {
        self.phase == FusePhase::Exploded
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> FusePhase {
        self.phase
    }

    /// Session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Rules this session runs under.
    pub fn config(&self) -> &FuseConfig {
        &self.config
    }

    /// Accumulated score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Answers submitted, correct or not.
    pub fn questions_answered(&self) -> u32 {
        self.questions_answered
    }

    /// Correct answers submitted.
    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    /// Wrong answers submitted.
    pub fn wrong_answers(&self) -> u32 {
        self.questions_answered - self.correct_answers
    }

    /// Configured question count.
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    /// Questions left before `total_questions` is reached (0 if exceeded).
    pub fn questions_remaining(&self) -> u32 {
        self.total_questions.saturating_sub(self.questions_answered)
    }

    /// Whether at least `total_questions` answers have been submitted.
    pub fn all_answered(&self) -> bool {
        self.questions_answered >= self.total_questions
    }

    /// Last absolute-clock sample, if any.
    pub fn last_sample(&self) -> Option<f64> {
        self.last_sample.get()
    }

    /// Results snapshot.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            score: self.score,
            questions_answered: self.questions_answered,
            correct_answers: self.correct_answers,
            wrong_answers: self.wrong_answers(),
            total_questions: self.total_questions,
            exploded: self.is_exploded(),
            fuse_percentage: self.fuse_percentage(),
        }
    }

    /// Fingerprint of the observable state.
    ///
    /// The session id is excluded so that replays of the same inputs match.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.next_sequence, |hasher| {
            hasher.update_u32(self.score);
            hasher.update_u32(self.questions_answered);
            hasher.update_u32(self.correct_answers);
            hasher.update_u32(self.total_questions);
            hasher.update_f64(self.time_remaining);
            hasher.update_bool(self.is_exploded());
            hasher.update_bool(self.paused);
            hasher.update_opt_f64(self.last_sample.get());
        })
    }

    /// Take pending events (consumes them).
    ///
    /// Callers should drain regularly; only the newest
    /// [`MAX_PENDING_EVENTS`] are kept, and gaps show in `sequence`.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Mark the fuse as exploded and pin it at zero.
    pub(crate) fn detonate(&mut self) {
        if self.is_exploded() {
            return;
        }
        self.phase = FusePhase::Exploded;
        self.time_remaining = 0.0;
        info!(
            session = %hex::encode(&self.id[..4]),
            score = self.score,
            answered = self.questions_answered,
            "Fuse exploded"
        );
        self.push_event(GameEventData::FuseExploded {
            questions_answered: self.questions_answered,
            score: self.score,
        });
    }

    /// Push a session event.
    pub(crate) fn push_event(&mut self, data: GameEventData) {
        let event = GameEvent::new(self.next_sequence, data);
        self.next_sequence += 1;
        if self.pending_events.len() >= MAX_PENDING_EVENTS {
            self.pending_events.remove(0);
        }
        self.pending_events.push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::TimingMode;

    fn session(total_questions: u32) -> Session {
        Session::new(FuseConfig::default(), total_questions).unwrap()
    }

    #[test]
    fn test_new_session_is_full() {
        for n in [0, 1, 5, 1000] {
            let s = session(n);
            assert_eq!(s.score(), 0);
            assert_eq!(s.questions_answered(), 0);
            assert_eq!(s.total_questions(), n);
            assert_eq!(s.time_remaining(), 20.0);
            assert_eq!(s.fuse_percentage(), 100.0);
            assert!(!s.is_exploded());
            assert!(!s.is_paused());
            assert_eq!(s.last_sample(), None);
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = FuseConfig {
            max_game_time: -1.0,
            ..FuseConfig::default()
        };
        assert!(matches!(
            Session::new(config, 3),
            Err(SessionError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_correct_answer_is_capped() {
        let mut s = session(5);
        s.answer_question(true);
        assert_eq!(s.score(), 10);
        assert_eq!(s.time_remaining(), 20.0);
        assert_eq!(s.questions_answered(), 1);
    }

    #[test]
    fn test_wrong_answer_penalty() {
        let mut s = session(5);
        s.answer_question(true);
        s.answer_question(false);
        assert_eq!(s.score(), 10);
        assert_eq!(s.time_remaining(), 10.0);
        assert_eq!(s.fuse_percentage(), 50.0);
        assert_eq!(s.wrong_answers(), 1);
    }

    #[test]
    fn test_wrong_answer_overdraws_without_exploding() {
        let mut s = session(5);
        s.answer_question(false);
        s.answer_question(false);
        s.answer_question(false);
        assert!(!s.is_exploded());
        assert!(s.is_overdrawn());
        assert_eq!(s.time_remaining(), 0.0);
        assert_eq!(s.fuse_percentage(), 0.0);

        s.answer_question(true);
        assert!(s.is_overdrawn());
    }

    #[test]
    fn test_correct_answer_cannot_rescue_overdrawn_fuse() {
        let mut s = session(5);
        s.answer_question(false);
        s.answer_question(false);
        assert!(s.is_overdrawn());

        s.answer_question(true);
        assert_eq!(s.score(), 10);
        assert_eq!(s.time_remaining(), 0.0);
        assert_eq!(s.fuse_percentage(), 0.0);
        assert!(s.is_overdrawn());

        assert!(s.advance_timer(0.0));
        assert!(s.is_exploded());
    }

    #[test]
    fn test_pending_events_are_capped() {
        let mut s = session(5);
        for _ in 0..300 {
            s.set_paused(!s.is_paused());
        }

        let events = s.take_events();
        assert_eq!(events.len(), MAX_PENDING_EVENTS);
        // SessionStarted + 300 pause changes, newest 256 kept
        assert_eq!(events[0].sequence, 45);
        assert_eq!(events[MAX_PENDING_EVENTS - 1].sequence, 300);
    }

    #[test]
    fn test_answers_after_explosion_grant_no_time() {
        let mut s = session(5);
        s.detonate();
        s.answer_question(true);
        assert_eq!(s.score(), 10);
        assert_eq!(s.questions_answered(), 1);
        assert_eq!(s.time_remaining(), 0.0);
        assert!(s.is_exploded());
    }

    #[test]
    fn test_total_questions_not_enforced() {
        let mut s = session(1);
        s.answer_question(true);
        assert!(s.all_answered());
        s.answer_question(true);
        assert_eq!(s.questions_answered(), 2);
        assert_eq!(s.questions_remaining(), 0);
    }

    #[test]
    fn test_pause_flag() {
        let mut s = Session::new(FuseConfig::absolute_clock(), 3).unwrap();
        assert_eq!(s.config().timing, TimingMode::AbsoluteClock);
        s.set_paused(true);
        assert!(s.is_paused());
        s.set_paused(false);
        assert!(!s.is_paused());
    }

    #[test]
    fn test_events_are_sequenced() {
        let mut s = session(2);
        s.answer_question(true);
        s.set_paused(true);
        s.set_paused(true); // unchanged, no event
        s.detonate();
        s.detonate(); // already exploded, no event

        let events = s.take_events();
        let sequences: Vec<u64> = events.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![0, 1, 2, 3]);
        assert!(matches!(events[0].data, GameEventData::SessionStarted { total_questions: 2, .. }));
        assert!(events[3].is_explosion());
        assert!(s.take_events().is_empty());
    }

    #[test]
    fn test_summary() {
        let mut s = session(4);
        s.answer_question(true);
        s.answer_question(false);
        s.answer_question(true);

        let summary = s.summary();
        assert_eq!(summary.score, 20);
        assert_eq!(summary.questions_answered, 3);
        assert_eq!(summary.correct_answers, 2);
        assert_eq!(summary.wrong_answers, 1);
        assert_eq!(summary.total_questions, 4);
        assert!(!summary.exploded);
        assert_eq!(summary.fuse_percentage, 75.0);
    }

    #[test]
    fn test_hash_ignores_session_id() {
        let mut a = session(3);
        let mut b = session(3);
        assert_ne!(a.id(), b.id());
        a.answer_question(true);
        b.answer_question(true);
        assert_eq!(a.compute_hash(), b.compute_hash());

        b.answer_question(false);
        assert_ne!(a.compute_hash(), b.compute_hash());
    }
}
