//! Timer Advance
//!
//! Burns the fuse. The input is interpreted according to the session's
//! [`TimingMode`]:
//!
//! - `Delta`: elapsed seconds since the previous call.
//! - `AbsoluteClock`: a timestamp; elapsed time is measured from the last
//!   observed sample, which is refreshed on every call (paused or not), so
//!   resuming never charges the paused interval.
//!
//! Explosion detection happens here and nowhere else.

use tracing::warn;

use crate::game::config::TimingMode;
use crate::game::events::GameEvent;
use crate::game::state::Session;

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Seconds charged to the fuse this tick
    pub elapsed: f64,
    /// Whether the session is exploded after this tick
    pub exploded: bool,
    /// Events generated since the last drain
    pub events: Vec<GameEvent>,
}

impl Session {
    /// Advance the fuse and report whether the session is exploded.
    ///
    /// Pausing suspends deduction in both timing modes, including `Delta`
    /// where the elapsed time would otherwise always be charged. An
    /// overdrawn fuse detonates even while paused.
    ///
    /// Out-of-contract inputs are clamped rather than rejected: a negative
    /// or non-finite delta charges nothing, as does a clock that went
    /// backwards. Once exploded, always returns true without further
    /// deduction.
    pub fn advance_timer(&mut self, value: f64) -> bool {
        let elapsed = self.elapsed_for(value);

        if self.is_exploded() {
            return true;
        }

        if !self.paused {
            self.time_remaining -= elapsed;
        }

        if self.time_remaining <= 0.0 {
            self.detonate();
            return true;
        }
        false
    }

    /// Seconds to charge for `value`, updating the clock sample if needed.
    fn elapsed_for(&mut self, value: f64) -> f64 {
        match self.config.timing {
            TimingMode::Delta => {
                if !value.is_finite() || value < 0.0 {
                    warn!(delta = value, "Ignoring out-of-range timer delta");
                    return 0.0;
                }
                value
            }
            TimingMode::AbsoluteClock => {
                if !value.is_finite() {
                    warn!(timestamp = value, "Ignoring non-finite clock sample");
                    return 0.0;
                }
                if self.last_sample.is_regression(value) {
                    warn!(
                        timestamp = value,
                        previous = self.last_sample.get(),
                        "Clock went backwards, charging nothing"
                    );
                }
                self.last_sample.observe(value)
            }
        }
    }
}

/// Run one tick: advance the fuse and drain pending events.
pub fn tick(session: &mut Session, value: f64) -> TickResult {
    let before = session.time_remaining;
    let exploded = session.advance_timer(value);
    let elapsed = if exploded {
        before.max(0.0)
    } else {
        before - session.time_remaining
    };

    TickResult {
        elapsed,
        exploded,
        events: session.take_events(),
    }
}
