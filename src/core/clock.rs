//! Time Sources
//!
//! Absolute-clock sessions are driven by timestamps in seconds.
//! The session never reads the clock itself; the caller samples a
//! [`Clock`] and passes the value in, which keeps the session
//! deterministic and replayable.

use std::cell::Cell;

use serde::{Deserialize, Serialize};

/// A source of absolute timestamps, in seconds.
pub trait Clock {
    /// Current timestamp in seconds.
    fn now_secs(&self) -> f64;
}

/// Manually advanced clock for drivers and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    /// Create a clock starting at `start` seconds.
    pub fn new(start: f64) -> Self {
        Self { now: Cell::new(start) }
    }

    /// Move the clock forward by `secs`.
    pub fn advance(&self, secs: f64) {
        self.now.set(self.now.get() + secs);
    }

    /// Jump to an exact timestamp.
    pub fn set(&self, secs: f64) {
        self.now.set(secs);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        self.now.get()
    }
}

/// Last observed clock sample.
///
/// `None` means no sample yet, so a timestamp of exactly 0.0 is a
/// legitimate sample rather than a sentinel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClockSample(Option<f64>);

impl ClockSample {
    /// No sample observed yet.
    pub const UNSET: ClockSample = ClockSample(None);

    /// Previous sample, if any.
    #[inline]
    pub fn get(self) -> Option<f64> {
        self.0
    }

    /// Record `now` and return the elapsed seconds since the previous
    /// sample. The first sample and clock regressions yield 0.
    pub fn observe(&mut self, now: f64) -> f64 {
        let elapsed = match self.0 {
            Some(prev) if now > prev => now - prev,
            _ => 0.0,
        };
        self.0 = Some(now);
        elapsed
    }

    /// Whether the clock went backwards relative to the last sample.
    #[inline]
    pub fn is_regression(self, now: f64) -> bool {
        self.0.is_some_and(|prev| now < prev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_charges_nothing() {
        let mut sample = ClockSample::UNSET;
        assert_eq!(sample.observe(100.0), 0.0);
        assert_eq!(sample.get(), Some(100.0));
    }

    #[test]
    fn test_zero_timestamp_is_a_real_sample() {
        let mut sample = ClockSample::UNSET;
        assert_eq!(sample.observe(0.0), 0.0);
        assert_eq!(sample.get(), Some(0.0));
        assert_eq!(sample.observe(2.5), 2.5);
    }

    #[test]
    fn test_regression_charges_nothing() {
        let mut sample = ClockSample::UNSET;
        sample.observe(10.0);
        assert!(sample.is_regression(4.0));
        assert_eq!(sample.observe(4.0), 0.0);
        assert_eq!(sample.get(), Some(4.0));
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(5.0);
        clock.advance(1.5);
        assert_eq!(clock.now_secs(), 6.5);
        clock.set(0.0);
        assert_eq!(clock.now_secs(), 0.0);
    }
}
