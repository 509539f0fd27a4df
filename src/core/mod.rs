//! Core primitives.
//!
//! Time sources and state fingerprints used by the session logic.

pub mod clock;
pub mod hash;

// Re-export core types
pub use clock::{Clock, ClockSample, ManualClock};
pub use hash::{compute_state_hash, StateHash, StateHasher};
