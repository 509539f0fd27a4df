//! # Bomb Fuse
//!
//! Session engine for a timed "bomb defusal" quiz.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        BOMB FUSE                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Primitives                                │
//! │  ├── clock.rs    - Time sources and clock samples            │
//! │  └── hash.rs     - Session fingerprints                      │
//! │                                                              │
//! │  game/           - Session logic (no I/O)                    │
//! │  ├── config.rs   - Fuse rules and timing mode                │
//! │  ├── state.rs    - Session state and answers                 │
//! │  ├── tick.rs     - Timer advance, explosion detection        │
//! │  ├── events.rs   - Session events                            │
//! │  └── replay.rs   - Input script replay                       │
//! │                                                              │
//! │  host/           - Caller surface                            │
//! │  └── slot.rs     - Zero-or-one session holder                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fuse Rules
//!
//! - The fuse starts full and is capped at `max_game_time`
//! - A correct answer scores points and extends the fuse
//! - A wrong answer shortens the fuse
//! - `advance_timer` burns the fuse; reaching zero explodes the session
//!   permanently

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod game;
pub mod host;

// Re-export commonly used types
pub use crate::core::clock::{Clock, ManualClock};
pub use error::SessionError;
pub use game::config::{
    FuseConfig, TimingMode, CORRECT_ANSWER_POINTS, MAX_GAME_TIME, TIME_FOR_CORRECT_ANSWER,
    TIME_PENALTY_FOR_WRONG,
};
pub use game::state::{FusePhase, Session, SessionSummary};
pub use host::slot::GameSlot;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
