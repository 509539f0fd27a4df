//! Game Logic Module
//!
//! Everything a session does. No I/O and no clock reads.
//!
//! ## Module Structure
//!
//! - `config`: Fuse rules and timing mode
//! - `state`: Session state, answers, pause, queries
//! - `tick`: Timer advance and explosion detection
//! - `events`: Session events for logging/replay
//! - `replay`: Re-run recorded inputs

pub mod config;
pub mod events;
pub mod replay;
pub mod state;
pub mod tick;

// Re-export key types
pub use config::{FuseConfig, TimingMode};
pub use events::{GameEvent, GameEventData};
pub use replay::{replay_session, SessionInput};
pub use state::{FusePhase, Session, SessionId, SessionSummary};
pub use tick::{tick, TickResult};
