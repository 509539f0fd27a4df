//! Host Surface
//!
//! The flat, synchronous call surface an embedding host binds to.

pub mod slot;

pub use slot::GameSlot;
