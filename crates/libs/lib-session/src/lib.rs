//! # Session Library
//!
//! The single owner of the current [`Session`](lib_core::Session).
//!
//! - [`SessionController`] - state machine: connect, demo, disconnect, restore
//! - [`RestoreGate`] - protected-view decision while restoration is in flight

pub mod controller;
pub mod gate;

pub use controller::{AttemptOutcome, AttemptToken, SessionController};
pub use gate::{GateDecision, RestoreGate};
