//! # Core Library
//!
//! Session model, persistence, configuration, notices and the error taxonomy
//! shared by every Risk Guardian crate.

pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod notice;
pub mod store;

// Re-export commonly used types
pub use config::{core_config, Config};
pub use error::{GuardianError, Result};
pub use model::{Network, Session, SessionMode, StellarAddress, WalletKind, DEMO_ADDRESS};
pub use notice::{Notice, NoticeLevel, Notifier};
