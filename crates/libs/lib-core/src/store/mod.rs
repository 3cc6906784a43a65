//! # Session Persistence
//!
//! Everything the dashboard keeps across reloads goes through a
//! [`KeyValueStorage`] backend:
//!
//! - [`SessionStore`] - the canonical session record (plus legacy keys)
//! - [`TokenStore`] - the optional API bearer token
//!
//! Backends: [`MemoryStorage`] here, `BrowserStorage` (`localStorage`) in
//! the web crate.

mod kv;
mod record;
mod session_store;
mod token_store;

pub use kv::{KeyValueStorage, MemoryStorage, StorageError};
pub use record::SessionRecord;
pub use session_store::{Restored, SessionRepository, SessionStore, LEGACY_KEYS, SESSION_KEY};
pub use token_store::{TokenStore, TOKEN_KEY};
