//! # Centralized Error Handling
//!
//! [`GuardianError`] is the single error type used by the wallet, session,
//! store and API crates, following the `thiserror` pattern.
//!
//! ## Error Categories
//!
//! 1. **Wallet** - extension and address problems
//!    - [`NotInstalled`](GuardianError::NotInstalled), [`NotAuthorized`](GuardianError::NotAuthorized),
//!      [`Connection`](GuardianError::Connection), [`InvalidFormat`](GuardianError::InvalidFormat),
//!      [`WrongNetwork`](GuardianError::WrongNetwork), [`NotImplemented`](GuardianError::NotImplemented)
//! 2. **Storage** - [`CorruptedState`](GuardianError::CorruptedState)
//! 3. **Remote API** - [`RemoteNotFound`](GuardianError::RemoteNotFound),
//!    [`RemoteFailure`](GuardianError::RemoteFailure), [`Unauthorized`](GuardianError::Unauthorized)
//!
//! Errors never reach the view layer raw: every variant maps to a
//! user-facing [`Notice`] through [`GuardianError::notice`].
//!
//! ```rust
//! use lib_core::error::GuardianError;
//! use lib_core::notice::NoticeLevel;
//!
//! let err = GuardianError::RemoteNotFound("portfolio".to_string());
//! assert_eq!(err.notice().level, NoticeLevel::Info);
//! ```

use thiserror::Error;

use crate::model::{Network, WalletKind};
use crate::notice::{Notice, NoticeLevel};

/// Convenience type alias for `Result<T, GuardianError>`.
pub type Result<T> = std::result::Result<T, GuardianError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardianError {
    /// No injected object was found for the extension.
    #[error("{wallet} is not installed")]
    NotInstalled { wallet: WalletKind },

    /// The extension exists but refused access or returned no address.
    #[error("{wallet} did not authorize access: {reason}")]
    NotAuthorized { wallet: WalletKind, reason: String },

    /// Any other extension failure.
    #[error("Failed to connect to {wallet}: {reason}")]
    Connection { wallet: WalletKind, reason: String },

    /// Input does not match the Stellar account grammar.
    #[error("Invalid Stellar address: {0}")]
    InvalidFormat(String),

    /// The account does not exist on the selected network.
    #[error("Account not found on {expected}")]
    WrongNetwork { expected: Network },

    /// Placeholder adapters (hardware wallets).
    #[error("{0} support is not implemented yet")]
    NotImplemented(WalletKind),

    /// A persisted session could not be decoded and was discarded.
    #[error("Stored session is corrupted: {0}")]
    CorruptedState(String),

    /// HTTP 404 from the risk API. Means "no data yet".
    #[error("Not found: {0}")]
    RemoteNotFound(String),

    /// HTTP 401 from the risk API. The stored token has been dropped.
    #[error("Session expired")]
    Unauthorized,

    /// Any other HTTP or network failure.
    #[error("Request failed: {0}")]
    RemoteFailure(String),
}

impl GuardianError {
    pub fn level(&self) -> NoticeLevel {
        match self {
            GuardianError::NotImplemented(_) | GuardianError::RemoteNotFound(_) => NoticeLevel::Info,
            GuardianError::WrongNetwork { .. } | GuardianError::CorruptedState(_) | GuardianError::Unauthorized => {
                NoticeLevel::Warning
            }
            _ => NoticeLevel::Error,
        }
    }

    /// Short title plus an actionable description.
    pub fn notice(&self) -> Notice {
        let (title, description) = match self {
            GuardianError::NotInstalled { wallet } => (
                format!("{} not found", wallet),
                match wallet.install_url() {
                    Some(url) => format!("Install the {} extension from {} and reload the page.", wallet, url),
                    None => format!("{} is not available in this browser.", wallet),
                },
            ),
            GuardianError::NotAuthorized { wallet, .. } => (
                "Access denied".to_string(),
                format!("Unlock {} and approve the connection request.", wallet),
            ),
            GuardianError::Connection { wallet, reason } => (
                "Connection failed".to_string(),
                format!("{} reported: {}", wallet, reason),
            ),
            GuardianError::InvalidFormat(reason) => (
                "Invalid address".to_string(),
                format!("Stellar addresses are 56 characters starting with G ({}).", reason),
            ),
            GuardianError::WrongNetwork { expected } => (
                "Wrong network".to_string(),
                format!("This account does not exist on {}. Switch your wallet's network and try again.", expected),
            ),
            GuardianError::NotImplemented(wallet) => (
                "Coming soon".to_string(),
                format!("{} support is coming soon.", wallet),
            ),
            GuardianError::CorruptedState(_) => (
                "Session reset".to_string(),
                "Your saved session could not be read. Please reconnect your wallet.".to_string(),
            ),
            GuardianError::RemoteNotFound(what) => (
                "No data yet".to_string(),
                format!("No {} found for this wallet yet.", what),
            ),
            GuardianError::Unauthorized => (
                "Session expired".to_string(),
                "Please sign in again.".to_string(),
            ),
            GuardianError::RemoteFailure(reason) => (
                "Request failed".to_string(),
                reason.clone(),
            ),
        };
        Notice::new(self.level(), title, description)
    }
}
