//! # Session Model
//!
//! - [`address`] - Validated Stellar account ids and reply normalization
//! - [`network`] - Mainnet / testnet selection
//! - [`wallet`] - Wallet kinds (extensions, manual entry, demo)
//! - [`session`] - The session state machine value

pub mod address;
pub mod network;
pub mod session;
pub mod wallet;

pub use address::{address_from_json, StellarAddress, DEMO_ADDRESS};
pub use network::Network;
pub use session::{Session, SessionMode};
pub use wallet::WalletKind;
