//! # Wallet Library
//!
//! Detection of and connection to Stellar browser wallets.
//!
//! ## Modules
//!
//! - [`adapter`] - The [`WalletAdapter`] interface every wallet backend implements
//! - [`injected`] - Adapter for extensions that inject an object into the page
//! - [`detector`] - Repeated probing until extensions finish injecting
//! - [`connector`] - Turns a [`ConnectRequest`] into a [`Session`](lib_core::Session)
//! - [`horizon`] - Optional "does this account exist on the network" check
//!
//! Nothing here touches the DOM directly: the page is reached through the
//! [`GlobalScope`] / [`InjectedObject`] traits, which the web crate
//! implements with `js-sys` and tests implement with plain structs.

pub mod adapter;
pub mod connector;
pub mod detector;
pub mod horizon;
pub mod injected;

pub use adapter::WalletAdapter;
pub use connector::{ConnectRequest, WalletConnector};
pub use detector::{DetectionSchedule, WalletAvailability, WalletDetector};
pub use horizon::{HorizonVerifier, NetworkVerifier, NoVerification};
pub use injected::{normalize_address_reply, ExtensionProfile, GlobalScope, InjectedAdapter, InjectedObject};
