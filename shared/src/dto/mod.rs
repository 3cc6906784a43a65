//! # Data Transfer Objects (DTOs)
//!
//! Request and response bodies of the risk API (`/api/v1/...`).
//!
//! ## Module Organization
//!
//! - [`common`] - Message and error envelopes shared by every endpoint
//! - [`portfolio`] - `/portfolio` endpoints
//! - [`risk`] - `/risk` endpoints
//! - [`alerts`] - `/alerts` endpoints
//! - [`rebalance`] - `/rebalance` endpoints
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/v1/risk/analyze
//! Content-Type: application/json
//!
//! { "wallet_address": "GA5Z...KZVN", "confidence_level": 0.95 }
//! ```
//!
//! ```text
//! HTTP/1.1 404 Not Found
//! Content-Type: application/json
//!
//! { "detail": "User not found" }
//! ```

pub mod alerts;
pub mod common;
pub mod portfolio;
pub mod rebalance;
pub mod risk;

pub use alerts::*;
pub use common::*;
pub use portfolio::*;
pub use rebalance::*;
pub use risk::*;
