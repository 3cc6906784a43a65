//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the Risk Guardian dashboard and the
//! external risk API. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::portfolio`]**: Portfolio, holdings and user creation
//!   - **[`dto::risk`]**: Risk analysis metrics and recommendations
//!   - **[`dto::alerts`]**: Risk alerts
//!   - **[`dto::rebalance`]**: Rebalance suggestions and execution
//! - **[`utils`]**: Display helpers shared by the web crate and the gateway
//!
//! ## Wire Format
//!
//! The risk API speaks snake_case JSON. Timestamps are ISO-8601 without a
//! timezone suffix, so they map to [`chrono::NaiveDateTime`]. Fields the API
//! only sends in some responses are `Option` with `#[serde(default)]`.
//!
//! ```rust
//! use shared::dto::portfolio::CreateUserRequest;
//!
//! let request = CreateUserRequest::new("GA5ZSEJYB37JRC5AVCIA5MOP4RHTM335X2KGX3IHOJAPP5RE34K4KZVN");
//! let body = serde_json::to_value(&request).unwrap();
//! assert_eq!(body["risk_tolerance"], 0.5);
//! ```

pub mod dto;
pub mod utils;

pub use dto::*;
pub use utils::*;
