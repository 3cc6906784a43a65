use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Default risk tolerance for newly created users (0.0 = none, 1.0 = max).
pub const DEFAULT_RISK_TOLERANCE: f64 = 0.5;

/// Create-user request (`POST /portfolio/users`).
///
/// The API answers with "User already exists" when the wallet is known,
/// so callers may send this on every successful connection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateUserRequest {
    pub wallet_address: String,
    pub risk_tolerance: f64,
}

impl CreateUserRequest {
    pub fn new(wallet_address: impl Into<String>) -> Self {
        Self {
            wallet_address: wallet_address.into(),
            risk_tolerance: DEFAULT_RISK_TOLERANCE,
        }
    }
}

/// Create-user response. `user_id` is stringified by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateUserResponse {
    pub message: String,
    pub user_id: String,
}

/// Holding lifecycle as tracked by the API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    #[default]
    Owned,
    Planned,
    Hidden,
}

/// One holding inside a [`Portfolio`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioAsset {
    pub id: i64,
    pub asset_code: String,
    #[serde(default)]
    pub asset_issuer: Option<String>,
    pub balance: f64,
    pub price_usd: f64,
    pub value_usd: f64,
    /// Percent of portfolio value (0-100).
    pub target_allocation: f64,
    /// Percent of portfolio value (0-100).
    pub current_allocation: f64,
    #[serde(default)]
    pub status: AssetStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub target_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Portfolio snapshot (`GET /portfolio/{wallet_address}`).
///
/// The live endpoint sends a numeric `id`; the demo dataset sends a
/// `user_id` and a `timestamp` instead. Both shapes land here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Portfolio {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub wallet_address: String,
    pub risk_tolerance: f64,
    pub total_value: f64,
    pub risk_score: f64,
    #[serde(default)]
    pub assets: Vec<PortfolioAsset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDateTime>,
}

impl Portfolio {
    /// Holdings the user has not hidden.
    pub fn visible_assets(&self) -> impl Iterator<Item = &PortfolioAsset> {
        self.assets.iter().filter(|a| a.status != AssetStatus::Hidden)
    }
}

/// Add-asset request (`POST /portfolio/{wallet_address}/assets`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetCreate {
    pub asset_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_issuer: Option<String>,
    pub balance: f64,
    pub target_allocation: f64,
    pub status: AssetStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
}
