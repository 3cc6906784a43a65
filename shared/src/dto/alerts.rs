use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// One risk alert (`GET /alerts/{wallet_address}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    pub id: i64,
    /// Free-form category: `rebalance`, `volatility`, `anomaly`, ...
    pub alert_type: String,
    pub severity: Severity,
    pub message: String,
    pub triggered_at: NaiveDateTime,
    #[serde(default)]
    pub resolved_at: Option<NaiveDateTime>,
    pub is_active: bool,
}

/// Create-alert request (`POST /alerts/{wallet_address}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertCreate {
    pub alert_type: String,
    pub severity: Severity,
    pub message: String,
}

/// Count active alerts at or above `min` severity.
pub fn count_active_at_least(alerts: &[Alert], min: Severity) -> usize {
    alerts
        .iter()
        .filter(|a| a.is_active && a.severity >= min)
        .count()
}
