use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Risk analysis request (`POST /risk/analyze`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskAnalysisRequest {
    pub wallet_address: String,
    pub confidence_level: f64,
}

impl RiskAnalysisRequest {
    pub fn new(wallet_address: impl Into<String>) -> Self {
        Self {
            wallet_address: wallet_address.into(),
            confidence_level: 0.95,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Structured recommendation, as produced by the AI analyzer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationDetail {
    #[serde(rename = "type")]
    pub kind: String,
    pub priority: Priority,
    pub action: String,
    pub impact: String,
}

/// The live endpoint returns plain sentences; the richer analyzer returns
/// structured entries. Both are accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Recommendation {
    Detailed(RecommendationDetail),
    Text(String),
}

impl Recommendation {
    pub fn summary(&self) -> &str {
        match self {
            Recommendation::Detailed(detail) => &detail.action,
            Recommendation::Text(text) => text,
        }
    }
}

/// Breakdown of the composite risk score (each 0-100).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskFactors {
    pub concentration_risk: f64,
    pub volatility_risk: f64,
    pub liquidity_risk: f64,
    pub correlation_risk: f64,
}

/// Risk analysis response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskAnalysis {
    pub portfolio_value: f64,
    pub var_95: f64,
    pub var_99: f64,
    pub volatility: f64,
    pub sharpe_ratio: f64,
    pub beta: f64,
    pub max_drawdown: f64,
    pub risk_score: f64,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_factors: Option<RiskFactors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDateTime>,
}
