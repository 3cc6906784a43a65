use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Rebalance suggestion request (`POST /rebalance/suggest`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RebalanceRequest {
    pub wallet_address: String,
    /// Allocation drift (fraction) that triggers a rebalance.
    pub threshold: f64,
    pub max_slippage: f64,
}

impl RebalanceRequest {
    pub fn new(wallet_address: impl Into<String>) -> Self {
        Self {
            wallet_address: wallet_address.into(),
            threshold: 0.05,
            max_slippage: 0.01,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RebalanceOrder {
    pub asset_code: String,
    pub order_type: OrderSide,
    pub current_value: f64,
    pub target_value: f64,
    pub value_difference: f64,
    pub current_allocation: f64,
    pub target_allocation: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RebalanceSuggestion {
    pub should_rebalance: bool,
    pub current_allocation: BTreeMap<String, f64>,
    pub target_allocation: BTreeMap<String, f64>,
    #[serde(default)]
    pub suggested_orders: Vec<RebalanceOrder>,
    pub estimated_cost: f64,
    pub risk_improvement: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_return_improvement: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDateTime>,
}

/// Execute request (`POST /rebalance/execute`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RebalanceExecuteRequest {
    pub wallet_address: String,
    pub orders: Vec<RebalanceOrder>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderExecution {
    pub asset_code: String,
    pub order_type: OrderSide,
    pub requested_value: f64,
    pub executed_value: f64,
    pub cost: f64,
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RebalanceExecution {
    pub message: String,
    pub execution_results: Vec<OrderExecution>,
    pub total_cost: f64,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}
