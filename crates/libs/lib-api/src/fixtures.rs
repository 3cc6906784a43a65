//! # Demo Dataset
//!
//! What demo sessions see instead of live API data: a four-asset portfolio
//! (XLM, USDC, ETH, BTC) slightly overweight in BTC, the matching risk
//! analysis, a handful of alerts and a rebalance plan that brings BTC back
//! to target.
//!
//! Timestamps are relative to `now` so the dashboard always shows recent
//! activity.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDateTime};
use lib_core::DEMO_ADDRESS;
use shared::dto::{
    Alert, AssetStatus, MessageResponse, OrderExecution, OrderSide, Portfolio, PortfolioAsset, Priority,
    RebalanceExecution, RebalanceOrder, RebalanceSuggestion, Recommendation, RecommendationDetail, RiskAnalysis,
    RiskFactors, Severity,
};

pub const DEMO_TOTAL_VALUE: f64 = 128_750.0;
pub const DEMO_RISK_SCORE: f64 = 42.5;

/// Reply to every write made in demo mode.
pub const DEMO_WRITE_MESSAGE: &str = "Demo mode: changes are not saved";

struct Holding {
    code: &'static str,
    issuer: Option<&'static str>,
    balance: f64,
    target: f64,
    current: f64,
    value: f64,
    price: f64,
    notes: &'static str,
    age_days: i64,
}

const HOLDINGS: [Holding; 4] = [
    Holding {
        code: "XLM",
        issuer: None,
        balance: 50_000.0,
        target: 10.0,
        current: 9.73,
        value: 12_500.0,
        price: 0.25,
        notes: "Native Stellar asset",
        age_days: 30,
    },
    Holding {
        code: "USDC",
        issuer: Some("GA5ZSEJYB37JRC5AVCIA5MOP4RHTM335X2KGX3IHOJAPP5RE34K4KZVN"),
        balance: 25_000.0,
        target: 20.0,
        current: 19.42,
        value: 25_000.0,
        price: 1.0,
        notes: "Circle USD Coin",
        age_days: 25,
    },
    Holding {
        code: "ETH",
        issuer: Some("GDVKVA22NDD3M5TBUHX7LPOQLPDRH6GVB63WXLRGDVWJDIERA5EYT25O"),
        balance: 15.5,
        target: 30.0,
        current: 27.18,
        value: 35_000.0,
        price: 2_258.06,
        notes: "Ethereum wrapped on Stellar",
        age_days: 20,
    },
    Holding {
        code: "BTC",
        issuer: Some("GBVOL67TMUQBGL4TZYNMY3ZQ5WGQYFPFD5VJRWXR72VA33VFNL225PL5"),
        balance: 0.8,
        target: 40.0,
        current: 43.67,
        value: 56_250.0,
        price: 70_312.50,
        notes: "Bitcoin wrapped on Stellar",
        age_days: 15,
    },
];

pub fn portfolio(now: NaiveDateTime) -> Portfolio {
    let assets = HOLDINGS
        .iter()
        .zip(1..)
        .map(|(h, id)| PortfolioAsset {
            id,
            asset_code: h.code.to_string(),
            asset_issuer: h.issuer.map(str::to_string),
            balance: h.balance,
            price_usd: h.price,
            value_usd: h.value,
            target_allocation: h.target,
            current_allocation: h.current,
            status: AssetStatus::Owned,
            notes: Some(h.notes.to_string()),
            target_date: None,
            created_at: Some(now - Duration::days(h.age_days)),
            updated_at: None,
        })
        .collect();

    Portfolio {
        id: None,
        user_id: Some("demo".to_string()),
        wallet_address: DEMO_ADDRESS.to_string(),
        risk_tolerance: 0.6,
        total_value: DEMO_TOTAL_VALUE,
        risk_score: DEMO_RISK_SCORE,
        assets,
        timestamp: Some(now),
    }
}

pub fn risk_analysis(now: NaiveDateTime) -> RiskAnalysis {
    let recommendation = |kind: &str, priority, action: &str, impact: &str| {
        Recommendation::Detailed(RecommendationDetail {
            kind: kind.to_string(),
            priority,
            action: action.to_string(),
            impact: impact.to_string(),
        })
    };

    RiskAnalysis {
        portfolio_value: DEMO_TOTAL_VALUE,
        var_95: 3_862.5,
        var_99: 6_437.5,
        volatility: 22.3,
        sharpe_ratio: 1.35,
        beta: 0.89,
        max_drawdown: 15.2,
        risk_score: DEMO_RISK_SCORE,
        recommendations: vec![
            recommendation(
                "rebalance",
                Priority::Medium,
                "Consider reducing BTC allocation from 43.67% to target 40%",
                "Lower portfolio concentration risk",
            ),
            recommendation(
                "diversification",
                Priority::Low,
                "Add more stablecoins or DeFi tokens for better diversification",
                "Reduce overall portfolio volatility",
            ),
            recommendation(
                "risk_management",
                Priority::High,
                "Set stop-loss orders at 20% below current prices",
                "Limit potential downside losses",
            ),
        ],
        risk_factors: Some(RiskFactors {
            concentration_risk: 43.67,
            volatility_risk: 22.3,
            liquidity_risk: 5.2,
            correlation_risk: 67.8,
        }),
        timestamp: Some(now),
    }
}

pub fn alerts(now: NaiveDateTime) -> Vec<Alert> {
    let alert = |id, alert_type: &str, severity, message: &str, hours_ago, resolved_hours_ago: Option<i64>| Alert {
        id,
        alert_type: alert_type.to_string(),
        severity,
        message: message.to_string(),
        triggered_at: now - Duration::hours(hours_ago),
        resolved_at: resolved_hours_ago.map(|h| now - Duration::hours(h)),
        is_active: resolved_hours_ago.is_none(),
    };

    vec![
        alert(
            1,
            "rebalance",
            Severity::Medium,
            "BTC allocation is 3.67% above target. Consider rebalancing to optimize risk-adjusted returns.",
            2,
            None,
        ),
        alert(
            2,
            "volatility",
            Severity::High,
            "High volatility detected across crypto assets. Portfolio volatility increased to 22.3%.",
            4,
            None,
        ),
        alert(
            3,
            "anomaly",
            Severity::Low,
            "Price anomaly detected in XLM/USDC pair. Potential arbitrage opportunity with 1.2% price difference.",
            6,
            None,
        ),
        alert(
            4,
            "liquidation",
            Severity::Low,
            "Liquidation risk assessment: portfolio is healthy with low liquidation risk (5.2%).",
            8,
            Some(6),
        ),
        alert(
            5,
            "market_update",
            Severity::Low,
            "Market sentiment update: crypto market showing bullish signals.",
            12,
            None,
        ),
    ]
}

pub fn active_alerts(now: NaiveDateTime) -> Vec<Alert> {
    alerts(now).into_iter().filter(|a| a.is_active).collect()
}

fn suggested_orders() -> Vec<RebalanceOrder> {
    let order = |code: &str, side, current_value, target_value, current, target| RebalanceOrder {
        asset_code: code.to_string(),
        order_type: side,
        current_value,
        target_value,
        value_difference: target_value - current_value,
        current_allocation: current,
        target_allocation: target,
    };

    vec![
        order("BTC", OrderSide::Sell, 56_250.0, 51_500.0, 43.67, 40.0),
        order("ETH", OrderSide::Buy, 35_000.0, 38_625.0, 27.18, 30.0),
        order("USDC", OrderSide::Buy, 25_000.0, 25_750.0, 19.42, 20.0),
        order("XLM", OrderSide::Buy, 12_500.0, 12_875.0, 9.73, 10.0),
    ]
}

pub fn rebalance_suggestion(now: NaiveDateTime) -> RebalanceSuggestion {
    let current_allocation: BTreeMap<String, f64> =
        HOLDINGS.iter().map(|h| (h.code.to_string(), h.current)).collect();
    let target_allocation: BTreeMap<String, f64> = HOLDINGS.iter().map(|h| (h.code.to_string(), h.target)).collect();

    RebalanceSuggestion {
        should_rebalance: true,
        current_allocation,
        target_allocation,
        suggested_orders: suggested_orders(),
        estimated_cost: 15.75,
        risk_improvement: 8.2,
        confidence_score: Some(78.5),
        expected_return_improvement: Some(3.1),
        timestamp: Some(now),
    }
}

/// Simulated fills: 0.1% fee, nothing is actually traded.
pub fn rebalance_execution(orders: &[RebalanceOrder], now: NaiveDateTime) -> RebalanceExecution {
    let execution_results: Vec<OrderExecution> = orders
        .iter()
        .map(|o| {
            let requested = o.value_difference.abs();
            OrderExecution {
                asset_code: o.asset_code.clone(),
                order_type: o.order_type,
                requested_value: requested,
                executed_value: requested,
                cost: requested * 0.001,
                status: "simulated".to_string(),
                timestamp: Some(now),
            }
        })
        .collect();
    let total_cost = execution_results.iter().map(|r| r.cost).sum();

    RebalanceExecution {
        message: DEMO_WRITE_MESSAGE.to_string(),
        execution_results,
        total_cost,
        timestamp: Some(now),
    }
}

pub fn write_ack() -> MessageResponse {
    MessageResponse {
        message: DEMO_WRITE_MESSAGE.to_string(),
    }
}
