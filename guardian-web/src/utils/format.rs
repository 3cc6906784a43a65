//! # Formatting Utilities for the Dashboard
//!
//! View-specific formatting. Addresses and dollar amounts use
//! [`shared::utils`].

use lib_core::NoticeLevel;
use shared::dto::Severity;

/// Format a percentage change with an explicit sign.
///
/// ```rust
/// use guardian_web::utils::format::format_change;
///
/// assert_eq!(format_change(3.456), "+3.46%");
/// assert_eq!(format_change(-1.2), "-1.20%");
/// ```
pub fn format_change(pct: f64) -> String {
    if pct >= 0.0 {
        format!("+{:.2}%", pct)
    } else {
        format!("{:.2}%", pct)
    }
}

/// Allocation drift in percentage points; 5 points either way is tolerated.
pub fn drift_class(drift: f64) -> &'static str {
    if drift.abs() <= 5.0 {
        "price-up"
    } else {
        "price-down"
    }
}

pub fn notice_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "toast-info",
        NoticeLevel::Success => "toast-success",
        NoticeLevel::Warning => "toast-warning",
        NoticeLevel::Error => "toast-error",
    }
}

pub fn severity_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Low => "severity-low",
        Severity::Medium => "severity-medium",
        Severity::High => "severity-high",
        Severity::Critical => "severity-critical",
    }
}

/// Risk score bucket (scores are 0-100, higher is riskier).
pub fn risk_band(score: f64) -> (&'static str, &'static str) {
    match score {
        s if s < 30.0 => ("Low", "risk-low"),
        s if s < 60.0 => ("Moderate", "risk-medium"),
        s if s < 80.0 => ("High", "risk-high"),
        _ => ("Critical", "risk-critical"),
    }
}
