//! Grace window for protected views.
//!
//! On a hard reload the session is restored from storage slightly after the
//! first render. Redirecting immediately would bounce a connected user to
//! the landing page, so protected views wait up to `grace_ms` for the store
//! to report back.

use lib_core::{Config, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Restoration pending; render a placeholder.
    Wait,
    Allow,
    RedirectToLanding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreGate {
    grace_ms: u32,
}

impl Default for RestoreGate {
    fn default() -> Self {
        Self::new(1_000)
    }
}

impl RestoreGate {
    pub fn new(grace_ms: u32) -> Self {
        Self { grace_ms }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.restore_grace_ms)
    }

    pub fn grace_ms(&self) -> u32 {
        self.grace_ms
    }

    /// `restored` is whether the store has reported back; `elapsed_ms` is
    /// time since the view mounted.
    pub fn decide(&self, session: &Session, restored: bool, elapsed_ms: u64) -> GateDecision {
        if session.is_connected() {
            GateDecision::Allow
        } else if !restored && elapsed_ms < u64::from(self.grace_ms) {
            GateDecision::Wait
        } else {
            GateDecision::RedirectToLanding
        }
    }
}
