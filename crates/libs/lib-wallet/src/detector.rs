//! # Wallet Detection
//!
//! Extensions inject their globals at unpredictable times after page load,
//! so a single check is not enough. [`WalletDetector`] probes on a
//! [`DetectionSchedule`], merging results monotonically, and stops as soon
//! as every supported extension has been seen.
//!
//! Detection only drives button labels ("Connect" vs "Install"). It is
//! never fatal.

use std::future::Future;

use lib_core::{Config, WalletKind};

use crate::injected::{ExtensionProfile, GlobalScope, InjectedAdapter};
use crate::WalletAdapter;

/// Which extensions have been seen on this page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WalletAvailability {
    pub freighter: bool,
    pub xbull: bool,
}

impl WalletAvailability {
    pub fn get(&self, kind: WalletKind) -> bool {
        match kind {
            WalletKind::Freighter => self.freighter,
            WalletKind::XBull => self.xbull,
            _ => false,
        }
    }

    pub fn mark(&mut self, kind: WalletKind) {
        match kind {
            WalletKind::Freighter => self.freighter = true,
            WalletKind::XBull => self.xbull = true,
            _ => {}
        }
    }

    /// Union of both observations. Availability never goes back to false.
    pub fn merge(self, other: WalletAvailability) -> WalletAvailability {
        WalletAvailability {
            freighter: self.freighter || other.freighter,
            xbull: self.xbull || other.xbull,
        }
    }

    pub fn all_found(&self) -> bool {
        WalletKind::EXTENSIONS.iter().all(|kind| self.get(*kind))
    }

    pub fn any_found(&self) -> bool {
        WalletKind::EXTENSIONS.iter().any(|kind| self.get(*kind))
    }
}

/// Probe times in milliseconds since mount, strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionSchedule {
    delays_ms: Vec<u32>,
}

impl Default for DetectionSchedule {
    fn default() -> Self {
        Self::new(lib_core::config::DEFAULT_DETECTION_DELAYS_MS.to_vec())
    }
}

impl DetectionSchedule {
    /// Unsorted input is sorted and deduplicated.
    pub fn new(mut delays_ms: Vec<u32>) -> Self {
        delays_ms.sort_unstable();
        delays_ms.dedup();
        Self { delays_ms }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.detection_delays_ms.clone())
    }

    pub fn delays_ms(&self) -> &[u32] {
        &self.delays_ms
    }

    /// Time to wait before each probe, relative to the previous one.
    pub fn gaps_ms(&self) -> Vec<u32> {
        let mut previous = 0;
        self.delays_ms
            .iter()
            .map(|delay| {
                let gap = delay - previous;
                previous = *delay;
                gap
            })
            .collect()
    }
}

pub struct WalletDetector<S> {
    scope: S,
    seen: WalletAvailability,
}

impl<S: GlobalScope + Clone> WalletDetector<S> {
    pub fn new(scope: S) -> Self {
        Self {
            scope,
            seen: WalletAvailability::default(),
        }
    }

    pub fn availability(&self) -> WalletAvailability {
        self.seen
    }

    /// Check every extension once and merge into what was already seen.
    pub fn probe(&mut self) -> WalletAvailability {
        let mut now = WalletAvailability::default();
        for profile in ExtensionProfile::all() {
            if InjectedAdapter::new(self.scope.clone(), profile).detect() {
                now.mark(profile.kind);
            }
        }
        self.seen = self.seen.merge(now);
        self.seen
    }

    /// Run the schedule to completion or until every extension is found.
    ///
    /// `sleep` waits the given number of milliseconds (a browser timer in the
    /// web crate). `on_change` fires after the first probe and whenever
    /// availability grows. Dropping the returned future stops detection.
    pub async fn run<F, Fut, C>(&mut self, schedule: &DetectionSchedule, mut sleep: F, mut on_change: C)
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = ()>,
        C: FnMut(WalletAvailability),
    {
        let mut reported = None;
        for gap in schedule.gaps_ms() {
            if gap > 0 {
                sleep(gap).await;
            }
            let now = self.probe();
            if reported != Some(now) {
                log::debug!("[DETECT] Availability: {:?}", now);
                on_change(now);
                reported = Some(now);
            }
            if now.all_found() {
                log::debug!("[DETECT] All extensions found, stopping early");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::injected::fake::{FakeObject, FakeScope};
    use serde_json::json;
    use std::cell::RefCell;

    #[test]
    fn test_merge_is_monotonic() {
        let seen = WalletAvailability { freighter: true, xbull: false };
        let later = WalletAvailability { freighter: false, xbull: true };
        let merged = seen.merge(later);
        assert!(merged.all_found());
        assert_eq!(merged.merge(WalletAvailability::default()), merged);
    }

    #[test]
    fn test_schedule_gaps() {
        let schedule = DetectionSchedule::default();
        assert_eq!(schedule.delays_ms(), &[0, 250, 500, 1000, 2000, 3500, 5000]);
        assert_eq!(schedule.gaps_ms(), vec![0, 250, 250, 500, 1000, 1500, 1500]);
        assert_eq!(DetectionSchedule::new(vec![500, 0, 500]).gaps_ms(), vec![0, 500]);
    }

    #[test]
    fn test_probe_keeps_earlier_sightings() {
        let scope = FakeScope::new().with("freighterApi", FakeObject::new().reply("getAddress", json!("G")));
        let mut detector = WalletDetector::new(scope.clone());
        assert!(detector.probe().freighter);

        scope.inject("freighterApi", FakeObject::new());
        assert!(detector.probe().freighter);
    }

    #[tokio::test]
    async fn test_run_stops_once_everything_is_found() {
        let scope = FakeScope::new();
        let mut detector = WalletDetector::new(scope.clone());
        let slept = RefCell::new(Vec::new());
        let updates = RefCell::new(Vec::new());

        detector
            .run(
                &DetectionSchedule::default(),
                |gap| {
                    slept.borrow_mut().push(gap);
                    // Extensions finish injecting while we wait.
                    if gap == 250 {
                        scope.inject("freighterApi", FakeObject::new().reply("requestAccess", json!(true)));
                    }
                    if gap == 500 {
                        scope.inject("xBullSDK", FakeObject::new().reply("connect", json!(true)));
                    }
                    async {}
                },
                |availability| updates.borrow_mut().push(availability),
            )
            .await;

        assert_eq!(*slept.borrow(), vec![250, 250, 500]);
        assert_eq!(
            *updates.borrow(),
            vec![
                WalletAvailability::default(),
                WalletAvailability { freighter: true, xbull: false },
                WalletAvailability { freighter: true, xbull: true },
            ]
        );
    }

    #[tokio::test]
    async fn test_run_exhausts_schedule_when_nothing_appears() {
        let mut detector = WalletDetector::new(FakeScope::new());
        let slept = RefCell::new(0u32);
        detector
            .run(
                &DetectionSchedule::default(),
                |gap| {
                    *slept.borrow_mut() += gap;
                    async {}
                },
                |_| {},
            )
            .await;
        assert_eq!(*slept.borrow(), 5000);
        assert!(!detector.availability().any_found());
    }
}
