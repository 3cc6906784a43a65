//! Background tasks: extension detection and the connected-wallet watch.
//!
//! Both run on the browser event loop and return an [`AbortHandle`]; the
//! owning component aborts it in `on_cleanup` so no timer outlives the view.

use futures::future::{abortable, AbortHandle};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use lib_core::Config;
use lib_wallet::{DetectionSchedule, WalletAvailability, WalletDetector};

use crate::services::extensions::WindowScope;
use crate::state::session::SessionContext;

/// Probe for Freighter/xBull on the configured schedule, publishing every
/// change into `availability`.
pub fn spawn_detection(config: &Config, availability: RwSignal<WalletAvailability>) -> AbortHandle {
    let schedule = DetectionSchedule::from_config(config);
    let (task, handle) = abortable(async move {
        let mut detector = WalletDetector::new(WindowScope);
        detector
            .run(
                &schedule,
                |ms| TimeoutFuture::new(ms),
                |found| {
                    let _ = availability.try_set(found);
                },
            )
            .await;
    });

    leptos::task::spawn_local(async move {
        let _ = task.await;
    });
    handle
}

/// Every `interval_ms`, ask the connected extension whether it still
/// authorizes the page. A "no" drops the session to disconnected.
pub fn spawn_extension_watch(ctx: SessionContext, interval_ms: u32) -> AbortHandle {
    let (task, handle) = abortable(async move {
        loop {
            TimeoutFuture::new(interval_ms).await;

            let Some(session) = ctx.controller.try_with_untracked(|c| c.session().clone()) else {
                break;
            };
            if !session.can_sign() {
                continue;
            }

            if !ctx.connector().still_connected(&session).await {
                ctx.controller.try_update(|c| {
                    // The session may have changed while we awaited.
                    if c.session() == &session {
                        c.extension_disconnected();
                    }
                });
            }
        }
    });

    leptos::task::spawn_local(async move {
        let _ = task.await;
    });
    handle
}
