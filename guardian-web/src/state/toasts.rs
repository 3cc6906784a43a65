//! Toast queue backing the [`Notifier`] seam.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use lib_core::{Notice, NoticeLevel, Notifier};
use uuid::Uuid;

const TOAST_LIFETIME_MS: u32 = 5_000;
const MAX_TOASTS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

/// Pushes notices into a signal the `Toasts` component renders.
#[derive(Debug, Clone, Copy)]
pub struct ToastNotifier {
    pub toasts: RwSignal<Vec<Toast>>,
}

impl ToastNotifier {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
        }
    }

    pub fn dismiss(&self, id: Uuid) {
        let _ = self.toasts.try_update(|list| list.retain(|t| t.id != id));
    }
}

impl Default for ToastNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, notice: Notice) {
        let toast = Toast {
            id: Uuid::new_v4(),
            level: notice.level,
            title: notice.title,
            description: notice.description,
        };
        let id = toast.id;

        let _ = self.toasts.try_update(|list| {
            list.push(toast);
            if list.len() > MAX_TOASTS {
                let excess = list.len() - MAX_TOASTS;
                list.drain(..excess);
            }
        });

        let notifier = *self;
        Timeout::new(TOAST_LIFETIME_MS, move || notifier.dismiss(id)).forget();
    }
}

pub fn provide_toast_context() -> ToastNotifier {
    let notifier = ToastNotifier::new();
    provide_context(notifier);
    notifier
}

pub fn use_toasts() -> ToastNotifier {
    expect_context::<ToastNotifier>()
}
