//! Reactive state shared through Leptos context.

pub mod session;
pub mod toasts;
