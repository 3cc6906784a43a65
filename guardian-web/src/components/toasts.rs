//! Toast stack

use leptos::prelude::*;

use crate::state::toasts::use_toasts;
use crate::utils::format::notice_class;

#[component]
pub fn Toasts() -> impl IntoView {
    let notifier = use_toasts();

    view! {
        <div class="toast-stack">
            <For
                each=move || notifier.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=format!("toast {}", notice_class(toast.level))>
                            <div class="toast-body">
                                <strong>{toast.title}</strong>
                                <p>{toast.description}</p>
                            </div>
                            <button class="toast-close" on:click=move |_| notifier.dismiss(id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
