//! Navigation bar with the current session badge

use leptos::prelude::*;
use leptos_router::components::A;
use lib_core::SessionMode;
use shared::utils::truncate_address;

use crate::state::session::use_session_context;

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_session_context();

    let badge = move || {
        let session = ctx.session();
        match session.mode() {
            SessionMode::Disconnected => None,
            SessionMode::Demo => Some(("badge badge-demo", "Demo".to_string())),
            SessionMode::Tracked => Some(("badge badge-tracked", format!("Watching {}", truncate_address(session.address())))),
            SessionMode::Connected => Some((
                "badge badge-connected",
                format!("{} {}", session.wallet_kind(), truncate_address(session.address())),
            )),
        }
    };

    view! {
        <nav>
            <div class="nav-inner">
                <A href="/" attr:class="nav-link-clean">
                    <span class="nav-title">"Risk Guardian"</span>
                </A>
                <div class="nav-links">
                    <Show when=move || ctx.session().shows_app()>
                        <A href="/dashboard" attr:class="nav-link">"Dashboard"</A>
                        <A href="/status" attr:class="nav-link">"Wallet"</A>
                    </Show>
                    {move || badge().map(|(class, label)| view! { <span class=class>{label}</span> })}
                </div>
            </div>
        </nav>
    }
}
