//! Wallet status page - current session and disconnect

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use lib_core::SessionMode;

use crate::state::session::use_session_context;

#[component]
pub fn StatusPage() -> impl IntoView {
    let ctx = use_session_context();
    let navigate = use_navigate();

    let on_disconnect = move |_| {
        ctx.disconnect();
        navigate("/", Default::default());
    };

    view! {
        <div class="page-center">
            <div class="card" style="width: 100%; max-width: 500px;">
                <h1 class="card-title" style="text-align: center;">"Wallet Status"</h1>

                {move || {
                    let session = ctx.session();
                    let disconnect = on_disconnect.clone();

                    if session.is_connected() {
                        let status = match session.mode() {
                            SessionMode::Connected => "Connected",
                            SessionMode::Tracked => "Watching (read-only)",
                            SessionMode::Demo => "Demo",
                            SessionMode::Disconnected => "Disconnected",
                        };
                        view! {
                            <div>
                                <div class="panel">
                                    <p class="muted">"Status"</p>
                                    <p class="price-up">{status}</p>
                                    <p class="muted">"Wallet"</p>
                                    <p>{session.wallet_kind().name()}</p>
                                    <p class="muted">"Network"</p>
                                    <p>{session.network().name()}</p>
                                    <p class="muted">"Address"</p>
                                    <p class="mono">{session.address().to_string()}</p>
                                </div>
                                <button class="btn btn-danger" style="width: 100%;" on:click=disconnect>
                                    "Disconnect"
                                </button>
                            </div>
                        }.into_any()
                    } else {
                        view! {
                            <div>
                                <p class="muted" style="text-align: center;">"No wallet connected"</p>
                                <a href="/" class="btn" style="width: 100%; display: block; text-align: center;">
                                    "Connect Wallet"
                                </a>
                            </div>
                        }.into_any()
                    }
                }}
            </div>
        </div>
    }
}
