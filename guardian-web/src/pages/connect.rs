//! Landing page: wallet choice, manual tracking, demo mode and network.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use lib_core::{Network, WalletKind};
use lib_session::AttemptOutcome;
use lib_wallet::ConnectRequest;
use wasm_bindgen::JsCast;
use web_sys::HtmlSelectElement;

use crate::state::session::use_session_context;

#[component]
pub fn ConnectPage() -> impl IntoView {
    let ctx = use_session_context();
    let navigate = use_navigate();
    let (manual_address, set_manual_address) = signal(String::new());

    let go_dashboard = {
        let navigate = navigate.clone();
        move || navigate("/dashboard", Default::default())
    };

    let start = {
        let go_dashboard = go_dashboard.clone();
        move |request: ConnectRequest| {
            let go_dashboard = go_dashboard.clone();
            leptos::task::spawn_local(async move {
                if let AttemptOutcome::Applied(_) = ctx.connect(request).await {
                    go_dashboard();
                }
            });
        }
    };

    let on_demo = {
        let go_dashboard = go_dashboard.clone();
        move |_| {
            ctx.enable_demo();
            go_dashboard();
        }
    };

    let on_track = {
        let start = start.clone();
        move |_| start(ConnectRequest::Manual(manual_address.get_untracked()))
    };

    let on_hardware = {
        let start = start.clone();
        move |_| start(ConnectRequest::Hardware)
    };

    let on_network = move |ev: web_sys::Event| {
        let Some(select) = ev.target().and_then(|t| t.dyn_into::<HtmlSelectElement>().ok()) else {
            return;
        };
        match select.value().parse::<Network>() {
            Ok(network) => ctx.network.set(network),
            Err(e) => log::warn!("Ignoring network selection: {}", e),
        }
    };

    let wallet_rows = WalletKind::EXTENSIONS
        .into_iter()
        .map(|kind| {
            let start = start.clone();
            let available = move || ctx.availability.with(|a| a.get(kind));
            view! {
                <div class="wallet-row">
                    <span class="wallet-name">{kind.name()}</span>
                    <Show
                        when=available
                        fallback=move || view! {
                            <a class="btn btn-secondary" href=kind.install_url().unwrap_or("#") target="_blank" rel="noopener">
                                "Install"
                            </a>
                        }
                    >
                        {
                            let start = start.clone();
                            view! {
                                <button
                                    class="btn"
                                    disabled=move || ctx.is_connecting()
                                    on:click=move |_| start(ConnectRequest::Extension(kind))
                                >
                                    "Connect"
                                </button>
                            }
                        }
                    </Show>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="split-layout">
            <section class="split-left">
                <h1 class="hero-title">"Risk Guardian"</h1>
                <p class="hero-subtitle">
                    "Portfolio risk, alerts and rebalancing for your Stellar account."
                </p>
                <Show when=move || ctx.session().shows_app()>
                    {
                        let go_dashboard = go_dashboard.clone();
                        view! {
                            <button class="btn" on:click=move |_| go_dashboard()>"Open dashboard"</button>
                        }
                    }
                </Show>
            </section>

            <section class="split-right">
                <div class="card">
                    <h2 class="card-title">"Connect a wallet"</h2>

                    <label class="field-label" for="network">"Network"</label>
                    <select id="network" class="input" on:change=on_network>
                        {[Network::Testnet, Network::Mainnet]
                            .into_iter()
                            .map(|network| {
                                view! {
                                    <option
                                        value=network.name().to_lowercase()
                                        selected=move || ctx.network.get() == network
                                    >
                                        {network.name()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>

                    {wallet_rows}

                    <div class="wallet-row">
                        <span class="wallet-name">{WalletKind::Hardware.name()}</span>
                        <button class="btn btn-secondary" on:click=on_hardware>"Coming soon"</button>
                    </div>

                    <div class="divider">"or track an address"</div>
                    <div class="manual-row">
                        <input
                            class="input"
                            placeholder="G..."
                            prop:value=manual_address
                            on:input=move |ev| set_manual_address.set(event_target_value(&ev))
                        />
                        <button class="btn" disabled=move || ctx.is_connecting() on:click=on_track>
                            "Track"
                        </button>
                    </div>

                    <div class="divider">"or"</div>
                    <button class="btn btn-demo" style="width: 100%;" on:click=on_demo>
                        "Try the demo"
                    </button>
                </div>
            </section>
        </div>
    }
}
