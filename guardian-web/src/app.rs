//! Risk Guardian web app - Leptos frontend

use leptos::prelude::*;
use leptos_router::{
    components::{Route, Router, Routes, A},
    path,
};
use lib_core::core_config;

use crate::components::{Navbar, Toasts};
use crate::pages::{ConnectPage, DashboardPage, StatusPage};
use crate::services::detection::{spawn_detection, spawn_extension_watch};
use crate::state::session::provide_session_context;
use crate::state::toasts::provide_toast_context;

#[component]
pub fn App() -> impl IntoView {
    let notifier = provide_toast_context();
    let session = provide_session_context(notifier);
    session.restore();

    let config = core_config();
    let detection = spawn_detection(config, session.availability);
    let watch = spawn_extension_watch(session, config.extension_check_interval_ms);
    on_cleanup(move || {
        detection.abort();
        watch.abort();
    });

    view! {
        <Router>
            <div class="app-container">
                <Navbar/>
                <Toasts/>
                <Routes fallback=|| view! { <NotFound/> }>
                    <Route path=path!("/") view=ConnectPage/>
                    <Route path=path!("/dashboard") view=DashboardPage/>
                    <Route path=path!("/status") view=StatusPage/>
                </Routes>
            </div>
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page-center">
            <div class="card" style="max-width: 500px; text-align: center;">
                <h1 class="card-title">"404 - Page Not Found"</h1>
                <p class="muted">"The page you're looking for doesn't exist."</p>
                <A href="/">
                    <span class="btn" style="margin-top: 20px; display: inline-block;">
                        "Go to Home"
                    </span>
                </A>
            </div>
        </div>
    }
}
