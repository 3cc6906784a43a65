//! Risk Guardian browser dashboard.
//!
//! Thin Leptos shell over the session, wallet and API crates: everything
//! stateful lives in `lib-session`; this crate supplies browser backends
//! (localStorage, injected extensions, fetch) and the views.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

mod app;
mod components;
mod pages;
mod services;
mod state;
pub mod utils;

use app::App;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Risk Guardian starting");

    if let Err(e) = lib_core::config::init_config() {
        // Defaults stay in effect; a bad build flag must not blank the page.
        log::error!("Invalid configuration, using defaults: {}", e);
    }

    hide_loading_screen();
    leptos::mount::mount_to_body(|| view! { <App/> });
}

/// Hide the static loading placeholder shipped in index.html.
fn hide_loading_screen() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("No document available");
        return;
    };

    match document.get_element_by_id("leptos-loading") {
        Some(loading) => {
            if let Some(element) = loading.dyn_ref::<HtmlElement>() {
                if let Err(e) = element.class_list().add_1("hidden") {
                    log::warn!("Failed to hide loading screen: {:?}", e);
                }
            }
        }
        None => log::debug!("Loading element not found"),
    }
}
