//! Leptos frontend (browser build).

pub mod api;
pub mod app;
pub mod history;
pub mod pages;
pub mod storage;

use wasm_bindgen::prelude::*;

use crate::WebConfig;

/// WASM entry point for the frontend.
/// This is called automatically when the WASM module loads.
#[wasm_bindgen(start)]
pub fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    let config = WebConfig::from_env();
    forgepos_observability::init_browser(&config.log_filter);
    tracing::info!(api_url = %config.api_url, "starting point-of-sale front end");

    leptos::mount_to_body(app::App);
}
