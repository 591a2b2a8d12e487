//! # acme-console-web
//!
//! Leptos + WASM front end for the ACME certificate console.
//!
//! This crate contains the session store, the navigation guard, the
//! authorizing API client, the site-branding store, locale bootstrap and a
//! thin application shell. Browser glue is gated behind the `csr` feature so
//! the core compiles and tests natively.

pub mod app;
pub mod components;
pub mod config;
pub mod context;
pub mod i18n;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

/// Browser entry point: install logging, build the application context and
/// mount the root component.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use leptos::prelude::*;

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let context = context::AppContext::browser();
    leptos::mount::mount_to_body(move || view! { <app::App context=context.clone()/> });
}
