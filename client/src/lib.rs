//! # client
//!
//! Leptos + WASM admin console. Lets an operator log in with a username and
//! password, keeps the resulting bearer token in a cookie, and shows the user
//! list served by the backend.
//!
//! Session persistence, request construction, and the fetch lifecycle live in
//! the shared `session` crate; this crate wires them to the browser
//! (`document.cookie`, `gloo-net`) and renders the UI.

pub mod app;
pub mod components;
pub mod net;
pub mod state;
pub mod util;

/// Browser entry point: install logging and mount the app on `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
