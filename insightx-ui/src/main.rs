//! InsightX Dashboard
//!
//! Chat and transaction dashboard built with Leptos (WASM).
//!
//! # Architecture
//!
//! Client-side rendered. State and derivations come from the `insightx`
//! core crate; this crate supplies `localStorage` persistence, a gloo-net
//! HTTP client and the components.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;
mod store;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
