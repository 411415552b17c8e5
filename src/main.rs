//! Glucose Tracker
//!
//! Personal blood-glucose logging dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Guided multi-step entry of glucose readings
//! - Dashboard with rolling averages and time-in-range
//! - Trend charts over selectable time windows
//! - Searchable history with CSV export
//! - Full account data export as JSON
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Persistence and authentication are delegated to a hosted
//! Supabase-compatible backend via its REST and auth endpoints.

use leptos::*;

mod api;
mod app;
mod components;
mod export;
mod model;
mod pages;
mod state;
mod stats;
mod wizard;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
