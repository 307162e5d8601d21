//! COVID-19 Dashboard
//!
//! Interactive COVID-19 time-series dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Daily ("delta") and 7-day rolling ("delta7") confirmed-case charting
//! - Month selection covering the twelve months of 2020
//! - Hover tooltips showing all four counters for the hovered day
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It fetches the public covid19india time-series document over
//! HTTP and reshapes it into per-day records for the chart.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
