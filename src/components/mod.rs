//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod chart;
pub mod nav;

pub use chart::{ChartLegend, CovidChart};
pub use nav::Nav;
