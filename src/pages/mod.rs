//! Pages
//!
//! Top-level route views.

pub mod dashboard;

pub use dashboard::Dashboard;
