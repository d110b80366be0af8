//! State Management
//!
//! Application state shared through Leptos context.

pub mod global;

pub use global::{provide_app_state, use_app_state, AppState};
