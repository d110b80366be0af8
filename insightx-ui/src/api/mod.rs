//! API Client
//!
//! Browser implementation of the InsightX backend ports.

pub mod client;

pub use client::{get_api_base, get_qa_base, GlooClient};
