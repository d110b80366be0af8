//! Pages
//!
//! The two tab views.

pub mod chat;
pub mod dashboard;

pub use chat::ChatPage;
pub use dashboard::DashboardPage;
