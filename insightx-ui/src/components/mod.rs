//! UI Components
//!
//! Leptos renderers for the core view-models.

pub mod cards;
pub mod header;
pub mod loading;
pub mod message;

pub use cards::{SectionPanel, StatTile};
pub use header::Header;
pub use loading::{CardSkeleton, DashboardSkeleton};
pub use message::{MessageBubble, TypingIndicator};
