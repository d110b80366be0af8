//! # InsightX
//!
//! Client for the InsightX UPI analytics service: a chat that forwards
//! natural-language questions to a question-answering backend, and a
//! dashboard of pre-aggregated transaction statistics.
//!
//! ## Modules
//!
//! - [`store`]: key-value persistence port, in-memory and file-backed stores
//! - [`session`]: per-store session identifier
//! - [`history`]: write-through message history
//! - [`chat`]: chat controller (single-flight send, fallback on failure)
//! - [`dashboard`]: concurrent aggregate loader and its view-model
//! - [`render`]: message bubble view-model
//! - [`shell`]: tab shell and header
//! - [`api`]: backend DTOs, client traits and the reqwest client
//!
//! The core builds without the default `native` feature, so the same
//! controllers back the browser front-end.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use insightx::api::{HttpClient, HttpClientConfig};
//! use insightx::shell::Shell;
//! use insightx::store::FileStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpClient::new(HttpClientConfig::default())?;
//!     let mut shell = Shell::init(FileStore::in_dir("./insightx_data"));
//!
//!     shell
//!         .chat_mut()
//!         .send(&client, Some("Which bank fails most often?"))
//!         .await;
//!
//!     for message in shell.chat().messages() {
//!         println!("{}: {}", message.role.as_str(), message.content);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chat;
#[cfg(feature = "native")]
pub mod config;
pub mod dashboard;
pub mod error;
pub mod history;
#[cfg(feature = "native")]
pub mod logging;
pub mod render;
pub mod session;
pub mod shell;
pub mod store;

pub use api::{
    AskRequest, AskResponse, DashboardSource, FailureBreakdown, HourlyRate, QaClient, Summary,
    Trends,
};
#[cfg(feature = "native")]
pub use api::{HttpClient, HttpClientConfig};

pub use chat::{ChatController, PendingAsk, SendOutcome, FALLBACK_MESSAGE, SUGGESTED_QUESTIONS};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError, LogFormat, LoggingConfig};

pub use dashboard::{DashboardData, DashboardLoader, DashboardView, LoadState, LoadTicket};

pub use error::{ClientError, ClientResult, StoreError, StoreResult};

pub use history::{Message, MessageHistory, Role};

pub use render::MessageView;

pub use session::SessionId;

pub use shell::{HeaderView, Shell, Tab};

pub use store::{KeyValueStore, MemoryStore};
#[cfg(feature = "native")]
pub use store::FileStore;
