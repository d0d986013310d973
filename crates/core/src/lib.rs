//! Scribe Core - session state and shared types
//!
//! This crate holds the editor's session context (active language, buffer,
//! project), its configuration, and the event bus the presentation layer
//! listens on.

pub mod config;
pub mod document;
pub mod error;
pub mod events;
pub mod language;
pub mod project;
pub mod session;

pub use config::{AppConfig, ToolchainTemplate};
pub use document::Document;
pub use error::{ScribeError, Result};
pub use events::{Event, EventBus, EventSubscription};
pub use language::Language;
pub use project::Project;
pub use session::Session;

/// Scribe version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "Scribe";
