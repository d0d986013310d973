//! Scribe - a minimal code editor
//!
//! Edit Python, JavaScript, TypeScript and C# sources with live syntax
//! highlighting, run the buffer with the installed toolchain and use an
//! embedded shell console.
//!
//! ## Architecture
//!
//! - `scribe-core`: configuration, documents, projects and the session
//! - `scribe-editor`: regex syntax highlighting
//! - `scribe-runner`: toolchains, code runner and shell console

#![warn(clippy::all)]

pub mod commands;
pub mod console;
pub mod ide;

pub use scribe_core as core;
pub use scribe_editor as editor;
pub use scribe_runner as runner;

pub use console::{Console, Reply};
pub use ide::Ide;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use scribe_core::{AppConfig, Document, Language, Project, Session};
    pub use scribe_editor::{highlight, HighlightCategory, Highlights, SyntaxHighlighter};
    pub use scribe_runner::{CodeRunner, Recall, RunOutput, ShellConsole};
    pub use crate::ide::Ide;
}
