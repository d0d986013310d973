//! Scribe Runner
//!
//! Runs the editor buffer with the active language's toolchain and drives
//! the embedded shell console.
//!
//! Subprocess failures are never turned into errors: a missing interpreter,
//! a compiler error and a program writing to stderr all come back as
//! captured text. `RunError` only covers problems on our side (writing the
//! temporary source, broken configuration).

pub mod history;
pub mod process;
pub mod runner;
pub mod shell;
pub mod toolchain;

pub use history::{CommandHistory, Recall};
pub use process::Capture;
pub use runner::{CodeRunner, RunOutput, StageKind, StageOutput};
pub use shell::ShellConsole;
pub use toolchain::Toolchain;

/// Runner errors
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Empty command")]
    EmptyCommand,
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for runner operations
pub type Result<T> = std::result::Result<T, RunError>;
