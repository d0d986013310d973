//! Shell Console
//!
//! The console panel's command line: runs literal shell lines, keeps their
//! history and the transcript shown above the input.

use tracing::info;

use crate::history::{CommandHistory, Recall};
use crate::process::capture_shell;
use crate::{Result, RunError};

/// Embedded console state
#[derive(Debug, Default)]
pub struct ShellConsole {
    history: CommandHistory,
    transcript: String,
}

impl ShellConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `line` through the shell.
    ///
    /// The line is recorded in history before it runs. The result is the
    /// echoed command followed by stdout, or stderr when stdout is empty.
    pub async fn execute(&mut self, line: &str) -> Result<String> {
        if line.is_empty() {
            return Err(RunError::EmptyCommand);
        }

        self.history.push(line);
        let capture = capture_shell(line).await;
        info!("Shell command {:?} exited with {:?}", line, capture.status);

        let output = format!("$ {}\n{}", line, capture.text());
        self.transcript.push('\n');
        self.transcript.push_str(&output);
        Ok(output)
    }

    /// Recall a line from history for the input field
    pub fn recall(&mut self, direction: Recall) -> &str {
        self.history.recall(direction)
    }

    /// Replace the panel contents with the output of a run
    pub fn show_run_output(&mut self, text: &str) {
        self.transcript.clear();
        self.transcript.push_str(text);
    }

    /// Everything shown in the console panel so far
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }
}
