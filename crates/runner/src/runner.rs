//! Code Runner
//!
//! Writes the buffer to a fixed-name temporary source and runs it with the
//! language's toolchain. For compiled languages the produced executable
//! only runs if compilation exited successfully.

use std::path::{Path, PathBuf};
use scribe_core::config::{RunnerConfig, ToolchainsConfig};
use scribe_core::Language;
use tracing::{info, debug, warn};

use crate::process::{capture, Capture};
use crate::toolchain::Toolchain;
use crate::Result;

/// Base name of the temporary source and executable
pub const TEMP_FILE_STEM: &str = "temp_code";

/// Step of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Compile,
    Run,
}

/// One executed step
#[derive(Debug, Clone)]
pub struct StageOutput {
    pub kind: StageKind,
    pub command: Vec<String>,
    pub capture: Capture,
}

/// Result of running a buffer
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub language: Language,
    /// Steps that were executed, in order
    pub stages: Vec<StageOutput>,
}

impl RunOutput {
    /// Text for the console: stdout of the last executed step if non-empty, else its stderr
    pub fn text(&self) -> &str {
        self.stages.last().map(|s| s.capture.text()).unwrap_or("")
    }

    /// The program ran to completion with status 0
    pub fn success(&self) -> bool {
        self.stages
            .last()
            .is_some_and(|s| s.kind == StageKind::Run && s.capture.success())
    }

    /// Compilation was attempted and failed, so nothing ran
    pub fn compile_failed(&self) -> bool {
        matches!(self.stages.as_slice(), [only] if only.kind == StageKind::Compile)
    }
}

/// Runs editor buffers
#[derive(Debug, Clone)]
pub struct CodeRunner {
    toolchains: ToolchainsConfig,
    work_dir: PathBuf,
    keep_temp_files: bool,
}

impl CodeRunner {
    /// Create a runner from configuration
    pub fn new(toolchains: ToolchainsConfig, runner: RunnerConfig) -> Self {
        // Processes run inside work_dir, so the paths handed to them must be absolute
        let work_dir = if runner.work_dir.is_relative() {
            std::env::current_dir()
                .map(|cwd| cwd.join(&runner.work_dir))
                .unwrap_or(runner.work_dir)
        } else {
            runner.work_dir
        };

        Self {
            toolchains,
            work_dir,
            keep_temp_files: runner.keep_temp_files,
        }
    }

    /// Directory the temporary files are written to
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Resolved toolchain for a language
    pub fn toolchain(&self, language: Language) -> Result<Toolchain> {
        Toolchain::from_template(language, self.toolchains.for_language(language))
    }

    /// Path of the temporary source for a language
    pub fn source_path(&self, language: Language) -> PathBuf {
        self.work_dir
            .join(format!("{}.{}", TEMP_FILE_STEM, language.extension()))
    }

    /// Path of the executable produced by a compile step
    pub fn output_path(&self) -> PathBuf {
        self.work_dir.join(format!("{}.exe", TEMP_FILE_STEM))
    }

    /// Run `text` as `language` and capture the output.
    ///
    /// Blocks (asynchronously) until every step has finished; nothing is
    /// streamed.
    pub async fn run(&self, language: Language, text: &str) -> Result<RunOutput> {
        let toolchain = self.toolchain(language)?;
        let source = self.source_path(language);
        let output = self.output_path();

        tokio::fs::create_dir_all(&self.work_dir).await?;
        tokio::fs::write(&source, text).await?;
        debug!("Wrote {} bytes to {:?}", text.len(), source);

        let mut result = RunOutput {
            language,
            stages: Vec::new(),
        };

        if let Some(command) = toolchain.compile_command(&source, &output) {
            let captured = capture(&command, Some(&self.work_dir)).await;
            let compiled = captured.success();
            result.stages.push(StageOutput {
                kind: StageKind::Compile,
                command,
                capture: captured,
            });

            if !compiled {
                info!("{} compilation failed, skipping run", language);
                self.cleanup(&source, &output).await;
                return Ok(result);
            }
        }

        let command = toolchain.run_command(&source, &output);
        let captured = capture(&command, Some(&self.work_dir)).await;
        info!("{} run finished with {:?}", language, captured.status);
        result.stages.push(StageOutput {
            kind: StageKind::Run,
            command,
            capture: captured,
        });

        self.cleanup(&source, &output).await;
        Ok(result)
    }

    async fn cleanup(&self, source: &Path, output: &Path) {
        if self.keep_temp_files {
            return;
        }

        for path in [source, output] {
            match tokio::fs::remove_file(path).await {
                Ok(()) => debug!("Removed {:?}", path),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!("Failed to remove {:?}: {}", path, e),
            }
        }
    }
}
