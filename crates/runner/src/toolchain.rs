//! Toolchains
//!
//! How each language's source is executed: an optional compile step
//! followed by a run step, both as command templates.

use std::path::Path;
use scribe_core::config::{ToolchainTemplate, OUTPUT_PLACEHOLDER, SOURCE_PLACEHOLDER};
use scribe_core::Language;
use which::which;

use crate::{Result, RunError};

/// Resolved toolchain for one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub language: Language,
    compile: Option<Vec<String>>,
    run: Vec<String>,
}

impl Toolchain {
    /// Build a toolchain from configured templates
    pub fn from_template(language: Language, template: &ToolchainTemplate) -> Result<Self> {
        if template.run.is_empty() {
            return Err(RunError::Config(format!("empty run command for {}", language)));
        }
        if template.compile.as_ref().is_some_and(|c| c.is_empty()) {
            return Err(RunError::Config(format!("empty compile command for {}", language)));
        }

        Ok(Self {
            language,
            compile: template.compile.clone(),
            run: template.run.clone(),
        })
    }

    /// Whether a compile step precedes the run
    pub fn is_compiled(&self) -> bool {
        self.compile.is_some()
    }

    /// Compile command with placeholders filled in
    pub fn compile_command(&self, source: &Path, output: &Path) -> Option<Vec<String>> {
        self.compile.as_ref().map(|c| substitute(c, source, output))
    }

    /// Run command with placeholders filled in
    pub fn run_command(&self, source: &Path, output: &Path) -> Vec<String> {
        substitute(&self.run, source, output)
    }

    /// Programs this toolchain launches, compile step first
    pub fn programs(&self) -> Vec<&str> {
        self.compile
            .iter()
            .chain(std::iter::once(&self.run))
            .filter_map(|argv| argv.first())
            .map(String::as_str)
            .filter(|p| !p.contains(OUTPUT_PLACEHOLDER))
            .collect()
    }

    /// Programs that cannot be found on `PATH`
    pub fn missing_programs(&self) -> Vec<String> {
        self.programs()
            .into_iter()
            .filter(|p| which(p).is_err())
            .map(str::to_string)
            .collect()
    }

    /// Every program the toolchain needs is installed
    pub fn is_available(&self) -> bool {
        self.missing_programs().is_empty()
    }
}

fn substitute(template: &[String], source: &Path, output: &Path) -> Vec<String> {
    let source = source.to_string_lossy();
    let output = output.to_string_lossy();
    template
        .iter()
        .map(|arg| {
            arg.replace(SOURCE_PLACEHOLDER, &source)
                .replace(OUTPUT_PLACEHOLDER, &output)
        })
        .collect()
}
