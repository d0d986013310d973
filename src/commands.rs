//! CLI commands for Scribe
//!
//! One-shot commands for scripting: run or highlight a file, scaffold a
//! project, check which toolchains are installed.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use tracing::info;

use scribe_core::{AppConfig, Language, Project};
use scribe_editor::{highlight, line_col, Highlights};
use scribe_runner::CodeRunner;

/// Pick the language from an explicit choice or the file extension
fn resolve_language(path: &Path, language: Option<Language>, config: &AppConfig) -> Language {
    language
        .or_else(|| Language::from_path(path))
        .unwrap_or(config.editor.default_language)
}

/// Render highlights as `category line.col-line.col "text"` lines
pub fn format_highlights(text: &str, highlights: &Highlights) -> String {
    let mut out = String::new();
    for range in highlights.iter() {
        let (start_line, start_col) = line_col(text, range.start);
        let (end_line, end_col) = line_col(text, range.end);
        let snippet: String = text
            .chars()
            .skip(range.start)
            .take(range.end - range.start)
            .collect();
        let _ = writeln!(
            out,
            "{:<8} {}.{}-{}.{} {:?}",
            range.category.tag_name(),
            start_line,
            start_col,
            end_line,
            end_col,
            snippet
        );
    }
    out
}

/// Run a source file with its language's toolchain
pub struct RunCommand {
    pub path: PathBuf,
    pub language: Option<Language>,
}

impl RunCommand {
    /// Execute the run command, returning the captured output
    pub async fn execute(&self, config: &AppConfig) -> Result<String> {
        let language = resolve_language(&self.path, self.language, config);
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading {}", self.path.display()))?;

        info!("Running {:?} as {}", self.path, language);
        let runner = CodeRunner::new(config.toolchains.clone(), config.runner.clone());
        let output = runner.run(language, &text).await?;
        Ok(output.text().to_string())
    }
}

/// Print the highlight ranges of a file
pub struct HighlightCommand {
    pub path: PathBuf,
    pub language: Option<Language>,
}

impl HighlightCommand {
    /// Execute the highlight command, returning the rendered ranges
    pub async fn execute(&self, config: &AppConfig) -> Result<String> {
        let language = resolve_language(&self.path, self.language, config);
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading {}", self.path.display()))?;

        Ok(format_highlights(&text, &highlight(language, &text)))
    }
}

/// Create a project directory with a `src` folder
pub struct NewProjectCommand {
    pub path: PathBuf,
}

impl NewProjectCommand {
    /// Execute the new-project command
    pub async fn execute(&self) -> Result<Project> {
        let project = Project::create(self.path.clone()).await?;
        info!("Project ready at {:?}", project.root);
        Ok(project)
    }
}

/// Report which toolchains are installed
pub struct ToolchainsCommand;

impl ToolchainsCommand {
    /// Execute the toolchains command, returning one line per language
    pub fn execute(&self, config: &AppConfig) -> Result<String> {
        let runner = CodeRunner::new(config.toolchains.clone(), config.runner.clone());
        let mut out = String::new();

        for language in Language::ALL {
            let toolchain = runner.toolchain(language)?;
            let missing = toolchain.missing_programs();
            let status = if missing.is_empty() {
                "ok".to_string()
            } else {
                format!("missing {}", missing.join(", "))
            };
            let _ = writeln!(
                out,
                "{:<11} {:<24} {}",
                language,
                toolchain.programs().join(" + "),
                status
            );
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_highlights() {
        let text = "x = 1\n# two";
        let rendered = format_highlights(text, &highlight(Language::Python, text));
        assert_eq!(rendered, "comment  2.0-2.5 \"# two\"\nnumber   1.4-1.5 \"1\"\n");
    }

    #[tokio::test]
    async fn test_highlight_command_infers_language() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.cs");
        std::fs::write(&path, "int x;").unwrap();

        let out = HighlightCommand { path, language: None }
            .execute(&AppConfig::default())
            .await
            .unwrap();
        assert_eq!(out, "keyword  1.0-1.3 \"int\"\n");
    }

    #[tokio::test]
    async fn test_new_project_command() {
        let dir = tempfile::tempdir().unwrap();
        let project = NewProjectCommand { path: dir.path().join("p") }.execute().await.unwrap();
        assert!(project.src_dir().is_dir());
    }

    #[test]
    fn test_toolchains_lists_every_language() {
        let out = ToolchainsCommand.execute(&AppConfig::default()).unwrap();
        assert_eq!(out.lines().count(), 4);
        assert!(out.contains("csc"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_command() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.js");
        std::fs::write(&path, "hello from js").unwrap();

        let mut config = AppConfig::default();
        config.runner.work_dir = dir.path().join("work");
        config.toolchains.for_language_mut(Language::JavaScript).run =
            vec!["cat".into(), "{source}".into()];

        let out = RunCommand { path, language: None }.execute(&config).await.unwrap();
        assert_eq!(out, "hello from js");
    }
}
