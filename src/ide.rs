//! Editor facade
//!
//! Ties the session, highlighter, runner and console together the way the
//! editor surface uses them: every edit re-highlights the whole buffer,
//! Run executes the buffer with the session's language, and the console
//! line runs shell commands.

use std::path::PathBuf;
use anyhow::Result;
use tracing::info;

use scribe_core::{AppConfig, Event, Language, Session};
use scribe_editor::{Highlights, SyntaxHighlighter};
use scribe_runner::{CodeRunner, Recall, RunOutput, ShellConsole};

/// The interactive surface's state
pub struct Ide {
    config: AppConfig,
    session: Session,
    highlighter: SyntaxHighlighter,
    runner: CodeRunner,
    console: ShellConsole,
    highlights: Highlights,
}

impl Ide {
    /// Create an editor with an empty buffer in the configured default language
    pub fn new(config: AppConfig) -> Self {
        let language = config.editor.default_language;
        let runner = CodeRunner::new(config.toolchains.clone(), config.runner.clone());

        Self {
            session: Session::new(language),
            highlighter: SyntaxHighlighter::new(language),
            runner,
            console: ShellConsole::new(),
            highlights: Highlights::empty(),
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn console(&self) -> &ShellConsole {
        &self.console
    }

    pub fn runner(&self) -> &CodeRunner {
        &self.runner
    }

    /// Highlights for the current buffer
    pub fn highlights(&self) -> &Highlights {
        &self.highlights
    }

    /// Buffer text
    pub fn text(&self) -> &str {
        self.session.document().content()
    }

    /// Replace the buffer text (a keystroke) and re-highlight
    pub fn edit(&mut self, text: impl Into<String>) -> &Highlights {
        self.session.document_mut().set_content(text);
        self.rehighlight()
    }

    /// Switch language and re-highlight
    pub fn set_language(&mut self, language: Language) -> &Highlights {
        self.session.set_language(language);
        self.rehighlight()
    }

    /// Start an empty, untitled buffer
    pub fn new_file(&mut self) {
        self.session.new_file();
        self.rehighlight();
    }

    /// Load a file, inferring its language.
    ///
    /// Relative paths resolve against the bound project.
    pub async fn open_file(&mut self, path: PathBuf) -> Result<&Highlights> {
        let path = self.session.resolve_path(&path);
        self.session.open_file(path.clone()).await?;
        self.config.add_recent_file(path);
        Ok(self.rehighlight())
    }

    /// Save to the bound file; fails with `ScribeError::NoFilePath` for an untitled buffer
    pub async fn save(&mut self) -> Result<()> {
        self.session.save().await?;
        Ok(())
    }

    /// Save to `path` and bind the buffer to it
    pub async fn save_as(&mut self, path: PathBuf) -> Result<()> {
        let path = self.session.resolve_path(&path);
        self.session.save_as(path.clone()).await?;
        self.config.add_recent_file(path);
        Ok(())
    }

    /// Create a project directory with a `src` folder and start a fresh buffer
    pub async fn new_project(&mut self, dir: PathBuf) -> Result<()> {
        self.session.new_project(dir).await?;
        self.rehighlight();
        Ok(())
    }

    /// Bind an existing project directory and list its sources
    pub async fn open_project(&mut self, dir: PathBuf) -> Result<Vec<PathBuf>> {
        self.session.open_project(dir).await?;
        match self.session.project() {
            Some(project) => Ok(project.list_sources().await?),
            None => Ok(Vec::new()),
        }
    }

    /// Run the buffer with the active language's toolchain.
    ///
    /// The console panel is replaced with the run's output.
    pub async fn run(&mut self) -> Result<RunOutput> {
        let language = self.session.language();
        info!("Running buffer as {}", language);

        let output = self.runner.run(language, self.session.document().content()).await?;
        self.console.show_run_output(output.text());
        self.session.events().emit(Event::RunCompleted {
            language,
            success: output.success(),
        });
        Ok(output)
    }

    /// Run a shell line from the console input
    pub async fn execute(&mut self, line: &str) -> Result<String> {
        let output = self.console.execute(line).await?;
        self.session.events().emit(Event::CommandExecuted(line.to_string()));
        Ok(output)
    }

    /// Recall a console line from history
    pub fn recall(&mut self, direction: Recall) -> &str {
        self.console.recall(direction)
    }

    fn rehighlight(&mut self) -> &Highlights {
        self.highlighter.set_language(self.session.language());
        self.highlights = self.highlighter.highlight(self.session.document().content());
        &self.highlights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_core::config::RunnerConfig;
    use scribe_core::ScribeError;
    use scribe_editor::HighlightCategory;

    fn ide_in(dir: &std::path::Path) -> Ide {
        let mut config = AppConfig::default();
        config.runner = RunnerConfig {
            work_dir: dir.join("work"),
            keep_temp_files: false,
        };
        Ide::new(config)
    }

    #[test]
    fn test_edit_rehighlights() {
        let dir = tempfile::tempdir().unwrap();
        let mut ide = ide_in(dir.path());

        let highlights = ide.edit("def f(): return 1");
        assert_eq!(highlights.get(HighlightCategory::Keyword).len(), 2);

        let highlights = ide.set_language(Language::CSharp);
        assert_eq!(highlights.get(HighlightCategory::Keyword), &[9..15]);
    }

    #[tokio::test]
    async fn test_open_file_switches_language() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.ts");
        std::fs::write(&path, "const n = 5; // five").unwrap();

        let mut ide = ide_in(dir.path());
        let highlights = ide.open_file(path.clone()).await.unwrap();
        assert_eq!(highlights.get(HighlightCategory::Comment), &[13..20]);
        assert_eq!(ide.session().language(), Language::TypeScript);
        assert_eq!(ide.config().recent_files, vec![path]);
    }

    #[tokio::test]
    async fn test_save_untitled_needs_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut ide = ide_in(dir.path());
        ide.edit("print('x')");

        let err = ide.save().await.unwrap_err();
        assert!(matches!(err.downcast_ref::<ScribeError>(), Some(ScribeError::NoFilePath)));

        let path = dir.path().join("x.py");
        ide.save_as(path.clone()).await.unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "print('x')");
    }

    #[tokio::test]
    async fn test_project_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("proj");
        std::fs::create_dir_all(root.join("src")).unwrap();
        std::fs::write(root.join("src").join("main.py"), "print(1)").unwrap();

        let mut ide = ide_in(dir.path());
        let sources = ide.open_project(root.clone()).await.unwrap();
        assert_eq!(sources, vec![root.join("src").join("main.py")]);

        ide.open_file(PathBuf::from("src/main.py")).await.unwrap();
        assert_eq!(ide.text(), "print(1)");

        ide.save_as(PathBuf::from("src/copy.py")).await.unwrap();
        assert!(root.join("src").join("copy.py").is_file());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_execute_and_recall() {
        let dir = tempfile::tempdir().unwrap();
        let mut ide = ide_in(dir.path());
        let events = ide.session().events().subscribe();

        let output = ide.execute("echo hi").await.unwrap();
        assert!(output.contains("hi"));
        assert_eq!(ide.console().history().len(), 1);
        assert_eq!(ide.recall(Recall::Previous), "echo hi");
        assert_eq!(events.drain(), vec![Event::CommandExecuted("echo hi".into())]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_replaces_console() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.runner.work_dir = dir.path().to_path_buf();
        config.toolchains.for_language_mut(Language::JavaScript).run =
            vec!["cat".into(), "{source}".into()];
        let mut ide = Ide::new(config);

        ide.execute("echo before").await.unwrap();
        ide.set_language(Language::JavaScript);
        ide.edit("console.log(1)");
        let output = ide.run().await.unwrap();

        assert!(output.success());
        assert_eq!(ide.console().transcript(), "console.log(1)");
    }
}
