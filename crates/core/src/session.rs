//! Session Context
//!
//! Owns everything that changes while the editor runs: the active
//! language, the buffer and the project. Created once at startup and
//! mutated only through the methods below.

use std::path::{Path, PathBuf};
use tracing::{info, debug};

use crate::document::Document;
use crate::error::Result;
use crate::events::{Event, EventBus};
use crate::language::Language;
use crate::project::Project;
use crate::APP_NAME;

/// Process-scoped editor state
#[derive(Debug)]
pub struct Session {
    language: Language,
    document: Document,
    project: Option<Project>,
    title: String,
    events: EventBus,
}

impl Session {
    /// Start a session with an empty buffer
    pub fn new(language: Language) -> Self {
        Self {
            language,
            document: Document::new(),
            project: None,
            title: format!("Untitled - {}", APP_NAME),
            events: EventBus::new(),
        }
    }

    /// Active language
    pub fn language(&self) -> Language {
        self.language
    }

    /// Current buffer
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Current buffer, mutable
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Bound project
    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    /// Event bus for session notifications
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Window-style title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Resolve a relative path against the bound project root.
    ///
    /// Absolute paths, and any path when no project is bound, are returned as given.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.project {
            Some(project) if path.is_relative() => project.root.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Switch the active language
    pub fn set_language(&mut self, language: Language) {
        debug!("Language set to {}", language);
        self.language = language;
        self.events.emit(Event::LanguageChanged(language));
    }

    /// Replace the buffer with an empty, untitled one
    pub fn new_file(&mut self) {
        self.document = Document::new();
        self.title = format!("Untitled - {}", APP_NAME);
        self.events.emit(Event::FileCreated);
    }

    /// Load a file into the buffer, inferring the language from its extension.
    ///
    /// Unknown extensions keep the current language.
    pub async fn open_file(&mut self, path: PathBuf) -> Result<()> {
        let document = Document::open(path.clone()).await?;

        if let Some(language) = Language::from_path(&path) {
            if language != self.language {
                self.set_language(language);
            }
        }

        self.document = document;
        self.title = format!("{} - {}", path.display(), APP_NAME);
        self.events.emit(Event::FileOpened(path));
        Ok(())
    }

    /// Save the buffer to its bound file
    ///
    /// Fails with `NoFilePath` for an untitled buffer; callers then ask for
    /// a path and use [`Session::save_as`].
    pub async fn save(&mut self) -> Result<()> {
        self.document.save().await?;
        if let Some(path) = self.document.path() {
            self.events.emit(Event::FileSaved(path.to_path_buf()));
        }
        Ok(())
    }

    /// Save the buffer to `path` and bind it
    pub async fn save_as(&mut self, path: PathBuf) -> Result<()> {
        self.document.save_as(path.clone()).await?;
        self.title = format!("{} - {}", path.display(), APP_NAME);
        self.events.emit(Event::FileSaved(path));
        Ok(())
    }

    /// Initialize a project at `dir` and start a fresh buffer
    pub async fn new_project(&mut self, dir: PathBuf) -> Result<()> {
        let project = Project::create(dir.clone()).await?;
        self.project = Some(project);
        self.new_file();
        self.title = format!("New Project - {} - {}", dir.display(), APP_NAME);
        info!("Session bound to new project {:?}", dir);
        self.events.emit(Event::ProjectCreated(dir));
        Ok(())
    }

    /// Bind an existing project directory
    pub async fn open_project(&mut self, dir: PathBuf) -> Result<()> {
        let project = Project::open(dir.clone()).await?;
        self.project = Some(project);
        self.title = format!("{} - {}", dir.display(), APP_NAME);
        info!("Session bound to project {:?}", dir);
        self.events.emit(Event::ProjectOpened(dir));
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScribeError;

    #[tokio::test]
    async fn test_open_infers_language() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Program.cs");
        std::fs::write(&path, "class A {}").unwrap();

        let mut session = Session::default();
        let events = session.events().subscribe();
        session.open_file(path.clone()).await.unwrap();

        assert_eq!(session.language(), Language::CSharp);
        assert_eq!(session.document().content(), "class A {}");
        assert_eq!(session.title(), format!("{} - Scribe", path.display()));
        assert_eq!(
            events.drain(),
            vec![Event::LanguageChanged(Language::CSharp), Event::FileOpened(path)]
        );
    }

    #[tokio::test]
    async fn test_unknown_extension_keeps_language() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let mut session = Session::new(Language::TypeScript);
        session.open_file(path).await.unwrap();
        assert_eq!(session.language(), Language::TypeScript);
    }

    #[tokio::test]
    async fn test_new_file_unbinds_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.py");

        let mut session = Session::default();
        session.document_mut().set_content("x = 1");
        session.save_as(path.clone()).await.unwrap();
        assert_eq!(session.document().path(), Some(path.as_path()));

        session.new_file();
        assert!(session.document().path().is_none());
        assert_eq!(session.document().content(), "");
        assert_eq!(session.title(), "Untitled - Scribe");
        assert!(matches!(session.save().await, Err(ScribeError::NoFilePath)));
    }

    #[tokio::test]
    async fn test_new_project() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("proj");

        let mut session = Session::default();
        session.document_mut().set_content("leftover");
        session.new_project(root.clone()).await.unwrap();

        assert!(root.join("src").is_dir());
        assert_eq!(session.project().map(|p| p.root.clone()), Some(root.clone()));
        assert_eq!(session.document().content(), "");
        assert_eq!(session.title(), format!("New Project - {} - Scribe", root.display()));
    }

    #[test]
    fn test_initial_title() {
        assert_eq!(Session::default().title(), "Untitled - Scribe");
    }

    #[tokio::test]
    async fn test_open_project_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("proj");
        std::fs::create_dir_all(root.join("src")).unwrap();

        let mut session = Session::default();
        assert_eq!(session.resolve_path(Path::new("src/a.py")), PathBuf::from("src/a.py"));

        session.open_project(root.clone()).await.unwrap();
        assert_eq!(session.title(), format!("{} - Scribe", root.display()));
        assert_eq!(session.resolve_path(Path::new("src/a.py")), root.join("src/a.py"));

        let absolute = dir.path().join("elsewhere.py");
        assert_eq!(session.resolve_path(&absolute), absolute);
    }

    #[tokio::test]
    async fn test_open_project_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::default();
        assert!(session.open_project(dir.path().join("missing")).await.is_err());
        assert!(session.project().is_none());
    }
}
