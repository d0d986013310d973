//! Document
//!
//! The editor buffer: full text plus the file it is bound to, if any.

use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{Result, ScribeError};

/// Text buffer bound to an optional file
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// File path; `None` for a new, unsaved buffer
    path: Option<PathBuf>,
    /// Current text
    content: String,
    /// Text as last loaded or saved (for dirty detection)
    original_content: String,
}

impl Document {
    /// Create an empty, untitled document
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a document from disk
    pub async fn open(path: PathBuf) -> Result<Self> {
        let content = tokio::fs::read_to_string(&path).await?;
        info!("Opened {:?} ({} bytes)", path, content.len());

        Ok(Self {
            path: Some(path),
            original_content: content.clone(),
            content,
        })
    }

    /// Bound file path
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Current text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the text
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Text differs from what was last loaded or saved
    pub fn is_dirty(&self) -> bool {
        self.content != self.original_content
    }

    /// Write the text to the bound path
    pub async fn save(&mut self) -> Result<()> {
        let path = self.path.clone().ok_or(ScribeError::NoFilePath)?;
        self.write_to(&path).await
    }

    /// Write the text to `path` and bind the document to it
    pub async fn save_as(&mut self, path: PathBuf) -> Result<()> {
        self.write_to(&path).await?;
        self.path = Some(path);
        Ok(())
    }

    async fn write_to(&mut self, path: &Path) -> Result<()> {
        tokio::fs::write(path, &self.content).await?;
        self.original_content = self.content.clone();
        info!("Saved {:?}", path);
        Ok(())
    }

    /// File name for display, `Untitled` when unbound
    pub fn title(&self) -> String {
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "Untitled".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_requires_path() {
        let mut doc = Document::new();
        doc.set_content("print(1)");
        assert!(doc.is_dirty());
        assert!(matches!(doc.save().await, Err(ScribeError::NoFilePath)));
        assert_eq!(doc.title(), "Untitled");
    }

    #[tokio::test]
    async fn test_save_as_then_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.js");

        let mut doc = Document::new();
        doc.set_content("console.log('hi');\n");
        doc.save_as(path.clone()).await.unwrap();
        assert!(!doc.is_dirty());
        assert_eq!(doc.title(), "hello.js");

        let reopened = Document::open(path).await.unwrap();
        assert_eq!(reopened.content(), "console.log('hi');\n");
        assert!(!reopened.is_dirty());
    }

    #[tokio::test]
    async fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Document::open(dir.path().join("missing.py")).await;
        assert!(matches!(result, Err(ScribeError::Io(_))));
    }
}
