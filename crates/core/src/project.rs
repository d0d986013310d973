//! Project Management
//!
//! A project is a directory with a `src` folder for its sources.

use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{Result, ScribeError};
use crate::language::Language;

/// Name of the sources folder created for new projects
pub const SOURCE_DIR: &str = "src";

/// Directories never scanned for sources
const IGNORED_DIRS: &[&str] = &["target", "build", "bin", "obj", "node_modules", "__pycache__"];

/// Project rooted at a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Project root directory
    pub root: PathBuf,
}

impl Project {
    /// Create a project at `path`, creating the directory and its `src` folder.
    ///
    /// Creating over an existing project is not an error.
    pub async fn create(path: PathBuf) -> Result<Self> {
        tokio::fs::create_dir_all(path.join(SOURCE_DIR)).await?;
        info!("Created project at {:?}", path);
        Ok(Self { root: path })
    }

    /// Open an existing project directory
    pub async fn open(path: PathBuf) -> Result<Self> {
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(ScribeError::Project(format!("{} is not a directory", path.display())));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ScribeError::NotFound(path));
            }
            Err(e) => return Err(e.into()),
        }

        info!("Opened project at {:?}", path);
        Ok(Self { root: path })
    }

    /// Project name (last path component)
    pub fn name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.root.display().to_string())
    }

    /// The `src` folder
    pub fn src_dir(&self) -> PathBuf {
        self.root.join(SOURCE_DIR)
    }

    /// All source files under the root in a supported language, sorted by path
    pub async fn list_sources(&self) -> Result<Vec<PathBuf>> {
        let mut sources = Vec::new();
        Self::collect_sources(&self.root, &mut sources).await?;
        sources.sort();
        Ok(sources)
    }

    async fn collect_sources(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
        let mut entries = tokio::fs::read_dir(dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();

            if name.starts_with('.') {
                continue;
            }

            if entry.file_type().await?.is_dir() {
                if !IGNORED_DIRS.contains(&name.as_str()) {
                    Box::pin(Self::collect_sources(&path, out)).await?;
                }
            } else if Language::from_path(&path).is_some() {
                out.push(path);
            }
        }

        Ok(())
    }
}
