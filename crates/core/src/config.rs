//! Application Configuration
//!
//! Manages editor settings including:
//! - Toolchain command templates per language
//! - Temporary file location and retention for runs
//! - Default language and recent files

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use directories::ProjectDirs;
use tracing::{info, debug};

use crate::error::{Result, ScribeError};
use crate::language::Language;

/// Placeholder replaced with the temporary source path
pub const SOURCE_PLACEHOLDER: &str = "{source}";

/// Placeholder replaced with the compiled executable path
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

/// Command templates for one language
///
/// Each template is a program followed by its arguments. `{source}` and
/// `{output}` are substituted before the process is spawned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolchainTemplate {
    /// Compile step; the run step only happens if this exits successfully
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compile: Option<Vec<String>>,
    /// Run step
    pub run: Vec<String>,
}

impl ToolchainTemplate {
    fn interpreter(program: &str) -> Self {
        Self {
            compile: None,
            run: vec![program.to_string(), SOURCE_PLACEHOLDER.to_string()],
        }
    }
}

/// Toolchains for every language
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainsConfig {
    pub python: ToolchainTemplate,
    pub javascript: ToolchainTemplate,
    pub typescript: ToolchainTemplate,
    pub csharp: ToolchainTemplate,
}

impl Default for ToolchainsConfig {
    fn default() -> Self {
        let python = if cfg!(windows) { "python" } else { "python3" };
        let csharp_run = if cfg!(windows) {
            vec![OUTPUT_PLACEHOLDER.to_string()]
        } else {
            vec!["mono".to_string(), OUTPUT_PLACEHOLDER.to_string()]
        };

        Self {
            python: ToolchainTemplate::interpreter(python),
            javascript: ToolchainTemplate::interpreter("node"),
            typescript: ToolchainTemplate::interpreter("ts-node"),
            csharp: ToolchainTemplate {
                compile: Some(vec![
                    "csc".to_string(),
                    format!("/out:{}", OUTPUT_PLACEHOLDER),
                    SOURCE_PLACEHOLDER.to_string(),
                ]),
                run: csharp_run,
            },
        }
    }
}

impl ToolchainsConfig {
    /// Template for a language
    pub fn for_language(&self, language: Language) -> &ToolchainTemplate {
        match language {
            Language::Python => &self.python,
            Language::JavaScript => &self.javascript,
            Language::TypeScript => &self.typescript,
            Language::CSharp => &self.csharp,
        }
    }

    /// Mutable template for a language
    pub fn for_language_mut(&mut self, language: Language) -> &mut ToolchainTemplate {
        match language {
            Language::Python => &mut self.python,
            Language::JavaScript => &mut self.javascript,
            Language::TypeScript => &mut self.typescript,
            Language::CSharp => &mut self.csharp,
        }
    }
}

/// Runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Directory the temporary source is written into
    pub work_dir: PathBuf,
    /// Keep the temporary source and compiled executable after a run
    pub keep_temp_files: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        let base = dirs::cache_dir().unwrap_or_else(std::env::temp_dir);
        Self {
            work_dir: base.join("scribe"),
            keep_temp_files: false,
        }
    }
}

/// Editor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Language selected at startup
    pub default_language: Language,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_language: Language::Python,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Configuration version for migrations
    pub version: u32,
    /// Editor settings
    pub editor: EditorConfig,
    /// Runner settings
    pub runner: RunnerConfig,
    /// Toolchain templates
    pub toolchains: ToolchainsConfig,
    /// Recently opened files
    pub recent_files: Vec<PathBuf>,
    /// Maximum recent files to store
    pub max_recent_files: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            editor: EditorConfig::default(),
            runner: RunnerConfig::default(),
            toolchains: ToolchainsConfig::default(),
            recent_files: Vec::new(),
            max_recent_files: 10,
        }
    }
}

impl AppConfig {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "scribe", "Scribe")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the configuration file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Load configuration from the default location, writing defaults if absent
    pub async fn load() -> Result<Self> {
        let config_file = Self::config_file()
            .ok_or_else(|| ScribeError::Config("Cannot determine config path".into()))?;

        if config_file.exists() {
            Self::load_from(&config_file).await
        } else {
            info!("Config file not found, using defaults");
            let config = AppConfig::default();
            config.save_to(&config_file).await?;
            Ok(config)
        }
    }

    /// Load configuration from a specific file
    pub async fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", path);
        let contents = tokio::fs::read_to_string(path).await?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub async fn save(&self) -> Result<()> {
        let config_file = Self::config_file()
            .ok_or_else(|| ScribeError::Config("Cannot determine config path".into()))?;
        self.save_to(&config_file).await
    }

    /// Save configuration to a specific file
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let contents = toml::to_string_pretty(self)?;
        tokio::fs::write(path, contents).await?;

        debug!("Config saved to {:?}", path);
        Ok(())
    }

    /// Add a recent file
    pub fn add_recent_file(&mut self, path: PathBuf) {
        self.recent_files.retain(|p| p != &path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(self.max_recent_files);
    }
}
