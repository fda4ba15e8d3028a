//! core::config
//!
//! Optional defaults file and its accessors.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! Searched in order:
//! 1. `$IMGVENDOR_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/imgvendor/config.toml`
//! 3. `~/.imgvendor/config.toml`
//!
//! A missing file is not an error; defaults are used.
//!
//! # Example
//!
//! ```no_run
//! use imgvendor::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("Remote: {}", config.remote());
//! println!("Push: {}", config.push());
//! ```

pub mod schema;

pub use schema::{CommitConfig, FileConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default commit message for the vendoring commit.
pub const DEFAULT_COMMIT_MESSAGE: &str = "chore: downloaded images";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded configuration with defaults applied through accessors.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Values read from the config file
    pub file: FileConfig,
    /// Path to the config file (if loaded)
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed
    /// or fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::locate() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Wrap already-parsed values that did not come from disk.
    pub fn from_file(file: FileConfig) -> Self {
        Self { file, path: None }
    }

    /// Load configuration from a specific file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: FileConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        file.validate()?;

        Ok(Self {
            file,
            path: Some(path.to_path_buf()),
        })
    }

    /// Find the first existing config file.
    fn locate() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("IMGVENDOR_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("imgvendor/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        dirs::home_dir()
            .map(|home| home.join(".imgvendor/config.toml"))
            .filter(|path| path.exists())
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Get the directory work directories are created under.
    ///
    /// Defaults to the current directory.
    pub fn work_root(&self) -> PathBuf {
        self.file
            .work_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Check if the result should be pushed.
    ///
    /// Defaults to `true`.
    pub fn push(&self) -> bool {
        self.file.push.unwrap_or(true)
    }

    /// Get the remote name.
    ///
    /// Defaults to "origin".
    pub fn remote(&self) -> &str {
        self.file.remote.as_deref().unwrap_or("origin")
    }

    /// Get the commit message.
    pub fn commit_message(&self) -> &str {
        self.file
            .commit
            .as_ref()
            .and_then(|c| c.message.as_deref())
            .unwrap_or(DEFAULT_COMMIT_MESSAGE)
    }

    /// Get the commit author identity, if one is configured.
    pub fn commit_author(&self) -> Option<(&str, &str)> {
        let commit = self.file.commit.as_ref()?;
        Some((commit.author_name.as_deref()?, commit.author_email.as_deref()?))
    }

    /// Get the path to the loaded config file.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
