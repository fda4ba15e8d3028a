//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Config values are validated after parsing: the remote name and commit
//! message must be non-empty, and an author identity must be given whole.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// File-level configuration.
///
/// # Example
///
/// ```toml
/// work_root = "/var/tmp/imgvendor"
/// push = true
/// remote = "origin"
///
/// [commit]
/// message = "chore: downloaded images"
/// author_name = "Image Bot"
/// author_email = "bot@example.com"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Directory the `tmp<millis>` work directory is created under
    pub work_root: Option<PathBuf>,

    /// Whether to push after committing
    pub push: Option<bool>,

    /// Remote whose HEAD names the default branch
    pub remote: Option<String>,

    /// Commit settings
    pub commit: Option<CommitConfig>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(remote) = &self.remote {
            if remote.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "remote cannot be empty".to_string(),
                ));
            }
        }

        if let Some(commit) = &self.commit {
            commit.validate()?;
        }

        Ok(())
    }
}

/// Commit settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CommitConfig {
    /// Commit message
    pub message: Option<String>,

    /// Author name passed to `git -c user.name`
    pub author_name: Option<String>,

    /// Author email passed to `git -c user.email`
    pub author_email: Option<String>,
}

impl CommitConfig {
    /// Validate the commit settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(message) = &self.message {
            if message.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "commit message cannot be empty".to_string(),
                ));
            }
        }

        if self.author_name.is_some() != self.author_email.is_some() {
            return Err(ConfigError::InvalidValue(
                "author_name and author_email must be set together".to_string(),
            ));
        }

        Ok(())
    }
}
