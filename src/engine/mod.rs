//! engine
//!
//! Orchestrates a vendoring run.
//!
//! # Architecture
//!
//! The engine owns the run [`Context`] and the [`pipeline`] that walks a
//! cloned repository. The CLI builds a context from config and flags, then
//! hands it to [`pipeline::run`].
//!
//! # Example
//!
//! ```ignore
//! use imgvendor::core::config::Config;
//! use imgvendor::download::Downloader;
//! use imgvendor::engine::{pipeline, Context};
//!
//! let ctx = Context::from_config(&Config::load()?);
//! let summary = pipeline::run(&ctx, "https://github.com/o/r", &Downloader::new()?).await?;
//! println!("{} downloaded", summary.downloads);
//! ```

pub mod pipeline;

pub use pipeline::{PipelineError, RunSummary};

use std::path::PathBuf;

use crate::core::config::{Config, DEFAULT_COMMIT_MESSAGE};
use crate::ui::output::Verbosity;

/// Settings for a single run.
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory the work directory is created under.
    pub work_root: PathBuf,
    /// Remote whose HEAD names the default branch.
    pub remote: String,
    /// Push after committing.
    pub push: bool,
    /// Message for the vendoring commit.
    pub commit_message: String,
    /// Author identity for the commit, overriding git config.
    pub author: Option<(String, String)>,
    /// Output verbosity.
    pub verbosity: Verbosity,
}

impl Context {
    /// Build a context from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            work_root: config.work_root(),
            remote: config.remote().to_string(),
            push: config.push(),
            commit_message: config.commit_message().to_string(),
            author: config
                .commit_author()
                .map(|(name, email)| (name.to_string(), email.to_string())),
            verbosity: Verbosity::Normal,
        }
    }

    /// Get the commit author as borrowed strings.
    pub fn commit_author(&self) -> Option<(&str, &str)> {
        self.author
            .as_ref()
            .map(|(name, email)| (name.as_str(), email.as_str()))
    }
}

impl Default for Context {
    fn default() -> Self {
        Self {
            work_root: PathBuf::from("."),
            remote: "origin".to_string(),
            push: true,
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            author: None,
            verbosity: Verbosity::Normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_default_config() {
        let from_config = Context::from_config(&Config::default());
        let default = Context::default();

        assert_eq!(from_config.work_root, default.work_root);
        assert_eq!(from_config.remote, default.remote);
        assert_eq!(from_config.push, default.push);
        assert_eq!(from_config.commit_message, default.commit_message);
        assert_eq!(from_config.author, default.author);
    }

    #[test]
    fn commit_author_borrows() {
        let ctx = Context {
            author: Some(("Bot".to_string(), "bot@example.com".to_string())),
            ..Context::default()
        };
        assert_eq!(ctx.commit_author(), Some(("Bot", "bot@example.com")));
    }
}
