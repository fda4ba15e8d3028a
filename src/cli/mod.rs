//! cli
//!
//! Command-line interface layer for imgvendor.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments
//! - Load config and apply flag overrides
//! - Obtain the repository URL (argument or prompt)
//! - Drive the async pipeline on a tokio runtime
//!
//! The CLI layer is thin; all repository work happens in [`crate::engine`].

pub mod args;

pub use args::Cli;

use anyhow::{bail, Context as _, Result};

use crate::core::config::Config;
use crate::core::repo_url::is_repository_url;
use crate::download::Downloader;
use crate::engine::{pipeline, Context};
use crate::ui::output::{self, Verbosity};
use crate::ui::prompts;

/// Question asked when no URL is given on the command line.
pub const REPO_URL_PROMPT: &str = "What is the git repository URL?";

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    let ctx = build_context(&cli, &config);
    if let Some(path) = config.loaded_from() {
        output::debug(format!("loaded config from {}", path.display()), ctx.verbosity);
    }

    let repo_url = match cli.repo_url {
        Some(url) => {
            if !is_repository_url(&url) {
                bail!("'{}' is not a repository URL", url);
            }
            url.trim().to_string()
        }
        None => prompts::input(REPO_URL_PROMPT, is_repository_url)?,
    };

    let downloader = Downloader::new()?;

    let rt = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    rt.block_on(pipeline::run(&ctx, &repo_url, &downloader))?;

    Ok(())
}

/// Apply CLI flags over loaded configuration.
pub fn build_context(cli: &Cli, config: &Config) -> Context {
    let mut ctx = Context::from_config(config);
    if let Some(workdir) = &cli.workdir {
        ctx.work_root = workdir.clone();
    }
    if cli.no_push {
        ctx.push = false;
    }
    ctx.verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    ctx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::FileConfig;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn flags_override_config() {
        let config = Config::from_file(FileConfig {
            work_root: Some(PathBuf::from("/from/config")),
            push: Some(true),
            ..Default::default()
        });
        let cli =
            Cli::try_parse_from(["imgvendor", "--workdir", "/from/flag", "--no-push"]).unwrap();

        let ctx = build_context(&cli, &config);
        assert_eq!(ctx.work_root, PathBuf::from("/from/flag"));
        assert!(!ctx.push);
    }

    #[test]
    fn config_used_without_flags() {
        let config = Config::from_file(FileConfig {
            work_root: Some(PathBuf::from("/from/config")),
            push: Some(false),
            ..Default::default()
        });
        let cli = Cli::try_parse_from(["imgvendor", "--debug"]).unwrap();

        let ctx = build_context(&cli, &config);
        assert_eq!(ctx.work_root, PathBuf::from("/from/config"));
        assert!(!ctx.push);
        assert_eq!(ctx.verbosity, Verbosity::Debug);
    }
}
