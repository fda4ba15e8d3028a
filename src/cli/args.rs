//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Flags
//!
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--workdir <path>`: Create the temporary clone under this directory
//! - `--no-push`: Commit but do not push
//! - `--config <path>`: Read defaults from this file
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Errors only

use clap::Parser;
use std::path::PathBuf;

/// imgvendor - vendor externally hosted images into a git repository
#[derive(Parser, Debug)]
#[command(name = "imgvendor")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    # Prompt for the repository URL
    imgvendor

    # Vendor images without pushing, keeping the clone under /tmp
    imgvendor https://github.com/me/notes --workdir /tmp --no-push")]
pub struct Cli {
    /// Repository to clone; prompted for when omitted
    #[arg(value_name = "REPO_URL")]
    pub repo_url: Option<String>,

    /// Create the temporary clone under this directory
    #[arg(long, value_name = "DIR")]
    pub workdir: Option<PathBuf>,

    /// Commit the rewritten files but do not push
    #[arg(long)]
    pub no_push: bool,

    /// Read defaults from this file instead of the standard locations
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Print errors only
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}
