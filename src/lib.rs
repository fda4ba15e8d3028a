//! imgvendor - vendor externally hosted images into a git repository
//!
//! imgvendor clones a repository, finds image links in its tracked text files
//! that point at external hosts, downloads those images into
//! `downloaded-images/`, rewrites the links to the committed copies, and
//! pushes the result.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Run context and the clone → rewrite → push pipeline
//! - [`core`] - URL detection, link rewriting, paths, config
//! - [`git`] - Single interface for all Git operations
//! - [`download`] - HTTP GET of images to disk
//! - [`ui`] - Prompts and console output
//!
//! # Invariants
//!
//! 1. The temporary clone never outlives a run
//! 2. A failed download leaves its link untouched
//! 3. Nothing is committed unless a file changed

pub mod cli;
pub mod core;
pub mod download;
pub mod engine;
pub mod git;
pub mod ui;
