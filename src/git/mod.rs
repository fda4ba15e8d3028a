//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **only doorway** to Git. No other module imports
//! `git2` or spawns `git` processes. Reads go through `git2`; clone, add,
//! commit and push shell out to the `git` CLI.
//!
//! # Responsibilities
//!
//! - Shallow clone of the target repository
//! - Listing tracked files
//! - Resolving the remote default branch
//! - Staging, committing and pushing the rewritten tree

mod interface;

pub use interface::{Git, GitError};
