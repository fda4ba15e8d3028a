//! core
//!
//! Core domain logic for imgvendor.
//!
//! # Modules
//!
//! - [`scan`] - Image URL detection in file text
//! - [`rewrite`] - Local image naming and link rewriting
//! - [`paths`] - Work directory layout
//! - [`repo_url`] - Repository URL validation
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Everything here is pure or touches only the filesystem
//! - Network and git access live in [`crate::download`] and [`crate::git`]

pub mod config;
pub mod paths;
pub mod repo_url;
pub mod rewrite;
pub mod scan;
