//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`prompts`] - Interactive prompts
//! - [`output`] - Status lines and verbosity handling
//!
//! # Design
//!
//! All console output and prompts go through this module so that quiet
//! and debug modes apply uniformly.

pub mod output;
pub mod prompts;
