//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Status lines are prefixed with a symbol: `✔` for success, `⚠` for
//! progress and warnings, `✖` for errors. Quiet mode suppresses everything
//! except errors.

use std::fmt::Display;

/// Symbol for completed steps.
pub const SUCCESS: &str = "✔";
/// Symbol for in-progress steps and warnings.
pub const WARNING: &str = "⚠";
/// Symbol for failures.
pub const ERROR: &str = "✖";

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - errors only
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a progress step (respects quiet mode).
pub fn step(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", format_status(WARNING, message));
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("{}", format_status(ERROR, message));
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("{}", format_status(WARNING, message));
    }
}

/// Print a success message (respects quiet mode).
pub fn success(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", format_status(SUCCESS, message));
    }
}

/// Format a status line with its symbol.
pub fn format_status(symbol: &str, message: impl Display) -> String {
    format!("{} {}", symbol, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn status_line_format() {
        assert_eq!(format_status(SUCCESS, "Cloned!"), "✔ Cloned!");
        assert_eq!(format_status(ERROR, 42), "✖ 42");
    }
}
