//! ui::prompts
//!
//! Interactive prompts.
//!
//! # Design
//!
//! A prompt writes its question, reads one line, and asks again until the
//! answer passes validation. End of input cancels the prompt rather than
//! looping forever on a closed stdin.

use std::io::{self, BufRead, Write};

use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Prompt for text input on the terminal.
///
/// Returns the trimmed answer once `validate` accepts it.
pub fn input(message: &str, validate: impl Fn(&str) -> bool) -> Result<String, PromptError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    input_from(&mut stdin.lock(), &mut stdout.lock(), message, validate)
}

/// Prompt for text input on arbitrary streams.
pub fn input_from<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    message: &str,
    validate: impl Fn(&str) -> bool,
) -> Result<String, PromptError> {
    loop {
        write!(writer, "? {} › ", message)?;
        writer.flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            writeln!(writer)?;
            return Err(PromptError::Cancelled);
        }

        let answer = line.trim();
        if validate(answer) {
            return Ok(answer.to_string());
        }

        writeln!(writer, "  invalid input, try again")?;
    }
}
