//! Interactive key selection on the controlling terminal.

use std::io::{BufRead, IsTerminal, Write};

use crate::error::ImageError;
use crate::ports::KeySelector;

/// Prompts on stderr and reads a key from stdin. Selects nothing when stdin
/// is not a terminal, so scripted runs never block.
#[derive(Debug, Default)]
pub struct TerminalKeySelector;

impl KeySelector for TerminalKeySelector {
    fn select_key(&self, reason: &str) -> Result<Option<String>, ImageError> {
        let stdin = std::io::stdin();
        if !stdin.is_terminal() {
            tracing::debug!("stdin is not a terminal; skipping key selection");
            return Ok(None);
        }

        let mut stderr = std::io::stderr();
        writeln!(stderr, "{reason}")?;
        write!(stderr, "Enter a Gemini API key from a paid project (blank to cancel): ")?;
        stderr.flush()?;

        let mut line = String::new();
        stdin.lock().read_line(&mut line)?;
        Ok(non_blank(&line))
    }
}

/// A trimmed key, or `None` for blank input.
fn non_blank(line: &str) -> Option<String> {
    let key = line.trim();
    (!key.is_empty()).then(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_key() {
        assert_eq!(non_blank("  AIza-key \n").as_deref(), Some("AIza-key"));
    }

    #[test]
    fn blank_is_none() {
        assert!(non_blank("\n").is_none());
        assert!(non_blank("   ").is_none());
    }
}
