//! Key selector port: asks the user to pick an API key.

use crate::error::ImageError;

/// Lets the user choose an API key when the configured one is missing or
/// cannot reach the requested model.
pub trait KeySelector {
    /// Ask for a key. Returns `Ok(None)` when no key was chosen.
    ///
    /// # Errors
    ///
    /// Returns an error if the user's input cannot be read.
    fn select_key(&self, reason: &str) -> Result<Option<String>, ImageError>;
}
