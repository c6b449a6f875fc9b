//! Unified error type for lumina.

use thiserror::Error;

/// Message fragment the Gemini API returns when the key's project cannot
/// see the requested model.
const ENTITY_NOT_FOUND: &str = "Requested entity was not found";

/// Errors that can occur during image generation.
#[derive(Debug, Error)]
pub enum ImageError {
    /// An API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Image format conversion error.
    #[error("Image conversion error: {0}")]
    ImageConversion(String),

    /// No usable API key is configured.
    #[error("No {kind} API key. Set {env_var} or add it to the config file.")]
    MissingApiKey {
        /// Which key is missing (e.g. "Gemini", "selected Gemini").
        kind: String,
        /// The environment variable name.
        env_var: String,
    },
}

impl ImageError {
    /// Whether this error means the API key cannot reach the requested model,
    /// which calls for selecting a different key.
    #[must_use]
    pub fn is_entity_not_found(&self) -> bool {
        match self {
            Self::Api { message, .. } => message.contains(ENTITY_NOT_FOUND),
            _ => false,
        }
    }

    /// Whether this error came out of the generation request loop rather than
    /// argument or config handling.
    #[must_use]
    pub fn is_generation_failure(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::Network(_))
    }
}
