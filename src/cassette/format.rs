//! On-disk cassette format.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CassetteError;

/// Port name the image generator records under.
pub const IMAGE_GENERATOR_PORT: &str = "image_generator";

/// Method name of `ImageGenerator::generate`.
pub const GENERATE_METHOD: &str = "generate";

/// A recorded session: every port interaction of one run, in call order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Human-readable cassette name.
    pub name: String,
    /// When the recording finished.
    pub recorded_at: DateTime<Utc>,
    /// Git commit the recording was made at.
    pub commit: String,
    /// Interactions in sequence order.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

/// One call through a port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Position in the recording, starting at zero.
    pub seq: u64,
    /// Port name (e.g. `image_generator`).
    pub port: String,
    /// Method name on the port.
    pub method: String,
    /// Serialized call input.
    pub input: serde_json::Value,
    /// Serialized result, `{"Ok": ..}` or `{"Err": ".."}`.
    pub output: serde_json::Value,
}

impl Cassette {
    /// Read a cassette from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a cassette.
    pub fn load(path: &Path) -> Result<Self, CassetteError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| CassetteError::Read { path: path.to_path_buf(), source })?;
        serde_yaml::from_str(&content)
            .map_err(|source| CassetteError::Parse { path: path.to_path_buf(), source })
    }

    /// Write the cassette as YAML, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be encoded or written.
    pub fn save(&self, path: &Path) -> Result<(), CassetteError> {
        let yaml = serde_yaml::to_string(self)?;
        let write = |source| CassetteError::Write { path: path.to_path_buf(), source };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write)?;
        }
        std::fs::write(path, yaml).map_err(write)
    }
}
