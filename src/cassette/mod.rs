//! Record/replay of generator calls, so runs can be reproduced without the network.

pub mod format;
pub mod recorder;
pub mod replayer;

use std::path::PathBuf;

use thiserror::Error;

/// Failures reading, writing or replaying a cassette.
#[derive(Debug, Error)]
pub enum CassetteError {
    /// The cassette file could not be read.
    #[error("Failed to read cassette file {}: {source}", .path.display())]
    Read {
        /// Cassette path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The cassette file is not valid cassette YAML.
    #[error("Failed to parse cassette file {}: {source}", .path.display())]
    Parse {
        /// Cassette path.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },

    /// The cassette could not be written.
    #[error("Failed to write cassette file {}: {source}", .path.display())]
    Write {
        /// Cassette path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The cassette could not be encoded as YAML.
    #[error("Failed to encode cassette: {0}")]
    Encode(#[from] serde_yaml::Error),

    /// Nothing was recorded for this port and method.
    #[error("Cassette exhausted: no interactions recorded for {port}::{method}. Recorded: [{recorded}]")]
    Unrecorded {
        /// Port name.
        port: String,
        /// Method name.
        method: String,
        /// Comma-separated `port::method` pairs the cassette does hold.
        recorded: String,
    },

    /// Every interaction for this port and method was already served.
    #[error("Cassette exhausted: all {served} interactions for {port}::{method} have been consumed.")]
    Exhausted {
        /// Port name.
        port: String,
        /// Method name.
        method: String,
        /// How many were served before running out.
        served: usize,
    },
}
