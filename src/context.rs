//! Service context that bundles all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::gemini::GeminiGenerator;
use crate::adapters::recording::image_generator::RecordingImageGenerator;
use crate::adapters::replaying::image_generator::ReplayingImageGenerator;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::config::{Config, GEMINI_KEY_ENV, SELECTED_KEY_ENV};
use crate::error::ImageError;
use crate::model::is_pro_model;
use crate::ports::ImageGenerator;

/// Bundles all port trait objects into a single context.
pub struct ServiceContext {
    /// Image generator port.
    pub generator: Box<dyn ImageGenerator>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Start a recording under `.lumina/cassettes/<timestamp>/`.
    #[must_use]
    pub fn start() -> Self {
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(".lumina/cassettes")
            .join(&timestamp)
            .join("image_generator.cassette.yaml");
        let recorder = CassetteRecorder::new(
            path,
            format!("{timestamp}-image_generator"),
            get_commit_hash(),
        );
        Self { recorder: Arc::new(Mutex::new(recorder)) }
    }

    /// Finish the recording and write cassette files to disk. Every context
    /// built on this session must be dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapter still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.finish().map_err(|e| e.to_string())
    }
}

impl ServiceContext {
    /// Create a live context calling Gemini with the given key, recording
    /// every call when a session is given.
    #[must_use]
    pub fn live(api_key: String, recording: Option<&RecordingSession>) -> Self {
        let live: Box<dyn ImageGenerator> = Box::new(GeminiGenerator::new(api_key));
        let generator: Box<dyn ImageGenerator> = match recording {
            Some(session) => {
                Box::new(RecordingImageGenerator::new(live, Arc::clone(&session.recorder)))
            }
            None => live,
        };
        Self { generator }
    }

    /// Create a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, ImageError> {
        let replayer = CassetteReplayer::open(path)
            .map_err(|e| ImageError::Config(format!("Failed to load cassette: {e}")))?;
        let replayer = Arc::new(Mutex::new(replayer));
        let generator = Box::new(ReplayingImageGenerator::new(replayer));
        Ok(Self { generator })
    }
}

/// Pick the API key for a model. Pro models need the selected key; others
/// use the standard Gemini key.
///
/// # Errors
///
/// Returns an error if the needed key is not configured.
pub fn api_key_for(model: &str, config: &Config) -> Result<String, ImageError> {
    if is_pro_model(model) {
        config.selected_key().ok_or_else(|| ImageError::MissingApiKey {
            kind: "selected Gemini".into(),
            env_var: SELECTED_KEY_ENV.into(),
        })
    } else {
        config.gemini_key().ok_or_else(|| ImageError::MissingApiKey {
            kind: "Gemini".into(),
            env_var: GEMINI_KEY_ENV.into(),
        })
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
