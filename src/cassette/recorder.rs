//! Collects interactions during a live run and writes them out as a cassette.

use std::path::PathBuf;

use chrono::Utc;

use super::format::{Cassette, Interaction};
use super::CassetteError;

/// Accumulates a cassette in memory until [`CassetteRecorder::finish`].
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    cassette: Cassette,
}

impl CassetteRecorder {
    /// Start an empty recording destined for `path`.
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, commit: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            cassette: Cassette {
                name: name.into(),
                recorded_at: Utc::now(),
                commit: commit.into(),
                interactions: Vec::new(),
            },
        }
    }

    /// Append one call. Sequence numbers follow insertion order.
    pub fn record(
        &mut self,
        port: &str,
        method: &str,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        let seq = self.cassette.interactions.len() as u64;
        self.cassette.interactions.push(Interaction {
            seq,
            port: port.to_string(),
            method: method.to_string(),
            input,
            output,
        });
    }

    /// Stamp the finish time and write the cassette, returning its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be encoded or written.
    pub fn finish(mut self) -> Result<PathBuf, CassetteError> {
        self.cassette.recorded_at = Utc::now();
        self.cassette.save(&self.path)?;
        tracing::debug!(
            path = %self.path.display(),
            interactions = self.cassette.interactions.len(),
            "cassette written"
        );
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{GENERATE_METHOD, IMAGE_GENERATOR_PORT};
    use crate::cassette::replayer::CassetteReplayer;
    use serde_json::json;

    #[test]
    fn empty_recording_still_writes_file() {
        let dir = std::env::temp_dir().join("lumina_cassette_recorder_empty");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("a/b/run.cassette.yaml");

        let recorder = CassetteRecorder::new(&path, "empty", "unknown");
        assert_eq!(recorder.finish().unwrap(), path);
        assert!(Cassette::load(&path).unwrap().interactions.is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn recorded_batch_replays_in_order() {
        let dir = std::env::temp_dir().join("lumina_cassette_recorder_test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("batch.cassette.yaml");

        let mut recorder = CassetteRecorder::new(&path, "batch", "deadbeef");
        for ratio in ["3:4", "16:9"] {
            recorder.record(
                IMAGE_GENERATOR_PORT,
                GENERATE_METHOD,
                json!({ "aspect_ratio": ratio }),
                json!({ "Ok": { "images": [] } }),
            );
        }
        recorder.finish().unwrap();

        let cassette = Cassette::load(&path).unwrap();
        assert_eq!(cassette.commit, "deadbeef");
        let seqs: Vec<u64> = cassette.interactions.iter().map(|i| i.seq).collect();
        assert_eq!(seqs, vec![0, 1]);

        let mut replayer = CassetteReplayer::new(cassette);
        let first = replayer.next_interaction(IMAGE_GENERATOR_PORT, GENERATE_METHOD).unwrap();
        assert_eq!(first.input["aspect_ratio"], "3:4");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
