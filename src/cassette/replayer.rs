//! Serves recorded interactions back in the order they were recorded.

use std::collections::{BTreeMap, VecDeque};
use std::path::Path;

use super::format::{Cassette, Interaction};
use super::CassetteError;

/// Pending interactions for one port/method pair.
#[derive(Debug, Default)]
struct Track {
    pending: VecDeque<Interaction>,
    served: usize,
}

/// Replays a cassette. Each port/method pair has its own queue, so calls on
/// different ports may interleave differently than when recorded.
#[derive(Debug)]
pub struct CassetteReplayer {
    tracks: BTreeMap<(String, String), Track>,
}

impl CassetteReplayer {
    /// Build a replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: Cassette) -> Self {
        let mut tracks: BTreeMap<(String, String), Track> = BTreeMap::new();
        for interaction in cassette.interactions {
            let key = (interaction.port.clone(), interaction.method.clone());
            tracks.entry(key).or_default().pending.push_back(interaction);
        }
        Self { tracks }
    }

    /// Load a cassette file and build a replayer over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn open(path: &Path) -> Result<Self, CassetteError> {
        let cassette = Cassette::load(path)?;
        tracing::debug!(name = %cassette.name, interactions = cassette.interactions.len(), "cassette loaded");
        Ok(Self::new(cassette))
    }

    /// Take the next interaction recorded for `port` and `method`.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing was recorded for the pair or every
    /// recorded interaction has been served.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Result<Interaction, CassetteError> {
        let Some(track) = self.tracks.get_mut(&(port.to_string(), method.to_string())) else {
            let recorded: Vec<String> = self.tracks.keys().map(|(p, m)| format!("{p}::{m}")).collect();
            return Err(CassetteError::Unrecorded {
                port: port.to_string(),
                method: method.to_string(),
                recorded: recorded.join(", "),
            });
        };

        let interaction = track.pending.pop_front().ok_or_else(|| CassetteError::Exhausted {
            port: port.to_string(),
            method: method.to_string(),
            served: track.served,
        })?;
        track.served += 1;
        Ok(interaction)
    }
}
