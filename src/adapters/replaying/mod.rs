//! Replaying adapters that serve recorded interactions from cassettes.

pub mod image_generator;

use std::sync::{Arc, Mutex};

use crate::cassette::replayer::CassetteReplayer;

/// Boxed error used while decoding replayed interactions.
pub(crate) type ReplayError = Box<dyn std::error::Error + Send + Sync>;

/// Retrieve the next recorded output for a given port and method.
///
/// # Errors
///
/// Returns an error if the cassette has no more interactions for the pair.
pub(crate) fn next_output(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> Result<serde_json::Value, ReplayError> {
    let mut guard = replayer.lock().map_err(|e| format!("replayer lock poisoned: {e}"))?;
    Ok(guard.next_interaction(port, method)?.output)
}

/// Deserialize a replayed output as `Result<T, Error>`.
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    output: serde_json::Value,
) -> Result<T, ReplayError> {
    if let Some(err_val) = output.get("Err").or_else(|| output.get("err")) {
        let msg = err_val.as_str().unwrap_or("replayed error").to_string();
        return Err(msg.into());
    }
    if let Some(ok_val) = output.get("Ok").or_else(|| output.get("ok")) {
        return serde_json::from_value(ok_val.clone()).map_err(|e| Box::new(e) as ReplayError);
    }
    serde_json::from_value(output).map_err(|e| Box::new(e) as ReplayError)
}
