//! API key resolution and the key-selection flow.

use std::path::Path;

use crate::config::{self, Config};
use crate::context::api_key_for;
use crate::error::ImageError;
use crate::model::is_pro_model;
use crate::ports::KeySelector;

const PRO_KEY_REASON: &str =
    "2K and 4K output use a pro model that needs an API key from a paid Google Cloud project.";

const NOT_FOUND_REASON: &str = "The API key cannot access the requested model.";

/// Resolve the key for `model`. When a pro model has no selected key, the
/// user is asked to select one first.
///
/// # Errors
///
/// Returns the missing-key error if no key is configured or selected.
pub fn resolve_key(
    model: &str,
    config: &Config,
    config_path: &Path,
    selector: &dyn KeySelector,
) -> Result<String, ImageError> {
    match api_key_for(model, config) {
        Ok(key) => Ok(key),
        Err(missing) if is_pro_model(model) => {
            select_and_store(selector, config_path, PRO_KEY_REASON)?.ok_or(missing)
        }
        Err(e) => Err(e),
    }
}

/// Ask for a replacement key after the API reported it cannot find the model.
///
/// # Errors
///
/// Returns an error if the selector fails to read input.
pub fn reselect_key(
    selector: &dyn KeySelector,
    config_path: &Path,
) -> Result<Option<String>, ImageError> {
    select_and_store(selector, config_path, NOT_FOUND_REASON)
}

/// Run the selector and persist whatever key it returns. A key that cannot be
/// saved is still used for this run.
fn select_and_store(
    selector: &dyn KeySelector,
    config_path: &Path,
    reason: &str,
) -> Result<Option<String>, ImageError> {
    let Some(key) = selector.select_key(reason)? else {
        return Ok(None);
    };
    match config::store_selected_key(config_path, &key) {
        Ok(()) => tracing::info!(path = %config_path.display(), "saved selected key"),
        Err(e) => tracing::warn!(error = %e, "could not save selected key"),
    }
    Ok(Some(key))
}
