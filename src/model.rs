//! Model selection by resolution tier, plus alias resolution.

use crate::settings::Resolution;

/// Model used for standard, HD and Full HD output.
pub const BASIC_MODEL: &str = "gemini-2.5-flash-image";

/// Model used for 2K and 4K output.
pub const PRO_MODEL: &str = "gemini-3-pro-image-preview";

/// Short name aliases for the supported models.
const ALIASES: &[(&str, &str)] = &[("nano-banana", BASIC_MODEL), ("nano-banana-pro", PRO_MODEL)];

/// Resolve a model name (alias or exact) to the full model identifier.
#[must_use]
pub fn resolve_model(name: &str) -> String {
    ALIASES
        .iter()
        .find(|&&(alias, _)| alias == name)
        .map_or_else(|| name.to_string(), |&(_, full)| full.to_string())
}

/// Pick the model for a run. An explicit override wins over the tier default.
///
/// # Errors
///
/// Returns an error if the override is not a Gemini model.
pub fn select_model(resolution: Resolution, explicit: Option<&str>) -> Result<String, String> {
    let Some(name) = explicit else {
        let model = if resolution.is_pro() { PRO_MODEL } else { BASIC_MODEL };
        return Ok(model.to_string());
    };

    let model = resolve_model(name);
    if model.starts_with("gemini") {
        Ok(model)
    } else {
        Err(format!("Unknown model '{model}'. Expected a 'gemini-*' image model."))
    }
}

/// Whether a model belongs to the pro tier and so needs a selected key.
#[must_use]
pub fn is_pro_model(model: &str) -> bool {
    model == PRO_MODEL || model.contains("-pro-")
}
