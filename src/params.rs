//! Parameter translation from user settings to Gemini request values.

use crate::model::is_pro_model;
use crate::settings::{AspectRatio, Resolution};

/// Map a user aspect ratio to the closest ratio Gemini accepts.
///
/// Gemini has no 4:5 or 1.91:1, so those fall back to 3:4 and 16:9.
#[must_use]
pub fn gemini_aspect_ratio(ratio: AspectRatio) -> &'static str {
    match ratio {
        AspectRatio::Square => "1:1",
        AspectRatio::Portrait => "3:4",
        AspectRatio::Story => "9:16",
        AspectRatio::Landscape | AspectRatio::LinkCard => "16:9",
    }
}

/// Map a resolution tier to a Gemini `imageSize` value.
#[must_use]
pub fn gemini_image_size(resolution: Resolution) -> &'static str {
    match resolution {
        Resolution::TwoK => "2K",
        Resolution::FourK => "4K",
        _ => "1K",
    }
}

/// The `imageSize` to send, if any. Only a pro resolution on a pro model
/// carries one; basic models reject the field.
#[must_use]
pub fn requested_image_size(model: &str, resolution: Resolution) -> Option<&'static str> {
    (resolution.is_pro() && is_pro_model(model)).then(|| gemini_image_size(resolution))
}

/// Validate the output format parameter.
///
/// # Errors
///
/// Returns an error if the format is not recognized.
pub fn validate_format(format: &str) -> Result<(), String> {
    match format {
        "png" | "jpeg" | "webp" => Ok(()),
        _ => Err(format!("Unsupported format '{format}'. Valid: png, jpeg, webp")),
    }
}

/// Get the file extension for an output format.
#[must_use]
pub fn format_extension(format: &str) -> &'static str {
    match format {
        "jpeg" => "jpg",
        "webp" => "webp",
        _ => "png",
    }
}
