//! Image saving and format conversion.

use std::path::Path;

use crate::error::ImageError;

/// Save raw image bytes to a file, converting format if necessary.
///
/// # Errors
///
/// Returns an error if the file cannot be written or format conversion fails.
pub fn save_image(
    data: &[u8],
    source_mime: &str,
    target_format: &str,
    output_path: &Path,
) -> Result<(), ImageError> {
    if mime_matches_format(source_mime, target_format) {
        std::fs::write(output_path, data).map_err(ImageError::Io)
    } else {
        tracing::debug!(%source_mime, %target_format, "converting image");
        convert_and_save(data, target_format, output_path)
    }
}

/// Check if a MIME type matches the requested output format.
fn mime_matches_format(mime: &str, format: &str) -> bool {
    matches!(
        (mime, format),
        ("image/png", "png") | ("image/jpeg" | "image/jpg", "jpeg") | ("image/webp", "webp")
    )
}

/// Convert image bytes to the target format and save.
fn convert_and_save(data: &[u8], target_format: &str, output_path: &Path) -> Result<(), ImageError> {
    let img = image::load_from_memory(data)
        .map_err(|e| ImageError::ImageConversion(format!("Failed to decode image: {e}")))?;

    let (img, image_format) = match target_format {
        // JPEG has no alpha channel.
        "jpeg" => (image::DynamicImage::ImageRgb8(img.to_rgb8()), image::ImageFormat::Jpeg),
        "png" => (img, image::ImageFormat::Png),
        "webp" => (img, image::ImageFormat::WebP),
        other => {
            return Err(ImageError::ImageConversion(format!("Unsupported format: {other}")));
        }
    };

    img.save_with_format(output_path, image_format)
        .map_err(|e| ImageError::ImageConversion(format!("Failed to save as {target_format}: {e}")))
}
