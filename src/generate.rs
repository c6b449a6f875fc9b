//! The generation loop: one request per requested image.

use crate::error::ImageError;
use crate::params::{gemini_aspect_ratio, requested_image_size};
use crate::ports::image_generator::GeneratedImage;
use crate::ports::{ImageGenerator, ImageRequest, InlineImage};
use crate::prompt::enhance_prompt;
use crate::settings::GenerationSettings;

/// Build the request sent for each image of a batch.
#[must_use]
pub fn build_request(
    model: &str,
    prompt: &str,
    settings: &GenerationSettings,
    reference: Option<&InlineImage>,
) -> ImageRequest {
    ImageRequest {
        model: model.to_string(),
        prompt: enhance_prompt(prompt, settings.aspect_ratio, reference.is_some()),
        aspect_ratio: gemini_aspect_ratio(settings.aspect_ratio).to_string(),
        image_size: requested_image_size(model, settings.resolution).map(str::to_string),
        reference: reference.cloned(),
    }
}

/// Generate `settings.count` images, one request at a time.
///
/// Responses without an image are skipped, so fewer images than requested
/// may come back.
///
/// # Errors
///
/// The first failed request aborts the batch and its error is returned;
/// images collected before it are dropped.
pub async fn generate_images(
    generator: &dyn ImageGenerator,
    model: &str,
    prompt: &str,
    settings: &GenerationSettings,
    reference: Option<&InlineImage>,
) -> Result<Vec<GeneratedImage>, ImageError> {
    let request = build_request(model, prompt, settings, reference);
    let mut results = Vec::with_capacity(settings.count as usize);

    for i in 0..settings.count {
        tracing::debug!(image = i + 1, of = settings.count, "requesting image");
        let response = generator.generate(&request).await.inspect_err(|e| {
            tracing::error!(image = i + 1, error = %e, "generation error");
        })?;

        match response.images.into_iter().next() {
            Some(image) => results.push(image),
            None => tracing::warn!(image = i + 1, "response contained no image; skipping"),
        }
    }

    Ok(results)
}
