//! Image generator port for AI image generation APIs.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::ImageError;

/// Base64 image data sent inline with a request (the reference photo).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineImage {
    /// Base64-encoded image bytes.
    pub data: String,
    /// MIME type of the image (e.g., `"image/jpeg"`).
    pub mime_type: String,
}

/// A request for a single image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRequest {
    /// The resolved model identifier (e.g., `"gemini-2.5-flash-image"`).
    pub model: String,
    /// The enhanced prompt text.
    pub prompt: String,
    /// Gemini aspect ratio (e.g., `"1:1"`, `"16:9"`).
    pub aspect_ratio: String,
    /// Gemini image size (`"1K"`, `"2K"`, `"4K"`), only set for pro models.
    #[serde(default)]
    pub image_size: Option<String>,
    /// Optional reference photo, sent before the prompt text.
    #[serde(default)]
    pub reference: Option<InlineImage>,
}

/// A single generated image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// Raw image bytes (decoded from base64).
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    /// MIME type of the image (e.g., `"image/png"`).
    pub mime_type: String,
}

/// Response to one request. May hold no image when the model answered with
/// text only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageResponse {
    /// The generated images.
    pub images: Vec<GeneratedImage>,
}

/// Boxed future type returned by [`ImageGenerator::generate`].
pub type GenerateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ImageResponse, ImageError>> + Send + 'a>>;

/// Generates images from prompts via an external API.
pub trait ImageGenerator: Send + Sync {
    /// Generate an image for the given request.
    fn generate(&self, request: &ImageRequest) -> GenerateFuture<'_>;
}

/// Serde helper for serializing `Vec<u8>` as base64 strings in cassettes.
mod base64_bytes {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize bytes as base64 string.
    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(data);
        serializer.serialize_str(&encoded)
    }

    /// Deserialize base64 string to bytes.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_without_optional_fields_deserializes() {
        let request: ImageRequest = serde_json::from_str(
            r#"{"model":"gemini-2.5-flash-image","prompt":"a cat","aspect_ratio":"1:1"}"#,
        )
        .unwrap();
        assert!(request.image_size.is_none());
        assert!(request.reference.is_none());
    }

    #[test]
    fn generated_image_is_base64_in_json() {
        let image = GeneratedImage { data: vec![0x89, 0x50, 0x4E, 0x47], mime_type: "image/png".into() };
        let json = serde_json::to_value(&image).unwrap();
        assert_eq!(json["data"], "iVBORw==");
    }

    #[test]
    fn empty_response_deserializes() {
        let response: ImageResponse = serde_json::from_str(r#"{"images":[]}"#).unwrap();
        assert!(response.images.is_empty());
    }
}
