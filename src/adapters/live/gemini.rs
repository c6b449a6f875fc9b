//! Live adapter for the Gemini image generation API.

use base64::Engine;
use reqwest::Client;
use serde::Deserialize;

use crate::error::ImageError;
use crate::ports::image_generator::{
    GenerateFuture, GeneratedImage, ImageGenerator, ImageRequest, ImageResponse,
};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Live Gemini image generator that calls the Google AI API.
pub struct GeminiGenerator {
    client: Client,
    api_key: String,
}

impl GeminiGenerator {
    /// Create a new Gemini generator with the given API key.
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self { client: Client::new(), api_key }
    }
}

/// Build the `generateContent` body. The reference photo, when present,
/// precedes the prompt text.
pub(crate) fn request_body(request: &ImageRequest) -> serde_json::Value {
    let mut parts = Vec::with_capacity(2);
    if let Some(ref reference) = request.reference {
        parts.push(serde_json::json!({
            "inlineData": {
                "data": reference.data,
                "mimeType": reference.mime_type,
            }
        }));
    }
    parts.push(serde_json::json!({ "text": request.prompt }));

    let mut image_config = serde_json::json!({ "aspectRatio": request.aspect_ratio });
    if let Some(ref size) = request.image_size {
        image_config["imageSize"] = serde_json::json!(size);
    }

    serde_json::json!({
        "contents": [{ "parts": parts }],
        "generationConfig": {
            "responseModalities": ["IMAGE"],
            "imageConfig": image_config,
        }
    })
}

impl ImageGenerator for GeminiGenerator {
    fn generate(&self, request: &ImageRequest) -> GenerateFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let url = format!("{GEMINI_API_BASE}/{}:generateContent", request.model);
            let body = request_body(&request);

            tracing::debug!(model = %request.model, aspect_ratio = %request.aspect_ratio,
                image_size = ?request.image_size, reference = request.reference.is_some(),
                "calling generateContent");

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            let response_text = response.text().await?;

            if !status.is_success() {
                return Err(ImageError::Api { status: status.as_u16(), message: response_text });
            }

            parse_response(&response_text)
        })
    }
}

/// Pull the first inline image out of the first candidate.
pub(crate) fn parse_response(text: &str) -> Result<ImageResponse, ImageError> {
    let parsed: GeminiResponse = serde_json::from_str(text).map_err(|e| ImageError::Api {
        status: 200,
        message: format!("Failed to parse response: {e}"),
    })?;

    let inline = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|content| content.parts.into_iter().find_map(|p| p.inline_data));

    let Some(inline) = inline else {
        return Ok(ImageResponse::default());
    };

    let data = base64::engine::general_purpose::STANDARD.decode(&inline.data).map_err(|e| {
        ImageError::Api { status: 200, message: format!("Failed to decode base64: {e}") }
    })?;
    Ok(ImageResponse { images: vec![GeneratedImage { data, mime_type: inline.mime_type }] })
}

// --- Gemini API response types ---

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    inline_data: Option<GeminiInlineData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::InlineImage;

    fn request(image_size: Option<&str>, reference: bool) -> ImageRequest {
        ImageRequest {
            model: "gemini-2.5-flash-image".into(),
            prompt: "a cat".into(),
            aspect_ratio: "3:4".into(),
            image_size: image_size.map(str::to_string),
            reference: reference
                .then(|| InlineImage { data: "AAAA".into(), mime_type: "image/jpeg".into() }),
        }
    }

    #[test]
    fn body_text_only() {
        let body = request_body(&request(None, false));
        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0]["text"], "a cat");
        assert_eq!(body["generationConfig"]["imageConfig"]["aspectRatio"], "3:4");
        assert!(body["generationConfig"]["imageConfig"].get("imageSize").is_none());
    }

    #[test]
    fn body_reference_precedes_text() {
        let body = request_body(&request(Some("4K"), true));
        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[0]["inlineData"]["data"], "AAAA");
        assert_eq!(parts[1]["text"], "a cat");
        assert_eq!(body["generationConfig"]["imageConfig"]["imageSize"], "4K");
    }

    #[test]
    fn parse_takes_first_inline_image() {
        let text = r#"{"candidates":[{"content":{"parts":[
            {"text":"here you go"},
            {"inlineData":{"mimeType":"image/png","data":"iVBORw=="}},
            {"inlineData":{"mimeType":"image/png","data":"AAAA"}}
        ]}}]}"#;
        let response = parse_response(text).unwrap();
        assert_eq!(response.images.len(), 1);
        assert_eq!(response.images[0].data, vec![0x89, 0x50, 0x4E, 0x47]);
    }

    #[test]
    fn parse_text_only_is_empty() {
        let text = r#"{"candidates":[{"content":{"parts":[{"text":"I can't draw that"}]}}]}"#;
        assert!(parse_response(text).unwrap().images.is_empty());
    }

    #[test]
    fn parse_no_candidates_is_empty() {
        assert!(parse_response(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#)
            .unwrap()
            .images
            .is_empty());
        assert!(parse_response(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#)
            .unwrap()
            .images
            .is_empty());
    }

    #[test]
    fn parse_garbage_is_error() {
        assert!(parse_response("not json").is_err());
    }
}
