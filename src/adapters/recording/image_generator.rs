//! Recording adapter for the `ImageGenerator` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::format::{GENERATE_METHOD, IMAGE_GENERATOR_PORT};
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::image_generator::{GenerateFuture, ImageGenerator, ImageRequest, InlineImage};

/// Records image generation interactions while delegating to an inner implementation.
pub struct RecordingImageGenerator {
    inner: Box<dyn ImageGenerator>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingImageGenerator {
    /// Creates a new recording generator wrapping the given implementation.
    pub fn new(inner: Box<dyn ImageGenerator>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

/// Copy of the request with the reference photo replaced by a size marker,
/// so cassettes do not embed the user's photo.
fn redacted(request: &ImageRequest) -> ImageRequest {
    let mut request = request.clone();
    if let Some(reference) = request.reference.as_mut() {
        *reference = InlineImage {
            data: format!("<{} base64 chars>", reference.data.len()),
            mime_type: reference.mime_type.clone(),
        };
    }
    request
}

impl ImageGenerator for RecordingImageGenerator {
    fn generate(&self, request: &ImageRequest) -> GenerateFuture<'_> {
        let request_clone = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.generate(&request_clone).await;
            record_result(
                &recorder,
                IMAGE_GENERATOR_PORT,
                GENERATE_METHOD,
                &redacted(&request_clone),
                &result,
            );
            result
        })
    }
}
