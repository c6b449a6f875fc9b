//! Replaying adapter for the `ImageGenerator` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::format::{GENERATE_METHOD, IMAGE_GENERATOR_PORT};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::ImageError;
use crate::ports::image_generator::{GenerateFuture, ImageGenerator, ImageRequest, ImageResponse};

/// Serves recorded image generation results from a cassette.
pub struct ReplayingImageGenerator {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingImageGenerator {
    /// Create a replaying generator backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl ImageGenerator for ReplayingImageGenerator {
    fn generate(&self, request: &ImageRequest) -> GenerateFuture<'_> {
        tracing::debug!(model = %request.model, "replaying generate");
        let output = next_output(&self.replayer, IMAGE_GENERATOR_PORT, GENERATE_METHOD);
        Box::pin(async move {
            output
                .and_then(replay_result::<ImageResponse>)
                .map_err(|e| ImageError::Api { status: 0, message: e.to_string() })
        })
    }
}
