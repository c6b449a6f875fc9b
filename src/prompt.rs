//! Prompt enhancement.

use crate::settings::AspectRatio;

/// Build the prompt sent to the model.
///
/// With a reference photo the user's text becomes the style of a photoshoot
/// of the pictured person; otherwise it is framed as a social media post.
/// The user's ratio label is used even when the API gets a substitute ratio.
#[must_use]
pub fn enhance_prompt(prompt: &str, ratio: AspectRatio, has_reference: bool) -> String {
    let prompt = prompt.trim();
    if has_reference {
        format!(
            "Professional photoshoot based on the provided person. Style: {prompt}. \
             Ensure realistic skin textures, cinematic lighting, and perfect framing for \
             {ratio} output."
        )
    } else {
        format!(
            "{prompt}. High resolution, professional composition for {ratio} social media \
             post, detailed textures, 8k quality."
        )
    }
}
