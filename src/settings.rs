//! User-facing generation settings: aspect ratio, resolution, and quantity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Largest number of images a single run may request.
pub const MAX_COUNT: u32 = 4;

/// Output aspect ratios offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    /// Square post.
    #[default]
    #[serde(rename = "1:1")]
    Square,
    /// Portrait feed post.
    #[serde(rename = "4:5")]
    Portrait,
    /// Story / reel.
    #[serde(rename = "9:16")]
    Story,
    /// Widescreen.
    #[serde(rename = "16:9")]
    Landscape,
    /// Link preview card.
    #[serde(rename = "1.91:1")]
    LinkCard,
}

impl AspectRatio {
    /// All ratios in menu order.
    pub const ALL: [Self; 5] =
        [Self::Square, Self::Portrait, Self::Story, Self::Landscape, Self::LinkCard];

    /// The label shown to users and embedded in prompts.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Portrait => "4:5",
            Self::Story => "9:16",
            Self::Landscape => "16:9",
            Self::LinkCard => "1.91:1",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Output resolution tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Resolution {
    /// Standard definition.
    #[default]
    Standard,
    /// HD.
    #[serde(rename = "HD")]
    Hd,
    /// Full HD.
    #[serde(rename = "Full HD")]
    FullHd,
    /// 2K, pro tier.
    #[serde(rename = "2K")]
    TwoK,
    /// 4K, pro tier.
    #[serde(rename = "4K")]
    FourK,
}

impl Resolution {
    /// Whether this resolution needs the pro model.
    #[must_use]
    pub fn is_pro(self) -> bool {
        matches!(self, Self::TwoK | Self::FourK)
    }

    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Hd => "HD",
            Self::FullHd => "Full HD",
            Self::TwoK => "2K",
            Self::FourK => "4K",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The settings a batch of images is generated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Requested aspect ratio.
    pub aspect_ratio: AspectRatio,
    /// Requested resolution tier.
    pub resolution: Resolution,
    /// Number of images.
    pub count: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self { aspect_ratio: AspectRatio::default(), resolution: Resolution::default(), count: 1 }
    }
}

/// Parse an aspect ratio label.
///
/// # Errors
///
/// Returns an error if the label is not one of the offered ratios.
pub fn parse_aspect_ratio(ratio: &str) -> Result<AspectRatio, String> {
    AspectRatio::ALL.into_iter().find(|r| r.label() == ratio.trim()).ok_or_else(|| {
        let valid: Vec<&str> = AspectRatio::ALL.iter().map(|r| r.label()).collect();
        format!("Unsupported aspect ratio '{ratio}'. Valid: {}", valid.join(", "))
    })
}

/// Parse a resolution name, case-insensitively.
///
/// # Errors
///
/// Returns an error if the name is not recognized.
pub fn parse_resolution(resolution: &str) -> Result<Resolution, String> {
    match resolution.trim().to_ascii_lowercase().as_str() {
        "standard" => Ok(Resolution::Standard),
        "hd" => Ok(Resolution::Hd),
        "full-hd" | "fullhd" | "full hd" => Ok(Resolution::FullHd),
        "2k" => Ok(Resolution::TwoK),
        "4k" => Ok(Resolution::FourK),
        _ => Err(format!(
            "Unsupported resolution '{resolution}'. Valid: standard, hd, full-hd, 2k, 4k"
        )),
    }
}

/// Validate the number of images requested.
///
/// # Errors
///
/// Returns an error if the count is zero or above [`MAX_COUNT`].
pub fn validate_count(count: u32) -> Result<u32, String> {
    if (1..=MAX_COUNT).contains(&count) {
        Ok(count)
    } else {
        Err(format!("Unsupported count {count}. Valid: 1-{MAX_COUNT}"))
    }
}
