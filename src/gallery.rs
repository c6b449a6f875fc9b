//! The gallery: saved images plus a JSON manifest, newest first.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ImageError;
use crate::output::save_image;
use crate::params::format_extension;
use crate::ports::image_generator::GeneratedImage;
use crate::settings::GenerationSettings;

/// Manifest file name inside the gallery directory.
pub const MANIFEST_FILE: &str = "gallery.json";

const ID_LEN: usize = 9;
const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// One saved image and how it was made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    /// Short random identifier.
    pub id: String,
    /// File name relative to the gallery directory.
    pub file: String,
    /// The prompt as typed by the user.
    pub prompt: String,
    /// When the batch was generated.
    pub timestamp: DateTime<Utc>,
    /// Settings the batch was generated with.
    pub settings: GenerationSettings,
}

/// All saved images, newest first.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Gallery {
    /// Entries, newest first.
    #[serde(default)]
    pub images: Vec<GalleryImage>,
}

impl Gallery {
    /// Load the manifest from a gallery directory. A missing manifest is an
    /// empty gallery.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest exists but cannot be read or parsed.
    pub fn load(dir: &Path) -> Result<Self, ImageError> {
        let path = dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path)?;
        serde_json::from_str(&contents).map_err(|e| {
            ImageError::Config(format!("Failed to parse gallery {}: {e}", path.display()))
        })
    }

    /// Write the manifest into the gallery directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be written.
    pub fn save(&self, dir: &Path) -> Result<(), ImageError> {
        std::fs::create_dir_all(dir)?;
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImageError::Config(format!("Failed to encode gallery: {e}")))?;
        std::fs::write(dir.join(MANIFEST_FILE), json)?;
        Ok(())
    }

    /// Put a new batch in front of the existing entries, keeping batch order.
    pub fn prepend(&mut self, batch: Vec<GalleryImage>) {
        let older = std::mem::replace(&mut self.images, batch);
        self.images.extend(older);
    }
}

/// Derive a 9-character base-36 id from a seed.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn new_image_id(seed: u128) -> String {
    // splitmix64 finalizer spreads nearby seeds across the id space.
    let mut x = (seed as u64) ^ ((seed >> 64) as u64);
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^= x >> 31;

    let mut id = [b'0'; ID_LEN];
    for slot in id.iter_mut().rev() {
        *slot = ID_ALPHABET[(x % 36) as usize];
        x /= 36;
    }
    id.iter().map(|&b| char::from(b)).collect()
}

/// File name an image is downloaded under.
#[must_use]
pub fn download_file_name(id: &str, format: &str) -> String {
    format!("lumina-ai-{id}.{}", format_extension(format))
}

/// Save a batch of generated images into `dir` and describe them as
/// gallery entries, in generation order.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or an image cannot
/// be saved.
pub fn save_batch(
    dir: &Path,
    images: &[GeneratedImage],
    prompt: &str,
    settings: &GenerationSettings,
    format: &str,
    now: DateTime<Utc>,
) -> Result<Vec<GalleryImage>, ImageError> {
    std::fs::create_dir_all(dir)?;
    let seed_base = now.timestamp_nanos_opt().map_or(0, i128::from);

    let mut entries = Vec::with_capacity(images.len());
    for (i, image) in (0_i128..).zip(images) {
        #[allow(clippy::cast_sign_loss)]
        let id = new_image_id((seed_base + i) as u128);
        let file = download_file_name(&id, format);
        save_image(&image.data, &image.mime_type, format, &dir.join(&file))?;
        entries.push(GalleryImage {
            id,
            file,
            prompt: prompt.to_string(),
            timestamp: now,
            settings: *settings,
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{AspectRatio, Resolution};

    fn entry(id: &str) -> GalleryImage {
        GalleryImage {
            id: id.into(),
            file: download_file_name(id, "png"),
            prompt: "a fox".into(),
            timestamp: "2026-02-01T00:00:00Z".parse().unwrap(),
            settings: GenerationSettings::default(),
        }
    }

    #[test]
    fn ids_are_nine_base36_chars() {
        for seed in [0_u128, 1, 42, u128::MAX, 1_767_225_600_000_000_000] {
            let id = new_image_id(seed);
            assert_eq!(id.len(), 9);
            assert!(id.bytes().all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()));
        }
    }

    #[test]
    fn adjacent_seeds_give_distinct_ids() {
        let ids: std::collections::HashSet<String> = (0..100).map(new_image_id).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn download_names() {
        assert_eq!(download_file_name("abc123xyz", "png"), "lumina-ai-abc123xyz.png");
        assert_eq!(download_file_name("abc123xyz", "jpeg"), "lumina-ai-abc123xyz.jpg");
    }

    #[test]
    fn prepend_keeps_batch_order_before_older_entries() {
        let mut gallery = Gallery { images: vec![entry("old")] };
        gallery.prepend(vec![entry("new1"), entry("new2")]);
        let ids: Vec<&str> = gallery.images.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["new1", "new2", "old"]);
    }

    #[test]
    fn missing_manifest_is_empty() {
        let gallery = Gallery::load(Path::new("/nonexistent/gallery")).unwrap();
        assert!(gallery.images.is_empty());
    }

    #[test]
    fn manifest_round_trip() {
        let dir = std::env::temp_dir().join("lumina_gallery_manifest_test");
        let _ = std::fs::remove_dir_all(&dir);

        let mut gallery = Gallery::default();
        gallery.prepend(vec![entry("aaa")]);
        gallery.save(&dir).unwrap();

        let loaded = Gallery::load(&dir).unwrap();
        assert_eq!(loaded.images, gallery.images);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_manifest_is_config_error() {
        let dir = std::env::temp_dir().join("lumina_gallery_corrupt_test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(MANIFEST_FILE), "{ nope").unwrap();

        assert!(matches!(Gallery::load(&dir), Err(ImageError::Config(_))));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn save_batch_writes_files() {
        let dir = std::env::temp_dir().join("lumina_gallery_batch_test");
        let _ = std::fs::remove_dir_all(&dir);

        let images = vec![
            GeneratedImage { data: vec![1, 2, 3], mime_type: "image/png".into() },
            GeneratedImage { data: vec![4, 5, 6], mime_type: "image/png".into() },
        ];
        let settings = GenerationSettings {
            aspect_ratio: AspectRatio::Story,
            resolution: Resolution::Hd,
            count: 2,
        };
        let now: DateTime<Utc> = "2026-02-01T12:00:00Z".parse().unwrap();

        let entries = save_batch(&dir, &images, "neon city", &settings, "png", now).unwrap();
        assert_eq!(entries.len(), 2);
        assert_ne!(entries[0].id, entries[1].id);
        for (entry, image) in entries.iter().zip(&images) {
            assert!(entry.file.starts_with("lumina-ai-"));
            assert_eq!(std::fs::read(dir.join(&entry.file)).unwrap(), image.data);
            assert_eq!(entry.prompt, "neon city");
            assert_eq!(entry.timestamp, now);
            assert_eq!(entry.settings, settings);
        }

        let _ = std::fs::remove_dir_all(&dir);
    }
}
