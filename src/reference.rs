//! Loading a reference photo for photoshoot-style generation.

use std::path::Path;

use base64::Engine;

use crate::error::ImageError;
use crate::ports::InlineImage;

/// Read an image file and encode it for inline upload.
///
/// The MIME type is sniffed from the bytes, falling back to the extension.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a recognized image.
pub fn load_reference(path: &Path) -> Result<InlineImage, ImageError> {
    let bytes = std::fs::read(path).map_err(|e| {
        ImageError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read reference photo {}: {e}", path.display()),
        ))
    })?;
    let mime_type = detect_mime(&bytes, path).ok_or_else(|| {
        ImageError::InvalidArgument(format!(
            "Reference photo {} is not a supported image",
            path.display()
        ))
    })?;
    tracing::debug!(path = %path.display(), %mime_type, bytes = bytes.len(), "loaded reference photo");
    Ok(InlineImage { data: base64::engine::general_purpose::STANDARD.encode(&bytes), mime_type })
}

/// Work out an image MIME type from content, then from the file extension.
fn detect_mime(bytes: &[u8], path: &Path) -> Option<String> {
    if let Ok(format) = image::guess_format(bytes) {
        return Some(format.to_mime_type().to_string());
    }
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        _ => return None,
    };
    Some(mime.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn sniffs_png_regardless_of_extension() {
        let mime = detect_mime(&PNG_MAGIC, Path::new("photo.dat"));
        assert_eq!(mime.as_deref(), Some("image/png"));
    }

    #[test]
    fn falls_back_to_extension() {
        let mime = detect_mime(b"not sniffable", Path::new("selfie.HEIC"));
        assert_eq!(mime.as_deref(), Some("image/heic"));
    }

    #[test]
    fn unknown_content_and_extension() {
        assert!(detect_mime(b"hello", Path::new("notes.txt")).is_none());
    }

    #[test]
    fn load_encodes_base64() {
        let dir = std::env::temp_dir().join("lumina_reference_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("me.png");
        std::fs::write(&path, PNG_MAGIC).unwrap();

        let reference = load_reference(&path).unwrap();
        assert_eq!(reference.mime_type, "image/png");
        assert_eq!(reference.data, "iVBORw0KGgo=");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_missing_file_fails() {
        assert!(matches!(
            load_reference(Path::new("/nonexistent/me.png")),
            Err(ImageError::Io(_))
        ));
    }

    #[test]
    fn load_non_image_fails() {
        let dir = std::env::temp_dir().join("lumina_reference_bad_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("notes.txt");
        std::fs::write(&path, "just text").unwrap();

        assert!(matches!(load_reference(&path), Err(ImageError::InvalidArgument(_))));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
