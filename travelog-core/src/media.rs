//! Media references: classification by extension and URL resolution.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::AsRefStr;

const IMAGE_EXTS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "avif"];
const VIDEO_EXTS: &[&str] = &["mp4", "webm", "ogg", "mov", "m4v"];

/// What a media URL renders as. `Unsupported` files are skipped silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Unsupported,
}

/// Classifies a media URL by its filename extension, case-insensitively.
pub fn classify(url: &str) -> MediaKind {
    let file_name = url.rsplit('/').next().unwrap_or(url);
    let Some((_, ext)) = file_name.rsplit_once('.') else {
        return MediaKind::Unsupported;
    };
    let ext = ext.to_ascii_lowercase();
    if IMAGE_EXTS.contains(&ext.as_str()) {
        MediaKind::Image
    } else if VIDEO_EXTS.contains(&ext.as_str()) {
        MediaKind::Video
    } else {
        MediaKind::Unsupported
    }
}

/// Resolves a storage-relative path against the storage base URL.
///
/// Already-absolute URLs pass through unchanged; otherwise the base is
/// prepended with exactly one separator between the two halves.
pub fn resolve_url(base: &str, url: &str) -> String {
    if url.starts_with("http") {
        return url.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        url.trim_start_matches('/')
    )
}

/// A stored file attached to an entry, as the API returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub url: String,
}

impl MediaRef {
    pub fn kind(&self) -> MediaKind {
        classify(&self.url)
    }
}

/// A local file staged for a multipart upload.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl MediaUpload {
    /// Reads a file from disk, keeping only its final path component as the
    /// uploaded filename.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { file_name, bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_images_and_videos() {
        assert_eq!(classify("/uploads/beach.png"), MediaKind::Image);
        assert_eq!(classify("/uploads/clip.webm"), MediaKind::Video);
        assert_eq!(classify("https://cdn.example.com/a/b/pic.avif"), MediaKind::Image);
        assert_eq!(classify("trip.mov"), MediaKind::Video);
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(classify("IMG.JPG"), MediaKind::Image);
        assert_eq!(classify("/uploads/VIDEO.Mp4"), MediaKind::Video);
    }

    #[test]
    fn unknown_extensions_are_unsupported() {
        assert_eq!(classify("/uploads/notes.pdf"), MediaKind::Unsupported);
        assert_eq!(classify("/uploads/no-extension"), MediaKind::Unsupported);
        assert_eq!(classify(""), MediaKind::Unsupported);
    }

    #[test]
    fn absolute_urls_pass_through() {
        let url = "https://cdn.example.com/uploads/pic.png";
        assert_eq!(resolve_url("http://localhost:5000", url), url);
    }

    #[test]
    fn relative_paths_get_exactly_one_separator() {
        let expected = "http://localhost:5000/uploads/pic.png";
        assert_eq!(resolve_url("http://localhost:5000", "/uploads/pic.png"), expected);
        assert_eq!(resolve_url("http://localhost:5000", "uploads/pic.png"), expected);
        assert_eq!(resolve_url("http://localhost:5000/", "/uploads/pic.png"), expected);
    }
}
