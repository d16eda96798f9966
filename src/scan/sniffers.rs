//! Extension-based mime sniffing for URLs.
//!
//! Uses a fixed table for common media extensions and falls back to
//! `mime_guess`, keeping only image and video guesses.

use tracing::debug;
use url::Url;

/// Media extensions and their mime types.
pub const EXTENSION_MIME_TABLE: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("svg", "image/svg+xml"),
    ("avif", "image/avif"),
    ("heic", "image/heic"),
    ("mp4", "video/mp4"),
    ("m4v", "video/mp4"),
    ("webm", "video/webm"),
    ("mov", "video/quicktime"),
    ("avi", "video/x-msvideo"),
    ("mkv", "video/x-matroska"),
    ("ogv", "video/ogg"),
];

/// True for mime types this engine treats as media. Case and leading
/// whitespace are ignored, unlike a plain prefix check.
pub fn is_media_mime(mime: &str) -> bool {
    let m = mime.trim_start().to_ascii_lowercase();
    m.starts_with("image/") || m.starts_with("video/")
}

/// Extension of the last path segment, ignoring query and fragment.
pub fn url_extension(url: &str) -> Option<String> {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        // Relative or malformed input: strip query/fragment by hand
        Err(_) => url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };
    let segment = path.rsplit('/').next()?;
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Best-effort mime type for a URL based on its file extension.
pub fn mime_from_url(url: &str) -> Option<String> {
    let ext = url_extension(url)?;

    if let Some((_, mime)) = EXTENSION_MIME_TABLE.iter().find(|(e, _)| *e == ext) {
        return Some((*mime).to_string());
    }

    let guess = mime_guess::from_ext(&ext).first()?.to_string();
    if is_media_mime(&guess) {
        debug!("Extension '{}' guessed as {}", ext, guess);
        Some(guess)
    } else {
        None
    }
}
