//! Per-probe signal types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// File type identified from the leading magic bytes of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileSignature {
    Jpeg,
    Png,
    Gif,
    Webp,
    Mp4,
    Webm,
    Unknown,
}

impl FileSignature {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileSignature::Jpeg => "jpeg",
            FileSignature::Png => "png",
            FileSignature::Gif => "gif",
            FileSignature::Webp => "webp",
            FileSignature::Mp4 => "mp4",
            FileSignature::Webm => "webm",
            FileSignature::Unknown => "unknown",
        }
    }

    /// MIME type implied by the signature, if known.
    pub fn mime(&self) -> Option<&'static str> {
        match self {
            FileSignature::Jpeg => Some("image/jpeg"),
            FileSignature::Png => Some("image/png"),
            FileSignature::Gif => Some("image/gif"),
            FileSignature::Webp => Some("image/webp"),
            FileSignature::Mp4 => Some("video/mp4"),
            FileSignature::Webm => Some("video/webm"),
            FileSignature::Unknown => None,
        }
    }
}

impl fmt::Display for FileSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a [`MetadataSignal`] got its values from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetadataSource {
    /// Read from the response headers of a header-only request
    ResponseHeaders,
    /// Request failed or was blocked; mime type guessed from the URL extension
    ExtensionFallback,
}

/// Declared size and type of the resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataSignal {
    pub declared_size: Option<u64>,
    pub declared_mime_type: Option<String>,
    pub mime_type_is_plausible: bool,
    pub size_is_implausible: bool,
    pub source: MetadataSource,
}

/// Evidence read from the first bytes of the resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderSignal {
    pub has_provenance_marker: bool,
    pub file_signature: FileSignature,
    /// Number of bytes the matcher actually examined
    pub bytes_examined: usize,
}

/// Result of evaluating the URL string alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlSignal {
    pub is_suspicious: bool,
    pub is_uncertain: bool,
    /// Empty when the URL has no parseable host
    pub hostname: String,
}
