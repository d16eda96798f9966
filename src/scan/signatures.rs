//! Media signatures, provenance markers and the byte pattern matcher.
//!
//! Consolidates the magic numbers and marker sequences used by the
//! header probe. All tables are immutable static data.

use crate::core::scan::FileSignature;

/// Number of leading bytes compared against the magic table.
pub const SIGNATURE_PREFIX_LEN: usize = 8;

/// Upper bound on the buffer handed to the matcher.
pub const MAX_SCAN_BYTES: usize = 8192;

/// Hex-encoded magic prefixes, checked in order against the first 8 bytes.
pub const MAGIC_PREFIXES: &[(&str, FileSignature)] = &[
    ("ffd8ff", FileSignature::Jpeg),
    ("89504e47", FileSignature::Png),
    ("47494638", FileSignature::Gif),
    ("52494646", FileSignature::Webp),
];

/// ISO base media `ftyp` box; may appear anywhere in the first 8 bytes.
pub const MP4_FTYP_HEX: &str = "66747970";

/// EBML header used by WebM/Matroska.
pub const WEBM_MAGIC_HEX: &str = "1a45dfa3";

/// Byte sequences indicating embedded content-provenance data.
pub const PROVENANCE_MARKERS: &[&[u8]] = &[
    // JPEG APP11 segment, which carries JUMBF boxes
    &[0xFF, 0xEB],
    b"C2PA",
    b"c2pa",
];

/// Naive sub-sequence search. Buffers are capped at [`MAX_SCAN_BYTES`].
pub fn contains_pattern(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    if needle.len() > haystack.len() {
        return false;
    }
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// True if any known provenance marker occurs in the buffer.
pub fn has_provenance_marker(data: &[u8]) -> bool {
    let data = &data[..data.len().min(MAX_SCAN_BYTES)];
    PROVENANCE_MARKERS
        .iter()
        .any(|marker| contains_pattern(data, marker))
}

/// Identify the file type from the first 8 bytes.
///
/// Buffers shorter than 8 bytes are always [`FileSignature::Unknown`].
pub fn detect_signature(data: &[u8]) -> FileSignature {
    if data.len() < SIGNATURE_PREFIX_LEN {
        return FileSignature::Unknown;
    }
    let prefix = hex::encode(&data[..SIGNATURE_PREFIX_LEN]);

    for &(magic, signature) in MAGIC_PREFIXES {
        if prefix.starts_with(magic) {
            return signature;
        }
    }
    if prefix.contains(MP4_FTYP_HEX) {
        return FileSignature::Mp4;
    }
    if prefix.starts_with(WEBM_MAGIC_HEX) {
        return FileSignature::Webm;
    }
    FileSignature::Unknown
}
