//! URL heuristics for resources whose bytes have not been seen.
//!
//! Pure and synchronous: no I/O, never fails. A URL without a parseable
//! host still produces a signal, with an empty hostname.

use crate::core::scan::UrlSignal;
use aho_corasick::{AhoCorasick, AhoCorasickBuilder};
use once_cell::sync::Lazy;
use tracing::debug;
use url::Url;

/// Substrings associated with throwaway, generated or shortened content.
pub const SUSPICIOUS_PATTERNS: &[&str] = &[
    "temp",
    "tmp",
    "ai-generated",
    "generated",
    "midjourney",
    "dall-e",
    "dalle",
    "stable-diffusion",
    "stablediffusion",
    "deepfake",
    "faceswap",
    "bit.ly",
    "tinyurl.com",
    "goo.gl",
    "ow.ly",
    "is.gd",
];

/// Stock-photo, placeholder and generic CDN hosts.
pub const UNCERTAIN_PATTERNS: &[&str] = &[
    "unsplash",
    "pexels",
    "pixabay",
    "shutterstock",
    "istockphoto",
    "gettyimages",
    "placeholder",
    "placehold",
    "picsum",
    "lorempixel",
    "cloudfront.net",
    "imgur",
];

fn build_matcher(patterns: &[&str]) -> AhoCorasick {
    AhoCorasickBuilder::new()
        .ascii_case_insensitive(true)
        .build(patterns)
        .expect("valid url pattern set")
}

static SUSPICIOUS: Lazy<AhoCorasick> = Lazy::new(|| build_matcher(SUSPICIOUS_PATTERNS));
static UNCERTAIN: Lazy<AhoCorasick> = Lazy::new(|| build_matcher(UNCERTAIN_PATTERNS));

/// Lower-cased hostname, or an empty string if the URL has none.
pub fn extract_hostname(url: &str) -> String {
    match Url::parse(url.trim()) {
        Ok(parsed) => parsed
            .host_str()
            .map(|h| h.to_ascii_lowercase())
            .unwrap_or_default(),
        Err(e) => {
            debug!("Hostname extraction failed for {:?}: {}", url, e);
            String::new()
        }
    }
}

/// Classify a URL string against the fixed pattern lists.
pub fn classify_url(url: &str) -> UrlSignal {
    let lowered = url.to_lowercase();
    let hostname = extract_hostname(url);

    let hit = |m: &AhoCorasick| m.is_match(&lowered) || m.is_match(&hostname);
    let is_suspicious = hit(&*SUSPICIOUS);
    let is_uncertain = hit(&*UNCERTAIN);

    debug!(
        %hostname,
        is_suspicious,
        is_uncertain,
        "URL heuristics evaluated"
    );

    UrlSignal {
        is_suspicious,
        is_uncertain,
        hostname,
    }
}
