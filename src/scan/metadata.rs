//! Metadata probe: declared size and type from a header-only request.
//!
//! A failed or blocked request does not fail the probe. It degrades to a
//! mime type inferred from the URL extension with no size evidence. Only
//! the deadline can turn this probe into a failed outcome.

use crate::core::scan::{MetadataSignal, MetadataSource};
use crate::error::Result;
use crate::scan::config::ScoringConfig;
use crate::scan::fetch::{MediaFetcher, ResponseHead};
use crate::scan::sniffers::{is_media_mime, mime_from_url};
use tracing::{debug, warn};

/// Derive a signal from the response headers.
pub fn signal_from_head(head: &ResponseHead, scoring: &ScoringConfig) -> MetadataSignal {
    let mime_type_is_plausible = head
        .content_type
        .as_deref()
        .map(is_media_mime)
        .unwrap_or(false);
    let size_is_implausible = head
        .content_length
        .map(|size| scoring.size_is_implausible(size))
        .unwrap_or(false);

    MetadataSignal {
        declared_size: head.content_length,
        declared_mime_type: head.content_type.clone(),
        mime_type_is_plausible,
        size_is_implausible,
        source: MetadataSource::ResponseHeaders,
    }
}

/// Degraded signal used when the header-only request cannot be read.
pub fn fallback_signal(url: &str) -> MetadataSignal {
    let inferred = mime_from_url(url);
    MetadataSignal {
        declared_size: None,
        mime_type_is_plausible: inferred.as_deref().map(is_media_mime).unwrap_or(false),
        declared_mime_type: inferred,
        size_is_implausible: false,
        source: MetadataSource::ExtensionFallback,
    }
}

/// Run the metadata probe. Always resolves `Ok`; fetch errors degrade.
pub async fn probe_metadata<F: MediaFetcher>(
    fetcher: &F,
    url: &str,
    scoring: &ScoringConfig,
) -> Result<MetadataSignal> {
    match fetcher.head(url).await {
        Ok(head) => {
            let signal = signal_from_head(&head, scoring);
            debug!(
                declared_size = ?signal.declared_size,
                mime = ?signal.declared_mime_type,
                plausible_mime = signal.mime_type_is_plausible,
                implausible_size = signal.size_is_implausible,
                "Metadata probe fulfilled"
            );
            Ok(signal)
        }
        Err(e) => {
            let signal = fallback_signal(url);
            warn!(
                error = %e,
                inferred_mime = ?signal.declared_mime_type,
                "Metadata request failed; using extension fallback"
            );
            Ok(signal)
        }
    }
}
