//! Header probe: file signature and provenance markers from the first bytes.

use crate::core::scan::HeaderSignal;
use crate::error::Result;
use crate::scan::fetch::MediaFetcher;
use crate::scan::signatures::{detect_signature, has_provenance_marker, MAX_SCAN_BYTES};
use tracing::debug;

/// Run the byte pattern matcher over a leading buffer.
pub fn analyze_prefix(data: &[u8]) -> HeaderSignal {
    let data = &data[..data.len().min(MAX_SCAN_BYTES)];
    HeaderSignal {
        has_provenance_marker: has_provenance_marker(data),
        file_signature: detect_signature(data),
        bytes_examined: data.len(),
    }
}

/// Fetch the leading bytes of `url` and analyze them.
///
/// Fetch errors are returned as-is; the caller's guard settles them.
pub async fn probe_headers<F: MediaFetcher>(
    fetcher: &F,
    url: &str,
    range_bytes: usize,
) -> Result<HeaderSignal> {
    let len = range_bytes.min(MAX_SCAN_BYTES);
    let data = fetcher.fetch_range(url, len).await?;
    let signal = analyze_prefix(&data);
    debug!(
        bytes = signal.bytes_examined,
        signature = %signal.file_signature,
        provenance = signal.has_provenance_marker,
        "Header probe fulfilled"
    );
    Ok(signal)
}
