//! Body stream driving.

use futures::{Stream, StreamExt};
use log::{debug, trace};
use url::Url;

use crate::error_handling::ExtractError;
use crate::extract::{MetaAccumulator, TagScanner};

/// Drains `body` through a fresh scanner into a fresh accumulator.
///
/// Events are applied in document order as each chunk arrives; the scanner is
/// flushed once the stream ends. `base` is the URL relative hrefs resolve
/// against. The first stream error aborts the run and discards partial state.
///
/// # Errors
///
/// Returns the stream's error converted into `ExtractError`.
pub async fn scan_stream<S, B, E>(body: S, base: Url) -> Result<MetaAccumulator, ExtractError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Into<ExtractError>,
{
    let mut body = std::pin::pin!(body);
    let mut scanner = TagScanner::new();
    let mut accumulator = MetaAccumulator::new(base);
    let mut bytes_read = 0usize;
    let mut events = 0usize;

    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(Into::into)?;
        let chunk = chunk.as_ref();
        bytes_read += chunk.len();
        trace!("Scanning {} byte chunk", chunk.len());
        for event in scanner.feed(chunk) {
            events += 1;
            accumulator.apply(event);
        }
    }
    for event in scanner.finish() {
        events += 1;
        accumulator.apply(event);
    }

    debug!(
        "Scanned {bytes_read} bytes: {events} events, {} tags recorded{}",
        accumulator.tag_count(),
        if scanner.aborted() { " (scan abandoned early)" } else { "" }
    );
    Ok(accumulator)
}
