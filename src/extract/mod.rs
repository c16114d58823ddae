//! Streaming `<head>` metadata extraction.
//!
//! This module provides:
//! - URL resolution for relative hrefs (`resolve`)
//! - An incremental tag scanner over the body stream (`scanner`)
//! - The per-request accumulator that merges scanner events (`accumulator`)
//! - Assembly of the final output record (`assemble`)
//!
//! [`extract_from_html`] runs the whole chain over an in-memory document; the
//! networked variant lives in [`crate::pipeline`].

mod accumulator;
mod assemble;
mod resolve;
mod scanner;
mod types;

pub use accumulator::{link_tag_from_attributes, meta_tag_from_attributes, MetaAccumulator};
pub use assemble::build_result;
pub use resolve::{resolve_href, UnresolvableHref};
pub use scanner::{ScanEvent, TagAttributes, TagScanner};
pub use types::{
    Alternate, ExtractionOutcome, Icon, MetaExtractionResult, NonHtmlResponse, RawLinkTag,
    RawMetaTag, RequestFacts, ICON_RELS, NON_HTML_ERROR,
};

use url::Url;

/// Scans a complete HTML document and assembles its metadata.
///
/// `facts.final_url` (or `requested_url` when absent) is the base for
/// relative hrefs. Returns `None` if that base is not an absolute URL.
pub fn extract_from_html(facts: RequestFacts, html: &[u8]) -> Option<MetaExtractionResult> {
    let base = Url::parse(facts.final_url.as_deref().unwrap_or(&facts.requested_url)).ok()?;
    let mut scanner = TagScanner::new();
    let mut accumulator = MetaAccumulator::new(base);
    for event in scanner.feed(html) {
        accumulator.apply(event);
    }
    for event in scanner.finish() {
        accumulator.apply(event);
    }
    Some(build_result(facts, accumulator))
}

#[cfg(test)]
mod tests;
