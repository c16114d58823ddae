//! Configuration constants.
//!
//! This module defines the limits and defaults used throughout the application.

/// Default address the HTTP server binds to.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";

/// Default outbound request timeout in seconds.
///
/// Applied by the HTTP client only; the extraction pipeline itself never times out.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Default maximum number of redirect hops the HTTP client follows.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Default `max-age` (seconds) for successful `/meta` responses.
pub const DEFAULT_CACHE_MAX_AGE_SECS: u64 = 300;

/// Default User-Agent string for outbound fetches.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; page_meta_proxy/",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// Maximum URL length accepted in the `url` query parameter (2048 characters).
/// This matches common browser and server limits.
pub const MAX_URL_LENGTH: usize = 2048;

// Scanner limits
/// Memory the HTML rewriter may use for buffered input (256KB).
/// A single token that needs more than this, such as an attribute value whose
/// quote never closes, abandons the scan.
pub const MAX_SCANNER_MEMORY: usize = 256 * 1024;

/// Maximum raw `<title>` text kept per element (64KB). Text past this is dropped.
pub const MAX_TITLE_BYTES: usize = 64 * 1024;
