//! HTTP header name and value constants.

/// Sentinel header attached to every outbound fetch.
///
/// Inbound `/meta` requests that carry it are rejected, which stops the
/// service from fetching its own endpoint in a loop. Header names compare
/// case-insensitively; the lowercase form is what `http` stores.
pub const HEADER_META_PROXY_REQUEST: &str = "x-meta-proxy-request";

/// Value sent with [`HEADER_META_PROXY_REQUEST`].
pub const META_PROXY_REQUEST_VALUE: &str = "1";

/// Media type that selects the streaming extraction path (case-insensitive substring match).
pub const HTML_CONTENT_TYPE: &str = "text/html";

/// `Cache-Control` value for failed lookups.
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";
