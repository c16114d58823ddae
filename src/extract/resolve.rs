//! Relative href resolution.

use thiserror::Error;
use url::Url;

/// The href could not be turned into an absolute URL.
///
/// Callers treat this as "omit the field or entry", never as a request failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unresolvable href {href:?}: {reason}")]
pub struct UnresolvableHref {
    pub href: String,
    pub reason: url::ParseError,
}

/// Resolves `href` against `base` using standard URL reference resolution.
///
/// Handles absolute, scheme-relative (`//host/x`), root-relative (`/x`) and
/// path-relative (`x`, `../x`) references. Surrounding ASCII whitespace is
/// stripped by the URL parser.
pub fn resolve_href(href: &str, base: &Url) -> Result<Url, UnresolvableHref> {
    base.join(href).map_err(|reason| UnresolvableHref {
        href: href.to_string(),
        reason,
    })
}
