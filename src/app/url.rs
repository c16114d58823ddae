//! Target URL validation.

use log::debug;
use url::Url;

use crate::config::MAX_URL_LENGTH;
use crate::error_handling::UrlValidationError;

/// Validates the `url` query parameter of a `/meta` request.
///
/// Unlike bulk input handling, no scheme is guessed: the value must already be
/// an absolute `http`/`https` URL. Rejects values longer than `MAX_URL_LENGTH`
/// before parsing.
///
/// # Arguments
///
/// * `raw` - The raw parameter value, `None` if it was not supplied
///
/// # Returns
///
/// The parsed (and therefore normalized) URL, or the reason it was rejected.
pub fn validate_target_url(raw: Option<&str>) -> Result<Url, UrlValidationError> {
    let raw = match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => return Err(UrlValidationError::Missing),
    };

    if raw.len() > MAX_URL_LENGTH {
        debug!(
            "Rejecting URL exceeding maximum length ({} > {}): {}...",
            raw.len(),
            MAX_URL_LENGTH,
            raw.chars().take(50).collect::<String>()
        );
        return Err(UrlValidationError::TooLong);
    }

    let parsed = match Url::parse(raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!("Rejecting invalid URL {raw}: {e}");
            return Err(UrlValidationError::Invalid);
        }
    };

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => {
            debug!("Rejecting unsupported scheme {scheme} for URL: {raw}");
            Err(UrlValidationError::UnsupportedScheme)
        }
    }
}
