//! Fetch and content-type dispatch.

use log::{debug, info, warn};
use reqwest::header::CONTENT_TYPE;
use url::Url;

use super::stream::scan_stream;
use crate::config::{HEADER_META_PROXY_REQUEST, HTML_CONTENT_TYPE, META_PROXY_REQUEST_VALUE};
use crate::error_handling::ExtractError;
use crate::extract::{build_result, ExtractionOutcome, NonHtmlResponse, RequestFacts};

/// Fetches `target` and extracts its `<head>` metadata.
///
/// The outbound request carries the recursion sentinel header. Redirects are
/// followed by `client`; relative hrefs resolve against the final URL. A
/// response whose content-type is missing or not HTML short-circuits to
/// [`ExtractionOutcome::NonHtml`] without scanning the body.
///
/// # Errors
///
/// Returns `ExtractError::UnsupportedScheme` for anything but `http`/`https`,
/// and `ExtractError::Fetch` when the request fails or the body stream breaks.
pub async fn extract_page_meta(
    client: &reqwest::Client,
    target: &Url,
) -> Result<ExtractionOutcome, ExtractError> {
    if !matches!(target.scheme(), "http" | "https") {
        return Err(ExtractError::UnsupportedScheme(target.scheme().to_string()));
    }

    let result = fetch_and_extract(client, target).await;
    if let Err(e) = &result {
        warn!("Extraction for {target} failed: {e}");
    }
    result
}

async fn fetch_and_extract(
    client: &reqwest::Client,
    target: &Url,
) -> Result<ExtractionOutcome, ExtractError> {
    debug!("Fetching {target}");
    let response = client
        .get(target.clone())
        .header(HEADER_META_PROXY_REQUEST, META_PROXY_REQUEST_VALUE)
        .send()
        .await?;

    let final_url = response.url().clone();
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    if final_url != *target {
        debug!("Followed redirects from {target} to {final_url}");
    }

    let facts = RequestFacts {
        requested_url: target.to_string(),
        final_url: Some(final_url.to_string()),
        status,
        content_type,
    };

    if !is_html_content_type(facts.content_type.as_deref()) {
        info!(
            "Skipping non-HTML response from {final_url} (content-type: {})",
            facts.content_type.as_deref().unwrap_or("<missing>")
        );
        return Ok(ExtractionOutcome::NonHtml(NonHtmlResponse::new(facts)));
    }

    let accumulator = scan_stream(response.bytes_stream(), final_url).await?;
    if accumulator.unresolved_hrefs() > 0 {
        debug!(
            "{} href(s) on {target} could not be resolved and were omitted",
            accumulator.unresolved_hrefs()
        );
    }
    Ok(ExtractionOutcome::Extracted(Box::new(build_result(
        facts,
        accumulator,
    ))))
}

/// Returns true if a content-type header value denotes an HTML document.
///
/// Case-insensitive substring match on `text/html`, so parameters such as
/// `; charset=utf-8` are accepted.
pub fn is_html_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(|value| value.to_ascii_lowercase().contains(HTML_CONTENT_TYPE))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_html_content_type() {
        assert!(is_html_content_type(Some("text/html")));
        assert!(is_html_content_type(Some("text/html; charset=utf-8")));
        assert!(is_html_content_type(Some("TEXT/HTML")));
        assert!(!is_html_content_type(Some("application/json")));
        assert!(!is_html_content_type(Some("application/xhtml+xml")));
        assert!(!is_html_content_type(Some("")));
        assert!(!is_html_content_type(None));
    }

    #[tokio::test]
    async fn test_unsupported_scheme_is_rejected_before_fetch() {
        let client = reqwest::Client::new();
        let target = Url::parse("ftp://example.com/file").unwrap();
        let result = extract_page_meta(&client, &target).await;
        assert!(matches!(
            result,
            Err(ExtractError::UnsupportedScheme(scheme)) if scheme == "ftp"
        ));
    }
}
