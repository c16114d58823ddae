//! Metadata extraction handler.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use log::{debug, warn};
use serde::Deserialize;

use super::super::types::{AppState, ErrorBody};
use crate::app::validate_target_url;
use crate::config::{CACHE_CONTROL_NO_STORE, HEADER_META_PROXY_REQUEST};
use crate::error_handling::{ExtractError, OutcomeType, UrlValidationError};
use crate::pipeline::extract_page_meta;

const RECURSIVE_REQUEST_ERROR: &str = "recursive request detected";

/// Query string of `/meta`.
#[derive(Debug, Deserialize)]
pub struct MetaQuery {
    pub url: Option<String>,
}

/// Fetches `?url=` and returns its metadata.
///
/// - `508` if the request carries the recursion sentinel header
/// - `400` if the url is missing, invalid or not `http`/`https`
/// - `200` with the extraction record (or non-HTML notice) on success
/// - `502` if the page could not be fetched
pub async fn meta_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<MetaQuery>,
) -> Response {
    if headers.contains_key(HEADER_META_PROXY_REQUEST) {
        warn!(
            "Rejecting recursive request for {}",
            query.url.as_deref().unwrap_or("<missing>")
        );
        state.stats.increment(OutcomeType::RecursiveRequest);
        return error_response(
            StatusCode::LOOP_DETECTED,
            ErrorBody::new(RECURSIVE_REQUEST_ERROR),
        );
    }

    let target = match validate_target_url(query.url.as_deref()) {
        Ok(target) => target,
        Err(e) => {
            debug!("Rejecting /meta request: {e}");
            state.stats.increment(OutcomeType::from(&e));
            let body = match e {
                UrlValidationError::UnsupportedScheme => ErrorBody::new(e.to_string()),
                _ => ErrorBody::validation(e.to_string()),
            };
            return error_response(StatusCode::BAD_REQUEST, body);
        }
    };

    match extract_page_meta(&state.client, &target).await {
        Ok(outcome) => {
            state.stats.increment(if outcome.is_non_html() {
                OutcomeType::NonHtml
            } else {
                OutcomeType::Extracted
            });
            (
                StatusCode::OK,
                [(header::CACHE_CONTROL, state.cache_control())],
                Json(outcome),
            )
                .into_response()
        }
        Err(ExtractError::UnsupportedScheme(scheme)) => {
            debug!("Rejecting unsupported scheme {scheme}");
            state.stats.increment(OutcomeType::UnsupportedProtocol);
            error_response(
                StatusCode::BAD_REQUEST,
                ErrorBody::new(UrlValidationError::UnsupportedScheme.to_string()),
            )
        }
        Err(e) => {
            state.stats.increment(OutcomeType::FetchFailed);
            error_response(StatusCode::BAD_GATEWAY, ErrorBody::new(e.to_string()))
        }
    }
}

fn error_response(status: StatusCode, body: ErrorBody) -> Response {
    (
        status,
        [(header::CACHE_CONTROL, CACHE_CONTROL_NO_STORE)],
        Json(body),
    )
        .into_response()
}
