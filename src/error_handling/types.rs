//! Error type definitions.
//!
//! This module defines the error enums used throughout the application and
//! the request outcome categories counted by [`super::RequestStats`].

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Rejections of the `url` query parameter, raised before any fetch happens.
///
/// The display strings are the `error` values returned to API clients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("missing url parameter")]
    Missing,

    #[error("url too long")]
    TooLong,

    #[error("invalid url")]
    Invalid,

    #[error("unsupported protocol")]
    UnsupportedScheme,
}

/// Fatal failures of one extraction pipeline run.
///
/// Malformed markup and unresolvable hrefs never produce these; only
/// precondition and transport problems do.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The target URL is not `http`/`https`.
    #[error("unsupported protocol: {0}")]
    UnsupportedScheme(String),

    /// The request could not be sent, or the response failed mid-stream.
    #[error("fetch failed: {0}")]
    Fetch(#[from] ReqwestError),

    /// A non-reqwest body stream reported an error.
    #[error("body stream failed: {0}")]
    Body(String),
}

/// Outcome categories of `/meta` requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum OutcomeType {
    // Successful outcomes
    Extracted,
    NonHtml,
    // Rejected before fetching
    MissingUrl,
    InvalidUrl,
    UnsupportedProtocol,
    RecursiveRequest,
    // Transport
    FetchFailed,
}

impl std::fmt::Display for OutcomeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl OutcomeType {
    /// Stable snake_case key used in the `/status` payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeType::Extracted => "extracted",
            OutcomeType::NonHtml => "non_html",
            OutcomeType::MissingUrl => "missing_url",
            OutcomeType::InvalidUrl => "invalid_url",
            OutcomeType::UnsupportedProtocol => "unsupported_protocol",
            OutcomeType::RecursiveRequest => "recursive_request",
            OutcomeType::FetchFailed => "fetch_failed",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OutcomeType::Extracted | OutcomeType::NonHtml)
    }
}

impl From<&UrlValidationError> for OutcomeType {
    fn from(error: &UrlValidationError) -> Self {
        match error {
            UrlValidationError::Missing => OutcomeType::MissingUrl,
            UrlValidationError::TooLong | UrlValidationError::Invalid => OutcomeType::InvalidUrl,
            UrlValidationError::UnsupportedScheme => OutcomeType::UnsupportedProtocol,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(UrlValidationError::Missing.to_string(), "missing url parameter");
        assert_eq!(UrlValidationError::Invalid.to_string(), "invalid url");
        assert_eq!(
            UrlValidationError::UnsupportedScheme.to_string(),
            "unsupported protocol"
        );
    }

    #[test]
    fn test_outcome_keys_are_unique() {
        let keys: HashSet<&str> = OutcomeType::iter().map(|o| o.as_str()).collect();
        assert_eq!(keys.len(), OutcomeType::iter().count());
    }

    #[test]
    fn test_validation_error_outcome_mapping() {
        assert_eq!(
            OutcomeType::from(&UrlValidationError::TooLong),
            OutcomeType::InvalidUrl
        );
        assert_eq!(
            OutcomeType::from(&UrlValidationError::UnsupportedScheme),
            OutcomeType::UnsupportedProtocol
        );
    }

    #[test]
    fn test_extract_error_display() {
        let err = ExtractError::UnsupportedScheme("ftp".to_string());
        assert_eq!(err.to_string(), "unsupported protocol: ftp");
        let err = ExtractError::Body("connection reset".to_string());
        assert!(err.to_string().contains("connection reset"));
    }
}
