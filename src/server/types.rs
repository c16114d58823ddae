//! Server state and response bodies.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use crate::error_handling::RequestStats;

/// Shared state for all handlers.
///
/// Cloned per request; everything mutable lives behind `Arc` and is limited
/// to process-wide counters.
#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    pub stats: Arc<RequestStats>,
    /// `max-age` (seconds) sent with successful `/meta` responses
    pub cache_max_age: u64,
    pub start_time: Arc<Instant>,
}

impl AppState {
    pub fn new(client: reqwest::Client, cache_max_age: u64) -> Self {
        Self {
            client,
            stats: Arc::new(RequestStats::new()),
            cache_max_age,
            start_time: Arc::new(Instant::now()),
        }
    }

    /// `Cache-Control` value for successful lookups.
    pub fn cache_control(&self) -> String {
        format!("public, max-age={}", self.cache_max_age)
    }
}

/// JSON body of every `/meta` failure.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Present (and `false`) only for query-schema rejections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: None,
            error: error.into(),
        }
    }

    pub fn validation(error: impl Into<String>) -> Self {
        Self {
            success: Some(false),
            error: error.into(),
        }
    }
}

/// JSON response for `/status` endpoint
#[derive(Serialize)]
pub struct StatusResponse {
    pub total_requests: usize,
    pub successful_requests: usize,
    pub uptime_seconds: f64,
    pub outcomes: BTreeMap<&'static str, usize>,
}
