//! JSON status handler.

use axum::{extract::State, Json};

use super::super::types::{AppState, StatusResponse};

/// JSON status endpoint with request outcome counters since start
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        total_requests: state.stats.total(),
        successful_requests: state.stats.total_successes(),
        uptime_seconds: state.start_time.elapsed().as_secs_f64(),
        outcomes: state.stats.snapshot(),
    })
}
