//! Error handling and request statistics.
//!
//! This module provides:
//! - Error type definitions (initialization, URL validation, extraction)
//! - Request outcome categories and thread-safe counters
//!
//! Only precondition failures (bad target URL, recursion) and transport
//! failures are errors. Malformed markup and unresolvable hrefs are handled
//! locally by the extractor and never surface here.

mod stats;
mod types;

// Re-export public API
pub use stats::RequestStats;
pub use types::{ExtractError, InitializationError, OutcomeType, UrlValidationError};
