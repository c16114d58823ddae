//! Pipeline orchestration for one `/meta` request.
//!
//! This module provides:
//! - The networked entry point [`extract_page_meta`] (fetch, content-type check)
//! - Stream driving that feeds body chunks through the scanner into the accumulator
//!
//! Each invocation owns its scanner and accumulator; nothing is shared between
//! concurrent requests.

mod fetch;
mod stream;

// Re-export public API
pub use fetch::{extract_page_meta, is_html_content_type};
pub use stream::scan_stream;
