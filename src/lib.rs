//! page_meta_proxy library: streaming `<head>` metadata extraction
//!
//! This library fetches a web page and turns the tags in its `<head>` into a
//! structured record: title, description, canonical URL, icons, alternates,
//! Open Graph and Twitter Card properties, plus the raw `<meta>` and `<link>`
//! tags. The body is scanned as it streams in; it is never buffered whole or
//! parsed into a DOM.
//!
//! # Example
//!
//! ```no_run
//! use page_meta_proxy::{extract_page_meta, initialization::init_client, Config, ExtractionOutcome};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = init_client(&Config::default())?;
//! let target = url::Url::parse("https://example.com")?;
//!
//! match extract_page_meta(&client, &target).await? {
//!     ExtractionOutcome::Extracted(result) => {
//!         println!("{}: {:?}", result.final_url, result.title);
//!     }
//!     ExtractionOutcome::NonHtml(notice) => {
//!         println!("{} is not HTML ({:?})", notice.final_url, notice.content_type);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
pub mod config;
mod error_handling;
pub mod extract;
pub mod initialization;
mod pipeline;
mod server;

// Re-export public API
pub use app::{cancel_on_ctrl_c, validate_target_url};
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{
    ExtractError, InitializationError, OutcomeType, RequestStats, UrlValidationError,
};
pub use extract::{extract_from_html, ExtractionOutcome, MetaExtractionResult, NonHtmlResponse};
pub use pipeline::{extract_page_meta, scan_stream};
pub use server::{build_router, serve, start_server, AppState};
