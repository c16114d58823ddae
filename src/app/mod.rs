//! Main application modules.
//!
//! This module provides target URL validation and shutdown handling used by
//! the HTTP server.

pub mod shutdown;
pub mod url;

// Re-export public API
pub use shutdown::{cancel_on_ctrl_c, shutdown_signal};
pub use url::validate_target_url;
