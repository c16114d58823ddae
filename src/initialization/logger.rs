//! Logger initialization.
//!
//! This module provides functions to initialize the logger with custom formatting.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use env_logger::Builder;
use log::LevelFilter;

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting. Supports both plain text
/// (with colored levels) and JSON formats for structured logging.
///
/// When `RUST_LOG` is set it decides the filters on its own and `level` is
/// ignored. Otherwise `level` applies to every module, with the HTTP client
/// stack capped at `info`.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Per-module filtering via RUST_LOG (the --log-level value is not used)
/// RUST_LOG=page_meta_proxy=trace,reqwest=warn page_meta_proxy
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = Builder::new();
    if let Ok(style) = std::env::var("RUST_LOG_STYLE") {
        builder.parse_write_style(&style);
    }
    apply_filters(&mut builder, level, std::env::var("RUST_LOG").ok().as_deref());

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };

                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    // try_init() so a second initialization (tests) returns an error instead of panicking
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// Installs either the `RUST_LOG` directives or the CLI level, never both.
fn apply_filters(builder: &mut Builder, level: LevelFilter, rust_log: Option<&str>) {
    match rust_log.map(str::trim).filter(|directives| !directives.is_empty()) {
        Some(directives) => {
            builder.parse_filters(directives);
        }
        None => {
            builder.filter_level(level);
            builder.filter_module("reqwest", LevelFilter::Info);
            builder.filter_module("hyper", LevelFilter::Info);
            builder.filter_module("hyper_util", LevelFilter::Info);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log, Metadata};

    fn enabled(builder: &mut Builder, target: &str, level: Level) -> bool {
        let logger = builder.build();
        logger.enabled(&Metadata::builder().target(target).level(level).build())
    }

    #[test]
    fn test_rust_log_directives_override_cli_level() {
        let mut builder = Builder::new();
        apply_filters(&mut builder, LevelFilter::Info, Some("page_meta_proxy=trace"));
        assert!(enabled(&mut builder, "page_meta_proxy::pipeline", Level::Trace));
    }

    #[test]
    fn test_cli_level_applies_when_rust_log_unset() {
        let mut builder = Builder::new();
        apply_filters(&mut builder, LevelFilter::Info, None);
        assert!(enabled(&mut builder, "page_meta_proxy::server", Level::Info));
        assert!(!enabled(&mut builder, "page_meta_proxy::server", Level::Debug));

        let mut builder = Builder::new();
        apply_filters(&mut builder, LevelFilter::Trace, Some("  "));
        assert!(enabled(&mut builder, "page_meta_proxy::server", Level::Trace));
        assert!(!enabled(&mut builder, "reqwest::connect", Level::Debug));
    }

    #[test]
    fn test_init_logger_twice_does_not_panic() {
        // Only the first initialization in a process can succeed.
        let _ = init_logger_with(LevelFilter::Info, LogFormat::Plain);
        let second = init_logger_with(LevelFilter::Debug, LogFormat::Json);
        assert!(matches!(second, Err(InitializationError::LoggerError(_))));
    }
}
