//! Logging setup
//!
//! Routes the `log` facade through `env_logger`, to stderr or an append-mode
//! log file, with `"{timestamp} - {LEVEL} - {message}"` lines.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use log::LevelFilter;

use crate::core::error::{Result, RoundtableError};

/// Map a level name to a filter
///
/// Accepts the `log` crate names plus `WARNING` and `CRITICAL`.
pub fn parse_level(name: &str) -> Result<LevelFilter> {
    match name.trim().to_ascii_uppercase().as_str() {
        "WARNING" => Ok(LevelFilter::Warn),
        "CRITICAL" | "FATAL" => Ok(LevelFilter::Error),
        other => other
            .parse()
            .map_err(|_| RoundtableError::config(format!("Unknown log level: {}", name))),
    }
}

/// Install the global logger
///
/// `RUST_LOG` still refines the filter on top of the configured level.
pub fn init(level: &str, log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(parse_level(level)?);
    builder.parse_default_env();
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} - {} - {}",
            buf.timestamp(),
            record.level(),
            record.args()
        )
    });

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                RoundtableError::with_context(
                    format!("Failed to open log file {}", path.display()),
                    e,
                )
            })?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder
        .try_init()
        .map_err(|e| RoundtableError::with_context("Failed to install logger", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_names() {
        assert_eq!(parse_level("INFO").unwrap(), LevelFilter::Info);
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_level("WARNING").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_level("warn").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_level("CRITICAL").unwrap(), LevelFilter::Error);
        assert_eq!(parse_level(" error ").unwrap(), LevelFilter::Error);
    }

    #[test]
    fn test_parse_level_rejects_unknown() {
        assert!(parse_level("verbose").is_err());
    }
}
