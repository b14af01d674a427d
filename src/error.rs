// Crate error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the reporter crate itself.
///
/// Hook and handler failures are user-defined and travel as `anyhow::Error`;
/// this enum only covers what the crate owns.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid summary JSON: {0}")]
    Summary(#[source] serde_json::Error),

    #[error("invalid event on line {line}: {source}")]
    Event {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

pub type ReportResult<T> = std::result::Result<T, ReportError>;
