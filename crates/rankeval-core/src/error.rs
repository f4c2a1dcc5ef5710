//! Error types for rankeval operations.
//!
//! Every failure carries enough context (source, line, query id) to locate
//! the offending input. Nothing is recovered silently.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for rankeval operations.
pub type Result<T> = std::result::Result<T, EvalError>;

/// Errors that can occur while loading inputs or computing metrics.
#[derive(Debug, Error)]
pub enum EvalError {
    /// A judgment or run line could not be parsed.
    #[error("{source_name}:{line}: {reason} (line: {content:?})")]
    Parse {
        source_name: String,
        line: usize,
        content: String,
        reason: String,
    },

    /// Aggregation was requested over zero queries.
    #[error("cannot aggregate {metric}: the run contains no queries")]
    EmptyInput { metric: String },

    /// Malformed metric name or evaluation settings.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Reading an input file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a report failed.
    #[error("Export error: {0}")]
    Export(String),
}

// Convenience constructors
impl EvalError {
    pub fn parse(
        source_name: impl Into<String>,
        line: usize,
        content: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        EvalError::Parse {
            source_name: source_name.into(),
            line,
            content: content.into(),
            reason: reason.into(),
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        EvalError::Configuration(msg.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EvalError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for malformed input lines.
    pub fn is_parse(&self) -> bool {
        matches!(self, EvalError::Parse { .. })
    }
}

impl From<csv::Error> for EvalError {
    fn from(e: csv::Error) -> Self {
        EvalError::Export(e.to_string())
    }
}

impl From<serde_json::Error> for EvalError {
    fn from(e: serde_json::Error) -> Self {
        EvalError::Export(e.to_string())
    }
}
