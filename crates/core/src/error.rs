//! Error types for tweetrank
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::io;
use thiserror::Error;

/// Result type alias for tweetrank operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the ranking engine
#[derive(Debug, Error)]
pub enum Error {
    /// Algorithm name not recognized by the engine
    ///
    /// Raised before any scoring work begins.
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Caller-supplied argument out of range (e.g. `top_n == 0`)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Corpus index built from zero documents
    #[error("Corpus is empty")]
    EmptyCorpus,

    /// Two documents share the same id
    #[error("Duplicate document id: {0}")]
    DuplicateDocument(String),

    /// Corpus source lacks required columns
    #[error("Corpus source is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// Configuration could not be parsed or failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// CSV reader error
    #[error("CSV error: {0}")]
    Csv(String),

    /// I/O error (corpus or config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Whether this error is a configuration error
    ///
    /// Configuration errors are raised before any work and never leave
    /// partial state behind.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::UnsupportedAlgorithm(_) | Error::InvalidConfig(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_unsupported_algorithm() {
        let err = Error::UnsupportedAlgorithm("pagerank".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Unsupported algorithm"));
        assert!(msg.contains("pagerank"));
    }

    #[test]
    fn test_error_display_invalid_argument() {
        let err = Error::InvalidArgument("top_n must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid argument: top_n must be positive");
    }

    #[test]
    fn test_error_display_empty_corpus() {
        assert_eq!(Error::EmptyCorpus.to_string(), "Corpus is empty");
    }

    #[test]
    fn test_error_display_missing_columns() {
        let err = Error::MissingColumns(vec!["date".into(), "likes".into()]);
        let msg = err.to_string();
        assert!(msg.contains("missing required columns"));
        assert!(msg.contains("date, likes"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "corpus.csv");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_is_config() {
        assert!(Error::UnsupportedAlgorithm("x".into()).is_config());
        assert!(Error::InvalidConfig("x".into()).is_config());
        assert!(!Error::EmptyCorpus.is_config());
        assert!(!Error::InvalidArgument("x".into()).is_config());
    }

    #[test]
    fn test_error_pattern_matching() {
        let err = Error::DuplicateDocument("1834".to_string());

        match err {
            Error::DuplicateDocument(id) => assert_eq!(id, "1834"),
            _ => panic!("Wrong error variant"),
        }
    }
}
