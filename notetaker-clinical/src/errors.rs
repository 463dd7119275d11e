//! Error types for clinical extraction.
//!
//! Extraction itself never fails: missing matches degrade to empty or
//! default values. Errors come from loading configuration and pattern
//! tables, and from the external classification services.

use thiserror::Error;

/// Errors raised by a sentiment or zero-shot classification backend.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The service could not be reached.
    #[error("cannot reach classification service at {0}")]
    Connection(String),

    /// The request did not finish within the configured timeout.
    #[error("classification request timed out after {0}s")]
    Timeout(u64),

    /// The service answered with a non-success status.
    #[error("classification service returned {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("unexpected classification response: {0}")]
    ResponseParsing(String),

    /// The zero-shot service returned no labels.
    #[error("classification service returned an empty ranking")]
    EmptyRanking,

    /// Any other backend failure (model not loaded, HTTP client setup).
    #[error("classification unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur while building or running a [`crate::Notetaker`].
#[derive(Debug, Error)]
pub enum NotetakerError {
    /// Error reading or parsing a configuration file.
    #[error("invalid configuration {path}: {message}")]
    Config { path: String, message: String },

    /// Error reading or parsing a pattern table.
    #[error("invalid pattern table {path}: {message}")]
    PatternTable { path: String, message: String },

    /// A classifier call failed.
    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    /// Sentiment and intent were requested but no classifier is configured.
    #[error("no sentiment/intent classifier configured")]
    MissingClassifier,
}

/// Result type for notetaker operations.
pub type NotetakerResult<T> = Result<T, NotetakerError>;
