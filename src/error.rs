//! Error types for the `warraq` crate.

use thiserror::Error;

/// Errors that can occur while running the writing pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A configuration validation error (missing credential, bad parameter).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The persisted embedding index is missing or could not be opened.
    ///
    /// Surfaced to the user as "knowledge base not found"; retrieval and
    /// generation are both skipped for the request.
    #[error("Knowledge base not found: {0}")]
    IndexUnavailable(String),

    /// The user request failed validation.
    ///
    /// Raised before any retrieval or generation call is made.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// An error occurred while embedding the query text.
    #[error("Embedding error ({provider}): {message}")]
    Embedding {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the vector store backend.
    #[error("Vector store error ({backend}): {message}")]
    Store {
        /// The vector store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// The generation service failed (transport, quota, malformed response).
    ///
    /// Carries the underlying cause. The pipeline does not retry, and the
    /// session's previous result is left untouched.
    #[error("Generation failed ({provider}): {message}")]
    Generation {
        /// The generation provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },
}

/// A convenience result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
