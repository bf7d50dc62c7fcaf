//! Centralized error types for senti.

use thiserror::Error;

/// Failure raised by an inference collaborator.
///
/// Every variant renders a non-empty message, since the message is returned
/// to callers in the `error` field of a degraded result.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Inference backend unavailable: {0}")]
    Unavailable(String),

    #[error("Inference backend returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    #[error("Inference task panicked: {0}")]
    Panicked(String),

    #[error("Inference failed: {0}")]
    Other(String),
}

/// Result type for inference calls.
pub type InferenceResult<T> = Result<T, InferenceError>;

impl InferenceError {
    /// Create a malformed output error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedOutput(msg.into())
    }

    /// Create a generic inference error.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// Main error type for service setup and startup.
#[derive(Error, Debug)]
pub enum SentiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Model load error: {0}")]
    ModelLoad(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for senti operations.
pub type SentiResult<T> = Result<T, SentiError>;

impl SentiError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a model load error.
    pub fn model_load(msg: impl Into<String>) -> Self {
        Self::ModelLoad(msg.into())
    }
}
