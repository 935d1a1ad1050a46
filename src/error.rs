// src/error.rs
use refcards_render_core::RenderError;
use refcards_traits::{EncodeError, ResourceError};
use thiserror::Error;

/// A comprehensive error type for the card generation pipeline.
///
/// Every fatal condition surfaces as exactly one of these; a failed job never
/// returns a partial document.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    Validation(String),

    #[error("No URLs found in uploaded file.")]
    NoLinks,

    #[error("Failed to encode link #{index} ({url}): {source}")]
    Encoding {
        index: usize,
        url: String,
        #[source]
        source: EncodeError,
    },

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generation was cancelled")]
    Cancelled,

    #[error("Internal pipeline error: {0}")]
    Internal(String),
}

impl PipelineError {
    /// True for errors the caller can fix by changing its input, which an
    /// HTTP boundary reports as 400 rather than 500.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PipelineError::Validation(_) | PipelineError::NoLinks)
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(e: serde_json::Error) -> Self {
        PipelineError::Validation(e.to_string())
    }
}

impl From<tokio::task::JoinError> for PipelineError {
    fn from(e: tokio::task::JoinError) -> Self {
        PipelineError::Internal(format!("worker task failed: {}", e))
    }
}

/// Failure to load an optional decorative asset. Recovered locally: the
/// pipeline logs it and continues without the asset.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Logo '{key}' could not be loaded: {source}")]
    Unavailable {
        key: String,
        #[source]
        source: ResourceError,
    },

    #[error("Logo '{key}' could not be decoded: {message}")]
    Decode { key: String, message: String },

    #[error("Logo '{0}' has no pixels")]
    Empty(String),
}
