//! The contract for turning a URL into a scannable raster.

use refcards_types::Raster;
use std::fmt::Debug;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Data too long to encode ({len} bytes)")]
    DataTooLong { len: usize },

    #[error("Encoder failed: {0}")]
    Failed(String),
}

/// Converts one URL into a scannable image.
///
/// Implementations may be slow; the pipeline calls them from blocking worker
/// threads and never from the async executor itself.
pub trait CodeEncoder: Send + Sync + Debug {
    fn encode(&self, url: &str) -> Result<Raster, EncodeError>;

    /// Returns a human-readable name for this encoder (for logging).
    fn name(&self) -> &'static str;
}
