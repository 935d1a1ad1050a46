use refcards_traits::{CodeEncoder, ResourceProvider};
use refcards_types::ResourceKey;
use std::fmt;
use std::sync::Arc;

/// Where the card logo comes from.
#[derive(Clone)]
pub struct LogoSource {
    pub provider: Arc<dyn ResourceProvider>,
    pub key: ResourceKey,
}

impl fmt::Debug for LogoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogoSource")
            .field("provider", &self.provider.name())
            .field("key", &self.key)
            .finish()
    }
}

/// A container for the shared, read-only collaborators of a pipeline.
///
/// Created once by the `PipelineBuilder` and shared by every job the
/// pipeline runs.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    pub encoder: Arc<dyn CodeEncoder>,
    pub logo: Option<LogoSource>,
    /// Maximum number of encoder calls in flight.
    pub concurrency: usize,
    pub document_title: String,
}
