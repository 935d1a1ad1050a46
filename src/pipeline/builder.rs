// src/pipeline/builder.rs
use super::context::{LogoSource, PipelineContext};
use super::orchestrator::CardPipeline;
use crate::error::PipelineError;
use refcards_encoder::QrCodeEncoder;
use refcards_render_lopdf::DocumentInfo;
use refcards_resource::FilesystemResourceProvider;
use refcards_traits::{CodeEncoder, ResourceProvider};
use refcards_types::ResourceKey;
use std::path::Path;
use std::sync::Arc;

/// A builder for creating a `CardPipeline`.
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    encoder: Option<Arc<dyn CodeEncoder>>,
    logo: Option<LogoSource>,
    concurrency: Option<usize>,
    document_title: Option<String>,
}

impl PipelineBuilder {
    /// Creates a builder with the QR encoder, no logo and one encoder slot
    /// per CPU.
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces the code encoder.
    pub fn with_encoder<E: CodeEncoder + 'static>(mut self, encoder: E) -> Self {
        self.encoder = Some(Arc::new(encoder));
        self
    }

    pub fn with_shared_encoder(mut self, encoder: Arc<dyn CodeEncoder>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    /// Prints the logo stored under `key` in `provider` on every card.
    /// A logo that turns out to be missing or unreadable is skipped.
    pub fn with_logo(
        mut self,
        provider: Arc<dyn ResourceProvider>,
        key: impl Into<ResourceKey>,
    ) -> Self {
        self.logo = Some(LogoSource {
            provider,
            key: key.into(),
        });
        self
    }

    /// Prints the image file at `path` on every card.
    pub fn with_logo_file<P: AsRef<Path>>(self, path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let (provider, key) = FilesystemResourceProvider::for_file(path).ok_or_else(|| {
            PipelineError::Validation(format!("Logo path '{}' has no file name", path.display()))
        })?;
        Ok(self.with_logo(Arc::new(provider), key))
    }

    /// Sets how many encoder calls may run at once.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = Some(concurrency);
        self
    }

    /// Sets the title written to the document's metadata.
    pub fn with_document_title(mut self, title: impl Into<String>) -> Self {
        self.document_title = Some(title.into());
        self
    }

    /// Consumes the builder and creates the `CardPipeline`.
    pub fn build(self) -> Result<CardPipeline, PipelineError> {
        let concurrency = self.concurrency.unwrap_or_else(num_cpus::get);
        if concurrency == 0 {
            return Err(PipelineError::Validation(
                "Encoder concurrency must be at least 1".to_string(),
            ));
        }

        let encoder = self
            .encoder
            .unwrap_or_else(|| Arc::new(QrCodeEncoder::new()));
        log::info!(
            "Building card pipeline: encoder={}, concurrency={}, logo={}",
            encoder.name(),
            concurrency,
            self.logo
                .as_ref()
                .map(|l| l.key.as_str())
                .unwrap_or("none")
        );

        let context = Arc::new(PipelineContext {
            encoder,
            logo: self.logo,
            concurrency,
            document_title: self
                .document_title
                .unwrap_or_else(|| DocumentInfo::default().title),
        });

        Ok(CardPipeline::new(context))
    }
}
