// src/pipeline/orchestrator.rs
use super::context::PipelineContext;
use super::progress::{CancellationFlag, ProgressReporter, drawing_progress};
use super::worker::encode_all;
use crate::assets::{Logo, load_logo_or_warn};
use crate::compose::{EncodedCode, GenerationStats, PageCompositor};
use crate::config::{GeneratorConfig, PartialGeneratorConfig, resolve_config};
use crate::error::PipelineError;
use crate::links::{LinkRecord, parse_links_from_text};
use log::info;
use refcards_render_core::DrawingSurface;
use refcards_render_lopdf::{DocumentInfo, LopdfSurface};
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Builder;
use tokio::sync::watch;
use tokio::task::{self, JoinHandle};

/// The inputs of one generation job.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    /// Uploaded link text, one candidate URL per line.
    pub links_text: String,
    pub config: PartialGeneratorConfig,
}

impl GenerationRequest {
    pub fn new(links_text: impl Into<String>) -> Self {
        Self {
            links_text: links_text.into(),
            config: PartialGeneratorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PartialGeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds a request whose configuration is a JSON object.
    pub fn with_json_config(self, json: &str) -> Result<Self, PipelineError> {
        Ok(self.with_config(PartialGeneratorConfig::from_json(json)?))
    }
}

/// The result of a successful job.
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    /// The finished PDF.
    pub document: Vec<u8>,
    pub stats: GenerationStats,
    /// The resolved configuration the job ran with.
    pub config: GeneratorConfig,
}

/// A job running on its own task.
pub struct GenerationJob {
    progress: watch::Receiver<u8>,
    cancel: CancellationFlag,
    handle: JoinHandle<Result<GenerationOutput, PipelineError>>,
}

impl GenerationJob {
    /// A receiver of the job's progress percentage.
    pub fn progress(&self) -> watch::Receiver<u8> {
        self.progress.clone()
    }

    /// Asks the job to stop at its next checkpoint; it then fails with
    /// [`PipelineError::Cancelled`].
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub async fn join(self) -> Result<GenerationOutput, PipelineError> {
        self.handle.await?
    }
}

/// The card generation pipeline.
///
/// Cheap to clone; every clone shares the same collaborators. Each job owns
/// its own document buffer, so jobs may run concurrently.
#[derive(Debug, Clone)]
pub struct CardPipeline {
    context: Arc<PipelineContext>,
}

impl CardPipeline {
    pub(crate) fn new(context: Arc<PipelineContext>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &PipelineContext {
        &self.context
    }

    /// Runs a job to completion without progress reporting.
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationOutput, PipelineError> {
        self.generate_with(
            request,
            &ProgressReporter::detached(),
            &CancellationFlag::new(),
        )
        .await
    }

    /// Runs a job to completion, publishing progress to `progress` and
    /// stopping early once `cancel` is set.
    pub async fn generate_with(
        &self,
        request: GenerationRequest,
        progress: &ProgressReporter,
        cancel: &CancellationFlag,
    ) -> Result<GenerationOutput, PipelineError> {
        let start = Instant::now();
        let config = resolve_config(&request.config);
        let urls = parse_links_from_text(&request.links_text);
        if urls.is_empty() {
            return Err(PipelineError::NoLinks);
        }
        info!(
            "Generating {} cards on {} paper with a {}x{} grid.",
            urls.len(),
            config.paper_size,
            config.grid_cols,
            config.grid_rows
        );

        let records = LinkRecord::from_urls(urls, config.start_number);
        let codes = encode_all(
            Arc::clone(&self.context.encoder),
            records,
            self.context.concurrency,
            progress,
            cancel,
        )
        .await?;
        cancel.check()?;

        let context = Arc::clone(&self.context);
        let draw_config = config.clone();
        let draw_progress = progress.clone();
        let (document, stats) = task::spawn_blocking(move || {
            let logo = context
                .logo
                .as_ref()
                .and_then(|source| load_logo_or_warn(source.provider.as_ref(), &source.key));
            render_document(
                &draw_config,
                &codes,
                logo.as_ref(),
                &context.document_title,
                &draw_progress,
            )
        })
        .await??;

        progress.complete();
        info!(
            "Generated {} cards on {} pages ({} bytes) in {:.2?}.",
            stats.total_codes,
            stats.total_pages,
            document.len(),
            start.elapsed()
        );
        Ok(GenerationOutput {
            document,
            stats,
            config,
        })
    }

    /// Starts a job on its own task and returns a handle to it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(&self, request: GenerationRequest) -> GenerationJob {
        let (reporter, progress) = ProgressReporter::new();
        let cancel = CancellationFlag::new();
        let pipeline = self.clone();
        let job_cancel = cancel.clone();
        let handle = tokio::spawn(async move {
            pipeline
                .generate_with(request, &reporter, &job_cancel)
                .await
        });
        GenerationJob {
            progress,
            cancel,
            handle,
        }
    }

    /// Runs a job on a dedicated multi-threaded runtime.
    ///
    /// For synchronous callers; must not be called from inside a runtime.
    pub fn generate_blocking(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationOutput, PipelineError> {
        let runtime = Builder::new_multi_thread().enable_all().build()?;
        runtime.block_on(self.generate(request))
    }
}

/// Draws all cards into a fresh PDF. Runs on a blocking thread that owns the
/// surface for the whole drawing phase.
fn render_document(
    config: &GeneratorConfig,
    codes: &[EncodedCode],
    logo: Option<&Logo>,
    title: &str,
    progress: &ProgressReporter,
) -> Result<(Vec<u8>, GenerationStats), PipelineError> {
    let info = DocumentInfo {
        title: title.to_string(),
        ..DocumentInfo::default()
    };
    let mut surface = LopdfSurface::with_info(info);
    let total = codes.len();
    let stats = PageCompositor::new(config).compose(&mut surface, codes, logo, |placed| {
        progress.report(drawing_progress(placed, total))
    })?;
    let document = surface.finish()?;
    Ok((document, stats))
}
