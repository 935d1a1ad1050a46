//! Card generation pipeline orchestration.
//!
//! - [`PipelineBuilder`]: fluent builder for a [`CardPipeline`]
//! - [`CardPipeline`]: runs jobs, in place or on their own task
//! - [`ProgressReporter`] / [`CancellationFlag`]: progress and cooperative cancellation
//!
//! # Example
//!
//! ```no_run
//! use refcards::{GenerationRequest, PipelineBuilder};
//!
//! # async fn run() -> Result<(), refcards::PipelineError> {
//! let pipeline = PipelineBuilder::new().build()?;
//! let request = GenerationRequest::new("https://example.com/referral?code=ABC123\n")
//!     .with_json_config(r#"{"gridCols": 2, "gridRows": 4}"#)?;
//! let output = pipeline.generate(request).await?;
//! std::fs::write("cards.pdf", &output.document)?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod context;
mod orchestrator;
mod progress;
mod worker;

pub use builder::PipelineBuilder;
pub use context::{LogoSource, PipelineContext};
pub use orchestrator::{CardPipeline, GenerationJob, GenerationOutput, GenerationRequest};
pub use progress::{CancellationFlag, ProgressReporter, drawing_progress, encoding_progress};
