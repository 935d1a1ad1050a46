//! refcards turns a list of referral links into printable sheets of QR cards.
//!
//! Each link becomes a card holding a scannable code, a sequential label and
//! optional event details. Cards are tiled row by row over a configurable grid
//! and as many pages of the chosen paper size as needed.
//!
//! The pipeline stages, leaves first:
//!
//! - [`config`]: user overrides merged with defaults
//! - [`links`]: uploaded text to an ordered URL list
//! - [`display`]: the URL text printed on a card
//! - [`card`] and [`compose`]: drawing cards and pages on a `DrawingSurface`
//! - [`pipeline`]: concurrent encoding, progress, cancellation and PDF output

pub mod assets;
pub mod card;
pub mod compose;
pub mod config;
pub mod display;
pub mod error;
pub mod layout;
pub mod links;
pub mod pipeline;

#[cfg(test)]
mod testing;

pub use compose::{EncodedCode, GenerationStats};
pub use config::{
    GeneratorConfig, PartialGeneratorConfig, UrlDisplayStyle, format_card_label,
    format_code_number, resolve_config,
};
pub use display::{DisplayLines, SplitUrl, display_lines, split_url, truncate_url};
pub use error::{AssetError, PipelineError};
pub use links::{LinkRecord, find_first_url, parse_links_from_text};
pub use pipeline::{
    CancellationFlag, CardPipeline, GenerationJob, GenerationOutput, GenerationRequest,
    PipelineBuilder, ProgressReporter,
};

pub use refcards_types::PaperSize;
