//! Core rendering abstractions for card documents.
//!
//! - `DrawingSurface` trait: the primitives the card layout engine draws with
//! - Stroke and text style types
//! - Built-in Helvetica metrics for centering and wrapping text

mod error;
pub mod metrics;
mod traits;
mod types;
pub mod utils;

pub use error::RenderError;
pub use metrics::{LINE_HEIGHT, text_width, wrap_text};
pub use traits::DrawingSurface;
pub use types::{DashPattern, FontFace, Stroke, TextStyle};
