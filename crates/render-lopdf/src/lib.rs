//! PDF drawing surface built on `lopdf`.
//!
//! [`LopdfSurface`] implements `DrawingSurface` by accumulating one content
//! stream per page and assembling the object graph when finished.

mod page;
mod renderer;

pub use renderer::{DocumentInfo, LopdfSurface};
