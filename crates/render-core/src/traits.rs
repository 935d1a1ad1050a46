use crate::error::RenderError;
use crate::types::{Stroke, TextStyle};
use refcards_types::{ImageId, Point, Raster, Rect, Size};

/// The drawing primitives a card document is built from.
///
/// Coordinates are in points with the origin at the top-left corner of the
/// current page; implementations convert to their native coordinate system.
/// A surface accumulates one document and is consumed by [`finish`].
///
/// [`finish`]: DrawingSurface::finish
pub trait DrawingSurface {
    /// Starts a new page; all following drawing goes to it.
    fn begin_page(&mut self, size: Size) -> Result<(), RenderError>;

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) -> Result<(), RenderError>;

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), RenderError>;

    /// Draws a single line of text whose box top-left corner is `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle)
    -> Result<(), RenderError>;

    /// Stores an image once so it can be placed any number of times.
    fn register_image(&mut self, image: &Raster) -> Result<ImageId, RenderError>;

    /// Places a registered image, scaled to fill `rect`.
    fn draw_image(&mut self, image: ImageId, rect: Rect) -> Result<(), RenderError>;

    fn page_count(&self) -> usize;

    /// Closes the document and returns its bytes.
    fn finish(self) -> Result<Vec<u8>, RenderError>
    where
        Self: Sized;
}
