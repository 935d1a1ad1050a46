//! An in-memory drawing surface that records every call, for unit tests.

use refcards_render_core::{DrawingSurface, RenderError, Stroke, TextStyle};
use refcards_types::{ImageId, Point, Raster, Rect, Size};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    BeginPage(Size),
    Rect(Rect, Stroke),
    Line(Point, Point, Stroke),
    Text {
        text: String,
        origin: Point,
        style: TextStyle,
    },
    Image(ImageId, Rect),
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
    pub images: Vec<Raster>,
    pages: usize,
}

impl RecordingSurface {
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Operations grouped by page, without the `BeginPage` markers.
    pub fn pages(&self) -> Vec<Vec<DrawOp>> {
        let mut pages: Vec<Vec<DrawOp>> = Vec::new();
        for op in &self.ops {
            match op {
                DrawOp::BeginPage(_) => pages.push(Vec::new()),
                other => {
                    if let Some(page) = pages.last_mut() {
                        page.push(other.clone());
                    }
                }
            }
        }
        pages
    }

    fn require_page(&self) -> Result<(), RenderError> {
        if self.pages == 0 {
            Err(RenderError::NoActivePage)
        } else {
            Ok(())
        }
    }
}

impl DrawingSurface for RecordingSurface {
    fn begin_page(&mut self, size: Size) -> Result<(), RenderError> {
        self.pages += 1;
        self.ops.push(DrawOp::BeginPage(size));
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) -> Result<(), RenderError> {
        self.require_page()?;
        self.ops.push(DrawOp::Rect(rect, *stroke));
        Ok(())
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke) -> Result<(), RenderError> {
        self.require_page()?;
        self.ops.push(DrawOp::Line(from, to, *stroke));
        Ok(())
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle) -> Result<(), RenderError> {
        self.require_page()?;
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            origin,
            style: *style,
        });
        Ok(())
    }

    fn register_image(&mut self, image: &Raster) -> Result<ImageId, RenderError> {
        self.images.push(image.clone());
        Ok(ImageId::new(self.images.len() as u32 - 1))
    }

    fn draw_image(&mut self, image: ImageId, rect: Rect) -> Result<(), RenderError> {
        self.require_page()?;
        if image.index() as usize >= self.images.len() {
            return Err(RenderError::UnknownImage(image.to_string()));
        }
        self.ops.push(DrawOp::Image(image, rect));
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn finish(self) -> Result<Vec<u8>, RenderError> {
        Ok(Vec::new())
    }
}
