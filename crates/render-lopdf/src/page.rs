use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use refcards_render_core::metrics::ASCENT;
use refcards_render_core::utils::{flip_y, to_win_ansi};
use refcards_render_core::{DashPattern, FontFace, Stroke, TextStyle};
use refcards_types::{Color, ImageId, Point, Rect, Size};

/// Resource name of a font face in the shared resources dictionary.
pub(crate) fn font_resource_name(face: FontFace) -> &'static str {
    match face {
        FontFace::Regular => "F1",
        FontFace::Bold => "F2",
    }
}

/// Graphics state already emitted into the current content stream, so
/// repeated operators can be skipped.
#[derive(Default, Clone, PartialEq)]
struct PageRenderState {
    font: Option<(FontFace, f32)>,
    fill_color: Option<Color>,
    stroke_color: Option<Color>,
    line_width: Option<f32>,
    dash: Option<DashPattern>,
}

/// Accumulates the drawing operations of one page.
pub(crate) struct PageContext {
    pub(crate) size: Size,
    content: Content,
    state: PageRenderState,
}

impl PageContext {
    pub(crate) fn new(size: Size) -> Self {
        Self {
            size,
            content: Content { operations: vec![] },
            state: PageRenderState::default(),
        }
    }

    pub(crate) fn finish(self) -> Content {
        self.content
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn set_stroke(&mut self, stroke: &Stroke) {
        if self.state.line_width != Some(stroke.width) {
            self.push("w", vec![stroke.width.into()]);
            self.state.line_width = Some(stroke.width);
        }
        if self.state.stroke_color != Some(stroke.color) {
            let [r, g, b] = stroke.color.to_unit_rgb();
            self.push("RG", vec![r.into(), g.into(), b.into()]);
            self.state.stroke_color = Some(stroke.color);
        }
        if self.state.dash != stroke.dash {
            let pattern = match stroke.dash {
                Some(dash) => vec![dash.on.into(), dash.off.into()],
                None => vec![],
            };
            self.push("d", vec![Object::Array(pattern), 0.into()]);
            self.state.dash = stroke.dash;
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.push("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill_color = Some(color);
        }
    }

    fn set_font(&mut self, face: FontFace, size: f32) {
        if self.state.font != Some((face, size)) {
            self.push("Tf", vec![font_resource_name(face).into(), size.into()]);
            self.state.font = Some((face, size));
        }
    }

    pub(crate) fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        self.set_stroke(stroke);
        let y = flip_y(rect.bottom(), self.size.height);
        self.push(
            "re",
            vec![rect.x.into(), y.into(), rect.width.into(), rect.height.into()],
        );
        self.push("S", vec![]);
    }

    pub(crate) fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        self.set_stroke(stroke);
        let height = self.size.height;
        self.push("m", vec![from.x.into(), flip_y(from.y, height).into()]);
        self.push("l", vec![to.x.into(), flip_y(to.y, height).into()]);
        self.push("S", vec![]);
    }

    pub(crate) fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle) {
        if text.trim().is_empty() {
            return;
        }
        let baseline = origin.y + style.size * ASCENT;
        let pdf_y = flip_y(baseline, self.size.height);

        self.push("BT", vec![]);
        // Text objects reset the font selection state.
        self.state.font = None;
        self.set_font(style.font, style.size);
        self.set_fill_color(style.color);
        self.push("Td", vec![origin.x.into(), pdf_y.into()]);
        self.push(
            "Tj",
            vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
        );
        self.push("ET", vec![]);
    }

    pub(crate) fn draw_image(&mut self, image: ImageId, rect: Rect) {
        let y = flip_y(rect.bottom(), self.size.height);
        self.push("q", vec![]);
        self.push(
            "cm",
            vec![
                rect.width.into(),
                0.into(),
                0.into(),
                rect.height.into(),
                rect.x.into(),
                y.into(),
            ],
        );
        self.push("Do", vec![image.to_string().as_str().into()]);
        self.push("Q", vec![]);
    }
}
