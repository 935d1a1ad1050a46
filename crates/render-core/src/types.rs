use refcards_types::Color;

/// On/off lengths for dashed strokes, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashPattern {
    pub on: f32,
    pub off: f32,
}

impl DashPattern {
    pub fn new(on: f32, off: f32) -> Self {
        Self { on, off }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    pub dash: Option<DashPattern>,
}

impl Stroke {
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: Color, width: f32, dash: DashPattern) -> Self {
        Self {
            color,
            width,
            dash: Some(dash),
        }
    }
}

/// The two faces of the standard Helvetica family the surfaces provide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontFace {
    #[default]
    Regular,
    Bold,
}

impl FontFace {
    pub fn postscript_name(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: FontFace,
    pub size: f32,
    pub color: Color,
}

impl TextStyle {
    pub fn new(font: FontFace, size: f32, color: Color) -> Self {
        Self { font, size, color }
    }

    pub fn regular(size: f32, color: Color) -> Self {
        Self::new(FontFace::Regular, size, color)
    }

    pub fn bold(size: f32, color: Color) -> Self {
        Self::new(FontFace::Bold, size, color)
    }
}
