use crate::geometry::Size;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported paper formats. Dimensions are portrait, in PDF points (1/72 inch).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaperSize {
    #[default]
    A4,
    #[serde(rename = "LETTER", alias = "Letter", alias = "letter")]
    Letter,
    A3,
}

impl PaperSize {
    pub fn dimensions_pt(self) -> Size {
        match self {
            PaperSize::A4 => Size::new(595.28, 841.89),
            PaperSize::Letter => Size::new(612.0, 792.0),
            PaperSize::A3 => Size::new(841.89, 1190.55),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaperSize::A4 => "A4",
            PaperSize::Letter => "LETTER",
            PaperSize::A3 => "A3",
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaperSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A4" => Ok(PaperSize::A4),
            "LETTER" => Ok(PaperSize::Letter),
            "A3" => Ok(PaperSize::A3),
            other => Err(format!(
                "Unknown paper size '{}': expected A4, LETTER or A3",
                other
            )),
        }
    }
}
