//! Advance widths for the standard Helvetica faces.
//!
//! Values are the Adobe AFM widths (1/1000 em) for every glyph WinAnsiEncoding
//! reaches, so measured text matches what the PDF text operators draw.

use crate::types::FontFace;
use crate::utils::win_ansi_byte;

/// Distance from the top of the text box to the baseline, in em.
pub const ASCENT: f32 = 0.718;

/// Baseline-to-baseline distance of wrapped lines, in em (font bounding box
/// height, ascender 931 to descender -225).
pub const LINE_HEIGHT: f32 = 1.156;

const FIRST_CHAR: u8 = 0x20;

// Indexed by WinAnsi byte from 0x20. Bytes no character encodes to hold 0.
#[rustfmt::skip]
const HELVETICA: [u16; 224] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 0,
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667,
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 224] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, 0,
    556, 0, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 0, 500, 667,
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

/// Characters without a WinAnsi byte are drawn as `?` and measured as one.
fn char_width(c: char, font: FontFace) -> u16 {
    let table = match font {
        FontFace::Regular => &HELVETICA,
        FontFace::Bold => &HELVETICA_BOLD,
    };
    let byte = win_ansi_byte(c).unwrap_or(b'?');
    table[(byte - FIRST_CHAR) as usize]
}

/// Width of `text` set in `font` at `size` points.
pub fn text_width(text: &str, font: FontFace, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(c, font) as u32).sum();
    units as f32 * size / 1000.0
}

/// Greedily breaks `text` into lines no wider than `max_width`.
///
/// Breaks at spaces where possible; a single word wider than the box is split
/// between characters. Runs of spaces inside a line are kept, while the space
/// a line breaks at is dropped along with any others that would lead the next
/// line. A non-positive width disables wrapping.
pub fn wrap_text(text: &str, font: FontFace, size: f32, max_width: f32) -> Vec<String> {
    if max_width <= 0.0 || text_width(text, font, size) <= max_width {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    // Whether `current` has started, even if only with an empty word.
    let mut open = false;

    for word in text.split(' ') {
        if !open && word.is_empty() && !lines.is_empty() {
            continue;
        }
        let candidate = if open {
            format!("{} {}", current, word)
        } else {
            word.to_string()
        };
        if text_width(&candidate, font, size) <= max_width {
            current = candidate;
            open = true;
            continue;
        }
        if open {
            lines.push(std::mem::take(&mut current));
            open = false;
            if word.is_empty() {
                continue;
            }
        }
        open = true;
        if text_width(word, font, size) <= max_width {
            current = word.to_string();
            continue;
        }
        for c in word.chars() {
            current.push(c);
            if text_width(&current, font, size) > max_width && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(c);
            }
        }
    }
    let trimmed_len = current.trim_end_matches(' ').len();
    current.truncate(trimmed_len);
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
