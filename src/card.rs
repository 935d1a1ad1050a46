//! Draws the content of a single card.
//!
//! A card is laid out top to bottom from a cursor that starts
//! `card_top_padding` below the top of its box: event name, event date, logo,
//! code, label and finally the URL lines. All text is centered in the box.

use crate::config::GeneratorConfig;
use crate::display::{DisplayLines, display_lines};
use refcards_render_core::{
    DrawingSurface, LINE_HEIGHT, RenderError, Stroke, TextStyle, text_width, wrap_text,
};
use refcards_types::{Color, ImageId, Point, Rect};

const BORDER_COLOR: Color = Color::gray(0xF0);
const BORDER_WIDTH: f32 = 0.5;

const EVENT_NAME_SIZE: f32 = 8.0;
const EVENT_NAME_COLOR: Color = Color::gray(0x33);
const EVENT_NAME_ADVANCE: f32 = 10.0;
const EVENT_DATE_SIZE: f32 = 7.0;
const EVENT_DATE_COLOR: Color = Color::gray(0x66);
const EVENT_DATE_ADVANCE: f32 = 9.0;

const LOGO_MAX_WIDTH: f32 = 100.0;
const LOGO_WIDTH_RATIO: f32 = 0.82;
const NO_LOGO_ADVANCE: f32 = 5.0;

const FULL_LINE1_OFFSET: f32 = 16.0;
const FULL_LINE1_SIZE: f32 = 7.5;
const FULL_LINE1_COLOR: Color = Color::gray(0x44);
const FULL_LINE2_OFFSET: f32 = 10.0;
const FULL_LINE2_SIZE: f32 = 8.5;
const TRUNCATED_OFFSET: f32 = 18.0;
const TRUNCATED_SIZE: f32 = 7.0;
const TRUNCATED_COLOR: Color = Color::gray(0x66);
const TRUNCATED_LINE_GAP: f32 = 2.0;

/// A logo registered with the surface, shared by every card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoPlacement {
    pub image: ImageId,
    /// Width over height of the source image.
    pub aspect_ratio: f32,
}

/// Per-card inputs.
#[derive(Debug, Clone, Copy)]
pub struct CardContent<'a> {
    pub label: &'a str,
    pub url: &'a str,
    pub code_image: ImageId,
}

/// Where the parts of a card ended up.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub border: Rect,
    pub logo: Option<Rect>,
    pub code: Rect,
    /// Top of the label line.
    pub label_y: f32,
    /// Top of each URL line that was drawn.
    pub url_line_ys: Vec<f32>,
}

pub struct CardRenderer<'a> {
    config: &'a GeneratorConfig,
    qr_size: f32,
    logo: Option<LogoPlacement>,
}

impl<'a> CardRenderer<'a> {
    pub fn new(config: &'a GeneratorConfig, qr_size: f32, logo: Option<LogoPlacement>) -> Self {
        Self {
            config,
            qr_size,
            logo,
        }
    }

    /// Draws one card inside `card`, the bordered box.
    pub fn render<S>(
        &self,
        surface: &mut S,
        card: Rect,
        content: &CardContent<'_>,
    ) -> Result<CardLayout, RenderError>
    where
        S: DrawingSurface + ?Sized,
    {
        let config = self.config;
        surface.stroke_rect(card, &Stroke::solid(BORDER_COLOR, BORDER_WIDTH))?;

        let mut cursor = card.y + config.card_top_padding;

        if config.has_event_name() {
            let style = TextStyle::regular(EVENT_NAME_SIZE, EVENT_NAME_COLOR);
            draw_centered(surface, &config.event_name, card, cursor, &style, 0.0)?;
            cursor += EVENT_NAME_ADVANCE;
        }
        if config.has_event_date() {
            let style = TextStyle::regular(EVENT_DATE_SIZE, EVENT_DATE_COLOR);
            draw_centered(surface, &config.event_date, card, cursor, &style, 0.0)?;
            cursor += EVENT_DATE_ADVANCE;
        }

        let logo = match self.logo {
            Some(logo) if logo.aspect_ratio > 0.0 && logo.aspect_ratio.is_finite() => {
                let width = LOGO_MAX_WIDTH.min(card.width * LOGO_WIDTH_RATIO);
                let height = width / logo.aspect_ratio;
                let rect = Rect::new(card.center_x_for(width), cursor, width, height);
                surface.draw_image(logo.image, rect)?;
                cursor += height + config.logo_spacing;
                Some(rect)
            }
            _ => {
                cursor += NO_LOGO_ADVANCE;
                None
            }
        };

        let code = Rect::new(card.center_x_for(self.qr_size), cursor, self.qr_size, self.qr_size);
        surface.draw_image(content.code_image, code)?;

        let label_y = code.bottom() + config.number_spacing;
        let label_style = TextStyle::regular(config.label_font_size, Color::BLACK);
        draw_centered(surface, content.label, card, label_y, &label_style, 0.0)?;

        let mut url_line_ys = Vec::new();
        match display_lines(content.url, config.url_display_style) {
            DisplayLines::Hidden => {}
            DisplayLines::Truncated(text) => {
                let y = label_y + TRUNCATED_OFFSET;
                let style = TextStyle::regular(TRUNCATED_SIZE, TRUNCATED_COLOR);
                draw_centered(surface, &text, card, y, &style, TRUNCATED_LINE_GAP)?;
                url_line_ys.push(y);
            }
            DisplayLines::Full(split) => {
                let line1_y = label_y + FULL_LINE1_OFFSET;
                let style = TextStyle::regular(FULL_LINE1_SIZE, FULL_LINE1_COLOR);
                draw_centered(surface, &split.line1, card, line1_y, &style, 0.0)?;
                url_line_ys.push(line1_y);

                if !split.line2.is_empty() {
                    let line2_y = line1_y + FULL_LINE2_OFFSET;
                    let style = TextStyle::bold(FULL_LINE2_SIZE, Color::BLACK);
                    draw_centered(surface, &split.line2, card, line2_y, &style, 0.0)?;
                    url_line_ys.push(line2_y);
                }
            }
        }

        Ok(CardLayout {
            border: card,
            logo,
            code,
            label_y,
            url_line_ys,
        })
    }
}

/// Draws `text` centered within the width of `bounds`, starting at `y` and
/// wrapping onto further lines when it does not fit. Returns the line count.
fn draw_centered<S>(
    surface: &mut S,
    text: &str,
    bounds: Rect,
    y: f32,
    style: &TextStyle,
    line_gap: f32,
) -> Result<usize, RenderError>
where
    S: DrawingSurface + ?Sized,
{
    let lines = wrap_text(text, style.font, style.size, bounds.width);
    let advance = style.size * LINE_HEIGHT + line_gap;
    for (i, line) in lines.iter().enumerate() {
        let width = text_width(line, style.font, style.size);
        let origin = Point::new(bounds.center_x_for(width), y + i as f32 * advance);
        surface.draw_text(line, origin, style)?;
    }
    Ok(lines.len())
}
