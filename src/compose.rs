//! Page composition: separators, row-major card placement and statistics.

use crate::assets::Logo;
use crate::card::{CardContent, CardRenderer, LogoPlacement};
use crate::config::{GeneratorConfig, format_card_label};
use crate::layout::{CardGeometry, paginate};
use crate::links::LinkRecord;
use refcards_render_core::{DashPattern, DrawingSurface, RenderError, Stroke};
use refcards_types::{Color, Raster};
use serde::Serialize;

const SEPARATOR_COLOR: Color = Color::gray(0xCC);
const SEPARATOR_WIDTH: f32 = 0.5;
const SEPARATOR_DASH: f32 = 3.0;

/// A link together with its encoded raster.
#[derive(Debug, Clone)]
pub struct EncodedCode {
    pub record: LinkRecord,
    pub raster: Raster,
}

/// Summary of a finished job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStats {
    pub total_codes: usize,
    pub total_pages: usize,
    pub cards_per_page: usize,
}

/// Lays out encoded codes onto pages of a drawing surface.
pub struct PageCompositor<'a> {
    config: &'a GeneratorConfig,
    geometry: CardGeometry,
}

impl<'a> PageCompositor<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            geometry: CardGeometry::new(config),
        }
    }

    pub fn geometry(&self) -> &CardGeometry {
        &self.geometry
    }

    /// Draws every code, in order, filling each page's grid row by row.
    ///
    /// `on_page` is called after each page with the number of cards placed so
    /// far.
    pub fn compose<S, F>(
        &self,
        surface: &mut S,
        codes: &[EncodedCode],
        logo: Option<&Logo>,
        mut on_page: F,
    ) -> Result<GenerationStats, RenderError>
    where
        S: DrawingSurface + ?Sized,
        F: FnMut(usize),
    {
        let geometry = &self.geometry;
        let cards_per_page = geometry.cards_per_page();

        let logo = match logo {
            Some(logo) => Some(LogoPlacement {
                image: surface.register_image(logo.raster())?,
                aspect_ratio: logo.aspect_ratio(),
            }),
            None => None,
        };
        let renderer = CardRenderer::new(self.config, geometry.qr_size, logo);
        let separator = Stroke::dashed(
            SEPARATOR_COLOR,
            SEPARATOR_WIDTH,
            DashPattern::new(SEPARATOR_DASH, SEPARATOR_DASH),
        );

        let pages = paginate(codes.len(), cards_per_page);
        for page in &pages {
            surface.begin_page(geometry.page_size)?;
            for (from, to) in geometry.separators() {
                surface.stroke_line(from, to, &separator)?;
            }

            for (slot, code) in codes[page.cards.clone()].iter().enumerate() {
                let (row, col) = geometry.cell_of(slot);
                let code_image = surface.register_image(&code.raster)?;
                let label = format_card_label(&code.record.code_number, self.config);
                let content = CardContent {
                    label: &label,
                    url: &code.record.url,
                    code_image,
                };
                renderer.render(surface, geometry.card_rect(row, col), &content)?;
            }

            log::debug!(
                "Composed page {} with {} cards",
                page.page_index + 1,
                page.len()
            );
            on_page(page.cards.end);
        }

        Ok(GenerationStats {
            total_codes: codes.len(),
            total_pages: pages.len(),
            cards_per_page,
        })
    }
}
