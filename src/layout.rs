//! Page and card geometry, and row-major pagination.
//!
//! All coordinates are points with the origin at the top-left of the page.

use crate::config::GeneratorConfig;
use refcards_types::{Point, Rect, Size};
use std::ops::Range;

/// Blank border on every side of the page.
pub const PAGE_MARGIN: f32 = 20.0;
/// Trimmed from the content area before it is divided into grid cells.
pub const GRID_INSET: f32 = 20.0;
/// Gap between neighbouring card boxes; each card gives up half on every side.
pub const CARD_SPACING: f32 = 10.0;

/// Geometry shared by every page of a job, derived once from the config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardGeometry {
    pub page_size: Size,
    /// Page size minus the margins.
    pub content_size: Size,
    pub card_width: f32,
    pub card_height: f32,
    pub qr_size: f32,
    pub cols: u32,
    pub rows: u32,
}

impl CardGeometry {
    pub fn new(config: &GeneratorConfig) -> Self {
        let page_size = config.paper_size.dimensions_pt();
        let content_size = page_size.deflate(PAGE_MARGIN);
        let cols = config.grid_cols.max(1);
        let rows = config.grid_rows.max(1);
        let card_width = (content_size.width - GRID_INSET) / cols as f32;
        let card_height = (content_size.height - GRID_INSET) / rows as f32;
        let qr_size =
            (card_width * config.qr_width_ratio).min(card_height * config.qr_height_ratio);

        Self {
            page_size,
            content_size,
            card_width,
            card_height,
            qr_size,
            cols,
            rows,
        }
    }

    pub fn cards_per_page(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Grid position of the `slot`-th card on a page, filled left to right,
    /// top to bottom.
    pub fn cell_of(&self, slot: usize) -> (u32, u32) {
        let cols = self.cols as usize;
        ((slot / cols) as u32, (slot % cols) as u32)
    }

    /// The full grid cell at `row`, `col`.
    pub fn cell_rect(&self, row: u32, col: u32) -> Rect {
        Rect::new(
            PAGE_MARGIN + col as f32 * self.card_width,
            PAGE_MARGIN + row as f32 * self.card_height,
            self.card_width,
            self.card_height,
        )
    }

    /// The bordered card box inside a cell.
    pub fn card_rect(&self, row: u32, col: u32) -> Rect {
        let cell = self.cell_rect(row, col);
        Rect::new(
            cell.x + CARD_SPACING / 2.0,
            cell.y + CARD_SPACING / 2.0,
            cell.width - CARD_SPACING,
            cell.height - CARD_SPACING,
        )
    }

    /// Dashed cut lines at every interior column and row boundary.
    ///
    /// Vertical lines span the full content height and horizontal lines the
    /// full content width, independent of how many cards the page holds.
    pub fn separators(&self) -> Vec<(Point, Point)> {
        let top = PAGE_MARGIN;
        let bottom = PAGE_MARGIN + self.content_size.height;
        let left = PAGE_MARGIN;
        let right = PAGE_MARGIN + self.content_size.width;

        let vertical = (1..self.cols).map(|col| {
            let x = PAGE_MARGIN + col as f32 * self.card_width;
            (Point::new(x, top), Point::new(x, bottom))
        });
        let horizontal = (1..self.rows).map(|row| {
            let y = PAGE_MARGIN + row as f32 * self.card_height;
            (Point::new(left, y), Point::new(right, y))
        });
        vertical.chain(horizontal).collect()
    }
}

/// `ceil(total / per_page)`; zero when either side is zero.
pub fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

/// The cards that land on one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePlan {
    pub page_index: usize,
    /// Indices into the job's ordered card list.
    pub cards: Range<usize>,
}

impl PagePlan {
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Splits `total` cards into consecutive full pages plus an optional partial
/// last page. No reflow, no skipped cells.
pub fn paginate(total: usize, per_page: usize) -> Vec<PagePlan> {
    (0..page_count(total, per_page))
        .map(|page_index| {
            let start = page_index * per_page;
            PagePlan {
                page_index,
                cards: start..(start + per_page).min(total),
            }
        })
        .collect()
}
