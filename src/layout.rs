//! Physical page layout: one A4 landscape sheet holding four identical
//! notice copies in a 2×2 grid.
//!
//! All lengths are millimetres unless the field name says otherwise.

use serde::{Deserialize, Serialize};

use crate::error::{NoticeError, Result};
use crate::render_text::visible_text;
use crate::types::{FooterLine, NoticeContent};

/// A4 landscape.
pub const PAGE_WIDTH_MM: f64 = 297.0;
pub const PAGE_HEIGHT_MM: f64 = 210.0;

pub const GRID_ROWS: usize = 2;
pub const GRID_COLUMNS: usize = 2;
pub const COPIES_PER_PAGE: usize = GRID_ROWS * GRID_COLUMNS;

/// Bounds for manual font-size adjustment, in points.
pub const MIN_FONT_PT: u32 = 8;
pub const MAX_FONT_PT: u32 = 20;

/// Points removed from every font size in the compact variant.
pub const COMPACT_STEP_PT: u32 = 2;

/// Page geometry and scaling policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct LayoutConfig {
    /// Space between the sheet edge and the grid.
    pub margin_mm: f64,
    /// Space between neighbouring cells.
    pub gap_mm: f64,
    /// Inner padding of each bordered cell.
    pub cell_padding_mm: f64,
    /// Cell border width in CSS pixels.
    pub border_px: u32,
    /// Body length (visible characters) above which cells switch to the
    /// compact variant.
    pub long_text_threshold: usize,
    /// Keep cut guides when printing, not only on screen.
    pub cut_guides_in_print: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin_mm: 10.0,
            gap_mm: 20.0,
            cell_padding_mm: 3.0,
            border_px: 2,
            long_text_threshold: 200,
            cut_guides_in_print: true,
        }
    }
}

impl LayoutConfig {
    /// Reject geometry that leaves no room for the cells.
    pub fn validate(&self) -> Result<()> {
        let lengths = [self.margin_mm, self.gap_mm, self.cell_padding_mm];
        if lengths.iter().any(|mm| !mm.is_finite()) {
            return Err(NoticeError::Config(
                "margin, gap and padding must be finite numbers".into(),
            ));
        }
        if self.margin_mm < 0.0 || self.gap_mm < 0.0 || self.cell_padding_mm < 0.0 {
            return Err(NoticeError::Config(
                "margin, gap and padding must not be negative".into(),
            ));
        }
        let (width, height) = self.cell_size();
        if width <= 2.0 * self.cell_padding_mm || height <= 2.0 * self.cell_padding_mm {
            return Err(NoticeError::Config(format!(
                "margin {}mm and gap {}mm leave no room for the notice cells",
                self.margin_mm, self.gap_mm
            )));
        }
        Ok(())
    }

    /// Width and height of one grid cell.
    pub fn cell_size(&self) -> (f64, f64) {
        let width = (PAGE_WIDTH_MM - 2.0 * self.margin_mm - self.gap_mm) / GRID_COLUMNS as f64;
        let height = (PAGE_HEIGHT_MM - 2.0 * self.margin_mm - self.gap_mm) / GRID_ROWS as f64;
        (width, height)
    }
}

/// Which of the three font sizes to adjust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontKind {
    Base,
    Greeting,
    Footer,
}

/// Standard-variant font sizes in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    pub base: u32,
    pub greeting: u32,
    pub footer: u32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            base: 13,
            greeting: 14,
            footer: 12,
        }
    }
}

impl FontSizes {
    /// Nudge one size by `delta` points, clamped to
    /// [`MIN_FONT_PT`]..=[`MAX_FONT_PT`].
    pub fn adjust(&mut self, kind: FontKind, delta: i32) {
        let slot = match kind {
            FontKind::Base => &mut self.base,
            FontKind::Greeting => &mut self.greeting,
            FontKind::Footer => &mut self.footer,
        };
        let next = (*slot as i64 + delta as i64).clamp(MIN_FONT_PT as i64, MAX_FONT_PT as i64);
        *slot = next as u32;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Clamp every size into the allowed range.
    pub fn clamped(self) -> Self {
        Self {
            base: self.base.clamp(MIN_FONT_PT, MAX_FONT_PT),
            greeting: self.greeting.clamp(MIN_FONT_PT, MAX_FONT_PT),
            footer: self.footer.clamp(MIN_FONT_PT, MAX_FONT_PT),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleVariant {
    Standard,
    Compact,
}

/// Pick the style variant for a body paragraph. Binary policy keyed on the
/// number of visible characters, markup excluded.
pub fn select_variant(main_text: &str, threshold: usize) -> StyleVariant {
    if visible_text(main_text).chars().count() > threshold {
        StyleVariant::Compact
    } else {
        StyleVariant::Standard
    }
}

/// Resolved typography for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellStyle {
    pub variant: StyleVariant,
    pub base_pt: u32,
    pub greeting_pt: u32,
    pub footer_pt: u32,
    pub line_height: f32,
    pub greeting_line_height: f32,
    pub main_line_height: f32,
}

impl CellStyle {
    pub fn new(variant: StyleVariant, fonts: FontSizes) -> Self {
        let fonts = fonts.clamped();
        let shrink = |pt: u32| match variant {
            StyleVariant::Standard => pt,
            StyleVariant::Compact => pt.saturating_sub(COMPACT_STEP_PT).max(MIN_FONT_PT),
        };
        Self {
            variant,
            base_pt: shrink(fonts.base),
            greeting_pt: shrink(fonts.greeting),
            footer_pt: shrink(fonts.footer),
            line_height: 1.6,
            greeting_line_height: 1.4,
            main_line_height: match variant {
                StyleVariant::Standard => 1.8,
                StyleVariant::Compact => 1.6,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One copy of the notice inside its grid cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoticeCell {
    pub row: usize,
    pub column: usize,
    pub frame: Rect,
    pub style: CellStyle,
    pub greeting: String,
    pub main_text: String,
    pub footers: [FooterLine; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A trimming line across the sheet. Presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CutGuide {
    pub orientation: Orientation,
    /// Offset from the top (horizontal) or left (vertical) edge.
    pub position: f64,
    pub start: f64,
    pub end: f64,
}

/// Complete description of the printed sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageLayout {
    pub width: f64,
    pub height: f64,
    pub config: LayoutConfig,
    pub cells: Vec<NoticeCell>,
    pub cut_guides: [CutGuide; 2],
}

/// Lay four copies of `content` out on one sheet.
pub fn render_layout(content: &NoticeContent, config: &LayoutConfig, fonts: FontSizes) -> PageLayout {
    let (cell_width, cell_height) = config.cell_size();
    let footers = content.footers();

    let mut cells = Vec::with_capacity(COPIES_PER_PAGE);
    for row in 0..GRID_ROWS {
        for column in 0..GRID_COLUMNS {
            let variant = select_variant(&content.main_text, config.long_text_threshold);
            cells.push(NoticeCell {
                row,
                column,
                frame: Rect {
                    x: config.margin_mm + column as f64 * (cell_width + config.gap_mm),
                    y: config.margin_mm + row as f64 * (cell_height + config.gap_mm),
                    width: cell_width,
                    height: cell_height,
                },
                style: CellStyle::new(variant, fonts),
                greeting: content.greeting.clone(),
                main_text: content.main_text.clone(),
                footers: footers.clone(),
            });
        }
    }

    log::debug!(
        "laid out {} cells of {:.1}x{:.1}mm ({:?})",
        cells.len(),
        cell_width,
        cell_height,
        cells[0].style.variant
    );

    PageLayout {
        width: PAGE_WIDTH_MM,
        height: PAGE_HEIGHT_MM,
        config: config.clone(),
        cells,
        cut_guides: [
            CutGuide {
                orientation: Orientation::Horizontal,
                position: PAGE_HEIGHT_MM / 2.0,
                start: config.margin_mm,
                end: PAGE_WIDTH_MM - config.margin_mm,
            },
            CutGuide {
                orientation: Orientation::Vertical,
                position: PAGE_WIDTH_MM / 2.0,
                start: config.margin_mm,
                end: PAGE_HEIGHT_MM - config.margin_mm,
            },
        ],
    }
}
