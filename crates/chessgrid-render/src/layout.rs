//! Grid geometry: columns, rows, diagram edge length and row heights per page.
//!
//! Pure arithmetic over the frame size and caption measurements; no drawing happens here.

use crate::config::{ColumnThresholds, Padding};
use crate::text::{TextMeasurer, TextStyle};
use crate::{Error, Result};
use std::ops::Range;

/// Diagrams never shrink below this edge length, whatever the page geometry.
pub const MIN_DIAGRAM_SIZE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParams {
    pub diagrams_per_page: usize,
    pub thresholds: ColumnThresholds,
    pub frame_width: f64,
    pub frame_height: f64,
    pub padding: Padding,
    pub default_diagram_size: f64,
    pub horizontal_margin: f64,
    pub caption_gap: f64,
    /// Height taken on the first page by the title and the spacer below it; `0` without one.
    pub title_block_height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridPlan {
    pub columns: usize,
    pub rows_per_page: usize,
    pub column_width: f64,
    pub pages: Vec<PagePlan>,
}

impl GridPlan {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    /// Entry indices placed on this page.
    pub range: Range<usize>,
    /// Rows the page's table actually uses.
    pub rows: usize,
    pub available_height: f64,
    /// Tallest wrapped caption among the page's entries; `0` when none has one.
    pub caption_height: f64,
    pub has_captions: bool,
    /// Set when captions are too tall for a row and must be cut to this many lines.
    pub max_caption_lines: Option<usize>,
    pub diagram_size: f64,
    pub row_height: f64,
}

impl PagePlan {
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

pub fn rows_per_page(diagrams_per_page: usize, columns: usize) -> usize {
    diagrams_per_page.div_ceil(columns.max(1))
}

pub fn page_count(entries: usize, diagrams_per_page: usize) -> usize {
    entries.div_ceil(diagrams_per_page.max(1))
}

/// Edge length for every diagram on a page.
///
/// The result is the smallest of the default size, the column width less the horizontal margin
/// and the per-row share of the available height less captions, the caption gap and vertical
/// padding. The caption gap is subtracted even when no entry has a caption.
pub fn diagram_size(
    params: &GridParams,
    column_width: f64,
    rows_per_page: usize,
    available_height: f64,
    caption_height: f64,
) -> f64 {
    let per_row = available_height / rows_per_page.max(1) as f64;
    let vertical = per_row - caption_height - params.caption_gap - params.padding.vertical();
    let size = params
        .default_diagram_size
        .min(column_width - params.horizontal_margin)
        .min(vertical);
    if size.is_nan() || size < MIN_DIAGRAM_SIZE {
        tracing::warn!(
            computed = size,
            min = MIN_DIAGRAM_SIZE,
            "page too small for the requested grid; clamping diagram size"
        );
        return MIN_DIAGRAM_SIZE;
    }
    size
}

/// Plans the whole grid. `captions[i]` is the caption of entry `i`, if any.
pub fn plan_grid<M: TextMeasurer + ?Sized>(
    captions: &[Option<&str>],
    params: &GridParams,
    caption_style: &TextStyle,
    measurer: &M,
) -> Result<GridPlan> {
    let dpp = params.diagrams_per_page;
    if dpp == 0 {
        return Err(Error::InvalidOptions {
            message: "diagrams_per_page must be at least 1".to_string(),
        });
    }
    let columns = params.thresholds.columns_for(dpp);
    let rows_per_page = rows_per_page(dpp, columns);
    let column_width = params.frame_width / columns as f64;
    let caption_width = (column_width - params.padding.horizontal()).max(1.0);

    tracing::debug!(
        entries = captions.len(),
        diagrams_per_page = dpp,
        columns,
        rows_per_page,
        column_width,
        "planning grid"
    );

    let mut pages = Vec::with_capacity(page_count(captions.len(), dpp));
    let mut start = 0usize;
    while start < captions.len() {
        let end = (start + dpp).min(captions.len());
        let group = &captions[start..end];

        let mut caption_height = group
            .iter()
            .flatten()
            .map(|text| {
                measurer
                    .measure_wrapped(text, caption_style, Some(caption_width))
                    .height
            })
            .fold(0.0, f64::max);
        let has_captions = group.iter().any(Option::is_some);

        let mut available_height = params.frame_height;
        if pages.is_empty() {
            available_height -= params.title_block_height;
        }

        // Captions may not push a row past its share of the page.
        let mut max_caption_lines = None;
        let caption_room = available_height / rows_per_page as f64
            - params.caption_gap
            - params.padding.vertical()
            - MIN_DIAGRAM_SIZE;
        if caption_height > caption_room {
            let line_height = caption_style.line_height();
            let lines = (caption_room.max(0.0) / line_height).floor() as usize;
            tracing::warn!(
                page = pages.len() + 1,
                measured = caption_height,
                max_lines = lines,
                "captions too tall for the row; truncating"
            );
            caption_height = lines as f64 * line_height;
            max_caption_lines = Some(lines);
        }

        let size = diagram_size(
            params,
            column_width,
            rows_per_page,
            available_height,
            caption_height,
        );
        let mut row_height = params.padding.top + size + params.padding.bottom;
        if has_captions {
            row_height += params.caption_gap + caption_height;
        }

        let page = PagePlan {
            range: start..end,
            rows: group.len().div_ceil(columns),
            available_height,
            caption_height,
            has_captions,
            max_caption_lines,
            diagram_size: size,
            row_height,
        };
        tracing::debug!(
            page = pages.len() + 1,
            diagrams = page.len(),
            rows = page.rows,
            diagram_size = size,
            row_height,
            "planned page"
        );
        pages.push(page);
        start = end;
    }

    Ok(GridPlan {
        columns,
        rows_per_page,
        column_width,
        pages,
    })
}
