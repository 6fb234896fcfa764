//! Turns a list of positions into a paginated story of diagram grids.

use crate::board::{BoardRenderer, BoardStyle};
use crate::config::{BoardColors, ColumnThresholds, LayoutConfig, Padding};
use crate::document::{
    CellItem, DocTemplate, Flowable, PageDecorator, PageNumberFooter, Paragraph, Table, TableCell,
    TableStyle, VAlign,
};
use crate::layout::{GridParams, GridPlan, plan_grid};
use crate::text::TextMeasurer;
use crate::{Error, Result};
use chessgrid_core::PositionEntry;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// What to put in a cell whose position could not be rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFailurePolicy {
    /// Leave the cell empty.
    #[default]
    Blank,
    /// Draw an outlined box and keep the caption.
    Placeholder,
    /// Fail the whole document.
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionFailure {
    /// Index of the entry in the input list.
    pub index: usize,
    pub fen: String,
    pub message: String,
}

/// Per-call overrides on top of a [`LayoutConfig`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridOptions {
    pub diagrams_per_page: Option<NonZeroUsize>,
    pub padding: Option<Padding>,
    pub board_colors: Option<BoardColors>,
    pub column_thresholds: Option<ColumnThresholds>,
    pub title: Option<String>,
    pub show_coordinates: Option<bool>,
    pub show_turn_indicator: bool,
    pub show_page_numbers: bool,
    pub flipped: bool,
    pub on_render_failure: RenderFailurePolicy,
}

impl GridOptions {
    pub fn diagrams_per_page(&self, config: &LayoutConfig) -> usize {
        self.diagrams_per_page
            .map(NonZeroUsize::get)
            .unwrap_or(config.default_diagrams_per_page)
    }

    /// Title text, if a non-blank one was given.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    pub fn board_style(&self, config: &LayoutConfig) -> BoardStyle {
        BoardStyle {
            colors: self
                .board_colors
                .clone()
                .unwrap_or_else(|| config.board_colors.clone()),
            coordinates: self.show_coordinates.unwrap_or(config.show_coordinates),
            turn_indicator: self.show_turn_indicator,
            flipped: self.flipped,
            border: true,
            size: config.board_size,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridStory {
    pub flowables: Vec<Flowable>,
    pub plan: GridPlan,
    pub failures: Vec<PositionFailure>,
    pub show_page_numbers: bool,
}

/// Plans the grid, renders every board and assembles the story.
///
/// Failed renders are recorded in [`GridStory::failures`] and handled per
/// [`GridOptions::on_render_failure`]; the remaining cells are unaffected.
pub fn build_story(
    entries: &[PositionEntry],
    options: &GridOptions,
    config: &LayoutConfig,
    renderer: &dyn BoardRenderer,
    measurer: &dyn TextMeasurer,
) -> Result<GridStory> {
    let dpp = options.diagrams_per_page(config);
    if dpp == 0 {
        return Err(Error::InvalidOptions {
            message: "diagrams_per_page must be at least 1".to_string(),
        });
    }
    let padding = options.padding.unwrap_or(config.cell_padding).sanitized();
    let frame = DocTemplate::from_config(config).frame();

    let mut flowables = Vec::new();
    let mut title_block_height = 0.0;
    if let Some(title) = options.title() {
        let paragraph = Paragraph::new(title, config.title_style.clone());
        title_block_height = paragraph.height(frame.width, measurer) + config.title_spacer;
        flowables.push(Flowable::Paragraph(paragraph));
        flowables.push(Flowable::Spacer(config.title_spacer));
    }

    let params = GridParams {
        diagrams_per_page: dpp,
        thresholds: options
            .column_thresholds
            .unwrap_or(config.column_thresholds),
        frame_width: frame.width,
        frame_height: frame.height,
        padding,
        default_diagram_size: config.default_diagram_size,
        horizontal_margin: config.horizontal_margin,
        caption_gap: config.caption_gap,
        title_block_height,
    };
    let captions = entries
        .iter()
        .map(PositionEntry::description)
        .collect::<Vec<_>>();
    let plan = plan_grid(&captions, &params, &config.caption_style, measurer)?;

    let style = options.board_style(config);
    let table_style = TableStyle {
        padding,
        valign: VAlign::Top,
        ..TableStyle::default()
    };
    let mut failures = Vec::new();

    for page in &plan.pages {
        let mut cells = Vec::with_capacity(page.len());
        for index in page.range.clone() {
            let entry = &entries[index];
            let mut items = Vec::new();
            let mut show_caption = true;
            match renderer.render(&entry.fen, &style) {
                Ok(drawing) => items.push(CellItem::Drawing {
                    drawing,
                    size: page.diagram_size,
                }),
                Err(err) => {
                    tracing::warn!(index, fen = %entry.fen, error = %err, "failed to render position");
                    let failure = PositionFailure {
                        index,
                        fen: entry.fen.clone(),
                        message: err.to_string(),
                    };
                    match options.on_render_failure {
                        RenderFailurePolicy::Abort => {
                            return Err(Error::RenderFailed {
                                index: failure.index,
                                fen: failure.fen,
                                message: failure.message,
                            });
                        }
                        RenderFailurePolicy::Placeholder => {
                            items.push(CellItem::Placeholder {
                                size: page.diagram_size,
                            });
                        }
                        RenderFailurePolicy::Blank => show_caption = false,
                    }
                    failures.push(failure);
                }
            }
            if let (true, Some(caption)) = (show_caption, entry.description()) {
                items.push(CellItem::Spacer(config.caption_gap));
                items.push(CellItem::Paragraph(
                    Paragraph::new(caption, config.caption_style.clone())
                        .with_max_lines(page.max_caption_lines),
                ));
            }
            cells.push(TableCell { items });
        }

        let mut rows = Vec::with_capacity(page.rows);
        let mut cells = cells.into_iter().peekable();
        while cells.peek().is_some() {
            let mut row = cells.by_ref().take(plan.columns).collect::<Vec<_>>();
            row.resize_with(plan.columns, TableCell::default);
            rows.push(row);
        }

        flowables.push(Flowable::Table(Table {
            col_widths: vec![plan.column_width; plan.columns],
            row_heights: vec![page.row_height; rows.len()],
            rows,
            style: table_style,
        }));
        flowables.push(Flowable::PageBreak);
    }
    if let Some(Flowable::PageBreak) = flowables.last() {
        flowables.pop();
    }

    tracing::debug!(
        pages = plan.page_count(),
        failures = failures.len(),
        "story assembled"
    );
    Ok(GridStory {
        flowables,
        plan,
        failures,
        show_page_numbers: options.show_page_numbers,
    })
}

/// Lays the story out on pages; returns one SVG document per page.
pub fn render_pages(
    story: &GridStory,
    config: &LayoutConfig,
    measurer: &dyn TextMeasurer,
) -> Vec<String> {
    let footer = PageNumberFooter::from_config(config);
    let mut decorators: Vec<&dyn PageDecorator> = Vec::new();
    if story.show_page_numbers {
        decorators.push(&footer);
    }
    DocTemplate::from_config(config).build(&story.flowables, &decorators, measurer)
}
