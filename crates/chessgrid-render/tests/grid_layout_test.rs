use chessgrid_core::{PositionEntry, STARTING_FEN};
use chessgrid_render::document::{CellItem, Flowable, Table};
use chessgrid_render::layout::{
    GridParams, MIN_DIAGRAM_SIZE, page_count, plan_grid, rows_per_page,
};
use chessgrid_render::{
    DeterministicTextMeasurer, Error, GridOptions, LayoutConfig, RenderFailurePolicy,
    SvgBoardRenderer, build_story, render_pages,
};
use std::num::NonZeroUsize;

const ENDGAME: &str = "8/8/8/8/8/4k3/8/R7 w - - 0 1";

fn entries(n: usize) -> Vec<PositionEntry> {
    (0..n).map(|_| PositionEntry::new(ENDGAME)).collect()
}

fn options(dpp: usize) -> GridOptions {
    GridOptions {
        diagrams_per_page: NonZeroUsize::new(dpp),
        ..GridOptions::default()
    }
}

fn params(config: &LayoutConfig, dpp: usize) -> GridParams {
    GridParams {
        diagrams_per_page: dpp,
        thresholds: config.column_thresholds,
        frame_width: config.frame_width(),
        frame_height: config.frame_height(),
        padding: config.cell_padding,
        default_diagram_size: config.default_diagram_size,
        horizontal_margin: config.horizontal_margin,
        caption_gap: config.caption_gap,
        title_block_height: 0.0,
    }
}

fn tables(flowables: &[Flowable]) -> Vec<&Table> {
    flowables
        .iter()
        .filter_map(|f| match f {
            Flowable::Table(t) => Some(t),
            _ => None,
        })
        .collect()
}

#[test]
fn page_and_row_counts() {
    assert_eq!(page_count(0, 6), 0);
    assert_eq!(page_count(6, 6), 1);
    assert_eq!(page_count(7, 6), 2);
    assert_eq!(page_count(13, 4), 4);
    assert_eq!(rows_per_page(6, 2), 3);
    assert_eq!(rows_per_page(9, 3), 3);
    assert_eq!(rows_per_page(5, 2), 3);
}

#[test]
fn one_diagram_per_page_uses_the_default_size() {
    let config = LayoutConfig::default();
    let captions = vec![None; 3];
    let plan = plan_grid(
        &captions,
        &params(&config, 1),
        &config.caption_style,
        &DeterministicTextMeasurer::default(),
    )
    .unwrap();
    assert_eq!(plan.columns, 1);
    assert_eq!(plan.page_count(), 3);
    for page in &plan.pages {
        assert_eq!(page.len(), 1);
        assert_eq!(page.diagram_size, 300.0);
        assert_eq!(page.row_height, 310.0);
    }
}

#[test]
fn nine_positions_at_six_per_page() {
    let config = LayoutConfig::default();
    let captions = vec![None; 9];
    let plan = plan_grid(
        &captions,
        &params(&config, 6),
        &config.caption_style,
        &DeterministicTextMeasurer::default(),
    )
    .unwrap();
    assert_eq!(plan.columns, 2);
    assert_eq!(plan.rows_per_page, 3);
    assert_eq!(plan.page_count(), 2);
    assert_eq!(plan.pages[0].range, 0..6);
    assert_eq!(plan.pages[1].range, 6..9);
    assert_eq!(plan.pages[1].rows, 2);

    let expected = config.frame_width() / 2.0 - config.horizontal_margin;
    for page in &plan.pages {
        assert!(page.diagram_size <= 300.0);
        assert!((page.diagram_size - expected).abs() < 1e-9);
    }
}

#[test]
fn many_per_page_switches_to_three_columns() {
    let config = LayoutConfig::default();
    let captions = vec![None; 12];
    let plan = plan_grid(
        &captions,
        &params(&config, 12),
        &config.caption_style,
        &DeterministicTextMeasurer::default(),
    )
    .unwrap();
    assert_eq!(plan.columns, 3);
    assert_eq!(plan.rows_per_page, 4);
    let page = &plan.pages[0];
    let per_row = config.frame_height() / 4.0;
    assert!(page.row_height <= per_row + 1e-9);
}

#[test]
fn long_caption_raises_row_height_and_shrinks_diagrams() {
    let config = LayoutConfig::default();
    let measurer = DeterministicTextMeasurer::default();
    let long = "A very long annotation describing the critical moment of the game in enough \
                detail that it needs several lines when set in a narrow column of the grid";
    let plain = plan_grid(&[None, None], &params(&config, 6), &config.caption_style, &measurer)
        .unwrap();
    let captioned = plan_grid(
        &[Some(long), None],
        &params(&config, 6),
        &config.caption_style,
        &measurer,
    )
    .unwrap();

    let (a, b) = (&plain.pages[0], &captioned.pages[0]);
    assert!(b.caption_height >= 2.0 * config.caption_style.line_height());
    assert!(b.has_captions);
    assert!(b.diagram_size < a.diagram_size);
    assert!(
        (b.row_height - (10.0 + b.diagram_size + config.caption_gap + b.caption_height)).abs()
            < 1e-9
    );
}

#[test]
fn oversized_caption_is_truncated_to_keep_the_page_count() {
    let config = LayoutConfig::default();
    let measurer = DeterministicTextMeasurer::default();
    let essay = vec!["annotation"; 1200].join(" ");
    let entry = PositionEntry::with_description(ENDGAME, Some(essay));
    let opts = GridOptions {
        title: Some("My Positions".to_string()),
        ..options(1)
    };
    let story = build_story(&[entry], &opts, &config, &SvgBoardRenderer, &measurer).unwrap();

    let page = &story.plan.pages[0];
    let lines = page.max_caption_lines.expect("caption should be cut");
    assert!(lines > 0);
    assert_eq!(
        page.caption_height,
        lines as f64 * config.caption_style.line_height()
    );
    assert!(page.diagram_size >= MIN_DIAGRAM_SIZE);
    assert!(page.row_height <= page.available_height + 1e-6);

    let pages = render_pages(&story, &config, &measurer);
    assert_eq!(pages.len(), story.plan.page_count());
    assert_eq!(pages.len(), 1);
}

#[test]
fn title_only_reduces_the_first_page() {
    let config = LayoutConfig::default();
    let measurer = DeterministicTextMeasurer::default();
    let opts = GridOptions {
        title: Some("Endgame studies".to_string()),
        ..options(1)
    };
    let story = build_story(
        &entries(2),
        &opts,
        &config,
        &SvgBoardRenderer,
        &measurer,
    )
    .unwrap();
    let pages = &story.plan.pages;
    assert_eq!(pages.len(), 2);
    let title_block = config.title_style.line_height() + config.title_spacer;
    assert!((pages[0].available_height - (config.frame_height() - title_block)).abs() < 1e-9);
    assert_eq!(pages[1].available_height, config.frame_height());
    assert!(matches!(story.flowables[0], Flowable::Paragraph(_)));
    assert!(matches!(story.flowables[1], Flowable::Spacer(_)));
}

#[test]
fn blank_title_is_ignored() {
    let config = LayoutConfig::default();
    let opts = GridOptions {
        title: Some("   ".to_string()),
        ..options(1)
    };
    let story = build_story(
        &entries(1),
        &opts,
        &config,
        &SvgBoardRenderer,
        &DeterministicTextMeasurer::default(),
    )
    .unwrap();
    assert!(matches!(story.flowables[0], Flowable::Table(_)));
}

#[test]
fn invalid_position_leaves_a_blank_cell() {
    let config = LayoutConfig::default();
    let list = vec![
        PositionEntry::new(STARTING_FEN),
        PositionEntry::with_description("not a fen", Some("broken".to_string())),
        PositionEntry::new(ENDGAME),
    ];
    let story = build_story(
        &list,
        &options(3),
        &config,
        &SvgBoardRenderer,
        &DeterministicTextMeasurer::default(),
    )
    .unwrap();

    assert_eq!(story.failures.len(), 1);
    assert_eq!(story.failures[0].index, 1);
    assert_eq!(story.failures[0].fen, "not a fen");

    let tables = tables(&story.flowables);
    assert_eq!(tables.len(), 1);
    let rows = &tables[0].rows;
    assert_eq!(rows.len(), 2);
    assert!(matches!(rows[0][0].items[0], CellItem::Drawing { .. }));
    assert!(rows[0][1].is_empty());
    assert!(matches!(rows[1][0].items[0], CellItem::Drawing { .. }));
    assert!(rows[1][1].is_empty());
}

#[test]
fn placeholder_policy_keeps_the_caption() {
    let config = LayoutConfig::default();
    let list = vec![PositionEntry::with_description(
        "8/8/8",
        Some("unfinished".to_string()),
    )];
    let opts = GridOptions {
        on_render_failure: RenderFailurePolicy::Placeholder,
        ..options(1)
    };
    let story = build_story(
        &list,
        &opts,
        &config,
        &SvgBoardRenderer,
        &DeterministicTextMeasurer::default(),
    )
    .unwrap();
    let tables = tables(&story.flowables);
    let items = &tables[0].rows[0][0].items;
    assert!(matches!(items[0], CellItem::Placeholder { .. }));
    assert!(matches!(items.last(), Some(CellItem::Paragraph(_))));
}

#[test]
fn abort_policy_fails_the_document() {
    let config = LayoutConfig::default();
    let opts = GridOptions {
        on_render_failure: RenderFailurePolicy::Abort,
        ..options(2)
    };
    let list = vec![PositionEntry::new(ENDGAME), PositionEntry::new("xyz")];
    let err = build_story(
        &list,
        &opts,
        &config,
        &SvgBoardRenderer,
        &DeterministicTextMeasurer::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::RenderFailed { index: 1, .. }));
}

#[test]
fn empty_input_renders_one_blank_page() {
    let config = LayoutConfig::default();
    let measurer = DeterministicTextMeasurer::default();
    let story = build_story(
        &[],
        &GridOptions::default(),
        &config,
        &SvgBoardRenderer,
        &measurer,
    )
    .unwrap();
    assert_eq!(story.plan.page_count(), 0);
    assert!(story.flowables.is_empty());
    assert_eq!(render_pages(&story, &config, &measurer).len(), 1);
}

#[test]
fn pages_follow_the_plan_and_carry_numbers() {
    let config = LayoutConfig::default();
    let measurer = DeterministicTextMeasurer::default();
    let opts = GridOptions {
        show_page_numbers: true,
        title: Some("Puzzles".to_string()),
        ..options(6)
    };
    let story = build_story(&entries(9), &opts, &config, &SvgBoardRenderer, &measurer).unwrap();
    let pages = render_pages(&story, &config, &measurer);
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].matches("viewBox=\"0 0 390 390\"").count(), 6);
    assert_eq!(pages[1].matches("viewBox=\"0 0 390 390\"").count(), 3);
    assert!(pages[1].contains(">Page 2</text>"));
    assert!(pages[0].contains(">Puzzles</text>"));
    assert!(!pages[1].contains(">Puzzles</text>"));
}
