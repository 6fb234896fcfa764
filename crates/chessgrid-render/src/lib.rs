#![forbid(unsafe_code)]

//! Headless board rendering and paginated grid layout.
//!
//! The pipeline is: [`grid::build_story`] plans the grid ([`layout`]), renders each board
//! ([`board`]) and emits flowables; [`grid::render_pages`] lays those flowables out onto pages
//! ([`document`]) and returns one SVG document per page. PDF assembly lives in the `chessgrid`
//! facade crate.

pub mod board;
pub mod config;
pub mod document;
pub mod grid;
pub mod layout;
pub mod svg;
pub mod text;

pub use board::{BoardDrawing, BoardRenderer, BoardStyle, SvgBoardRenderer};
pub use config::{BoardColors, ColumnThresholds, LayoutConfig, Padding, PageSize};
pub use grid::{
    GridOptions, GridStory, PositionFailure, RenderFailurePolicy, build_story, render_pages,
};
pub use layout::{GridPlan, PagePlan};
pub use text::{DeterministicTextMeasurer, TextMeasurer, TextMetrics, TextStyle};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fen(#[from] chessgrid_core::FenError),
    #[error("invalid layout options: {message}")]
    InvalidOptions { message: String },
    #[error("failed to render position {index} ({fen:?}): {message}")]
    RenderFailed {
        index: usize,
        fen: String,
        message: String,
    },
    #[error("configuration JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
