#![forbid(unsafe_code)]

//! `chessgrid` turns lists of chess positions (FEN plus an optional caption) into printable
//! diagram sheets: boards laid out in a grid, paginated, and written as a multi-page PDF.
//!
//! # Features
//!
//! - `render`: board SVG rendering and grid layout (`chessgrid::render`), request validation
//! - `pdf` (default): multi-page PDF output (`chessgrid::render::pdf`)
//! - `raster`: PNG output for single boards (`chessgrid::render::raster`)

pub use chessgrid_core::*;

#[cfg(feature = "render")]
pub mod request;

#[cfg(feature = "render")]
pub mod render {
    pub use chessgrid_render::board::{BoardDrawing, BoardRenderer, BoardStyle, SvgBoardRenderer};
    pub use chessgrid_render::config::{
        BoardColors, ColumnThresholds, LayoutConfig, Padding, PageSize,
    };
    pub use chessgrid_render::grid::{
        GridOptions, GridStory, PositionFailure, RenderFailurePolicy,
    };
    pub use chessgrid_render::layout::{GridPlan, PagePlan};
    pub use chessgrid_render::text::{DeterministicTextMeasurer, TextMeasurer, TextStyle};
    pub use chessgrid_render::{Error, Result};

    #[cfg(feature = "pdf")]
    pub mod pdf;
    #[cfg(feature = "raster")]
    pub mod raster;

    /// Renders a single board as a standalone SVG document.
    pub fn board_svg(fen: &str, style: &BoardStyle) -> Result<String> {
        Ok(SvgBoardRenderer.render(fen, style)?.to_svg_document())
    }

    /// Lays `entries` out and returns one SVG document per page, plus the positions that failed
    /// to render.
    pub fn render_page_svgs(
        entries: &[chessgrid_core::PositionEntry],
        options: &GridOptions,
        config: &LayoutConfig,
    ) -> Result<(Vec<String>, Vec<PositionFailure>)> {
        let measurer = DeterministicTextMeasurer::default();
        let story =
            chessgrid_render::build_story(entries, options, config, &SvgBoardRenderer, &measurer)?;
        let pages = chessgrid_render::render_pages(&story, config, &measurer);
        Ok((pages, story.failures))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn board_svg_is_a_document() {
            let svg = board_svg(chessgrid_core::STARTING_FEN, &BoardStyle::default()).unwrap();
            assert!(svg.starts_with("<svg xmlns="));
        }

        #[test]
        fn page_svgs_for_empty_input() {
            let (pages, failures) =
                render_page_svgs(&[], &GridOptions::default(), &LayoutConfig::default()).unwrap();
            assert_eq!(pages.len(), 1);
            assert!(failures.is_empty());
        }
    }
}
