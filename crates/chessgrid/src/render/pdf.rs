#![forbid(unsafe_code)]

use crate::render::{
    BoardRenderer, DeterministicTextMeasurer, GridOptions, LayoutConfig, PageSize,
    PositionFailure, SvgBoardRenderer, TextMeasurer,
};
use chessgrid_core::PositionEntry;
use pdf_writer::{Content, Name, Pdf, Rect, Ref, TextStr};
use std::collections::HashMap;

const PAGE_XOBJECT: Name<'static> = Name(b"Pg");

#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error(transparent)]
    Render(#[from] chessgrid_render::Error),
    #[error("failed to parse SVG for page {page}")]
    SvgParse { page: usize },
    #[error("failed to convert page {page} to PDF")]
    PdfConvert { page: usize },
}

pub type Result<T> = std::result::Result<T, PdfError>;

#[derive(Debug, Clone)]
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    /// Positions that could not be rendered; empty on a clean run.
    pub failures: Vec<PositionFailure>,
}

/// Generates the diagram sheet for `entries` with the default board renderer and text measurer.
pub fn generate(
    entries: &[PositionEntry],
    options: &GridOptions,
    config: &LayoutConfig,
) -> Result<GeneratedPdf> {
    generate_with(
        entries,
        options,
        config,
        &SvgBoardRenderer,
        &DeterministicTextMeasurer::default(),
    )
}

pub fn generate_with(
    entries: &[PositionEntry],
    options: &GridOptions,
    config: &LayoutConfig,
    renderer: &dyn BoardRenderer,
    measurer: &dyn TextMeasurer,
) -> Result<GeneratedPdf> {
    let story = chessgrid_render::build_story(entries, options, config, renderer, measurer)?;
    let pages = chessgrid_render::render_pages(&story, config, measurer);
    let bytes = assemble_pdf(&pages, config.page_size, options.title())?;
    tracing::info!(
        positions = entries.len(),
        pages = pages.len(),
        failures = story.failures.len(),
        bytes = bytes.len(),
        "generated PDF"
    );
    Ok(GeneratedPdf {
        bytes,
        page_count: pages.len(),
        failures: story.failures,
    })
}

fn usvg_options() -> svg2pdf::usvg::Options<'static> {
    let mut opt = svg2pdf::usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    // Keep output stable-ish across environments while still using system fonts.
    opt.font_family = "Arial".to_string();
    opt
}

/// Builds one PDF with a `page_size` page per SVG document in `pages`.
///
/// Each SVG is converted to a form XObject and stretched over its page, so the SVG canvas should
/// have the page's aspect ratio.
pub fn assemble_pdf(pages: &[String], page_size: PageSize, title: Option<&str>) -> Result<Vec<u8>> {
    let opt = usvg_options();
    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let page_tree_id = alloc.bump();
    let (w, h) = (page_size.width as f32, page_size.height as f32);

    let mut pdf = Pdf::new();
    let mut page_ids = Vec::with_capacity(pages.len());
    for (i, svg) in pages.iter().enumerate() {
        let page = i + 1;
        let tree = svg2pdf::usvg::Tree::from_str(svg, &opt)
            .map_err(|_| PdfError::SvgParse { page })?;
        let (chunk, svg_id) = svg2pdf::to_chunk(&tree, svg2pdf::ConversionOptions::default())
            .map_err(|_| PdfError::PdfConvert { page })?;

        let mut map = HashMap::new();
        let chunk = chunk.renumber(|old| *map.entry(old).or_insert_with(|| alloc.bump()));
        let svg_id = map
            .get(&svg_id)
            .copied()
            .ok_or(PdfError::PdfConvert { page })?;
        pdf.extend(&chunk);

        let page_id = alloc.bump();
        let content_id = alloc.bump();
        {
            let mut page = pdf.page(page_id);
            page.media_box(Rect::new(0.0, 0.0, w, h));
            page.parent(page_tree_id);
            page.contents(content_id);
            page.resources().x_objects().pair(PAGE_XOBJECT, svg_id);
        }

        let mut content = Content::new();
        content
            .save_state()
            .transform([w, 0.0, 0.0, h, 0.0, 0.0])
            .x_object(PAGE_XOBJECT)
            .restore_state();
        pdf.stream(content_id, &content.finish());
        page_ids.push(page_id);
        tracing::debug!(page, "page converted");
    }

    pdf.catalog(catalog_id).pages(page_tree_id);
    let count = page_ids.len() as i32;
    pdf.pages(page_tree_id).kids(page_ids).count(count);
    {
        let mut info = pdf.document_info(alloc.bump());
        info.producer(TextStr("chessgrid"));
        if let Some(title) = title {
            info.title(TextStr(title));
        }
    }
    Ok(pdf.finish())
}

/// Converts a single SVG document into a one-page PDF sized to the SVG.
pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let opt = usvg_options();
    let tree =
        svg2pdf::usvg::Tree::from_str(svg, &opt).map_err(|_| PdfError::SvgParse { page: 1 })?;
    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|_| PdfError::PdfConvert { page: 1 })
}

/// Counts `/Type /Page` objects (not `/Pages`) in an uncompressed page tree.
pub fn count_pages(bytes: &[u8]) -> usize {
    const NEEDLE: &[u8] = b"/Type /Page";
    bytes
        .windows(NEEDLE.len() + 1)
        .filter(|w| w.starts_with(NEEDLE) && w[NEEDLE.len()] != b's')
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><rect width="10" height="10" fill="black"/></svg>"#;

    #[test]
    fn svg_to_pdf_produces_pdf_signature() {
        let bytes = svg_to_pdf(SQUARE).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn assembles_one_page_per_svg() {
        let pages = vec![SQUARE.to_string(); 3];
        let bytes = assemble_pdf(&pages, PageSize::A4, Some("Study")).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(count_pages(&bytes), 3);
    }

    #[test]
    fn broken_svg_reports_its_page() {
        let pages = vec![SQUARE.to_string(), "<svg".to_string()];
        let err = assemble_pdf(&pages, PageSize::A4, None).unwrap_err();
        assert!(matches!(err, PdfError::SvgParse { page: 2 }));
    }
}
