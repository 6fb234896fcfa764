#![forbid(unsafe_code)]

use crate::render::{BoardRenderer, BoardStyle, SvgBoardRenderer};

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error(transparent)]
    Render(#[from] chessgrid_render::Error),
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    pub scale: f32,
    pub background: Option<String>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
        }
    }
}

/// Renders one board to PNG at `style.size * options.scale` pixels.
pub fn board_to_png(fen: &str, style: &BoardStyle, options: &RasterOptions) -> Result<Vec<u8>> {
    let svg = SvgBoardRenderer.render(fen, style)?.to_svg_document();
    svg_to_png(&svg, options)
}

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let pixmap = svg_to_pixmap(svg, options.scale, options.background.as_deref())?;
    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

fn svg_to_pixmap(svg: &str, scale: f32, background: Option<&str>) -> Result<tiny_skia::Pixmap> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "Arial".to_string();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;
    let size = tree.size();
    let width_px = (size.width() * scale).ceil().max(1.0) as u32;
    let height_px = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px).ok_or(RasterError::PixmapAlloc)?;
    if let Some(color) = background.and_then(parse_tiny_skia_color) {
        pixmap.fill(color);
    }

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

fn parse_tiny_skia_color(text: &str) -> Option<tiny_skia::Color> {
    let s = text.trim().to_ascii_lowercase();
    match s.as_str() {
        "transparent" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 0)),
        "white" => return Some(tiny_skia::Color::from_rgba8(255, 255, 255, 255)),
        "black" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 255)),
        _ => {}
    }

    let hex = s.strip_prefix('#')?;
    fn hex2(b: &[u8]) -> Option<u8> {
        let hi = (*b.first()? as char).to_digit(16)? as u8;
        let lo = (*b.get(1)? as char).to_digit(16)? as u8;
        Some((hi << 4) | lo)
    }
    fn hex1(c: u8) -> Option<u8> {
        let v = (c as char).to_digit(16)? as u8;
        Some((v << 4) | v)
    }

    let bytes = hex.as_bytes();
    let (r, g, b, a) = match bytes.len() {
        3 => (hex1(bytes[0])?, hex1(bytes[1])?, hex1(bytes[2])?, 255),
        6 => (
            hex2(&bytes[0..2])?,
            hex2(&bytes[2..4])?,
            hex2(&bytes[4..6])?,
            255,
        ),
        8 => (
            hex2(&bytes[0..2])?,
            hex2(&bytes[2..4])?,
            hex2(&bytes[4..6])?,
            hex2(&bytes[6..8])?,
        ),
        _ => return None,
    };
    Some(tiny_skia::Color::from_rgba8(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_png_has_png_signature_and_scaled_size() {
        let bytes = board_to_png(
            chessgrid_core::STARTING_FEN,
            &BoardStyle::default(),
            &RasterOptions {
                scale: 0.5,
                background: Some("white".to_string()),
            },
        )
        .unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
        // IHDR width/height follow the 8-byte signature and the 8-byte chunk header.
        let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        assert_eq!(width, 195);
    }

    #[test]
    fn invalid_fen_is_a_render_error() {
        let err = board_to_png("8/8", &BoardStyle::default(), &RasterOptions::default())
            .unwrap_err();
        assert!(matches!(err, RasterError::Render(_)));
    }

    #[test]
    fn parses_hex_colours() {
        let c = parse_tiny_skia_color("#f0d9b5").unwrap();
        assert_eq!(c.to_color_u8().red(), 0xf0);
        assert!(parse_tiny_skia_color("#12").is_none());
        assert!(parse_tiny_skia_color("papayawhip").is_none());
    }
}
