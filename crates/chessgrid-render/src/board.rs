//! Board diagrams as SVG fragments.

mod glyphs;

use crate::Result;
use crate::config::BoardColors;
use crate::svg::{escape_xml, num};
use chessgrid_core::{Color, Position};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

pub const SQUARE_SIZE: f64 = 45.0;
/// Width of the frame around the squares when coordinates or a turn indicator are drawn.
pub const MARGIN: f64 = 15.0;

const COORDINATE_FONT_SIZE: f64 = 10.0;
const INDICATOR_RADIUS: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardStyle {
    pub colors: BoardColors,
    pub coordinates: bool,
    pub turn_indicator: bool,
    /// Black at the bottom.
    pub flipped: bool,
    /// Thin outline around the squares.
    pub border: bool,
    /// Natural edge length of the drawing.
    pub size: f64,
}

impl Default for BoardStyle {
    fn default() -> Self {
        Self {
            colors: BoardColors::default(),
            coordinates: true,
            turn_indicator: false,
            flipped: false,
            border: true,
            size: 390.0,
        }
    }
}

impl BoardStyle {
    pub fn margin(&self) -> f64 {
        if self.coordinates || self.turn_indicator {
            MARGIN
        } else {
            0.0
        }
    }

    /// Edge of the drawing's own coordinate space.
    pub fn view_size(&self) -> f64 {
        8.0 * SQUARE_SIZE + 2.0 * self.margin()
    }
}

/// A rendered board: SVG content in a `view_size` square coordinate space, meant to be shown at
/// `width x height`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardDrawing {
    pub width: f64,
    pub height: f64,
    pub view_size: f64,
    pub body: String,
}

impl BoardDrawing {
    pub fn to_svg_document(&self) -> String {
        let mut out = String::with_capacity(self.body.len() + 160);
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {v} {v}">"#,
            num(self.width),
            num(self.height),
            v = num(self.view_size)
        );
        out.push_str(&self.body);
        out.push_str("</svg>");
        out
    }

    /// Appends the drawing as a nested `<svg>` scaled to a `size x size` box at `(x, y)`.
    pub fn write_embedded(&self, out: &mut String, x: f64, y: f64, size: f64) {
        let _ = write!(
            out,
            r#"<svg x="{}" y="{}" width="{s}" height="{s}" viewBox="0 0 {v} {v}">"#,
            num(x),
            num(y),
            s = num(size),
            v = num(self.view_size)
        );
        out.push_str(&self.body);
        out.push_str("</svg>");
    }
}

pub trait BoardRenderer {
    fn render(&self, fen: &str, style: &BoardStyle) -> Result<BoardDrawing>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SvgBoardRenderer;

impl SvgBoardRenderer {
    pub fn draw(&self, position: &Position, style: &BoardStyle) -> BoardDrawing {
        let margin = style.margin();
        let view = style.view_size();
        let board = 8.0 * SQUARE_SIZE;
        let colors = &style.colors;
        let mut body = String::with_capacity(8 * 1024);

        if margin > 0.0 {
            let _ = write!(
                body,
                r#"<rect x="0" y="0" width="{v}" height="{v}" fill="{}"/>"#,
                escape_xml(&colors.border),
                v = num(view)
            );
        }
        let _ = write!(
            body,
            r#"<rect x="{m}" y="{m}" width="{b}" height="{b}" fill="{}"/>"#,
            escape_xml(&colors.light),
            m = num(margin),
            b = num(board)
        );
        for rank in 0..8u8 {
            for file in 0..8u8 {
                if (file + rank) % 2 != 0 {
                    continue;
                }
                let (x, y) = square_origin(file, rank, style.flipped, margin);
                let _ = write!(
                    body,
                    r#"<rect x="{}" y="{}" width="{s}" height="{s}" fill="{}"/>"#,
                    num(x),
                    num(y),
                    escape_xml(&colors.dark),
                    s = num(SQUARE_SIZE)
                );
            }
        }
        if style.border {
            let _ = write!(
                body,
                r#"<rect x="{m}" y="{m}" width="{b}" height="{b}" fill="none" stroke="{}" stroke-width="1"/>"#,
                escape_xml(&colors.border),
                m = num(margin),
                b = num(board)
            );
        }

        if style.coordinates {
            write_coordinates(&mut body, style, margin, view);
        }

        for (square, piece) in position.pieces() {
            let (x, y) = square_origin(square.file(), square.rank(), style.flipped, margin);
            glyphs::write_piece(&mut body, piece, x, y, SQUARE_SIZE);
        }

        if style.turn_indicator {
            let bottom = if style.flipped {
                Color::Black
            } else {
                Color::White
            };
            let cy = if position.side_to_move() == bottom {
                view - margin / 2.0
            } else {
                margin / 2.0
            };
            let fill = match position.side_to_move() {
                Color::White => "#ffffff",
                Color::Black => "#000000",
            };
            let _ = write!(
                body,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{fill}" stroke="{}" stroke-width="1"/>"#,
                num(view - margin / 2.0),
                num(cy),
                num(INDICATOR_RADIUS),
                escape_xml(&colors.coordinates)
            );
        }

        BoardDrawing {
            width: style.size,
            height: style.size,
            view_size: view,
            body,
        }
    }
}

impl BoardRenderer for SvgBoardRenderer {
    fn render(&self, fen: &str, style: &BoardStyle) -> Result<BoardDrawing> {
        let position = Position::from_fen(fen)?;
        tracing::trace!(fen, pieces = position.pieces().count(), "drawing board");
        Ok(self.draw(&position, style))
    }
}

/// Top-left corner of a square in drawing coordinates.
pub fn square_origin(file: u8, rank: u8, flipped: bool, margin: f64) -> (f64, f64) {
    let (col, row) = if flipped {
        (7 - file, rank)
    } else {
        (file, 7 - rank)
    };
    (
        margin + col as f64 * SQUARE_SIZE,
        margin + row as f64 * SQUARE_SIZE,
    )
}

fn write_coordinates(out: &mut String, style: &BoardStyle, margin: f64, view: f64) {
    let baseline_shift = COORDINATE_FONT_SIZE * 0.35;
    let _ = write!(
        out,
        r#"<g font-family="Helvetica, Arial, sans-serif" font-size="{}" fill="{}" text-anchor="middle">"#,
        num(COORDINATE_FONT_SIZE),
        escape_xml(&style.colors.coordinates)
    );
    for i in 0..8u8 {
        // File i and rank i share one square, which gives both label positions.
        let (x, y) = square_origin(i, i, style.flipped, margin);
        let file = char::from(b'a' + i);
        let rank = char::from(b'1' + i);
        let cx = x + SQUARE_SIZE / 2.0;
        let cy = y + SQUARE_SIZE / 2.0;
        for label_y in [margin / 2.0, view - margin / 2.0] {
            let _ = write!(
                out,
                r#"<text x="{}" y="{}">{file}</text>"#,
                num(cx),
                num(label_y + baseline_shift)
            );
        }
        for label_x in [margin / 2.0, view - margin / 2.0] {
            let _ = write!(
                out,
                r#"<text x="{}" y="{}">{rank}</text>"#,
                num(label_x),
                num(cy + baseline_shift)
            );
        }
    }
    out.push_str("</g>");
}
