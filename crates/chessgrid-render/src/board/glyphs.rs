//! Vector piece glyphs drawn on a 45x45 cell.
//!
//! Glyphs are emitted inline (no `id`/`<use>`) so several boards can share one page document.

use crate::svg::num;
use chessgrid_core::{Color, Piece, Role};
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy)]
enum Part {
    /// Closed shape filled with the piece colour and outlined.
    Body(&'static str),
    Disc(f64, f64, f64),
    /// Outline-coloured stroke with no fill.
    Stroke(&'static str),
    /// Contrast-coloured stroke drawn on top of the body.
    Detail(&'static str),
    /// Contrast-coloured dot.
    Dot(f64, f64, f64),
}

const PAWN: &[Part] = &[
    Part::Disc(22.5, 14.0, 5.5),
    Part::Body("M 17 21 C 17 19 28 19 28 21 L 30 31 L 15 31 Z"),
    Part::Body("M 11 37 L 11 34 C 11 32 13 31 15 31 L 30 31 C 32 31 34 32 34 34 L 34 37 Z"),
];

const KNIGHT: &[Part] = &[
    Part::Body("M 22 10 C 32.5 11 38.5 18 38 39 L 15 39 C 15 30 25 32.5 23 18"),
    Part::Body(
        "M 24 18 C 24.4 21 18.5 25.4 16 27 C 13 29 13.2 31.3 11 31 C 10 30 12.4 28 11 28 \
         C 10 28 11.2 29.2 10 30 C 9 30 6 31 6 26 C 6 24 12 14 12 14 C 12 14 13.9 12.1 14 10.5 \
         C 13.3 9.5 13.5 8.5 13.5 7.5 C 14.5 6.5 16.5 10 16.5 10 L 18.5 10 C 18.5 10 19.3 8 21 7 \
         C 22 7 22 10 22 10",
    ),
    Part::Dot(14.5, 15.5, 1.2),
    Part::Detail("M 9.5 25.5 L 8.5 25.5"),
];

const BISHOP: &[Part] = &[
    Part::Disc(22.5, 8.0, 2.5),
    Part::Body("M 22.5 10.5 C 16 14 14 21 17 27 L 28 27 C 31 21 29 14 22.5 10.5 Z"),
    Part::Body("M 15 27 L 30 27 L 30 31 L 15 31 Z"),
    Part::Body("M 10 37 L 12 32.5 L 33 32.5 L 35 37 Z"),
    Part::Detail("M 20 19.5 L 25 19.5 M 22.5 17 L 22.5 22"),
];

const ROOK: &[Part] = &[
    Part::Body(
        "M 11 9 L 16 9 L 16 12 L 20 12 L 20 9 L 25 9 L 25 12 L 29 12 L 29 9 L 34 9 L 34 15 \
         L 31 17 L 14 17 L 11 15 Z",
    ),
    Part::Body("M 14 17 L 31 17 L 30 30 L 15 30 Z"),
    Part::Body("M 9 37 L 9 33 L 12 30 L 33 30 L 36 33 L 36 37 Z"),
    Part::Detail("M 14.5 17.5 L 30.5 17.5 M 15 29.5 L 30 29.5"),
];

const QUEEN: &[Part] = &[
    Part::Disc(9.0, 13.0, 2.5),
    Part::Disc(15.5, 9.5, 2.5),
    Part::Disc(22.5, 8.5, 2.5),
    Part::Disc(29.5, 9.5, 2.5),
    Part::Disc(36.0, 13.0, 2.5),
    Part::Body(
        "M 9 26 C 17.5 24.5 30 24.5 36 26 L 38 14 L 31 25 L 31 11 L 25.5 24.5 L 22.5 9.5 \
         L 19.5 24.5 L 14 11 L 14 25 L 7 14 Z",
    ),
    Part::Body(
        "M 9 26 C 9 28 10.5 28 11.5 30 C 12.5 31.5 12.5 31 12 33.5 C 10.5 34.5 10.5 36 10.5 36 \
         C 9 37.5 11 38.5 11 38.5 C 17.5 39.5 27.5 39.5 34 38.5 C 34 38.5 35.5 37.5 34 36 \
         C 34 36 34.5 34.5 33 33.5 C 32.5 31 32.5 31.5 33.5 30 C 34.5 28 36 28 36 26 \
         C 27.5 24.5 17.5 24.5 9 26 Z",
    ),
    Part::Detail("M 11.5 30 C 15 29 30 29 33.5 30 M 12 33.5 C 18 32.5 27 32.5 33 33.5"),
];

const KING: &[Part] = &[
    Part::Stroke("M 22.5 11.6 L 22.5 6 M 20 8 L 25 8"),
    Part::Body(
        "M 22.5 25 C 22.5 25 27 17.5 25.5 14.5 C 25.5 14.5 24.5 12 22.5 12 \
         C 20.5 12 19.5 14.5 19.5 14.5 C 18 17.5 22.5 25 22.5 25 Z",
    ),
    Part::Body(
        "M 12.5 37 C 18 40.5 27 40.5 32.5 37 L 32.5 30 C 32.5 30 41.5 25.5 38.5 19.5 \
         C 34.5 13 25 16 22.5 23.5 L 22.5 27 L 22.5 23.5 C 20 16 10.5 13 6.5 19.5 \
         C 3.5 25.5 12.5 30 12.5 30 Z",
    ),
    Part::Detail(
        "M 12.5 30 C 18 27 27 27 32.5 30 M 12.5 33.5 C 18 30.5 27 30.5 32.5 33.5 \
         M 12.5 37 C 18 34 27 34 32.5 37",
    ),
];

fn parts(role: Role) -> &'static [Part] {
    match role {
        Role::Pawn => PAWN,
        Role::Knight => KNIGHT,
        Role::Bishop => BISHOP,
        Role::Rook => ROOK,
        Role::Queen => QUEEN,
        Role::King => KING,
    }
}

/// Appends `piece` to `out`, with the cell's top-left corner at `(x, y)` and edge `cell`.
pub(crate) fn write_piece(out: &mut String, piece: Piece, x: f64, y: f64, cell: f64) {
    let (fill, contrast) = match piece.color {
        Color::White => ("#ffffff", "#000000"),
        Color::Black => ("#000000", "#ffffff"),
    };
    let scale = cell / 45.0;
    let _ = write!(
        out,
        r##"<g transform="translate({} {}) scale({})" stroke="#000000" stroke-width="1.5" stroke-linecap="round" stroke-linejoin="round">"##,
        num(x),
        num(y),
        num(scale)
    );
    for part in parts(piece.role) {
        let _ = match *part {
            Part::Body(d) => write!(out, r#"<path d="{d}" fill="{fill}"/>"#),
            Part::Disc(cx, cy, r) => write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{fill}"/>"#,
                num(cx),
                num(cy),
                num(r)
            ),
            Part::Stroke(d) => write!(out, r#"<path d="{d}" fill="none"/>"#),
            Part::Detail(d) => write!(out, r#"<path d="{d}" fill="none" stroke="{contrast}"/>"#),
            Part::Dot(cx, cy, r) => write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{contrast}" stroke="none"/>"#,
                num(cx),
                num(cy),
                num(r)
            ),
        };
    }
    out.push_str("</g>");
}
