use chessgrid_core::STARTING_FEN;
use chessgrid_render::{BoardColors, BoardRenderer, BoardStyle, SvgBoardRenderer};

#[test]
fn plain_board_has_no_frame_or_labels() {
    let style = BoardStyle {
        coordinates: false,
        ..BoardStyle::default()
    };
    let drawing = SvgBoardRenderer.render(STARTING_FEN, &style).unwrap();
    assert_eq!(drawing.view_size, 360.0);
    assert!(!drawing.body.contains("<text"));
    assert!(drawing.body.starts_with(r#"<rect x="0" y="0" width="360" height="360""#));
}

#[test]
fn custom_colours_are_used() {
    let style = BoardStyle {
        colors: BoardColors {
            light: "#eeeeee".to_string(),
            dark: "#4b7399".to_string(),
            ..BoardColors::default()
        },
        ..BoardStyle::default()
    };
    let drawing = SvgBoardRenderer
        .render("8/8/8/8/8/4k3/8/R7 w - - 0 1", &style)
        .unwrap();
    assert_eq!(drawing.body.matches(r##"fill="#4b7399""##).count(), 32);
    assert!(drawing.body.contains(r##"fill="#eeeeee""##));
    assert!(!drawing.body.contains("#b58863"));
}

#[test]
fn flipped_board_puts_black_at_the_bottom() {
    let style = BoardStyle {
        flipped: true,
        turn_indicator: true,
        ..BoardStyle::default()
    };
    // Black to move with black at the bottom: the disc goes in the bottom corner.
    let drawing = SvgBoardRenderer
        .render("8/8/1P6/8/2P5/5k2/2K5/4r3 b - - 0 1", &style)
        .unwrap();
    assert!(drawing.body.contains(r#"cy="382.5" r="5""#));
    // The black rook on e1 sits on the top row when flipped.
    assert!(
        drawing
            .body
            .contains(r#"<g transform="translate(150 15) scale(1)""#)
    );
}

#[test]
fn document_is_standalone_svg() {
    let drawing = SvgBoardRenderer
        .render(STARTING_FEN, &BoardStyle::default())
        .unwrap();
    let svg = drawing.to_svg_document();
    assert!(svg.starts_with(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="390" height="390" viewBox="0 0 390 390">"#
    ));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn renders_every_study_position() {
    for fen in [
        "r1b2b1r/2p4p/p2q1np1/3pk3/p2NP3/3P4/1PP2PPP/RNBQK2R w KQ - 5 14",
        "6k1/pp5r/P4R1P/8/8/8/6K1/8 w - - 0 1",
        "r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 3",
    ] {
        let drawing = SvgBoardRenderer
            .render(fen, &BoardStyle::default())
            .unwrap_or_else(|e| panic!("{fen}: {e}"));
        assert_eq!(drawing.width, 390.0);
    }
}
