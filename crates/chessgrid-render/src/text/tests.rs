use super::*;

fn caption() -> TextStyle {
    TextStyle::with_leading(10.0, 12.0)
}

#[test]
fn per_glyph_widths_follow_helvetica_proportions() {
    let m = DeterministicTextMeasurer::default();
    let w = m.measure("abc", &caption()).width;
    assert!((w - 16.12).abs() < 1e-9, "{w}");
    assert!(m.line_width("iii", &caption()) < m.line_width("mmm", &caption()));
}

#[test]
fn fixed_factor_counts_wide_chars_twice() {
    let m = DeterministicTextMeasurer {
        char_width_factor: 0.5,
    };
    assert_eq!(m.line_width("ab", &caption()), 10.0);
    assert_eq!(m.line_width("棋", &caption()), 10.0);
}

#[test]
fn bold_text_is_wider() {
    let m = DeterministicTextMeasurer::default();
    let bold = TextStyle {
        font_weight: Some("bold".to_string()),
        ..caption()
    };
    assert!(m.line_width("Title", &bold) > m.line_width("Title", &caption()));
    assert!(TextStyle {
        font_weight: Some("700".to_string()),
        ..caption()
    }
    .is_bold());
}

#[test]
fn leading_defaults_to_font_size_ratio() {
    assert_eq!(caption().line_height(), 12.0);
    assert_eq!(TextStyle::with_leading(10.0, 0.0).line_height(), 12.0);
}

#[test]
fn wraps_on_word_boundaries() {
    let m = DeterministicTextMeasurer::default();
    let lines = wrap_text_lines("aaaa aaaa   aaaa", &caption(), Some(50.0), &m);
    assert_eq!(lines, vec!["aaaa aaaa", "aaaa"]);
}

#[test]
fn long_words_break_between_chars() {
    let m = DeterministicTextMeasurer::default();
    let lines = wrap_text_lines("aaaaaaaaaa", &caption(), Some(25.0), &m);
    assert_eq!(lines, vec!["aaaa", "aaaa", "aa"]);
}

#[test]
fn explicit_newlines_are_kept() {
    let m = DeterministicTextMeasurer::default();
    let lines = wrap_text_lines("one\ntwo", &caption(), None, &m);
    assert_eq!(lines, vec!["one", "two"]);
}

#[test]
fn wrapped_height_counts_lines_times_leading() {
    let m = DeterministicTextMeasurer::default();
    let metrics = m.measure_wrapped("aaaaaaaaaa", &caption(), Some(25.0));
    assert_eq!(metrics.line_count, 3);
    assert_eq!(metrics.height, 36.0);
    assert!(metrics.width <= 25.0);

    let empty = m.measure_wrapped("", &caption(), Some(25.0));
    assert_eq!(empty.line_count, 1);
    assert_eq!(empty.height, 12.0);
}
