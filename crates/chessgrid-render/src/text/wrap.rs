//! Greedy word wrapping.
//!
//! Runs of whitespace collapse to a single space and words wider than the line are broken
//! between characters, matching how paragraph text is set in the rendered pages.

use super::{TextMeasurer, TextStyle};

const WIDTH_EPSILON: f64 = 1e-6;

/// Wraps `text` into lines no wider than `max_width`. `\n` always starts a new line.
///
/// Returns at least one (possibly empty) line.
pub fn wrap_text_lines<M: TextMeasurer + ?Sized>(
    text: &str,
    style: &TextStyle,
    max_width: Option<f64>,
    measurer: &M,
) -> Vec<String> {
    let max_width = max_width.filter(|w| w.is_finite() && *w > 0.0);
    let fits = |s: &str, max_w: f64| measurer.measure(s, style).width <= max_w + WIDTH_EPSILON;

    let mut out = Vec::new();
    for raw in text.split('\n') {
        let Some(max_w) = max_width else {
            out.push(raw.split_whitespace().collect::<Vec<_>>().join(" "));
            continue;
        };

        let mut line = String::new();
        for word in raw.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{line} {word}")
            };
            if fits(&candidate, max_w) {
                line = candidate;
                continue;
            }
            if !line.is_empty() {
                out.push(std::mem::take(&mut line));
            }

            let mut rest = word.to_string();
            while !fits(&rest, max_w) {
                let (head, tail) = split_token_to_width(&rest, style, max_w, measurer);
                if tail.is_empty() {
                    break;
                }
                out.push(head);
                rest = tail;
            }
            line = rest;
        }
        out.push(line);
    }

    if out.is_empty() {
        out.push(String::new());
    }
    out
}

/// Splits `token` so the head fits in `max_width`. The head always holds at least one char.
pub fn split_token_to_width<M: TextMeasurer + ?Sized>(
    token: &str,
    style: &TextStyle,
    max_width: f64,
    measurer: &M,
) -> (String, String) {
    let mut split_at = 0usize;
    for (idx, ch) in token.char_indices() {
        let end = idx + ch.len_utf8();
        if split_at > 0 && measurer.measure(&token[..end], style).width > max_width + WIDTH_EPSILON
        {
            break;
        }
        split_at = end;
    }
    (token[..split_at].to_string(), token[split_at..].to_string())
}
