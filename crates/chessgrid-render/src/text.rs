use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

mod wrap;

pub use wrap::{split_token_to_width, wrap_text_lines};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub font_weight: Option<String>,
    /// Distance between consecutive baselines. `0` means `1.2 * font_size`.
    pub leading: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 10.0,
            font_weight: None,
            leading: 0.0,
        }
    }
}

impl TextStyle {
    pub fn with_leading(font_size: f64, leading: f64) -> Self {
        Self {
            font_size,
            leading,
            ..Self::default()
        }
    }

    pub fn line_height(&self) -> f64 {
        if self.leading > 0.0 {
            self.leading
        } else {
            self.font_size.max(1.0) * 1.2
        }
    }

    pub fn is_bold(&self) -> bool {
        self.font_weight.as_deref().is_some_and(|w| {
            w.eq_ignore_ascii_case("bold") || w.parse::<u16>().is_ok_and(|n| n >= 600)
        })
    }

    pub fn font_family_or_default(&self) -> &str {
        self.font_family.as_deref().unwrap_or("Helvetica, Arial, sans-serif")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

pub trait TextMeasurer {
    /// Measures `text` without wrapping; `\n` starts a new line.
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;

    /// Measures `text` after greedy word wrapping at `max_width`.
    fn measure_wrapped(
        &self,
        text: &str,
        style: &TextStyle,
        max_width: Option<f64>,
    ) -> TextMetrics {
        let lines = wrap_text_lines(text, style, max_width, self);
        let width = lines
            .iter()
            .map(|l| self.measure(l, style).width)
            .fold(0.0, f64::max);
        TextMetrics {
            width,
            height: lines.len() as f64 * style.line_height(),
            line_count: lines.len(),
        }
    }
}

/// Helvetica-like advance widths in em, so layouts stay reproducible without font files.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    /// Fixed advance per character in em. `0` selects the per-glyph table.
    pub char_width_factor: f64,
}

impl DeterministicTextMeasurer {
    pub fn line_width(&self, line: &str, style: &TextStyle) -> f64 {
        let font_size = style.font_size.max(1.0);
        let em = if self.char_width_factor > 0.0 {
            line.chars()
                .map(|ch| ch.width().unwrap_or(0) as f64)
                .sum::<f64>()
                * self.char_width_factor
        } else {
            line.chars().map(estimate_char_width_em).sum::<f64>()
        };
        let bold = if style.is_bold() { 1.05 } else { 1.0 };
        em * font_size * bold
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let lines = text.split('\n').collect::<Vec<_>>();
        let width = lines
            .iter()
            .map(|l| self.line_width(l, style))
            .fold(0.0, f64::max);
        TextMetrics {
            width,
            height: lines.len() as f64 * style.line_height(),
            line_count: lines.len(),
        }
    }
}

pub fn estimate_char_width_em(ch: char) -> f64 {
    match ch.width() {
        None | Some(0) => return 0.0,
        Some(2) => return 1.0,
        _ => {}
    }
    match ch {
        ' ' | '!' | ',' | '.' | '/' | ':' | ';' | 'I' | '[' | ']' | '\\' | 'f' | 't' => 0.278,
        '\'' => 0.191,
        '"' => 0.355,
        '(' | ')' | '-' | '`' | 'r' => 0.333,
        'i' | 'j' | 'l' => 0.222,
        'm' => 0.833,
        'w' => 0.722,
        'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' | 'J' => 0.5,
        'M' => 0.833,
        'W' => 0.944,
        'C' | 'D' | 'H' | 'N' | 'R' | 'U' => 0.722,
        'G' | 'O' | 'Q' => 0.778,
        'F' | 'T' | 'Z' => 0.611,
        'L' => 0.556,
        '%' => 0.889,
        '@' => 1.015,
        '#' | '$' | '0'..='9' | '?' | '_' => 0.556,
        '+' | '<' | '=' | '>' | '~' => 0.584,
        'a'..='z' => 0.556,
        'A'..='Z' => 0.667,
        _ => 0.6,
    }
}

#[cfg(test)]
mod tests;
