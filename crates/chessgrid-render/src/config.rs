//! Layout configuration.
//!
//! Everything the layout calculator reads is carried by an explicit [`LayoutConfig`] value;
//! callers build one (usually [`LayoutConfig::default`]) at their composition root and may
//! override individual fields per call through [`crate::GridOptions`].

use crate::Result;
use crate::text::TextStyle;
use serde::{Deserialize, Serialize};

/// Page dimensions in PDF points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width: 595.275_590_551_181_1,
        height: 841.889_763_779_527_6,
    };
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };

    pub fn landscape(self) -> Self {
        Self {
            width: self.width.max(self.height),
            height: self.width.min(self.height),
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Padding {
    pub const fn uniform(v: f64) -> Self {
        Self {
            left: v,
            right: v,
            top: v,
            bottom: v,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// Negative or non-finite sides are treated as zero.
    pub fn sanitized(self) -> Self {
        let f = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            left: f(self.left),
            right: f(self.right),
            top: f(self.top),
            bottom: f(self.bottom),
        }
    }
}

/// Maps a diagrams-per-page count to a column count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnThresholds {
    pub single_column: usize,
    pub two_column_max: usize,
}

impl Default for ColumnThresholds {
    fn default() -> Self {
        Self {
            single_column: 1,
            two_column_max: 8,
        }
    }
}

impl ColumnThresholds {
    /// 1 column up to `single_column`, 2 up to `two_column_max`, 3 beyond.
    pub fn columns_for(&self, diagrams_per_page: usize) -> usize {
        if diagrams_per_page <= self.single_column {
            1
        } else if diagrams_per_page <= self.two_column_max {
            2
        } else {
            3
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardColors {
    #[serde(alias = "light_squares", alias = "square light")]
    pub light: String,
    #[serde(alias = "dark_squares", alias = "square dark")]
    pub dark: String,
    #[serde(alias = "margin")]
    pub border: String,
    #[serde(alias = "coord")]
    pub coordinates: String,
}

impl Default for BoardColors {
    fn default() -> Self {
        Self {
            light: "#f0d9b5".to_string(),
            dark: "#b58863".to_string(),
            border: "#212121".to_string(),
            coordinates: "#e5e5e5".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_size: PageSize,
    /// Distance from the page edge to the content frame.
    pub page_margins: Padding,
    pub default_diagrams_per_page: usize,
    /// Upper bound for a diagram's edge length.
    pub default_diagram_size: f64,
    /// Natural edge length boards are rendered at before scaling.
    pub board_size: f64,
    pub column_thresholds: ColumnThresholds,
    pub cell_padding: Padding,
    pub board_colors: BoardColors,
    pub show_coordinates: bool,
    /// Horizontal room kept free next to each diagram within its column.
    pub horizontal_margin: f64,
    /// Vertical gap between a diagram and its caption.
    pub caption_gap: f64,
    /// Vertical gap between the title and the first grid.
    pub title_spacer: f64,
    /// Baseline of the page-number footer, measured up from the bottom edge.
    pub footer_offset: f64,
    pub caption_style: TextStyle,
    pub title_style: TextStyle,
    pub footer_style: TextStyle,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            page_margins: Padding::uniform(72.0),
            default_diagrams_per_page: 6,
            default_diagram_size: 300.0,
            board_size: 390.0,
            column_thresholds: ColumnThresholds::default(),
            cell_padding: Padding {
                left: 0.0,
                right: 0.0,
                top: 5.0,
                bottom: 5.0,
            },
            board_colors: BoardColors::default(),
            show_coordinates: true,
            horizontal_margin: 10.0,
            caption_gap: 6.0,
            title_spacer: 12.0,
            footer_offset: 20.0,
            caption_style: TextStyle::with_leading(10.0, 12.0),
            title_style: TextStyle {
                font_weight: Some("bold".to_string()),
                ..TextStyle::with_leading(18.0, 22.0)
            },
            footer_style: TextStyle::with_leading(9.0, 11.0),
        }
    }
}

impl LayoutConfig {
    /// Parses a (possibly partial) JSON config; missing fields keep their defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn frame_width(&self) -> f64 {
        (self.page_size.width - self.page_margins.horizontal()).max(0.0)
    }

    pub fn frame_height(&self) -> f64 {
        (self.page_size.height - self.page_margins.vertical()).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_map_counts_to_columns() {
        let t = ColumnThresholds::default();
        assert_eq!(t.columns_for(0), 1);
        assert_eq!(t.columns_for(1), 1);
        for n in 2..=8 {
            assert_eq!(t.columns_for(n), 2, "n = {n}");
        }
        assert_eq!(t.columns_for(9), 3);
        assert_eq!(t.columns_for(40), 3);
    }

    #[test]
    fn custom_thresholds() {
        let t = ColumnThresholds {
            single_column: 2,
            two_column_max: 4,
        };
        assert_eq!(t.columns_for(2), 1);
        assert_eq!(t.columns_for(4), 2);
        assert_eq!(t.columns_for(6), 3);
    }

    #[test]
    fn a4_frame_uses_inch_margins() {
        let cfg = LayoutConfig::default();
        assert!((cfg.frame_width() - 451.275_590_551).abs() < 1e-6);
        assert!((cfg.frame_height() - 697.889_763_779).abs() < 1e-6);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = LayoutConfig::from_json_str(
            r##"{"default_diagrams_per_page": 4, "board_colors": {"light_squares": "#ffffff"}}"##,
        )
        .unwrap();
        assert_eq!(cfg.default_diagrams_per_page, 4);
        assert_eq!(cfg.board_colors.light, "#ffffff");
        assert_eq!(cfg.board_colors.dark, "#b58863");
        assert_eq!(cfg.column_thresholds, ColumnThresholds::default());
        assert_eq!(cfg.caption_style.font_size, 10.0);
    }

    #[test]
    fn padding_sanitizes_negative_sides() {
        let p = Padding {
            left: -3.0,
            right: f64::NAN,
            top: 4.0,
            bottom: 0.0,
        }
        .sanitized();
        assert_eq!(p, Padding {
            left: 0.0,
            right: 0.0,
            top: 4.0,
            bottom: 0.0
        });
    }
}
