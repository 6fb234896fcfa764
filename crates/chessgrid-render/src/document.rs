//! A small flowable document model and its page template.
//!
//! A story is a flat list of [`Flowable`]s. [`DocTemplate::build`] places them top to bottom in
//! the page frame, starting a new page when the next flowable does not fit or on an explicit
//! [`Flowable::PageBreak`], and returns one SVG document per page. Decorators draw on every page
//! once the total page count is known.

use crate::board::BoardDrawing;
use crate::config::{LayoutConfig, Padding, PageSize};
use crate::svg::{document_open, escape_xml, num};
use crate::text::{TextMeasurer, TextStyle, wrap_text_lines};
use std::fmt::Write as _;

const FIT_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub style: TextStyle,
    pub align: Align,
    /// Wrapped lines past this count are dropped.
    pub max_lines: Option<usize>,
}

impl Paragraph {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
            align: Align::Center,
            max_lines: None,
        }
    }

    pub fn with_max_lines(mut self, max_lines: Option<usize>) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn lines<M: TextMeasurer + ?Sized>(&self, width: f64, measurer: &M) -> Vec<String> {
        let mut lines = wrap_text_lines(&self.text, &self.style, Some(width), measurer);
        if let Some(max) = self.max_lines {
            lines.truncate(max);
        }
        lines
    }

    pub fn height<M: TextMeasurer + ?Sized>(&self, width: f64, measurer: &M) -> f64 {
        self.lines(width, measurer).len() as f64 * self.style.line_height()
    }

    fn draw<M: TextMeasurer + ?Sized>(
        &self,
        out: &mut String,
        x: f64,
        y: f64,
        width: f64,
        measurer: &M,
    ) {
        let (anchor, ax) = match self.align {
            Align::Left => ("start", x),
            Align::Center => ("middle", x + width / 2.0),
            Align::Right => ("end", x + width),
        };
        let style = &self.style;
        let _ = write!(
            out,
            r#"<g font-family="{}" font-size="{}""#,
            escape_xml(style.font_family_or_default()),
            num(style.font_size)
        );
        if let Some(weight) = style.font_weight.as_deref() {
            let _ = write!(out, r#" font-weight="{}""#, escape_xml(weight));
        }
        let _ = write!(out, r##" fill="#000000" text-anchor="{anchor}">"##);
        for (i, line) in self.lines(width, measurer).iter().enumerate() {
            let baseline = y + i as f64 * style.line_height() + style.font_size;
            let _ = write!(
                out,
                r#"<text x="{}" y="{}">{}</text>"#,
                num(ax),
                num(baseline),
                escape_xml(line)
            );
        }
        out.push_str("</g>");
    }
}

/// Content stacked inside a table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellItem {
    Drawing { drawing: BoardDrawing, size: f64 },
    /// Outlined box with a cross, standing in for a drawing that could not be rendered.
    Placeholder { size: f64 },
    Spacer(f64),
    Paragraph(Paragraph),
}

impl CellItem {
    fn height<M: TextMeasurer + ?Sized>(&self, width: f64, measurer: &M) -> f64 {
        match self {
            CellItem::Drawing { size, .. } | CellItem::Placeholder { size } => *size,
            CellItem::Spacer(h) => *h,
            CellItem::Paragraph(p) => p.height(width, measurer),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableCell {
    pub items: Vec<CellItem>,
}

impl TableCell {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TableStyle {
    pub padding: Padding,
    pub align: Align,
    pub valign: VAlign,
}

/// Fixed-geometry table, centred horizontally in the frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub col_widths: Vec<f64>,
    pub row_heights: Vec<f64>,
    pub rows: Vec<Vec<TableCell>>,
    pub style: TableStyle,
}

impl Table {
    pub fn width(&self) -> f64 {
        self.col_widths.iter().sum()
    }

    pub fn height(&self) -> f64 {
        self.row_heights.iter().sum()
    }

    fn draw<M: TextMeasurer + ?Sized>(
        &self,
        out: &mut String,
        frame_x: f64,
        frame_width: f64,
        top: f64,
        measurer: &M,
    ) {
        let pad = self.style.padding;
        let x0 = frame_x + ((frame_width - self.width()) / 2.0).max(0.0);
        let mut row_y = top;
        for (row, &row_height) in self.rows.iter().zip(&self.row_heights) {
            let mut cell_x = x0;
            for (cell, &col_width) in row.iter().zip(&self.col_widths) {
                let inner_x = cell_x + pad.left;
                let inner_w = (col_width - pad.horizontal()).max(0.0);
                let content_h: f64 = cell
                    .items
                    .iter()
                    .map(|item| item.height(inner_w, measurer))
                    .sum();
                let mut y = match self.style.valign {
                    VAlign::Top => row_y + pad.top,
                    VAlign::Middle => row_y + (row_height - content_h) / 2.0,
                    VAlign::Bottom => row_y + row_height - pad.bottom - content_h,
                };
                for item in &cell.items {
                    let h = item.height(inner_w, measurer);
                    let item_x = |w: f64| match self.style.align {
                        Align::Left => inner_x,
                        Align::Center => inner_x + (inner_w - w) / 2.0,
                        Align::Right => inner_x + inner_w - w,
                    };
                    match item {
                        CellItem::Drawing { drawing, size } => {
                            drawing.write_embedded(out, item_x(*size), y, *size);
                        }
                        CellItem::Placeholder { size } => {
                            write_placeholder(out, item_x(*size), y, *size);
                        }
                        CellItem::Spacer(_) => {}
                        CellItem::Paragraph(p) => {
                            let para = Paragraph {
                                align: self.style.align,
                                ..p.clone()
                            };
                            para.draw(out, inner_x, y, inner_w, measurer);
                        }
                    }
                    y += h;
                }
                cell_x += col_width;
            }
            row_y += row_height;
        }
    }
}

fn write_placeholder(out: &mut String, x: f64, y: f64, size: f64) {
    let _ = write!(
        out,
        r##"<g fill="none" stroke="#9e9e9e" stroke-width="1"><rect x="{x}" y="{y}" width="{s}" height="{s}"/><path d="M {x} {y} L {x2} {y2} M {x2} {y} L {x} {y2}"/></g>"##,
        x = num(x),
        y = num(y),
        s = num(size),
        x2 = num(x + size),
        y2 = num(y + size)
    );
}

#[derive(Debug, Clone, PartialEq)]
pub enum Flowable {
    Paragraph(Paragraph),
    Spacer(f64),
    Table(Table),
    PageBreak,
}

impl Flowable {
    pub fn height<M: TextMeasurer + ?Sized>(&self, frame_width: f64, measurer: &M) -> f64 {
        match self {
            Flowable::Paragraph(p) => p.height(frame_width, measurer),
            Flowable::Spacer(h) => *h,
            Flowable::Table(t) => t.height(),
            Flowable::PageBreak => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageContext {
    /// 1-based.
    pub page_number: usize,
    pub page_count: usize,
    pub page_size: PageSize,
}

/// Draws on every page after the story has been laid out.
pub trait PageDecorator {
    fn decorate(&self, page: &PageContext, out: &mut String);
}

/// Centred `"Page N"` footer.
#[derive(Debug, Clone, PartialEq)]
pub struct PageNumberFooter {
    pub style: TextStyle,
    /// Baseline distance from the bottom edge.
    pub offset: f64,
}

impl PageNumberFooter {
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            style: config.footer_style.clone(),
            offset: config.footer_offset,
        }
    }
}

impl PageDecorator for PageNumberFooter {
    fn decorate(&self, page: &PageContext, out: &mut String) {
        let _ = write!(
            out,
            r##"<text x="{}" y="{}" font-family="{}" font-size="{}" fill="#000000" text-anchor="middle">Page {}</text>"##,
            num(page.page_size.width / 2.0),
            num(page.page_size.height - self.offset),
            escape_xml(self.style.font_family_or_default()),
            num(self.style.font_size),
            page.page_number
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocTemplate {
    pub page_size: PageSize,
    pub margins: Padding,
}

impl DocTemplate {
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            page_size: config.page_size,
            margins: config.page_margins,
        }
    }

    pub fn frame(&self) -> Frame {
        Frame {
            x: self.margins.left,
            y: self.margins.top,
            width: (self.page_size.width - self.margins.horizontal()).max(0.0),
            height: (self.page_size.height - self.margins.vertical()).max(0.0),
        }
    }

    /// Lays out `story` and returns one SVG document per page. An empty story yields one blank
    /// page.
    pub fn build<M: TextMeasurer + ?Sized>(
        &self,
        story: &[Flowable],
        decorators: &[&dyn PageDecorator],
        measurer: &M,
    ) -> Vec<String> {
        let frame = self.frame();
        let mut bodies: Vec<String> = Vec::new();
        let mut body = String::new();
        let mut cursor = frame.y;
        let mut page_has_content = false;

        for flowable in story {
            if let Flowable::PageBreak = flowable {
                if page_has_content {
                    bodies.push(std::mem::take(&mut body));
                    cursor = frame.y;
                    page_has_content = false;
                }
                continue;
            }

            let height = flowable.height(frame.width, measurer);
            if page_has_content && cursor + height > frame.bottom() + FIT_EPSILON {
                bodies.push(std::mem::take(&mut body));
                cursor = frame.y;
            } else if !page_has_content && cursor + height > frame.bottom() + FIT_EPSILON {
                tracing::warn!(
                    height,
                    frame_height = frame.height,
                    "flowable taller than the page frame; it will overflow"
                );
            }

            match flowable {
                Flowable::Paragraph(p) => p.draw(&mut body, frame.x, cursor, frame.width, measurer),
                Flowable::Table(t) => t.draw(&mut body, frame.x, frame.width, cursor, measurer),
                Flowable::Spacer(_) | Flowable::PageBreak => {}
            }
            cursor += height;
            page_has_content = true;
        }
        if page_has_content || bodies.is_empty() {
            bodies.push(body);
        }

        let page_count = bodies.len();
        bodies
            .into_iter()
            .enumerate()
            .map(|(i, body)| {
                let ctx = PageContext {
                    page_number: i + 1,
                    page_count,
                    page_size: self.page_size,
                };
                let mut page = document_open(self.page_size.width, self.page_size.height);
                page.push_str(&body);
                for decorator in decorators {
                    decorator.decorate(&ctx, &mut page);
                }
                page.push_str("</svg>");
                page
            })
            .collect()
    }
}
