//! Validation of JSON generation requests.
//!
//! A request looks like
//!
//! ```json
//! { "fens": ["<fen> [description]", {"fen": "...", "description": "..."}],
//!   "diagrams_per_page": 6, "title": "Puzzles", "show_page_numbers": true }
//! ```
//!
//! Validation failures carry the client-facing messages of [`RequestError`]; internal failures
//! while generating are reported with [`ErrorBody::internal`] so no details leak to callers.

use crate::render::{BoardColors, ColumnThresholds, GridOptions, Padding, RenderFailurePolicy};
use chessgrid_core::PositionEntry;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::num::NonZeroUsize;

/// `diagrams_per_page` when a request does not name one.
pub const DEFAULT_REQUEST_DIAGRAMS_PER_PAGE: usize = 1;

pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred while generating the PDF.";

/// Suggested file name for a generated sheet.
pub const DOWNLOAD_FILE_NAME: &str = "chess_diagrams.pdf";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("FEN strings must be provided in a list.")]
    MissingFens,
    #[error("Each FEN entry must be a string or an object with a \"fen\" field.")]
    InvalidEntry { index: usize },
    #[error("diagrams_per_page must be an integer.")]
    InvalidDiagramsPerPage,
    #[error("diagrams_per_page must be at least 1.")]
    NonPositiveDiagramsPerPage,
}

/// Raw request body. Loosely typed fields are checked by [`GenerateRequest::validate`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenerateRequest {
    pub fens: Option<Value>,
    pub diagrams_per_page: Option<Value>,
    pub padding: Option<Padding>,
    pub board_colors: Option<BoardColors>,
    #[serde(alias = "columns_for_diagrams_per_page")]
    pub column_thresholds: Option<ColumnThresholds>,
    pub title: Option<String>,
    pub show_coordinates: Option<bool>,
    pub show_turn_indicator: bool,
    pub show_page_numbers: bool,
    pub flipped: bool,
    pub on_render_failure: RenderFailurePolicy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub entries: Vec<PositionEntry>,
    pub options: GridOptions,
}

impl GenerateRequest {
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn validate(&self) -> Result<ValidatedRequest, RequestError> {
        let entries = parse_fens(self.fens.as_ref())?;
        let dpp = match &self.diagrams_per_page {
            None => DEFAULT_REQUEST_DIAGRAMS_PER_PAGE,
            Some(value) => coerce_diagrams_per_page(value)?,
        };
        let diagrams_per_page =
            NonZeroUsize::new(dpp).ok_or(RequestError::NonPositiveDiagramsPerPage)?;

        Ok(ValidatedRequest {
            entries,
            options: GridOptions {
                diagrams_per_page: Some(diagrams_per_page),
                padding: self.padding,
                board_colors: self.board_colors.clone(),
                column_thresholds: self.column_thresholds,
                title: self.title.clone().filter(|t| !t.trim().is_empty()),
                show_coordinates: self.show_coordinates,
                show_turn_indicator: self.show_turn_indicator,
                show_page_numbers: self.show_page_numbers,
                flipped: self.flipped,
                on_render_failure: self.on_render_failure,
            },
        })
    }
}

fn parse_fens(fens: Option<&Value>) -> Result<Vec<PositionEntry>, RequestError> {
    let Some(Value::Array(items)) = fens else {
        return Err(RequestError::MissingFens);
    };
    if items.is_empty() {
        return Err(RequestError::MissingFens);
    }

    let mut entries = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item {
            // Blank strings keep their slot and fail to render.
            Value::String(line) => entries
                .push(PositionEntry::parse_line(line).unwrap_or_else(|| PositionEntry::new(""))),
            Value::Object(_) => {
                let entry = PositionEntry::deserialize(item)
                    .map_err(|_| RequestError::InvalidEntry { index })?;
                entries.push(PositionEntry::with_description(entry.fen, entry.description));
            }
            _ => return Err(RequestError::InvalidEntry { index }),
        }
    }
    Ok(entries)
}

/// Accepts numbers, truncated toward zero, and strings holding an integer.
fn coerce_diagrams_per_page(value: &Value) -> Result<usize, RequestError> {
    let n = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(f64::trunc).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or(RequestError::InvalidDiagramsPerPage)?;
    if n < 1 {
        return Err(RequestError::NonPositiveDiagramsPerPage);
    }
    usize::try_from(n).map_err(|_| RequestError::InvalidDiagramsPerPage)
}

/// JSON error payload: `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn internal() -> Self {
        Self {
            error: INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::json!({ "error": self.error }).to_string()
    }
}

impl From<&RequestError> for ErrorBody {
    fn from(err: &RequestError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}
