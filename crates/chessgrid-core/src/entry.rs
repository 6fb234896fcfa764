use crate::fen::token_fits_field;
use serde::{Deserialize, Serialize};

/// One position to lay out: a FEN string plus an optional caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionEntry {
    pub fen: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PositionEntry {
    pub fn new(fen: impl Into<String>) -> Self {
        Self {
            fen: fen.into().trim().to_string(),
            description: None,
        }
    }

    pub fn with_description(fen: impl Into<String>, description: Option<String>) -> Self {
        Self {
            fen: fen.into().trim().to_string(),
            description: normalize_description(description),
        }
    }

    /// Caption text, if any non-blank description was supplied.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Splits a `"<fen> <description>"` line.
    ///
    /// Leading tokens are taken as FEN fields for as long as each one has the shape of the next
    /// field (placement, side, castling, en passant, halfmove, fullmove). Whatever follows is the
    /// description, with its inner spacing preserved. Returns `None` for blank lines.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let mut fen_end = 0usize;
        let mut field = 0usize;
        let mut rest = line;
        let mut consumed = 0usize;
        while field < 6 {
            let trimmed = rest.trim_start();
            consumed += rest.len() - trimmed.len();
            if trimmed.is_empty() {
                break;
            }
            let token_len = trimmed
                .find(char::is_whitespace)
                .unwrap_or(trimmed.len());
            let token = &trimmed[..token_len];
            if !token_fits_field(field, token) {
                break;
            }
            consumed += token_len;
            fen_end = consumed;
            rest = &trimmed[token_len..];
            field += 1;
        }

        let fen = &line[..fen_end];
        let description = line[fen_end..].trim();
        Some(Self::with_description(
            fen,
            (!description.is_empty()).then(|| description.to_string()),
        ))
    }
}

impl From<&str> for PositionEntry {
    fn from(fen: &str) -> Self {
        Self::new(fen)
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

/// Parses a multi-line list of `"<fen> <description>"` entries.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_entries(text: &str) -> Vec<PositionEntry> {
    text.lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .filter_map(PositionEntry::parse_line)
        .collect()
}
