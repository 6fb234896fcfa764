#![forbid(unsafe_code)]

//! FEN parsing + position-entry model (headless).
//!
//! Design goals:
//! - strict validation of the piece placement, lenient handling of omitted trailing fields
//! - deterministic, allocation-light parsing suitable for batch document generation
//! - no rendering concerns; see `chessgrid-render` for board drawings

pub mod entry;
pub mod error;
pub mod fen;

pub use entry::{PositionEntry, parse_entries};
pub use error::{FenError, Result};
pub use fen::{Castling, Color, Piece, Position, Role, Square};

/// The standard chess starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
