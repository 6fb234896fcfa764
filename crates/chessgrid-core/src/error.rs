pub type Result<T> = std::result::Result<T, FenError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("empty FEN")]
    Empty,

    #[error("FEN has {found} fields, expected at most 6")]
    TooManyFields { found: usize },

    #[error("piece placement must describe 8 ranks, found {found}")]
    RankCount { found: usize },

    #[error("rank {rank} describes {files} files, expected 8")]
    RankWidth { rank: u8, files: usize },

    #[error("invalid character {ch:?} in rank {rank}")]
    InvalidPiece { ch: char, rank: u8 },

    #[error("consecutive empty-square digits in rank {rank}")]
    ConsecutiveDigits { rank: u8 },

    #[error("invalid side to move: {value:?}")]
    InvalidTurn { value: String },

    #[error("invalid castling rights: {value:?}")]
    InvalidCastling { value: String },

    #[error("invalid en passant square: {value:?}")]
    InvalidEnPassant { value: String },

    #[error("invalid halfmove clock: {value:?}")]
    InvalidHalfmoveClock { value: String },

    #[error("invalid fullmove number: {value:?}")]
    InvalidFullmoveNumber { value: String },
}
