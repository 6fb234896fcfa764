use crate::{FenError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn fen_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Pawn,
        Role::Knight,
        Role::Bishop,
        Role::Rook,
        Role::Queen,
        Role::King,
    ];

    pub fn lower_char(self) -> char {
        match self {
            Role::Pawn => 'p',
            Role::Knight => 'n',
            Role::Bishop => 'b',
            Role::Rook => 'r',
            Role::Queen => 'q',
            Role::King => 'k',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub role: Role,
}

impl Piece {
    pub fn new(color: Color, role: Role) -> Self {
        Self { color, role }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        let role = match ch.to_ascii_lowercase() {
            'p' => Role::Pawn,
            'n' => Role::Knight,
            'b' => Role::Bishop,
            'r' => Role::Rook,
            'q' => Role::Queen,
            'k' => Role::King,
            _ => return None,
        };
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Self { color, role })
    }

    pub fn to_char(self) -> char {
        let c = self.role.lower_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

/// A board square, `a1 = 0` through `h8 = 63`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        (file < 8 && rank < 8).then_some(Self(rank * 8 + file))
    }

    pub fn from_index(index: usize) -> Option<Self> {
        (index < 64).then_some(Self(index as u8))
    }

    /// Zero-based file (`a = 0`).
    pub fn file(self) -> u8 {
        self.0 % 8
    }

    /// Zero-based rank (`1 = 0`).
    pub fn rank(self) -> u8 {
        self.0 / 8
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn parse(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        Self::new(file as u8 - b'a', rank as u8 - b'1')
    }

    pub fn name(self) -> String {
        format!("{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Castling {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl Castling {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            white_king_side: true,
            white_queen_side: true,
            black_king_side: true,
            black_queen_side: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::none()
    }

    fn parse(field: &str) -> Result<Self> {
        let invalid = || FenError::InvalidCastling {
            value: field.to_string(),
        };
        if field == "-" {
            return Ok(Self::none());
        }
        if field.is_empty() {
            return Err(invalid());
        }
        let mut out = Self::none();
        for ch in field.chars() {
            let slot = match ch {
                'K' => &mut out.white_king_side,
                'Q' => &mut out.white_queen_side,
                'k' => &mut out.black_king_side,
                'q' => &mut out.black_queen_side,
                _ => return Err(invalid()),
            };
            if *slot {
                return Err(invalid());
            }
            *slot = true;
        }
        Ok(out)
    }
}

impl fmt::Display for Castling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        for (on, ch) in [
            (self.white_king_side, 'K'),
            (self.white_queen_side, 'Q'),
            (self.black_king_side, 'k'),
            (self.black_queen_side, 'q'),
        ] {
            if on {
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

/// A parsed FEN position.
///
/// Only the six FEN fields are modelled; no move generation or legality checks are performed
/// beyond the shape of each field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: [Option<Piece>; 64],
    turn: Color,
    castling: Castling,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            board: [None; 64],
            turn: Color::White,
            castling: Castling::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl Position {
    /// Parses a FEN string.
    ///
    /// Trailing fields may be omitted and default to `w - - 0 1`.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let fields = fen.split_whitespace().collect::<Vec<_>>();
        if fields.is_empty() {
            return Err(FenError::Empty);
        }
        if fields.len() > 6 {
            return Err(FenError::TooManyFields {
                found: fields.len(),
            });
        }

        let mut pos = Self {
            board: parse_placement(fields[0])?,
            ..Self::default()
        };

        if let Some(turn) = fields.get(1) {
            pos.turn = match *turn {
                "w" => Color::White,
                "b" => Color::Black,
                other => {
                    return Err(FenError::InvalidTurn {
                        value: other.to_string(),
                    });
                }
            };
        }

        if let Some(castling) = fields.get(2) {
            pos.castling = Castling::parse(castling)?;
        }

        if let Some(ep) = fields.get(3) {
            pos.en_passant = parse_en_passant(ep)?;
        }

        if let Some(half) = fields.get(4) {
            pos.halfmove_clock = half
                .parse::<u32>()
                .map_err(|_| FenError::InvalidHalfmoveClock {
                    value: half.to_string(),
                })?;
        }

        if let Some(full) = fields.get(5) {
            let n = full
                .parse::<u32>()
                .map_err(|_| FenError::InvalidFullmoveNumber {
                    value: full.to_string(),
                })?;
            pos.fullmove_number = n.max(1);
        }

        Ok(pos)
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.index()]
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.board
            .iter()
            .enumerate()
            .filter_map(|(i, p)| Some((Square(i as u8), (*p)?)))
    }

    pub fn side_to_move(&self) -> Color {
        self.turn
    }

    pub fn castling(&self) -> Castling {
        self.castling
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Canonical six-field FEN for this position.
    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                let sq = Square(rank * 8 + file);
                match self.board[sq.index()] {
                    Some(piece) => {
                        if empty > 0 {
                            out.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        out.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                out.push('/');
            }
        }
        let ep = self
            .en_passant
            .map(|s| s.name())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "{out} {} {} {ep} {} {}",
            self.turn.fen_char(),
            self.castling,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

impl std::str::FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_fen(s)
    }
}

fn parse_placement(field: &str) -> Result<[Option<Piece>; 64]> {
    let ranks = field.split('/').collect::<Vec<_>>();
    if ranks.len() != 8 {
        return Err(FenError::RankCount { found: ranks.len() });
    }

    let mut board = [None; 64];
    for (i, rank_text) in ranks.iter().enumerate() {
        // FEN lists rank 8 first.
        let rank = 7 - i as u8;
        let rank_label = rank + 1;
        let mut file = 0usize;
        let mut prev_digit = false;
        for ch in rank_text.chars() {
            if let Some(d) = ch.to_digit(10) {
                if !(1..=8).contains(&d) {
                    return Err(FenError::InvalidPiece {
                        ch,
                        rank: rank_label,
                    });
                }
                if prev_digit {
                    return Err(FenError::ConsecutiveDigits { rank: rank_label });
                }
                prev_digit = true;
                file += d as usize;
                continue;
            }
            prev_digit = false;
            let Some(piece) = Piece::from_char(ch) else {
                return Err(FenError::InvalidPiece {
                    ch,
                    rank: rank_label,
                });
            };
            if file < 8 {
                board[rank as usize * 8 + file] = Some(piece);
            }
            file += 1;
        }
        if file != 8 {
            return Err(FenError::RankWidth {
                rank: rank_label,
                files: file,
            });
        }
    }
    Ok(board)
}

fn parse_en_passant(field: &str) -> Result<Option<Square>> {
    if field == "-" {
        return Ok(None);
    }
    match Square::parse(field) {
        Some(sq) if sq.rank() == 2 || sq.rank() == 5 => Ok(Some(sq)),
        _ => Err(FenError::InvalidEnPassant {
            value: field.to_string(),
        }),
    }
}

/// Returns true when `token` has the shape of FEN field number `index` (0-based).
///
/// Used to split `"<fen> <description>"` lines: the shape check is deliberately cheap and does
/// not validate the piece placement itself.
pub(crate) fn token_fits_field(index: usize, token: &str) -> bool {
    match index {
        0 => !token.is_empty(),
        1 => token == "w" || token == "b",
        2 => token == "-" || (!token.is_empty() && token.chars().all(|c| "KQkq".contains(c))),
        3 => token == "-" || Square::parse(token).is_some(),
        4 | 5 => !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()),
        _ => false,
    }
}
