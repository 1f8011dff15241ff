//! Core value types shared by the board model, legality engine and the turn
//! state machine.

use std::fmt;

use crate::errors::BlindChessErrors;
use crate::utils::algebraic::square_to_algebraic;

/// Side of a piece or player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Name used when narrating a move ("White moved ...").
    pub const fn display_name(self) -> &'static str {
        match self {
            Color::Light => "White",
            Color::Dark => "Black",
        }
    }

    /// Row delta of a forward pawn step on the canonical grid (row 0 = rank 8).
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::Light => -1,
            Color::Dark => 1,
        }
    }
}

/// Piece kind (color is carried separately in [`Piece`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

pub const ALL_PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

impl PieceKind {
    /// Lowercase board code (`p n b r q k`).
    pub const fn code(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Lowercase spoken word, as produced by the voice normalizer.
    pub const fn spoken_name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }

    /// Capitalized name used in move narration.
    pub const fn display_name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }

    pub fn from_spoken(word: &str) -> Option<Self> {
        let word = word.trim();
        ALL_PIECE_KINDS
            .into_iter()
            .find(|kind| kind.spoken_name().eq_ignore_ascii_case(word))
    }
}

/// A colored piece token as it sits on a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Single-character code: uppercase for light, lowercase for dark.
    pub fn code(self) -> char {
        let code = self.kind.code();
        match self.color {
            Color::Light => code.to_ascii_uppercase(),
            Color::Dark => code,
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        let kind = PieceKind::from_code(code)?;
        let color = if code.is_ascii_uppercase() {
            Color::Light
        } else {
            Color::Dark
        };
        Some(Self { color, kind })
    }
}

/// Zero-based (row, col) on the canonical grid. Signed so that offsets can
/// step off the board and be rejected by a bounds check.
pub type GridLocation = (i8, i8);

/// A board square, file and rank both in `1..=8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    pub fn new(file: u8, rank: u8) -> Result<Self, BlindChessErrors> {
        if !(1..=8).contains(&file) || !(1..=8).contains(&rank) {
            return Err(BlindChessErrors::InvalidFileOrRank(file, rank));
        }
        Ok(Self { file, rank })
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&square_to_algebraic(*self))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    Kingside,
    Queenside,
}

impl CastlingSide {
    pub const fn spoken_name(self) -> &'static str {
        match self {
            CastlingSide::Kingside => "kingside",
            CastlingSide::Queenside => "queenside",
        }
    }
}

/// Castling availability flags. Carried for fidelity with the observed board;
/// castling requests are not checked against them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingRights {
    pub light_kingside: bool,
    pub light_queenside: bool,
    pub dark_kingside: bool,
    pub dark_queenside: bool,
}

impl CastlingRights {
    pub const fn all() -> Self {
        Self {
            light_kingside: true,
            light_queenside: true,
            dark_kingside: true,
            dark_queenside: true,
        }
    }

    pub const fn none() -> Self {
        Self {
            light_kingside: false,
            light_queenside: false,
            dark_kingside: false,
            dark_queenside: false,
        }
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::all()
    }
}

/// A piece moving between two squares. Legal only relative to a board state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChessMove {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_codes_follow_case_convention() {
        let white_knight = Piece::from_code('N').expect("N should parse");
        assert_eq!(white_knight, Piece::new(Color::Light, PieceKind::Knight));
        assert_eq!(white_knight.code(), 'N');

        let black_queen = Piece::from_code('q').expect("q should parse");
        assert_eq!(black_queen.color, Color::Dark);
        assert_eq!(black_queen.code(), 'q');

        assert!(Piece::from_code('x').is_none());
    }

    #[test]
    fn spoken_names_parse_case_insensitively() {
        assert_eq!(PieceKind::from_spoken("Rook"), Some(PieceKind::Rook));
        assert_eq!(PieceKind::from_spoken(" knight "), Some(PieceKind::Knight));
        assert_eq!(PieceKind::from_spoken("dragon"), None);
    }

    #[test]
    fn square_rejects_out_of_range() {
        assert!(Square::new(5, 4).is_ok());
        assert_eq!(
            Square::new(0, 4),
            Err(BlindChessErrors::InvalidFileOrRank(0, 4))
        );
        assert!(Square::new(3, 9).is_err());
    }
}
