//! Canonical chess-rule constants.
//!
//! Starting position, home rows and the fixed king slides used for castling
//! requests. Grid rows are canonical: row 0 is rank 8, row 7 is rank 1.

use crate::game_state::chess_types::{CastlingSide, Color, PieceKind};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Grid row a pawn of `color` starts on (and may double-step from).
#[inline]
pub const fn pawn_start_row(color: Color) -> i8 {
    match color {
        Color::Light => 6,
        Color::Dark => 1,
    }
}

/// Rank a pawn of `color` promotes on.
#[inline]
pub const fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::Light => 8,
        Color::Dark => 1,
    }
}

/// Pieces offered by the promotion chooser, in the order the external surface
/// stacks them starting from the promotion square.
pub const PROMOTION_CHOICES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Knight,
    PieceKind::Rook,
    PieceKind::Bishop,
];

/// Two-digit codes (from, to) of the king slide that requests castling.
pub const fn castling_king_slide(color: Color, side: CastlingSide) -> (u8, u8) {
    match (color, side) {
        (Color::Light, CastlingSide::Kingside) => (51, 71),
        (Color::Light, CastlingSide::Queenside) => (51, 31),
        (Color::Dark, CastlingSide::Kingside) => (58, 78),
        (Color::Dark, CastlingSide::Queenside) => (58, 38),
    }
}
