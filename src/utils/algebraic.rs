//! Square notation conversions.
//!
//! Converts between algebraic coordinates (`e4`), the two-digit
//! `file*10 + rank` code used at the executor boundary (`e4 -> 54`) and
//! canonical grid indices (row 0 = rank 8, col 0 = file a).

use crate::errors::BlindChessErrors;
use crate::game_state::chess_types::{GridLocation, Square};

/// Convert algebraic notation (for example: "e4") to a square.
///
/// Exactly two characters matching `[a-h][1-8]`; anything else is malformed.
pub fn algebraic_to_square(text: &str) -> Result<Square, BlindChessErrors> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return Err(BlindChessErrors::InvalidAlgebraicString(text.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(BlindChessErrors::InvalidAlgebraicString(text.to_owned()));
    }

    Square::new(file - b'a' + 1, rank - b'0')
}

/// Convert a square to algebraic notation (for example: "e4").
pub fn square_to_algebraic(square: Square) -> String {
    let file_char = char::from(b'a' + square.file() - 1);
    let rank_char = char::from(b'0' + square.rank());
    format!("{file_char}{rank_char}")
}

/// Two-digit wire code, `file*10 + rank`.
#[inline]
pub fn square_to_code(square: Square) -> u8 {
    square.file() * 10 + square.rank()
}

pub fn code_to_square(code: u8) -> Result<Square, BlindChessErrors> {
    Square::new(code / 10, code % 10).map_err(|_| BlindChessErrors::InvalidSquareCode(code))
}

/// Canonical grid location of a square.
#[inline]
pub fn square_to_grid(square: Square) -> GridLocation {
    (8 - square.rank() as i8, square.file() as i8 - 1)
}

pub fn grid_to_square(location: GridLocation) -> Result<Square, BlindChessErrors> {
    let (row, col) = location;
    if !(0..8).contains(&row) || !(0..8).contains(&col) {
        return Err(BlindChessErrors::InvalidGridLocation(row, col));
    }
    Square::new(col as u8 + 1, 8 - row as u8)
}
