//! Per-tick board snapshot.
//!
//! `BoardState` is rebuilt from every observation of the external surface and
//! treated as a value: the legality engine only ever simulates moves on a
//! copy. The grid is canonical (row 0 = rank 8, col 0 = file a) whichever
//! side the local player has; `is_flipped` records that the player is black.

use crate::errors::BlindChessErrors;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::session::collaborators::ObservedBoard;
use crate::utils::algebraic::{grid_to_square, square_to_grid};
use crate::utils::fen_parser::parse_fen;

pub type Grid = [[Option<Piece>; 8]; 8];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    pub grid: Grid,
    pub is_flipped: bool,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Square>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            grid: [[None; 8]; 8],
            is_flipped: false,
            castling_rights: CastlingRights::all(),
            en_passant_target: None,
        }
    }
}

impl BoardState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, BlindChessErrors> {
        parse_fen(fen)
    }

    /// Build a snapshot from the board observer's string grid.
    pub fn from_observed(observed: &ObservedBoard) -> Result<Self, BlindChessErrors> {
        if observed.grid.len() != 8 {
            return Err(BlindChessErrors::InvalidGridShape(format!(
                "{} rows",
                observed.grid.len()
            )));
        }

        let mut state = Self::new_empty();
        for (row, cells) in observed.grid.iter().enumerate() {
            if cells.len() != 8 {
                return Err(BlindChessErrors::InvalidGridShape(format!(
                    "row {row} has {} cells",
                    cells.len()
                )));
            }
            for (col, cell) in cells.iter().enumerate() {
                state.grid[row][col] = parse_cell(cell)?;
            }
        }
        state.is_flipped = !observed.is_white_side;
        Ok(state)
    }

    /// Inverse of [`BoardState::from_observed`].
    pub fn to_observed(&self) -> ObservedBoard {
        let grid = self
            .grid
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map(|p| p.code().to_string()).unwrap_or_default())
                    .collect()
            })
            .collect();
        ObservedBoard {
            grid,
            is_white_side: !self.is_flipped,
        }
    }

    /// Color of the local player.
    #[inline]
    pub fn player_color(&self) -> Color {
        if self.is_flipped {
            Color::Dark
        } else {
            Color::Light
        }
    }

    /// Piece at a grid location; `None` for empty or off-board locations.
    #[inline]
    pub fn piece_at(&self, location: GridLocation) -> Option<Piece> {
        let (row, col) = location;
        if !(0..8).contains(&row) || !(0..8).contains(&col) {
            return None;
        }
        self.grid[row as usize][col as usize]
    }

    #[inline]
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        self.piece_at(square_to_grid(square))
    }

    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        let (row, col) = square_to_grid(square);
        self.grid[row as usize][col as usize] = piece;
    }

    /// Every occupied square with its piece, in row-major scan order
    /// (rank 8 to 1, file a to h).
    pub fn occupied_squares(&self) -> Vec<(Square, Piece)> {
        let mut out = Vec::new();
        for row in 0..8i8 {
            for col in 0..8i8 {
                if let Some(piece) = self.piece_at((row, col)) {
                    if let Ok(square) = grid_to_square((row, col)) {
                        out.push((square, piece));
                    }
                }
            }
        }
        out
    }
}

fn parse_cell(cell: &str) -> Result<Option<Piece>, BlindChessErrors> {
    let mut chars = cell.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(None),
        (Some(code), None) => Piece::from_code(code)
            .map(Some)
            .ok_or_else(|| BlindChessErrors::InvalidPieceCode(cell.to_owned())),
        _ => Err(BlindChessErrors::InvalidPieceCode(cell.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn observed_start() -> ObservedBoard {
        let rows = [
            "rnbqkbnr", "pppppppp", "........", "........", "........", "........", "PPPPPPPP",
            "RNBQKBNR",
        ];
        ObservedBoard {
            grid: rows
                .iter()
                .map(|row| {
                    row.chars()
                        .map(|c| if c == '.' { String::new() } else { c.to_string() })
                        .collect()
                })
                .collect(),
            is_white_side: true,
        }
    }

    #[test]
    fn observed_grid_matches_starting_fen() {
        let observed = BoardState::from_observed(&observed_start()).expect("grid should parse");
        assert_eq!(observed, BoardState::new_game());
        assert_eq!(observed.player_color(), Color::Light);
    }

    #[test]
    fn black_side_sets_flipped() {
        let mut raw = observed_start();
        raw.is_white_side = false;
        let state = BoardState::from_observed(&raw).expect("grid should parse");
        assert!(state.is_flipped);
        assert_eq!(state.player_color(), Color::Dark);
        assert_eq!(state.to_observed(), raw);
    }

    #[test]
    fn malformed_grids_are_rejected() {
        let mut raw = observed_start();
        raw.grid[3][3] = "x".to_owned();
        assert_eq!(
            BoardState::from_observed(&raw),
            Err(BlindChessErrors::InvalidPieceCode("x".to_owned()))
        );

        let mut raw = observed_start();
        raw.grid[0][0] = "Rk".to_owned();
        assert!(BoardState::from_observed(&raw).is_err());

        let mut raw = observed_start();
        raw.grid.pop();
        assert!(matches!(
            BoardState::from_observed(&raw),
            Err(BlindChessErrors::InvalidGridShape(_))
        ));
    }

    #[test]
    fn square_lookup_uses_canonical_orientation() {
        let state = BoardState::new_game();
        let e1 = algebraic_to_square("e1").expect("e1 should parse");
        assert_eq!(state.piece_on(e1), Some(Piece::new(Color::Light, PieceKind::King)));
        let d8 = algebraic_to_square("d8").expect("d8 should parse");
        assert_eq!(state.piece_on(d8), Some(Piece::new(Color::Dark, PieceKind::Queen)));
        assert_eq!(state.piece_at((-1, 0)), None);
        assert_eq!(state.occupied_squares().len(), 32);
    }
}
