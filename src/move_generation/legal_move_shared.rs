use crate::game_state::{board_state::BoardState, chess_types::*};

#[inline]
pub fn is_on_board(location: GridLocation) -> bool {
    (0..8).contains(&location.0) && (0..8).contains(&location.1)
}

/// True when `location` holds a piece of `color`.
#[inline]
pub fn occupied_by(state: &BoardState, location: GridLocation, color: Color) -> bool {
    matches!(state.piece_at(location), Some(piece) if piece.color == color)
}

#[inline]
pub fn is_empty(state: &BoardState, location: GridLocation) -> bool {
    state.piece_at(location).is_none()
}

/// Every square strictly between `from` and `to` is empty. Walks a unit step
/// in row and column, so callers must already know the two squares share a
/// line or diagonal.
pub fn is_path_clear(state: &BoardState, from: GridLocation, to: GridLocation) -> bool {
    let row_step = (to.0 - from.0).signum();
    let col_step = (to.1 - from.1).signum();
    let mut current = (from.0 + row_step, from.1 + col_step);
    while current != to {
        if !is_empty(state, current) {
            return false;
        }
        current = (current.0 + row_step, current.1 + col_step);
    }
    true
}
