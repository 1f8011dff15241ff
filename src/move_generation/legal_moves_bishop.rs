use crate::game_state::{board_state::BoardState, chess_types::GridLocation};
use crate::move_generation::legal_move_shared::is_path_clear;

#[inline]
pub fn is_diagonal(from: GridLocation, to: GridLocation) -> bool {
    (to.0 - from.0).abs() == (to.1 - from.1).abs()
}

pub fn bishop_can_reach(state: &BoardState, from: GridLocation, to: GridLocation) -> bool {
    is_diagonal(from, to) && is_path_clear(state, from, to)
}
