use crate::game_state::{board_state::BoardState, chess_types::GridLocation};
use crate::move_generation::legal_move_shared::is_path_clear;

#[inline]
pub fn is_straight(from: GridLocation, to: GridLocation) -> bool {
    from.0 == to.0 || from.1 == to.1
}

pub fn rook_can_reach(state: &BoardState, from: GridLocation, to: GridLocation) -> bool {
    is_straight(from, to) && is_path_clear(state, from, to)
}
