use crate::game_state::{board_state::BoardState, chess_types::GridLocation};
use crate::move_generation::legal_move_shared::is_path_clear;
use crate::move_generation::legal_moves_bishop::is_diagonal;
use crate::move_generation::legal_moves_rook::is_straight;

pub fn queen_can_reach(state: &BoardState, from: GridLocation, to: GridLocation) -> bool {
    (is_straight(from, to) || is_diagonal(from, to)) && is_path_clear(state, from, to)
}
