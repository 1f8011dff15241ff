use crate::game_state::chess_types::GridLocation;

pub fn knight_can_reach(from: GridLocation, to: GridLocation) -> bool {
    let row_diff = (to.0 - from.0).abs();
    let col_diff = (to.1 - from.1).abs();
    (row_diff == 2 && col_diff == 1) || (row_diff == 1 && col_diff == 2)
}
