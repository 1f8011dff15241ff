use crate::game_state::chess_rules::pawn_start_row;
use crate::game_state::{board_state::BoardState, chess_types::*};
use crate::move_generation::legal_move_shared::{is_empty, occupied_by};

/// Pawn reachability: single push, double push from the start row, or a
/// diagonal capture onto an enemy piece. Diagonal moves onto empty squares
/// are never allowed (no en passant).
pub fn pawn_can_reach(state: &BoardState, color: Color, from: GridLocation, to: GridLocation) -> bool {
    let direction = color.pawn_direction();
    let row_diff = to.0 - from.0;
    let col_diff = to.1 - from.1;

    if col_diff == 0 && row_diff == direction {
        return is_empty(state, to);
    }

    if col_diff == 0 && row_diff == 2 * direction && from.0 == pawn_start_row(color) {
        return is_empty(state, to) && is_empty(state, (from.0 + direction, from.1));
    }

    if col_diff.abs() == 1 && row_diff == direction {
        return occupied_by(state, to, color.opposite());
    }

    false
}

#[cfg(test)]
mod tests {
    use super::pawn_can_reach;
    use crate::game_state::{board_state::BoardState, chess_types::Color};

    #[test]
    fn pushes_from_start_position() {
        let state = BoardState::new_game();
        // e2 = (6, 4)
        assert!(pawn_can_reach(&state, Color::Light, (6, 4), (5, 4)));
        assert!(pawn_can_reach(&state, Color::Light, (6, 4), (4, 4)));
        assert!(!pawn_can_reach(&state, Color::Light, (6, 4), (3, 4)));
        assert!(!pawn_can_reach(&state, Color::Light, (6, 4), (7, 4)));
        // e7 = (1, 4)
        assert!(pawn_can_reach(&state, Color::Dark, (1, 4), (3, 4)));
        assert!(!pawn_can_reach(&state, Color::Dark, (1, 4), (0, 4)));
    }

    #[test]
    fn double_push_needs_both_squares_empty_and_start_row() {
        let blocked = BoardState::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - -").expect("FEN should parse");
        assert!(!pawn_can_reach(&blocked, Color::Light, (6, 4), (4, 4)));
        assert!(!pawn_can_reach(&blocked, Color::Light, (6, 4), (5, 4)));

        let advanced = BoardState::from_fen("4k3/8/8/8/8/4P3/8/4K3 w - -").expect("FEN should parse");
        assert!(!pawn_can_reach(&advanced, Color::Light, (5, 4), (3, 4)));
    }

    #[test]
    fn diagonal_only_captures() {
        let state = BoardState::from_fen("4k3/8/8/3p1P2/4P3/8/8/4K3 w - -").expect("FEN should parse");
        // e4 = (4, 4); d5 holds a black pawn, f5 a white pawn.
        assert!(pawn_can_reach(&state, Color::Light, (4, 4), (3, 3)));
        assert!(!pawn_can_reach(&state, Color::Light, (4, 4), (3, 5)));
        // Empty diagonal: no en passant.
        let empty = BoardState::from_fen("4k3/8/8/8/4P3/8/8/4K3 w - d6").expect("FEN should parse");
        assert!(!pawn_can_reach(&empty, Color::Light, (4, 4), (3, 3)));
    }
}
