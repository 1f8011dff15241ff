//! Candidate resolution on top of the single-move legality check.
//!
//! Results are always in row-major scan order (rank 8 down to rank 1, file a
//! to h within a rank), so prompts listing candidate squares and the
//! simulated opponent's move list are reproducible.

use crate::game_state::{board_state::BoardState, chess_types::*};
use crate::move_generation::legal_move_checks::is_legal_at;
use crate::utils::algebraic::{grid_to_square, square_to_grid};

/// Squares holding a `color` `kind` piece that may legally move to `target`.
pub fn find_candidates(
    state: &BoardState,
    kind: PieceKind,
    color: Color,
    target: Square,
) -> Vec<Square> {
    let piece = Piece::new(color, kind);
    let to = square_to_grid(target);
    let mut candidates = Vec::new();

    for row in 0..8i8 {
        for col in 0..8i8 {
            if state.piece_at((row, col)) != Some(piece) {
                continue;
            }
            if is_legal_at(state, piece, (row, col), to) {
                if let Ok(square) = grid_to_square((row, col)) {
                    candidates.push(square);
                }
            }
        }
    }

    candidates
}

/// Every legal move for `color`, sources in scan order and destinations in
/// scan order per source.
pub fn legal_moves_for(state: &BoardState, color: Color) -> Vec<ChessMove> {
    let mut moves = Vec::with_capacity(64);

    for (from, piece) in state.occupied_squares() {
        if piece.color != color {
            continue;
        }
        let from_grid = square_to_grid(from);
        for row in 0..8i8 {
            for col in 0..8i8 {
                if !is_legal_at(state, piece, from_grid, (row, col)) {
                    continue;
                }
                if let Ok(to) = grid_to_square((row, col)) {
                    moves.push(ChessMove { piece, from, to });
                }
            }
        }
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_checks::is_legal;
    use crate::utils::algebraic::{algebraic_to_square, code_to_square};

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("test square should parse")
    }

    fn names(squares: &[Square]) -> Vec<String> {
        squares.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_pawn_candidate_for_e4() {
        let state = BoardState::new_game();
        let found = find_candidates(&state, PieceKind::Pawn, Color::Light, sq("e4"));
        assert_eq!(names(&found), vec!["e2"]);
    }

    #[test]
    fn two_rooks_reaching_d1_are_both_candidates_in_scan_order() {
        let state = BoardState::from_fen("4k3/8/8/8/8/8/8/R4RK1 w - -").expect("FEN should parse");
        let found = find_candidates(&state, PieceKind::Rook, Color::Light, sq("d1"));
        assert_eq!(names(&found), vec!["a1", "f1"]);
    }

    #[test]
    fn scan_order_runs_from_rank_eight_down() {
        let state =
            BoardState::from_fen("3R2k1/8/8/8/8/8/8/3R2K1 w - -").expect("FEN should parse");
        let found = find_candidates(&state, PieceKind::Rook, Color::Light, sq("d4"));
        assert_eq!(names(&found), vec!["d8", "d1"]);
    }

    #[test]
    fn no_candidates_when_nothing_can_reach() {
        let state = BoardState::new_game();
        assert!(find_candidates(&state, PieceKind::Bishop, Color::Light, sq("e4")).is_empty());
        assert!(find_candidates(&state, PieceKind::Queen, Color::Dark, sq("h4")).is_empty());
    }

    #[test]
    fn pinned_rook_is_not_a_candidate() {
        // The e2 rook is pinned by the e8 rook; only the a3 rook can reach a2.
        let state = BoardState::from_fen("4r1k1/8/8/8/8/R7/4R3/4K3 w - -").expect("FEN should parse");
        let found = find_candidates(&state, PieceKind::Rook, Color::Light, sq("a2"));
        assert_eq!(names(&found), vec!["a3"]);
    }

    #[test]
    fn candidates_are_exactly_the_legal_sources() {
        let fens = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
            "4r1k1/8/8/8/8/R7/4R3/4K3 w - -",
            "4r1k1/8/8/8/8/8/8/3BK3 w - -",
        ];
        let kinds = [
            PieceKind::Pawn,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
            PieceKind::King,
        ];

        for fen in fens {
            let state = BoardState::from_fen(fen).expect("FEN should parse");
            for color in [Color::Light, Color::Dark] {
                for kind in kinds {
                    let piece = Piece::new(color, kind);
                    for file in 1..=8u8 {
                        for rank in 1..=8u8 {
                            let target =
                                code_to_square(file * 10 + rank).expect("code should decode");
                            let expected: Vec<Square> = state
                                .occupied_squares()
                                .into_iter()
                                .filter(|&(from, p)| p == piece && is_legal(&state, piece, from, target))
                                .map(|(from, _)| from)
                                .collect();
                            assert_eq!(
                                find_candidates(&state, kind, color, target),
                                expected,
                                "{fen}: {color:?} {kind:?} to {target}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn opening_position_has_twenty_moves_each() {
        let state = BoardState::new_game();
        assert_eq!(legal_moves_for(&state, Color::Light).len(), 20);
        assert_eq!(legal_moves_for(&state, Color::Dark).len(), 20);
    }

    #[test]
    fn legal_moves_respect_check() {
        // White is checked by the rook on e8; only king moves off the file
        // and the bishop block on e2 remain.
        let state = BoardState::from_fen("4r1k1/8/8/8/8/8/8/3BK3 w - -").expect("FEN should parse");
        let moves = legal_moves_for(&state, Color::Light);
        let listed: Vec<String> = moves
            .iter()
            .map(|m| format!("{}{}", m.from, m.to))
            .collect();
        assert_eq!(listed, vec!["d1e2", "e1d2", "e1f2", "e1f1"]);
    }
}
