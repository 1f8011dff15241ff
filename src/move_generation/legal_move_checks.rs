//! Move legality for a single candidate move.
//!
//! A move is legal when the piece can geometrically reach the destination
//! (path clearance included), the destination does not hold a piece of the
//! mover's color, and after simulating the move no enemy piece can reach the
//! mover's king. The king-safety pass uses the same reachability rules
//! without a nested safety check.
//!
//! Nothing here fails: out-of-bounds input and odd boards (for example a
//! board with no king) simply produce `false` / "not in check".

use crate::game_state::{board_state::BoardState, chess_types::*};
use crate::move_generation::legal_move_apply::simulate_move;
use crate::move_generation::legal_move_shared::{is_on_board, occupied_by};
use crate::move_generation::legal_moves_bishop::bishop_can_reach;
use crate::move_generation::legal_moves_king::king_can_reach;
use crate::move_generation::legal_moves_knight::knight_can_reach;
use crate::move_generation::legal_moves_pawn::pawn_can_reach;
use crate::move_generation::legal_moves_queen::queen_can_reach;
use crate::move_generation::legal_moves_rook::rook_can_reach;
use crate::utils::algebraic::square_to_grid;

/// Geometric reachability plus the same-color destination rule.
pub fn can_piece_reach(
    state: &BoardState,
    piece: Piece,
    from: GridLocation,
    to: GridLocation,
) -> bool {
    if !is_on_board(from) || !is_on_board(to) || from == to {
        return false;
    }
    if occupied_by(state, to, piece.color) {
        return false;
    }

    match piece.kind {
        PieceKind::Pawn => pawn_can_reach(state, piece.color, from, to),
        PieceKind::Knight => knight_can_reach(from, to),
        PieceKind::Bishop => bishop_can_reach(state, from, to),
        PieceKind::Rook => rook_can_reach(state, from, to),
        PieceKind::Queen => queen_can_reach(state, from, to),
        PieceKind::King => king_can_reach(from, to),
    }
}

#[inline]
pub fn king_location(state: &BoardState, color: Color) -> Option<GridLocation> {
    let king = Piece::new(color, PieceKind::King);
    for row in 0..8i8 {
        for col in 0..8i8 {
            if state.piece_at((row, col)) == Some(king) {
                return Some((row, col));
            }
        }
    }
    None
}

/// True when some enemy piece can reach the king of `color`. A board without
/// that king is treated as not in check.
pub fn is_king_in_check(state: &BoardState, color: Color) -> bool {
    let Some(king) = king_location(state, color) else {
        return false;
    };

    for row in 0..8i8 {
        for col in 0..8i8 {
            if let Some(attacker) = state.piece_at((row, col)) {
                if attacker.color != color && can_piece_reach(state, attacker, (row, col), king) {
                    return true;
                }
            }
        }
    }
    false
}

/// Grid-coordinate form of [`is_legal`]; off-board coordinates are illegal.
pub fn is_legal_at(
    state: &BoardState,
    piece: Piece,
    from: GridLocation,
    to: GridLocation,
) -> bool {
    if !can_piece_reach(state, piece, from, to) {
        return false;
    }
    let next = simulate_move(state, piece, from, to);
    !is_king_in_check(&next, piece.color)
}

/// Whether `piece` standing on `from` may legally move to `to`.
#[inline]
pub fn is_legal(state: &BoardState, piece: Piece, from: Square, to: Square) -> bool {
    is_legal_at(state, piece, square_to_grid(from), square_to_grid(to))
}
