use crate::game_state::{board_state::BoardState, chess_types::*};
use crate::utils::algebraic::square_to_code;

/// Copy of `state` with `piece` moved from `from` to `to`, capturing whatever
/// stood on `to`. Used by the king-safety check; nothing else changes.
pub fn simulate_move(
    state: &BoardState,
    piece: Piece,
    from: GridLocation,
    to: GridLocation,
) -> BoardState {
    let mut next = state.clone();
    next.grid[from.0 as usize][from.1 as usize] = None;
    next.grid[to.0 as usize][to.1 as usize] = Some(piece);
    next
}

/// Play a move the way the external surface would: castling moves the rook
/// alongside a two-file king slide, promotion replaces the pawn, and castling
/// rights are dropped once a king or rook leaves (or is captured on) its
/// home square.
pub fn apply_move(
    state: &BoardState,
    chess_move: &ChessMove,
    promotion: Option<PieceKind>,
) -> BoardState {
    let mut next = state.clone();
    let piece = chess_move.piece;
    let placed = match promotion {
        Some(kind) if piece.kind == PieceKind::Pawn => Piece::new(piece.color, kind),
        _ => piece,
    };

    next.set_piece(chess_move.from, None);
    next.set_piece(chess_move.to, Some(placed));

    if piece.kind == PieceKind::King {
        if let Some((rook_from, rook_to)) = castling_rook_codes(piece.color, chess_move) {
            let (from_row, from_col) = grid_of_code(rook_from);
            let (to_row, to_col) = grid_of_code(rook_to);
            let rook = next.grid[from_row][from_col].take();
            next.grid[to_row][to_col] = rook;
        }
    }

    update_castling_rights(&mut next, chess_move);
    next.en_passant_target = None;
    next
}

fn castling_rook_codes(color: Color, chess_move: &ChessMove) -> Option<(u8, u8)> {
    match (color, square_to_code(chess_move.from), square_to_code(chess_move.to)) {
        (Color::Light, 51, 71) => Some((81, 61)),
        (Color::Light, 51, 31) => Some((11, 41)),
        (Color::Dark, 58, 78) => Some((88, 68)),
        (Color::Dark, 58, 38) => Some((18, 48)),
        _ => None,
    }
}

fn grid_of_code(code: u8) -> (usize, usize) {
    // Only called with the fixed rook codes above.
    let rank = (code % 10) as usize;
    let file = (code / 10) as usize;
    (8 - rank, file - 1)
}

fn update_castling_rights(state: &mut BoardState, chess_move: &ChessMove) {
    for code in [square_to_code(chess_move.from), square_to_code(chess_move.to)] {
        match code {
            51 => {
                state.castling_rights.light_kingside = false;
                state.castling_rights.light_queenside = false;
            }
            58 => {
                state.castling_rights.dark_kingside = false;
                state.castling_rights.dark_queenside = false;
            }
            81 => state.castling_rights.light_kingside = false,
            11 => state.castling_rights.light_queenside = false,
            88 => state.castling_rights.dark_kingside = false,
            18 => state.castling_rights.dark_queenside = false,
            _ => {}
        }
    }
}
