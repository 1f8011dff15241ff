//! Terminal-oriented Unicode board renderer.
//!
//! Used by the CLI `board` command and by tests when a position needs
//! eyeballing. Rendered from the local player's side: black players see
//! rank 1 at the top.

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::*;

pub fn render_game_state(state: &BoardState) -> String {
    let mut rows: Vec<usize> = (0..8).collect();
    let mut cols: Vec<usize> = (0..8).collect();
    if state.is_flipped {
        rows.reverse();
        cols.reverse();
    }

    let files: String = cols
        .iter()
        .map(|&col| char::from(b'a' + col as u8).to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = String::new();
    out.push_str(&format!("  {files}\n"));

    for &row in &rows {
        let rank = char::from(b'8' - row as u8);
        out.push(rank);
        out.push(' ');

        for (i, &col) in cols.iter().enumerate() {
            match state.grid[row][col] {
                Some(piece) => out.push(piece_to_unicode(piece)),
                None => out.push('·'),
            }
            if i < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank);
        out.push('\n');
    }

    out.push_str(&format!("  {files}"));

    out
}

fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::Light, PieceKind::Pawn) => '♙',
        (Color::Light, PieceKind::Knight) => '♘',
        (Color::Light, PieceKind::Bishop) => '♗',
        (Color::Light, PieceKind::Rook) => '♖',
        (Color::Light, PieceKind::Queen) => '♕',
        (Color::Light, PieceKind::King) => '♔',
        (Color::Dark, PieceKind::Pawn) => '♟',
        (Color::Dark, PieceKind::Knight) => '♞',
        (Color::Dark, PieceKind::Bishop) => '♝',
        (Color::Dark, PieceKind::Rook) => '♜',
        (Color::Dark, PieceKind::Queen) => '♛',
        (Color::Dark, PieceKind::King) => '♚',
    }
}

#[cfg(test)]
mod tests {
    use super::render_game_state;
    use crate::game_state::board_state::BoardState;

    #[test]
    fn white_view_has_rank_eight_on_top() {
        let text = render_game_state(&BoardState::new_game());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  a b c d e f g h");
        assert_eq!(lines[1], "8 ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜ 8");
        assert_eq!(lines[8], "1 ♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖ 1");
    }

    #[test]
    fn black_view_is_rotated() {
        let mut state = BoardState::new_game();
        state.is_flipped = true;
        let text = render_game_state(&state);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  h g f e d c b a");
        assert_eq!(lines[1], "1 ♖ ♘ ♗ ♔ ♕ ♗ ♘ ♖ 1");
    }
}
