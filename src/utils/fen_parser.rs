//! FEN-to-BoardState parser.
//!
//! Builds a board snapshot from a Forsyth-Edwards Notation string. The side
//! to move field decides `is_flipped` (black to move means the local player
//! is black), which is how test fixtures and the CLI pick the player's side.
//! Clock fields are validated and dropped.

use crate::errors::BlindChessErrors;
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<BoardState, BlindChessErrors> {
    let mut parts = fen.split_whitespace();
    let missing = |field: &str| BlindChessErrors::InvalidFENstringForm(format!("missing {field}"));

    let board_part = parts.next().ok_or_else(|| missing("board layout"))?;
    let side_part = parts.next().ok_or_else(|| missing("side-to-move"))?;
    let castling_part = parts.next().ok_or_else(|| missing("castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| missing("en-passant square"))?;

    // Clocks are optional; many hand-written fixtures omit them.
    for clock in parts.by_ref().take(2) {
        clock.parse::<u16>().map_err(|_| {
            BlindChessErrors::InvalidFENstringForm(format!("invalid clock field {clock}"))
        })?;
    }
    if parts.next().is_some() {
        return Err(BlindChessErrors::InvalidFENstringForm(
            "FEN has extra trailing fields".to_owned(),
        ));
    }

    let mut state = BoardState::new_empty();
    parse_board(board_part, &mut state)?;
    state.is_flipped = parse_side_to_move(side_part)? == Color::Dark;
    state.castling_rights = parse_castling_rights(castling_part)?;
    state.en_passant_target = parse_en_passant_square(en_passant_part)?;

    Ok(state)
}

fn parse_board(board_part: &str, state: &mut BoardState) -> Result<(), BlindChessErrors> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(BlindChessErrors::InvalidFENstringForm(
            "board layout must contain 8 ranks".to_owned(),
        ));
    }

    // FEN lists rank 8 first, which is grid row 0.
    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(BlindChessErrors::InvalidFENtoken(ch));
                }
                col += empty_count as usize;
                continue;
            }

            let piece = Piece::from_code(ch).ok_or(BlindChessErrors::InvalidFENtoken(ch))?;
            if col >= 8 {
                return Err(BlindChessErrors::InvalidFENstringForm(format!(
                    "rank {} has too many files",
                    8 - row
                )));
            }
            state.grid[row][col] = Some(piece);
            col += 1;
        }

        if col != 8 {
            return Err(BlindChessErrors::InvalidFENstringForm(format!(
                "rank {} does not sum to 8 files",
                8 - row
            )));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, BlindChessErrors> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(BlindChessErrors::InvalidFENstringForm(format!(
            "invalid side-to-move field {side_part}"
        ))),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, BlindChessErrors> {
    let mut rights = CastlingRights::none();
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => rights.light_kingside = true,
            'Q' => rights.light_queenside = true,
            'k' => rights.dark_kingside = true,
            'q' => rights.dark_queenside = true,
            _ => return Err(BlindChessErrors::InvalidFENtoken(ch)),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, BlindChessErrors> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    Ok(Some(algebraic_to_square(en_passant_part)?))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::errors::BlindChessErrors;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;
    use crate::utils::render_game_state::render_game_state;

    #[test]
    fn parse_starting_fen_and_render_board() {
        let state = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        println!("\n{}", render_game_state(&state));

        assert!(!state.is_flipped);
        assert_eq!(state.castling_rights, CastlingRights::all());
        assert_eq!(state.en_passant_target, None);
        assert_eq!(state.grid[0][4], Some(Piece::new(Color::Dark, PieceKind::King)));
        assert_eq!(state.grid[7][4], Some(Piece::new(Color::Light, PieceKind::King)));
        assert_eq!(state.grid[4][4], None);
    }

    #[test]
    fn black_to_move_flips_and_keeps_en_passant_field() {
        let state = parse_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
            .expect("FEN should parse");
        assert!(state.is_flipped);
        assert_eq!(
            state.en_passant_target.map(|sq| sq.to_string()),
            Some("e3".to_owned())
        );
    }

    #[test]
    fn clocks_are_optional_and_rights_can_be_partial() {
        let state = parse_fen("4k3/8/8/8/8/8/8/R3K3 w Q -").expect("short FEN should parse");
        assert!(state.castling_rights.light_queenside);
        assert!(!state.castling_rights.light_kingside);
        assert!(!state.castling_rights.dark_kingside);
    }

    #[test]
    fn malformed_fen_is_rejected() {
        assert!(matches!(
            parse_fen("8/8/8 w - -"),
            Err(BlindChessErrors::InvalidFENstringForm(_))
        ));
        assert_eq!(
            parse_fen("8/8/8/8/8/8/8/7X w - -"),
            Err(BlindChessErrors::InvalidFENtoken('X'))
        );
        assert!(parse_fen("8/8/8/8/8/8/8/9 w - -").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/8 x - -").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/8 w - - 0 1 extra").is_err());
    }
}
