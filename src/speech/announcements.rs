//! Sentences handed to the speech sink.
//!
//! Move narration follows the player's point of view: the local player's
//! moves are "You moved ...", the other side's are "White moved ..." or
//! "Black moved ...". Prompts are short so they can be spoken between
//! utterances.

use crate::game_state::chess_types::*;
use crate::session::board_watcher::DetectedMove;

/// Narrate a detected move. King slides of two files are spoken as castling.
pub fn describe_move(detected: &DetectedMove, player_color: Color) -> String {
    let subject = if detected.piece.color == player_color {
        "You".to_owned()
    } else {
        detected.piece.color.display_name().to_owned()
    };

    if let Some(side) = castling_side_of(detected) {
        return format!("{subject} castled {}", side.spoken_name());
    }

    let mut sentence = format!(
        "{subject} moved {} from {} to {}",
        detected.piece.kind.display_name(),
        detected.from,
        detected.to
    );
    if let Some(kind) = detected.promoted_to {
        sentence.push_str(&format!(" and promoted to {}", kind.display_name()));
    }
    sentence
}

fn castling_side_of(detected: &DetectedMove) -> Option<CastlingSide> {
    if detected.piece.kind != PieceKind::King || detected.from.rank() != detected.to.rank() {
        return None;
    }
    match detected.to.file() as i8 - detected.from.file() as i8 {
        2 => Some(CastlingSide::Kingside),
        -2 => Some(CastlingSide::Queenside),
        _ => None,
    }
}

pub fn invalid_square(word: &str) -> String {
    if word.is_empty() {
        "Invalid square".to_owned()
    } else {
        format!("Invalid square {word}")
    }
}

pub fn unknown_piece(word: &str) -> String {
    format!("Unknown piece {word}")
}

pub fn illegal_move(kind: PieceKind, target: Square) -> String {
    format!("Illegal move, no {} can reach {target}", kind.spoken_name())
}

/// Disambiguation prompt listing the candidate squares in scan order.
pub fn which_piece(kind: PieceKind, target: Square, candidates: &[Square]) -> String {
    let squares: Vec<String> = candidates.iter().map(|sq| sq.to_string()).collect();
    format!(
        "Multiple {}s can reach {target}, from {}. Say the square of the piece to move",
        kind.spoken_name(),
        squares.join(" or ")
    )
}

pub fn not_a_candidate(square: Square) -> String {
    format!("That piece cannot move there, nothing on {square} qualifies")
}

pub fn choose_promotion() -> String {
    "Choose a promotion piece: queen, knight, rook or bishop".to_owned()
}

pub fn cannot_castle(side: CastlingSide) -> String {
    format!("Cannot castle {}", side.spoken_name())
}

pub fn move_failed() -> String {
    "That move could not be played".to_owned()
}
