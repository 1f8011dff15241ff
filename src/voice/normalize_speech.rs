//! Transcript normalization.
//!
//! Speech recognizers return free text with homophones ("night to e four",
//! "bishop see for"). Normalization lowercases, splits on anything that is
//! not a letter or digit, and rewrites known homophones word by word. The
//! short filler words "to", "too", "for", "won" and "ate" only become digits
//! when they directly follow a file letter; elsewhere "to", "too" and "for"
//! are dropped.

use crate::game_state::chess_types::{CastlingSide, PieceKind};
use crate::session::collaborators::VoiceSignals;

const CASTLE_WORDS: [&str; 4] = ["castle", "castles", "castling", "castled"];

pub fn normalize_transcript(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut out: Vec<String> = Vec::new();

    for word in lowered
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let after_file = out.last().is_some_and(|prev| is_file_letter(prev));
        let mapped = match word {
            "night" | "nite" | "knights" | "nights" => "knight",
            "ponde" | "pond" | "prawn" | "pawns" | "porn" => "pawn",
            "rock" | "rooks" | "brook" => "rook",
            "bishops" => "bishop",
            "queens" => "queen",
            "kings" => "king",

            "ay" => "a",
            "be" | "bee" => "b",
            "see" | "sea" | "cee" => "c",
            "dee" => "d",
            "ee" => "e",
            "if" | "eff" => "f",
            "gee" => "g",
            "aitch" => "h",

            "one" => "1",
            "two" => "2",
            "three" | "tree" => "3",
            "four" => "4",
            "five" => "5",
            "six" => "6",
            "seven" => "7",
            "eight" => "8",

            "to" | "too" if after_file => "2",
            "for" if after_file => "4",
            "won" if after_file => "1",
            "ate" if after_file => "8",
            "to" | "too" | "for" => continue,

            other => other,
        };
        out.push(mapped.to_owned());
    }

    out
}

#[inline]
fn is_file_letter(word: &str) -> bool {
    matches!(word.as_bytes(), [b'a'..=b'h'])
}

/// Letter-then-digit pair, either as one token ("e4") or two ("e", "4").
/// Any letter is accepted so that a misheard square still reaches the
/// square decoder and can be reported as invalid.
fn find_square_word(tokens: &[String]) -> Option<String> {
    for (i, token) in tokens.iter().enumerate() {
        match token.as_bytes() {
            [letter, digit] if letter.is_ascii_lowercase() && digit.is_ascii_digit() => {
                return Some(token.clone());
            }
            [letter] if letter.is_ascii_lowercase() => {
                if let Some(next) = tokens.get(i + 1) {
                    if let [digit] = next.as_bytes() {
                        if digit.is_ascii_digit() {
                            return Some(format!("{token}{next}"));
                        }
                    }
                }
            }
            _ => {}
        }
    }
    None
}

fn find_castling_side(tokens: &[String]) -> Option<CastlingSide> {
    if !tokens.iter().any(|t| CASTLE_WORDS.contains(&t.as_str())) {
        return None;
    }
    tokens.iter().find_map(|t| match t.as_str() {
        "king" | "kingside" | "short" => Some(CastlingSide::Kingside),
        "queen" | "queenside" | "long" => Some(CastlingSide::Queenside),
        _ => None,
    })
}

/// Everything recognizable in a single transcript. Fields that were not
/// heard stay empty.
pub fn extract_signals(text: &str) -> VoiceSignals {
    let tokens = normalize_transcript(text);

    let piece_word = tokens
        .iter()
        .find(|t| PieceKind::from_spoken(t).is_some())
        .cloned()
        .unwrap_or_default();

    VoiceSignals {
        piece_word,
        square_word: find_square_word(&tokens).unwrap_or_default(),
        castling_side: find_castling_side(&tokens),
    }
}
