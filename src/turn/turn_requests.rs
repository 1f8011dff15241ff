//! Side effects requested by the turn state machine.
//!
//! The machine never talks to a collaborator directly. It returns these as
//! data and the session dispatches them in order.

use crate::game_state::chess_types::Color;

/// Drag a piece between two squares, both as two-digit `file*10 + rank`
/// codes. `player_color` tells the surface which way its board is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub from_code: u8,
    pub to_code: u8,
    pub player_color: Color,
}

/// Tap a single square, used for the promotion chooser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchRequest {
    pub square_code: u8,
    pub player_color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionRequest {
    FetchBoard,
    ExecuteMove(MoveRequest),
    Touch(TouchRequest),
    Announce(String),
    ResetVoice,
}
