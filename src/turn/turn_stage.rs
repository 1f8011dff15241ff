//! Turn-cycle stages and the whose-turn tracker.

use std::time::Instant;

use crate::game_state::chess_types::*;

/// What the player asked for, captured when validation starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveIntent {
    Castle(CastlingSide),
    Standard {
        piece_word: String,
        square_word: String,
    },
}

/// A castling request waiting for the surface to confirm it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingDeadline {
    pub side: CastlingSide,
    pub at: Instant,
}

/// Exactly one stage is active at a time. Stages are only built by the
/// transition functions of [`crate::turn::turn_state_machine::TurnStateMachine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnStage {
    AwaitingUserMove,
    /// A board fetch is in flight for `intent`.
    ValidatingUserMove { intent: MoveIntent },
    AwaitingDisambiguation {
        candidates: Vec<Square>,
        pending_target: Square,
        piece_kind: PieceKind,
    },
    AwaitingPromotionChoice { pending_target: Square },
    AwaitingOpponentMove {
        castling_deadline: Option<CastlingDeadline>,
    },
}

impl TurnStage {
    /// Short tag for logs.
    pub fn name(&self) -> &'static str {
        match self {
            TurnStage::AwaitingUserMove => "awaiting-user-move",
            TurnStage::ValidatingUserMove { .. } => "validating-user-move",
            TurnStage::AwaitingDisambiguation { .. } => "awaiting-disambiguation",
            TurnStage::AwaitingPromotionChoice { .. } => "awaiting-promotion-choice",
            TurnStage::AwaitingOpponentMove { .. } => "awaiting-opponent-move",
        }
    }
}

/// Color of whoever moved last, as reported by move-detected events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnTracker {
    pub last_moved_color: Color,
}

impl Default for TurnTracker {
    /// Black "moved last" before the first move, so white's opening move is
    /// accepted.
    fn default() -> Self {
        Self {
            last_moved_color: Color::Dark,
        }
    }
}
