//! Voice-driven turn cycle.
//!
//! The machine is pure and explicitly polled. The session feeds it the
//! latest voice signals on every tick, the board snapshot it asked for, and
//! every move the board watcher detects. Each call returns the side effects
//! to perform, in order, as [`SessionRequest`]s.
//!
//! Voice is only consumed in three stages: `AwaitingUserMove` (start a
//! validation), `AwaitingDisambiguation` (square word only) and
//! `AwaitingPromotionChoice` (piece word only). While validating or waiting
//! for the opponent, voice is ignored.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::errors::BlindChessErrors;
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_rules::{castling_king_slide, promotion_rank, PROMOTION_CHOICES};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::find_candidates;
use crate::session::board_watcher::DetectedMove;
use crate::session::collaborators::VoiceSignals;
use crate::speech::announcements;
use crate::turn::turn_requests::{MoveRequest, SessionRequest, TouchRequest};
use crate::turn::turn_stage::{CastlingDeadline, MoveIntent, TurnStage, TurnTracker};
use crate::utils::algebraic::{algebraic_to_square, square_to_code};

#[derive(Debug, Clone)]
pub struct TurnStateMachine {
    stage: TurnStage,
    tracker: TurnTracker,
    player_color: Color,
    castling_timeout: Duration,
}

impl TurnStateMachine {
    pub fn new(player_color: Color, castling_timeout: Duration) -> Self {
        Self {
            stage: TurnStage::AwaitingUserMove,
            tracker: TurnTracker::default(),
            player_color,
            castling_timeout,
        }
    }

    #[inline]
    pub fn stage(&self) -> &TurnStage {
        &self.stage
    }

    #[inline]
    pub fn player_color(&self) -> Color {
        self.player_color
    }

    #[inline]
    pub fn last_moved_color(&self) -> Color {
        self.tracker.last_moved_color
    }

    pub fn set_player_color(&mut self, color: Color) {
        self.player_color = color;
    }

    pub fn set_castling_timeout(&mut self, timeout: Duration) {
        self.castling_timeout = timeout;
    }

    /// Fresh game. White moves first, so a black player starts out waiting
    /// for the opening move.
    pub fn begin(&mut self, player_color: Color) {
        self.player_color = player_color;
        self.tracker = TurnTracker::default();
        let first = match player_color {
            Color::Light => TurnStage::AwaitingUserMove,
            Color::Dark => TurnStage::AwaitingOpponentMove {
                castling_deadline: None,
            },
        };
        self.transition(first);
    }

    fn transition(&mut self, next: TurnStage) {
        if self.stage.name() != next.name() {
            info!("[TURN] {} -> {}", self.stage.name(), next.name());
        }
        self.stage = next;
    }

    /// One scheduler tick with the currently latched voice signals.
    pub fn tick(&mut self, now: Instant, signals: &VoiceSignals) -> Vec<SessionRequest> {
        match &self.stage {
            TurnStage::AwaitingUserMove => self.start_validation(signals),
            TurnStage::ValidatingUserMove { .. } => Vec::new(),
            TurnStage::AwaitingDisambiguation {
                candidates,
                pending_target,
                piece_kind,
            } => {
                let (candidates, target, kind) = (candidates.clone(), *pending_target, *piece_kind);
                self.resolve_disambiguation(signals, &candidates, target, kind)
            }
            TurnStage::AwaitingPromotionChoice { pending_target } => {
                let target = *pending_target;
                self.resolve_promotion(signals, target)
            }
            TurnStage::AwaitingOpponentMove { castling_deadline } => match castling_deadline {
                Some(deadline) if now >= deadline.at => {
                    let side = deadline.side;
                    warn!("[TURN] castling {} was not confirmed in time", side.spoken_name());
                    self.transition(TurnStage::AwaitingUserMove);
                    vec![
                        SessionRequest::Announce(announcements::cannot_castle(side)),
                        SessionRequest::ResetVoice,
                    ]
                }
                _ => Vec::new(),
            },
        }
    }

    fn start_validation(&mut self, signals: &VoiceSignals) -> Vec<SessionRequest> {
        let intent = if let Some(side) = signals.castling_side {
            MoveIntent::Castle(side)
        } else if !signals.piece_word.is_empty() && !signals.square_word.is_empty() {
            MoveIntent::Standard {
                piece_word: signals.piece_word.clone(),
                square_word: signals.square_word.clone(),
            }
        } else {
            return Vec::new();
        };

        debug!("[TURN] validating {intent:?}");
        self.transition(TurnStage::ValidatingUserMove { intent });
        vec![SessionRequest::FetchBoard]
    }

    /// Result of the board fetch requested by the last validation. Ignored
    /// unless a validation is in flight.
    pub fn on_board_state(
        &mut self,
        now: Instant,
        board: Result<BoardState, BlindChessErrors>,
    ) -> Vec<SessionRequest> {
        let TurnStage::ValidatingUserMove { intent } = &self.stage else {
            debug!("[TURN] board state arrived outside validation, ignored");
            return Vec::new();
        };
        let intent = intent.clone();

        let state = match board {
            Ok(state) => state,
            Err(err) => {
                // Signals stay latched so the next tick retries.
                warn!("[TURN] board fetch failed: {err}");
                self.transition(TurnStage::AwaitingUserMove);
                return Vec::new();
            }
        };
        self.player_color = state.player_color();

        match intent {
            MoveIntent::Castle(side) => self.request_castle(now, side),
            MoveIntent::Standard {
                piece_word,
                square_word,
            } => self.resolve_standard(&state, &piece_word, &square_word),
        }
    }

    fn request_castle(&mut self, now: Instant, side: CastlingSide) -> Vec<SessionRequest> {
        let (from_code, to_code) = castling_king_slide(self.player_color, side);
        info!("[TURN] castling {} ({from_code} -> {to_code})", side.spoken_name());
        self.transition(TurnStage::AwaitingOpponentMove {
            castling_deadline: Some(CastlingDeadline {
                side,
                at: now + self.castling_timeout,
            }),
        });
        vec![
            SessionRequest::ExecuteMove(MoveRequest {
                from_code,
                to_code,
                player_color: self.player_color,
            }),
            SessionRequest::ResetVoice,
        ]
    }

    fn resolve_standard(
        &mut self,
        state: &BoardState,
        piece_word: &str,
        square_word: &str,
    ) -> Vec<SessionRequest> {
        let Ok(target) = algebraic_to_square(square_word) else {
            return self.reject(announcements::invalid_square(square_word));
        };
        let Some(kind) = PieceKind::from_spoken(piece_word) else {
            return self.reject(announcements::unknown_piece(piece_word));
        };

        let candidates = find_candidates(state, kind, self.player_color, target);
        debug!("[TURN] {} to {target}: candidates {candidates:?}", kind.spoken_name());

        match candidates.as_slice() {
            [] => self.reject(announcements::illegal_move(kind, target)),
            [from] => self.execute(*from, target, kind),
            _ => {
                let prompt = announcements::which_piece(kind, target, &candidates);
                self.transition(TurnStage::AwaitingDisambiguation {
                    candidates,
                    pending_target: target,
                    piece_kind: kind,
                });
                vec![SessionRequest::Announce(prompt), SessionRequest::ResetVoice]
            }
        }
    }

    fn reject(&mut self, sentence: String) -> Vec<SessionRequest> {
        info!("[TURN] rejected: {sentence}");
        self.transition(TurnStage::AwaitingUserMove);
        vec![SessionRequest::Announce(sentence), SessionRequest::ResetVoice]
    }

    fn execute(&mut self, from: Square, target: Square, kind: PieceKind) -> Vec<SessionRequest> {
        let mut requests = vec![SessionRequest::ExecuteMove(MoveRequest {
            from_code: square_to_code(from),
            to_code: square_to_code(target),
            player_color: self.player_color,
        })];

        if kind == PieceKind::Pawn && target.rank() == promotion_rank(self.player_color) {
            requests.push(SessionRequest::Announce(announcements::choose_promotion()));
            requests.push(SessionRequest::ResetVoice);
            self.transition(TurnStage::AwaitingPromotionChoice {
                pending_target: target,
            });
        } else {
            requests.push(SessionRequest::ResetVoice);
            self.transition(TurnStage::AwaitingOpponentMove {
                castling_deadline: None,
            });
        }
        requests
    }

    fn resolve_disambiguation(
        &mut self,
        signals: &VoiceSignals,
        candidates: &[Square],
        target: Square,
        kind: PieceKind,
    ) -> Vec<SessionRequest> {
        if signals.square_word.is_empty() {
            return Vec::new();
        }

        let Ok(chosen) = algebraic_to_square(&signals.square_word) else {
            return vec![
                SessionRequest::Announce(announcements::invalid_square(&signals.square_word)),
                SessionRequest::ResetVoice,
            ];
        };

        if candidates.contains(&chosen) {
            self.execute(chosen, target, kind)
        } else {
            vec![
                SessionRequest::Announce(announcements::not_a_candidate(chosen)),
                SessionRequest::ResetVoice,
            ]
        }
    }

    fn resolve_promotion(&mut self, signals: &VoiceSignals, target: Square) -> Vec<SessionRequest> {
        if signals.piece_word.is_empty() {
            return Vec::new();
        }

        let choice = PieceKind::from_spoken(&signals.piece_word)
            .and_then(|kind| PROMOTION_CHOICES.iter().position(|&c| c == kind));
        let Some(offset) = choice else {
            return vec![
                SessionRequest::Announce(announcements::choose_promotion()),
                SessionRequest::ResetVoice,
            ];
        };

        let square_code = promotion_chooser_code(target, self.player_color, offset as u8);
        info!("[TURN] promoting to {} via square {square_code}", signals.piece_word);
        self.transition(TurnStage::AwaitingOpponentMove {
            castling_deadline: None,
        });
        vec![
            SessionRequest::Touch(TouchRequest {
                square_code,
                player_color: self.player_color,
            }),
            SessionRequest::ResetVoice,
        ]
    }

    /// A move seen on the board. Repeats from the side that moved last are
    /// dropped.
    pub fn on_move_detected(&mut self, detected: &DetectedMove) -> Vec<SessionRequest> {
        let mover = detected.piece.color;
        if mover == self.tracker.last_moved_color {
            debug!("[TURN] ignoring repeated move report from {}", mover.display_name());
            return Vec::new();
        }
        self.tracker.last_moved_color = mover;

        let mut requests = vec![SessionRequest::Announce(announcements::describe_move(
            detected,
            self.player_color,
        ))];

        if mover != self.player_color {
            requests.push(SessionRequest::ResetVoice);
            self.transition(TurnStage::AwaitingUserMove);
        } else if let TurnStage::AwaitingOpponentMove { castling_deadline } = &mut self.stage {
            *castling_deadline = None;
        }
        requests
    }

    /// The executor refused a request the machine issued.
    pub fn on_execution_failed(&mut self) -> Vec<SessionRequest> {
        warn!("[TURN] executor rejected the last request");
        self.transition(TurnStage::AwaitingUserMove);
        vec![
            SessionRequest::Announce(announcements::move_failed()),
            SessionRequest::ResetVoice,
        ]
    }

    /// Drop whatever is pending, including an armed castling deadline.
    pub fn stop(&mut self) {
        self.transition(TurnStage::AwaitingUserMove);
    }
}

/// The chooser stacks queen, knight, rook, bishop starting on the promotion
/// square and running back toward the promoting side.
fn promotion_chooser_code(target: Square, color: Color, offset: u8) -> u8 {
    let rank = match color {
        Color::Light => target.rank() - offset,
        Color::Dark => target.rank() + offset,
    };
    target.file() * 10 + rank
}
