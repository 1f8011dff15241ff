//! In-memory stand-in for the external board surface.
//!
//! Plays both collaborator roles: it serves the board to the observer side
//! and accepts drags and taps on the executor side. The opponent is a random
//! mover that replies after a configurable number of board polls, so the
//! watcher always sees the player's move and the reply in separate polls.
//!
//! Like a real web board it is not forgiving: illegal drags are rejected,
//! and a castle that is not allowed is silently ignored (the king simply
//! does not move), which leaves the caller to notice the missing
//! confirmation. A pawn dragged to its last rank waits for a tap on the
//! promotion chooser before the move is completed.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::errors::BlindChessErrors;
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_rules::{promotion_rank, PROMOTION_CHOICES};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{apply_move, simulate_move};
use crate::move_generation::legal_move_checks::{is_king_in_check, is_legal};
use crate::move_generation::legal_move_generator::legal_moves_for;
use crate::session::collaborators::{BoardObserver, MoveExecutor, ObservedBoard};
use crate::turn::turn_requests::{MoveRequest, TouchRequest};
use crate::utils::algebraic::{code_to_square, square_to_grid};

pub struct SimulatedSurface {
    board: BoardState,
    side_to_move: Color,
    pending_promotion: Option<ChessMove>,
    polls_waiting: u32,
    reply_polls: u32,
    available: bool,
    rng: StdRng,
}

impl SimulatedSurface {
    /// White moves first; the local player's side is `start.player_color()`.
    pub fn new(start: BoardState, reply_polls: u32, seed: Option<u64>) -> Self {
        Self {
            board: start,
            side_to_move: Color::Light,
            pending_promotion: None,
            polls_waiting: 0,
            reply_polls: reply_polls.max(1),
            available: true,
            rng: StdRng::seed_from_u64(seed.unwrap_or_else(rand::random)),
        }
    }

    #[inline]
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn player_color(&self) -> Color {
        self.board.player_color()
    }

    /// Make the next fetches fail, as a page that is still loading would.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    fn opponent_to_move(&self) -> bool {
        self.side_to_move != self.player_color() && self.pending_promotion.is_none()
    }

    fn finish_move(&mut self, chess_move: &ChessMove, promotion: Option<PieceKind>) {
        self.board = apply_move(&self.board, chess_move, promotion);
        self.side_to_move = self.side_to_move.opposite();
        self.polls_waiting = 0;
    }

    fn play_opponent_move(&mut self) {
        let color = self.side_to_move;
        let moves = legal_moves_for(&self.board, color);
        let Some(&chosen) = moves.choose(&mut self.rng) else {
            info!("[SURFACE] {} has no legal moves", color.display_name());
            return;
        };

        let promotion = (chosen.piece.kind == PieceKind::Pawn
            && chosen.to.rank() == promotion_rank(color))
        .then_some(PieceKind::Queen);
        info!(
            "[SURFACE] opponent plays {} {} -> {}",
            chosen.piece.kind.spoken_name(),
            chosen.from,
            chosen.to
        );
        self.finish_move(&chosen, promotion);
    }

    /// King-slide castle allowed: rights intact, rook at home, the squares
    /// between empty, and the king neither in check nor crossing or landing
    /// on an attacked square.
    fn castle_allowed(&self, king: Piece, from: Square, to: Square) -> bool {
        let kingside = to.file() > from.file();
        let rights = &self.board.castling_rights;
        let has_right = match (king.color, kingside) {
            (Color::Light, true) => rights.light_kingside,
            (Color::Light, false) => rights.light_queenside,
            (Color::Dark, true) => rights.dark_kingside,
            (Color::Dark, false) => rights.dark_queenside,
        };
        if !has_right || from.file() != 5 {
            return false;
        }

        let rank = from.rank();
        let rook_file = if kingside { 8 } else { 1 };
        let rook = Piece::new(king.color, PieceKind::Rook);
        let rook_home = Square::new(rook_file, rank)
            .is_ok_and(|sq| self.board.piece_on(sq) == Some(rook));
        if !rook_home {
            return false;
        }

        let between: &[u8] = if kingside { &[6, 7] } else { &[2, 3, 4] };
        for &file in between {
            match Square::new(file, rank) {
                Ok(sq) if self.board.piece_on(sq).is_none() => {}
                _ => return false,
            }
        }

        if is_king_in_check(&self.board, king.color) {
            return false;
        }
        let crossed: &[u8] = if kingside { &[6, 7] } else { &[4, 3] };
        crossed.iter().all(|&file| {
            Square::new(file, rank).is_ok_and(|sq| {
                let next = simulate_move(&self.board, king, square_to_grid(from), square_to_grid(sq));
                !is_king_in_check(&next, king.color)
            })
        })
    }
}

impl BoardObserver for SimulatedSurface {
    fn fetch_board(&mut self) -> Result<ObservedBoard, BlindChessErrors> {
        if !self.available {
            return Err(BlindChessErrors::BoardUnavailable(
                "simulated board is offline".to_owned(),
            ));
        }

        let observed = self.board.to_observed();
        if self.opponent_to_move() {
            self.polls_waiting += 1;
            if self.polls_waiting >= self.reply_polls {
                self.play_opponent_move();
            }
        }
        Ok(observed)
    }
}

impl MoveExecutor for SimulatedSurface {
    fn execute_move(&mut self, request: &MoveRequest) -> Result<(), BlindChessErrors> {
        let from = code_to_square(request.from_code)?;
        let to = code_to_square(request.to_code)?;
        let player = self.player_color();

        if self.side_to_move != player || self.pending_promotion.is_some() {
            return Err(BlindChessErrors::ExecutorRejected(
                "not the player's turn".to_owned(),
            ));
        }
        let piece = self
            .board
            .piece_on(from)
            .filter(|p| p.color == player)
            .ok_or_else(|| BlindChessErrors::ExecutorRejected(format!("no own piece on {from}")))?;
        let chess_move = ChessMove { piece, from, to };

        let is_castle = piece.kind == PieceKind::King
            && from.rank() == to.rank()
            && from.file().abs_diff(to.file()) == 2;
        if is_castle {
            if self.castle_allowed(piece, from, to) {
                debug!("[SURFACE] castle {from} -> {to}");
                self.finish_move(&chess_move, None);
            } else {
                warn!("[SURFACE] castle {from} -> {to} not allowed, ignored");
            }
            return Ok(());
        }

        if !is_legal(&self.board, piece, from, to) {
            return Err(BlindChessErrors::ExecutorRejected(format!(
                "illegal move {from} -> {to}"
            )));
        }

        if piece.kind == PieceKind::Pawn && to.rank() == promotion_rank(player) {
            debug!("[SURFACE] {from} -> {to} waiting for a promotion choice");
            self.pending_promotion = Some(chess_move);
            return Ok(());
        }

        debug!("[SURFACE] move {from} -> {to}");
        self.finish_move(&chess_move, None);
        Ok(())
    }

    fn touch(&mut self, request: &TouchRequest) -> Result<(), BlindChessErrors> {
        let touched = code_to_square(request.square_code)?;
        let Some(pending) = self.pending_promotion else {
            return Err(BlindChessErrors::ExecutorRejected(format!(
                "nothing to choose on {touched}"
            )));
        };

        let offset = match pending.piece.color {
            Color::Light => pending.to.rank().checked_sub(touched.rank()),
            Color::Dark => touched.rank().checked_sub(pending.to.rank()),
        };
        let choice = offset
            .filter(|_| touched.file() == pending.to.file())
            .and_then(|offset| PROMOTION_CHOICES.get(offset as usize).copied())
            .ok_or_else(|| {
                BlindChessErrors::ExecutorRejected(format!("{touched} is not on the promotion chooser"))
            })?;

        debug!("[SURFACE] promotion to {}", choice.spoken_name());
        self.pending_promotion = None;
        self.finish_move(&pending, Some(choice));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("test square should parse")
    }

    fn drag(from: u8, to: u8) -> MoveRequest {
        MoveRequest {
            from_code: from,
            to_code: to,
            player_color: Color::Light,
        }
    }

    fn surface(fen: &str) -> SimulatedSurface {
        let start = BoardState::from_fen(fen).expect("test FEN should parse");
        SimulatedSurface::new(start, 1, Some(7))
    }

    #[test]
    fn legal_drag_moves_the_piece_and_passes_the_turn() {
        let mut s = SimulatedSurface::new(BoardState::new_game(), 1, Some(1));
        s.execute_move(&drag(52, 54)).expect("e2e4 should be accepted");
        assert_eq!(s.board().piece_on(sq("e4")), Some(Piece::new(Color::Light, PieceKind::Pawn)));
        assert_eq!(s.side_to_move(), Color::Dark);

        // The poll that sees e4 triggers the reply afterwards.
        let seen = s.fetch_board().expect("board should be available");
        assert_eq!(seen.grid[4][4], "P");
        assert_eq!(s.side_to_move(), Color::Light);
        assert_eq!(s.board().occupied_squares().len(), 32);
    }

    #[test]
    fn illegal_drag_is_rejected() {
        let mut s = SimulatedSurface::new(BoardState::new_game(), 1, Some(1));
        assert!(matches!(
            s.execute_move(&drag(52, 55)),
            Err(BlindChessErrors::ExecutorRejected(_))
        ));
        assert!(s.execute_move(&drag(54, 55)).is_err());
        assert_eq!(s.board(), &BoardState::new_game());
    }

    #[test]
    fn blocked_castle_is_ignored_silently() {
        let mut s = SimulatedSurface::new(BoardState::new_game(), 1, Some(1));
        s.execute_move(&drag(51, 71)).expect("castle attempt is not an error");
        assert_eq!(s.board(), &BoardState::new_game());
        assert_eq!(s.side_to_move(), Color::Light);
    }

    #[test]
    fn open_castle_moves_king_and_rook() {
        let mut s = surface("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -");
        s.execute_move(&drag(51, 31)).expect("castle should be accepted");
        assert_eq!(s.board().piece_on(sq("c1")), Some(Piece::new(Color::Light, PieceKind::King)));
        assert_eq!(s.board().piece_on(sq("d1")), Some(Piece::new(Color::Light, PieceKind::Rook)));
    }

    #[test]
    fn castle_through_attack_is_ignored() {
        // The black rook on f8 covers f1.
        let mut s = surface("4kr2/8/8/8/8/8/8/4K2R w K -");
        s.execute_move(&drag(51, 71)).expect("castle attempt is not an error");
        assert_eq!(s.board().piece_on(sq("e1")), Some(Piece::new(Color::Light, PieceKind::King)));
    }

    #[test]
    fn promotion_waits_for_the_chooser() {
        let mut s = surface("6k1/4P3/8/8/8/8/8/4K3 w - -");
        s.execute_move(&drag(57, 58)).expect("push should be accepted");
        assert_eq!(s.board().piece_on(sq("e7")), Some(Piece::new(Color::Light, PieceKind::Pawn)));
        // No reply while the chooser is open.
        s.fetch_board().expect("board should be available");
        assert_eq!(s.side_to_move(), Color::Light);

        assert!(s
            .touch(&TouchRequest {
                square_code: 48,
                player_color: Color::Light,
            })
            .is_err());
        s.touch(&TouchRequest {
            square_code: 56,
            player_color: Color::Light,
        })
        .expect("rook square should be on the chooser");
        assert_eq!(s.board().piece_on(sq("e8")), Some(Piece::new(Color::Light, PieceKind::Rook)));
        assert_eq!(s.side_to_move(), Color::Dark);
    }

    #[test]
    fn offline_board_fails_to_fetch() {
        let mut s = SimulatedSurface::new(BoardState::new_game(), 1, Some(1));
        s.set_available(false);
        assert!(matches!(
            s.fetch_board(),
            Err(BlindChessErrors::BoardUnavailable(_))
        ));
    }

    #[test]
    fn black_player_faces_white_first() {
        let mut start = BoardState::new_game();
        start.is_flipped = true;
        let mut s = SimulatedSurface::new(start, 2, Some(3));
        assert_eq!(s.player_color(), Color::Dark);

        s.fetch_board().expect("board should be available");
        assert_eq!(s.side_to_move(), Color::Light);
        s.fetch_board().expect("board should be available");
        assert_eq!(s.side_to_move(), Color::Dark);
    }
}
