//! Turns successive board observations into move-detected events.
//!
//! The first observation is only a baseline. After that, every grid that
//! differs from the previous one is diffed: a square that emptied is the
//! origin, a square that gained or changed a piece is the destination. When
//! a king left its square (castling moves two pieces) the king is the
//! reported mover.

use tracing::debug;

use crate::game_state::{board_state::BoardState, chess_types::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectedMove {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    /// Kind the piece turned into on `to`, if it changed.
    pub promoted_to: Option<PieceKind>,
}

#[derive(Debug, Default, Clone)]
pub struct BoardWatcher {
    previous: Option<BoardState>,
}

impl BoardWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn has_baseline(&self) -> bool {
        self.previous.is_some()
    }

    /// Record `state` and report the move that produced it, if one can be
    /// recognized.
    pub fn observe(&mut self, state: &BoardState) -> Option<DetectedMove> {
        let previous = self.previous.replace(state.clone())?;
        if previous.grid == state.grid {
            return None;
        }

        let detected = diff_boards(&previous, state);
        match &detected {
            Some(mv) => debug!("[WATCH] detected {:?} {} -> {}", mv.piece, mv.from, mv.to),
            None => debug!("[WATCH] board changed without a recognizable move"),
        }
        detected
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }
}

fn diff_boards(before: &BoardState, after: &BoardState) -> Option<DetectedMove> {
    let mut vacated: Vec<(Square, Piece)> = Vec::new();
    let mut arrived: Vec<(Square, Piece)> = Vec::new();

    for (square, piece) in before.occupied_squares() {
        if after.piece_on(square).is_none() {
            vacated.push((square, piece));
        }
    }
    for (square, piece) in after.occupied_squares() {
        if before.piece_on(square) != Some(piece) {
            arrived.push((square, piece));
        }
    }

    // En passant also empties the captured pawn's square, so the mover is
    // the vacated piece whose color shows up again somewhere.
    let (from, piece) = vacated
        .iter()
        .find(|(_, p)| p.kind == PieceKind::King)
        .or_else(|| {
            vacated
                .iter()
                .find(|(_, p)| arrived.iter().any(|(_, a)| a.color == p.color))
        })
        .copied()?;

    let (to, landed) = arrived
        .iter()
        .find(|(_, a)| *a == piece)
        .or_else(|| arrived.iter().find(|(_, a)| a.color == piece.color))
        .copied()?;

    Some(DetectedMove {
        piece,
        from,
        to,
        promoted_to: (landed.kind != piece.kind).then_some(landed.kind),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("test square should parse")
    }

    fn board(fen: &str) -> BoardState {
        BoardState::from_fen(fen).expect("test FEN should parse")
    }

    #[test]
    fn baseline_and_unchanged_boards_report_nothing() {
        let mut watcher = BoardWatcher::new();
        assert!(!watcher.has_baseline());
        assert_eq!(watcher.observe(&BoardState::new_game()), None);
        assert!(watcher.has_baseline());
        assert_eq!(watcher.observe(&BoardState::new_game()), None);
    }

    #[test]
    fn pawn_push_is_one_move() {
        let mut watcher = BoardWatcher::new();
        watcher.observe(&BoardState::new_game());
        let after = board("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1");
        assert_eq!(
            watcher.observe(&after),
            Some(DetectedMove {
                piece: Piece::new(Color::Light, PieceKind::Pawn),
                from: sq("e2"),
                to: sq("e4"),
                promoted_to: None,
            })
        );
        // The new board is the next baseline.
        assert_eq!(watcher.observe(&after), None);
    }

    #[test]
    fn capture_reports_the_capturing_piece() {
        let mut watcher = BoardWatcher::new();
        watcher.observe(&board("4k3/8/8/3p4/4P3/8/8/4K3 w - -"));
        let detected = watcher
            .observe(&board("4k3/8/8/3P4/8/8/8/4K3 b - -"))
            .expect("capture should be detected");
        assert_eq!(detected.piece, Piece::new(Color::Light, PieceKind::Pawn));
        assert_eq!((detected.from, detected.to), (sq("e4"), sq("d5")));
    }

    #[test]
    fn castling_reports_the_king() {
        let mut watcher = BoardWatcher::new();
        watcher.observe(&board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -"));
        let detected = watcher
            .observe(&board("r3k2r/8/8/8/8/8/8/R4RK1 b kq -"))
            .expect("castle should be detected");
        assert_eq!(detected.piece.kind, PieceKind::King);
        assert_eq!((detected.from, detected.to), (sq("e1"), sq("g1")));
    }

    #[test]
    fn promotion_is_reported() {
        let mut watcher = BoardWatcher::new();
        watcher.observe(&board("6k1/4P3/8/8/8/8/8/4K3 w - -"));
        let detected = watcher
            .observe(&board("4R1k1/8/8/8/8/8/8/4K3 b - -"))
            .expect("promotion should be detected");
        assert_eq!(detected.piece, Piece::new(Color::Light, PieceKind::Pawn));
        assert_eq!(detected.to, sq("e8"));
        assert_eq!(detected.promoted_to, Some(PieceKind::Rook));
    }

    #[test]
    fn en_passant_picks_the_capturing_pawn() {
        let mut watcher = BoardWatcher::new();
        watcher.observe(&board("4k3/8/8/3pP3/8/8/8/4K3 w - d6"));
        let detected = watcher
            .observe(&board("4k3/8/3P4/8/8/8/8/4K3 b - -"))
            .expect("en passant should be detected");
        assert_eq!((detected.from, detected.to), (sq("e5"), sq("d6")));
    }
}
