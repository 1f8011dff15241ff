//! Contracts with the outside world.
//!
//! The session only sees the board, the executor, the speaker and the voice
//! source through these traits. Real integrations (a scraped web board, a
//! speech recognizer) live outside the crate; the simulated surface and the
//! voice latch are the in-crate implementations.

use std::cell::RefCell;
use std::rc::Rc;

use crate::errors::BlindChessErrors;
use crate::game_state::chess_types::CastlingSide;
use crate::turn::turn_requests::{MoveRequest, TouchRequest};

/// Board as scraped from the surface: 8 rows of 8 cells, rank 8 first,
/// each cell `""` or a piece code (`"P"`, `"k"`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedBoard {
    pub grid: Vec<Vec<String>>,
    pub is_white_side: bool,
}

/// Latest recognized voice fields; empty strings / `None` when not heard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceSignals {
    pub piece_word: String,
    pub square_word: String,
    pub castling_side: Option<CastlingSide>,
}

pub trait BoardObserver {
    fn fetch_board(&mut self) -> Result<ObservedBoard, BlindChessErrors>;
}

pub trait MoveExecutor {
    fn execute_move(&mut self, request: &MoveRequest) -> Result<(), BlindChessErrors>;
    fn touch(&mut self, request: &TouchRequest) -> Result<(), BlindChessErrors>;
}

pub trait SpeechSink {
    fn enqueue(&mut self, sentence: String);
}

pub trait VoiceSignalSource {
    fn signals(&self) -> VoiceSignals;
    fn reset(&mut self);
}

// One surface usually plays both the observer and the executor role, so
// shared handles forward to the inner value.

impl<T: BoardObserver> BoardObserver for Rc<RefCell<T>> {
    fn fetch_board(&mut self) -> Result<ObservedBoard, BlindChessErrors> {
        self.borrow_mut().fetch_board()
    }
}

impl<T: MoveExecutor> MoveExecutor for Rc<RefCell<T>> {
    fn execute_move(&mut self, request: &MoveRequest) -> Result<(), BlindChessErrors> {
        self.borrow_mut().execute_move(request)
    }

    fn touch(&mut self, request: &TouchRequest) -> Result<(), BlindChessErrors> {
        self.borrow_mut().touch(request)
    }
}

impl<T: SpeechSink> SpeechSink for Rc<RefCell<T>> {
    fn enqueue(&mut self, sentence: String) {
        self.borrow_mut().enqueue(sentence);
    }
}

impl<T: VoiceSignalSource> VoiceSignalSource for Rc<RefCell<T>> {
    fn signals(&self) -> VoiceSignals {
        self.borrow().signals()
    }

    fn reset(&mut self) {
        self.borrow_mut().reset();
    }
}
