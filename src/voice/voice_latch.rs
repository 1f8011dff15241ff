//! First-found-wins voice latch.
//!
//! Each field holds the first value recognized since the last reset; later
//! transcripts only fill fields that are still empty. The turn state machine
//! asks for a reset whenever it has consumed (or rejected) what was heard.

use tracing::debug;

use crate::session::collaborators::{VoiceSignalSource, VoiceSignals};
use crate::voice::normalize_speech::extract_signals;

#[derive(Debug, Default, Clone)]
pub struct VoiceLatch {
    latched: VoiceSignals,
}

impl VoiceLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one recognized transcript.
    pub fn hear(&mut self, transcript: &str) {
        let heard = extract_signals(transcript);
        debug!("[VOICE] heard {transcript:?} -> {heard:?}");

        if self.latched.piece_word.is_empty() {
            self.latched.piece_word = heard.piece_word;
        }
        if self.latched.square_word.is_empty() {
            self.latched.square_word = heard.square_word;
        }
        if self.latched.castling_side.is_none() {
            self.latched.castling_side = heard.castling_side;
        }
    }
}

impl VoiceSignalSource for VoiceLatch {
    fn signals(&self) -> VoiceSignals {
        self.latched.clone()
    }

    fn reset(&mut self) {
        self.latched = VoiceSignals::default();
    }
}
