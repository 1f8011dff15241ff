//! Crate root module declarations for the Blind Chess voice move assistant.
//!
//! This file exposes all top-level subsystems (board model, legality engine,
//! voice normalization, turn state machine, session wiring, the simulated
//! board surface and utility helpers) so the CLI binary, benches and tests
//! can import stable module paths.

pub mod config;
pub mod errors;

pub mod game_state {
    pub mod board_state;
    pub mod chess_rules;
    pub mod chess_types;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
}

pub mod speech {
    pub mod announcements;
    pub mod speech_queue;
}

pub mod voice {
    pub mod normalize_speech;
    pub mod voice_latch;
}

pub mod turn {
    pub mod turn_requests;
    pub mod turn_stage;
    pub mod turn_state_machine;
}

pub mod session {
    pub mod board_watcher;
    pub mod collaborators;
    pub mod game_session;
}

pub mod surface {
    pub mod simulated_surface;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_parser;
    pub mod render_game_state;
}
