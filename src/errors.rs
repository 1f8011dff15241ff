//! Errors used throughout the voice chess assistant.
//!
//! `BlindChessErrors` is the single error type for the fallible parts of the
//! crate: square notation, FEN and observed-grid parsing, collaborator calls
//! and option handling. The legality engine itself never fails; absence of
//! legality is reported as `false`.
//!
//! Usage guidelines:
//! - Parsing and input-related variants (`InvalidAlgebraicString`,
//!   `InvalidSquareCode`, `InvalidPieceCode`, ...) are recoverable and are
//!   turned into spoken corrections by the turn state machine.
//! - Collaborator variants (`BoardUnavailable`, `ExecutorRejected`) are soft
//!   failures; the session logs them and returns control to the player.

/// Unified error type for the crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlindChessErrors {
    /// A square in algebraic notation failed to parse.
    ///
    /// Payload: the original text, for example `"z9"`.
    #[error("invalid algebraic square '{0}'")]
    InvalidAlgebraicString(String),

    /// A two-digit `file*10 + rank` code did not name a square.
    #[error("invalid two-digit square code {0}")]
    InvalidSquareCode(u8),

    /// File or rank outside `1..=8`.
    ///
    /// Payload: (file, rank) one-based.
    #[error("invalid file or rank ({0}, {1})")]
    InvalidFileOrRank(u8, u8),

    /// A grid (row, col) pair outside `0..=7`.
    ///
    /// Payload: (row, col) zero-based.
    #[error("grid location ({0}, {1}) is off the board")]
    InvalidGridLocation(i8, i8),

    /// A board cell held something other than `""` or one of `PNBRQKpnbrqk`.
    #[error("invalid piece code '{0}'")]
    InvalidPieceCode(String),

    /// An observed grid was not 8x8.
    #[error("observed grid must be 8x8: {0}")]
    InvalidGridShape(String),

    /// Found an unexpected character while parsing a FEN string.
    #[error("invalid FEN token '{0}'")]
    InvalidFENtoken(char),

    /// FEN string had malformed structure.
    #[error("malformed FEN string: {0}")]
    InvalidFENstringForm(String),

    /// The board observer could not produce a snapshot this tick.
    #[error("board observer unavailable: {0}")]
    BoardUnavailable(String),

    /// The move executor refused or failed to perform a request.
    #[error("move executor rejected request: {0}")]
    ExecutorRejected(String),

    /// A configuration option name or value was not understood.
    #[error("invalid option: {0}")]
    InvalidOption(String),
}
