//! Error taxonomy. Every failure here is recoverable: front ends report the
//! message and re-prompt. The engine itself never panics on input text.

use thiserror::Error;

/// Failures while parsing a Forsyth-Edwards position string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("FEN must have at least 4 fields, got {0}")]
    FieldCount(usize),
    #[error("FEN board must list 8 ranks, got {0}")]
    RankCount(usize),
    #[error("invalid piece character '{0}' in FEN board")]
    BadPieceChar(char),
    #[error("FEN rank '{0}' does not describe exactly 8 files")]
    BadRankWidth(String),
    #[error("invalid side-to-move field '{0}'")]
    BadSideToMove(String),
    #[error("invalid castling field '{0}'")]
    BadCastling(String),
    #[error("invalid en-passant field '{0}'")]
    BadEnPassant(String),
    #[error("invalid clock field '{0}'")]
    BadClock(String),
    #[error("position must have exactly one king per side")]
    KingCount,
}

/// Failures while decoding SAN or UCI move text. Decoding never mutates the
/// position; the caller just reports and re-prompts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("'{0}' is not a recognizable move")]
    Malformed(String),
    #[error("'{0}' matches more than one legal move")]
    Ambiguous(String),
    #[error("'{0}' matches no legal move in this position")]
    Unknown(String),
}

/// Failures when driving a game forward.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Notation(#[from] NotationError),
    /// The caller handed `play` a move that is not in the current legal set.
    /// Contract violation rather than user error, but checked and reported.
    #[error("move is not legal in the current position")]
    IllegalMoveApplied,
    /// The game has reached a terminal outcome; no further moves may be applied.
    #[error("the game is already over")]
    GameAlreadyOver,
}
