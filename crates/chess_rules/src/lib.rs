//! Self-contained chess rules engine: position store, attack calculation,
//! legal move generation, move application with undo, SAN/UCI notation,
//! terminal-state detection, and the selection state machine front ends
//! drive. No search, no evaluation, no I/O.

pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod errors;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod outcome;
pub mod perft;
pub mod selection;
pub mod types;
pub mod zobrist;

pub use board::{CastlingRights, Position, Undo};
pub use errors::{FenError, GameError, NotationError};
pub use game::Game;
pub use movegen::{legal_moves, legal_moves_into, pseudo_legal_moves};
pub use notation::{move_to_san, move_to_uci, parse_move, parse_san, parse_uci};
pub use outcome::{DrawClaims, DrawReason, Outcome};
pub use perft::perft;
pub use selection::{InputEvent, SelectionResponse, Selector};
pub use types::*;
pub use zobrist::ZOBRIST;
