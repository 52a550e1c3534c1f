//! Terminal-state classification, evaluated after every move application.
//!
//! Rule-variant choice (FIDE 2014): the 50-move rule and threefold
//! repetition are surfaced as *claimable* draws; the game only terminates by
//! itself at the 75-move and fivefold thresholds, or on insufficient
//! material, checkmate, or stalemate.

use crate::board::Position;
use crate::types::{Color, Move, PieceKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    /// The named color is the one in check with no legal moves.
    Checkmate(Color),
    Stalemate,
    Draw(DrawReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawReason {
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }

    /// Conventional score string: `1-0`, `0-1`, `1/2-1/2`, or `*`.
    pub fn result_string(self) -> &'static str {
        match self {
            Outcome::Ongoing => "*",
            Outcome::Checkmate(Color::White) => "0-1",
            Outcome::Checkmate(Color::Black) => "1-0",
            Outcome::Stalemate | Outcome::Draw(_) => "1/2-1/2",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Ongoing => write!(f, "ongoing"),
            Outcome::Checkmate(Color::White) => write!(f, "checkmate, Black wins"),
            Outcome::Checkmate(Color::Black) => write!(f, "checkmate, White wins"),
            Outcome::Stalemate => write!(f, "stalemate"),
            Outcome::Draw(DrawReason::InsufficientMaterial) => {
                write!(f, "draw by insufficient material")
            }
            Outcome::Draw(DrawReason::SeventyFiveMoves) => write!(f, "draw by 75-move rule"),
            Outcome::Draw(DrawReason::FivefoldRepetition) => {
                write!(f, "draw by fivefold repetition")
            }
        }
    }
}

/// Draws the side to move may claim but that do not end the game by rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawClaims {
    pub fifty_moves: bool,
    pub threefold: bool,
}

impl DrawClaims {
    pub fn any(self) -> bool {
        self.fifty_moves || self.threefold
    }
}

/// Classify the position given its legal moves and the hash history of every
/// position reached so far (current one included).
pub fn evaluate(pos: &Position, legal: &[Move], history: &[u64]) -> Outcome {
    if legal.is_empty() {
        return if pos.in_check(pos.side_to_move) {
            Outcome::Checkmate(pos.side_to_move)
        } else {
            Outcome::Stalemate
        };
    }
    if pos.is_insufficient_material() {
        return Outcome::Draw(DrawReason::InsufficientMaterial);
    }
    if pos.halfmove_clock >= 150 {
        return Outcome::Draw(DrawReason::SeventyFiveMoves);
    }
    if repetition_count(pos, history) >= 5 {
        return Outcome::Draw(DrawReason::FivefoldRepetition);
    }
    Outcome::Ongoing
}

pub fn claimable_draws(pos: &Position, history: &[u64]) -> DrawClaims {
    DrawClaims {
        fifty_moves: pos.is_fifty_move_draw(),
        threefold: repetition_count(pos, history) >= 3,
    }
}

/// How many times the current position (as a repetition tuple) appears in
/// the history.
pub fn repetition_count(pos: &Position, history: &[u64]) -> usize {
    let hash = pos.position_hash();
    history.iter().filter(|&&h| h == hash).count()
}

impl Position {
    /// 50 full moves without a pawn move or capture; a claimable draw.
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Neither side can deliver mate by any sequence: K vs K, K+minor vs K,
    /// or K+B vs K+B with both bishops on the same square color. Everything
    /// else is not an automatic draw.
    pub fn is_insufficient_material(&self) -> bool {
        for color in [Color::White, Color::Black] {
            if !self.pieces(color, PieceKind::Pawn).is_empty()
                || !self.pieces(color, PieceKind::Rook).is_empty()
                || !self.pieces(color, PieceKind::Queen).is_empty()
            {
                return false;
            }
        }

        let wb = self.pieces(Color::White, PieceKind::Bishop);
        let wn = self.pieces(Color::White, PieceKind::Knight);
        let bb = self.pieces(Color::Black, PieceKind::Bishop);
        let bn = self.pieces(Color::Black, PieceKind::Knight);
        let white_minors = wb.popcount() + wn.popcount();
        let black_minors = bb.popcount() + bn.popcount();

        match white_minors + black_minors {
            0 | 1 => true,
            2 if white_minors == 1 && black_minors == 1 => {
                // Only the same-colored-bishops pair is dead.
                match (wb.lsb(), bb.lsb()) {
                    (Some(w), Some(b)) => square_shade(w) == square_shade(b),
                    _ => false,
                }
            }
            _ => false,
        }
    }
}

fn square_shade(sq: u8) -> u8 {
    ((sq / 8) + (sq % 8)) % 2
}
