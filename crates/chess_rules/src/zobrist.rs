//! Zobrist keys and position hashing for repetition detection.
//!
//! The hash covers exactly the repetition tuple: piece placement, side to
//! move, castling rights, en-passant target. Clocks are deliberately
//! excluded so the same board reached at different clock values compares
//! equal for the threefold/fivefold rules.

use crate::board::Position;
use crate::types::{Color, Piece};

pub struct ZobristKeys {
    /// Indexed by [color][piece kind][square].
    pub pieces: [[[u64; 64]; 6]; 2],
    pub side_to_move: u64,
    /// [wk, wq, bk, bq]
    pub castling: [u64; 4],
    /// Indexed by en-passant file.
    pub en_passant: [u64; 8],
}

impl ZobristKeys {
    /// Keys from a fixed-seed xorshift64 stream, evaluated at compile time.
    pub const fn new() -> Self {
        const fn xorshift64(mut state: u64) -> u64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        }

        let mut state = 0x9E3779B97F4A7C15u64;

        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut color = 0;
        while color < 2 {
            let mut kind = 0;
            while kind < 6 {
                let mut sq = 0;
                while sq < 64 {
                    state = xorshift64(state);
                    pieces[color][kind][sq] = state;
                    sq += 1;
                }
                kind += 1;
            }
            color += 1;
        }

        state = xorshift64(state);
        let side_to_move = state;

        let mut castling = [0u64; 4];
        let mut i = 0;
        while i < 4 {
            state = xorshift64(state);
            castling[i] = state;
            i += 1;
        }

        let mut en_passant = [0u64; 8];
        let mut i = 0;
        while i < 8 {
            state = xorshift64(state);
            en_passant[i] = state;
            i += 1;
        }

        ZobristKeys {
            pieces,
            side_to_move,
            castling,
            en_passant,
        }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq as usize]
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

impl Position {
    /// Hash of the repetition tuple. Recomputed from scratch; every engine
    /// call is bounded by piece count, so no incremental update is kept.
    pub fn position_hash(&self) -> u64 {
        let mut h = 0u64;
        for sq in 0..64u8 {
            if let Some(pc) = self.piece_at(sq) {
                h ^= ZOBRIST.piece_key(pc, sq);
            }
        }
        if self.side_to_move == Color::Black {
            h ^= ZOBRIST.side_to_move;
        }
        let rights = [
            self.castling.wk,
            self.castling.wq,
            self.castling.bk,
            self.castling.bq,
        ];
        for (i, held) in rights.iter().enumerate() {
            if *held {
                h ^= ZOBRIST.castling[i];
            }
        }
        if let Some(ep) = self.en_passant {
            h ^= ZOBRIST.en_passant[(ep % 8) as usize];
        }
        h
    }
}

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
