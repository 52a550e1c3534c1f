//! Attack sets for every piece kind.
//!
//! Leapers (knight, king, pawn) use const-evaluated lookup tables. Sliders
//! (bishop, rook, queen) use the classical ray approach: a precomputed ray
//! per direction, truncated at the first blocker in the occupancy set.

use crate::bitboard::Bitboard;
use crate::types::Color;

const fn offset_targets(sq: u8, offsets: &[(i8, i8)]) -> u64 {
    let file = (sq % 8) as i8;
    let rank = (sq / 8) as i8;
    let mut bb = 0u64;
    let mut i = 0;
    while i < offsets.len() {
        let (df, dr) = offsets[i];
        let f = file + df;
        let r = rank + dr;
        if f >= 0 && f < 8 && r >= 0 && r < 8 {
            bb |= 1u64 << ((r as u8) * 8 + (f as u8));
        }
        i += 1;
    }
    bb
}

const fn build_table(offsets: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0u8;
    while sq < 64 {
        table[sq as usize] = Bitboard(offset_targets(sq, offsets));
        sq += 1;
    }
    table
}

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub static KNIGHT_ATTACKS: [Bitboard; 64] = build_table(&KNIGHT_OFFSETS);
pub static KING_ATTACKS: [Bitboard; 64] = build_table(&KING_OFFSETS);

/// Squares a pawn of the given color attacks (diagonally forward only).
pub static WHITE_PAWN_ATTACKS: [Bitboard; 64] = build_table(&[(-1, 1), (1, 1)]);
pub static BLACK_PAWN_ATTACKS: [Bitboard; 64] = build_table(&[(-1, -1), (1, -1)]);

#[inline(always)]
pub fn pawn_attacks(sq: u8, color: Color) -> Bitboard {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[sq as usize],
        Color::Black => BLACK_PAWN_ATTACKS[sq as usize],
    }
}

#[inline(always)]
pub fn knight_attacks(sq: u8) -> Bitboard {
    KNIGHT_ATTACKS[sq as usize]
}

#[inline(always)]
pub fn king_attacks(sq: u8) -> Bitboard {
    KING_ATTACKS[sq as usize]
}

// =============================================================================
// Sliding attacks
// =============================================================================

// Direction indices: 0=N, 1=NE, 2=E, 3=SE, 4=S, 5=SW, 6=W, 7=NW.
const DIR_DELTAS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

// A direction is "positive" when it walks toward higher square indices,
// so its first blocker is the LSB of the masked occupancy (MSB otherwise).
const DIR_POSITIVE: [bool; 8] = [true, true, true, false, false, false, false, true];

const fn ray_from(sq: u8, df: i8, dr: i8) -> u64 {
    let mut bb = 0u64;
    let mut f = (sq % 8) as i8 + df;
    let mut r = (sq / 8) as i8 + dr;
    while f >= 0 && f < 8 && r >= 0 && r < 8 {
        bb |= 1u64 << ((r as u8) * 8 + (f as u8));
        f += df;
        r += dr;
    }
    bb
}

/// RAYS[dir][sq]: every square in that direction from `sq`, exclusive.
pub static RAYS: [[Bitboard; 64]; 8] = {
    let mut rays = [[Bitboard::EMPTY; 64]; 8];
    let mut dir = 0;
    while dir < 8 {
        let (df, dr) = DIR_DELTAS[dir];
        let mut sq = 0u8;
        while sq < 64 {
            rays[dir][sq as usize] = Bitboard(ray_from(sq, df, dr));
            sq += 1;
        }
        dir += 1;
    }
    rays
};

fn slider_attacks(sq: u8, occupied: Bitboard, dirs: [usize; 4]) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for dir in dirs {
        let ray = RAYS[dir][sq as usize];
        let blockers = ray & occupied;
        let first = if DIR_POSITIVE[dir] {
            blockers.lsb()
        } else {
            blockers.msb()
        };
        match first {
            // Include the blocker square, mask off everything beyond it.
            Some(b) => attacks |= ray & !RAYS[dir][b as usize],
            None => attacks |= ray,
        }
    }
    attacks
}

#[inline]
pub fn bishop_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    slider_attacks(sq, occupied, [1, 3, 5, 7])
}

#[inline]
pub fn rook_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    slider_attacks(sq, occupied, [0, 2, 4, 6])
}

#[inline]
pub fn queen_attacks(sq: u8, occupied: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupied) | rook_attacks(sq, occupied)
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
