//! The game record: current position, append-only move history, repetition
//! hashes, and a cached legal-move set for the current position. This is the
//! checked layer front ends drive; raw `make_move` stays inside the engine.

use crate::board::{Position, Undo};
use crate::errors::{FenError, GameError};
use crate::movegen::legal_moves_into;
use crate::notation;
use crate::outcome::{self, DrawClaims, Outcome};
use crate::types::Move;

struct Record {
    mv: Move,
    san: String,
    undo: Undo,
}

pub struct Game {
    position: Position,
    record: Vec<Record>,
    /// Position hashes of every position reached, initial one included.
    hashes: Vec<u64>,
    legal: Vec<Move>,
    outcome: Outcome,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::from_position(Position::from_fen(fen)?))
    }

    pub fn from_position(position: Position) -> Self {
        let mut game = Game {
            hashes: vec![position.position_hash()],
            position,
            record: Vec::new(),
            legal: Vec::new(),
            outcome: Outcome::Ongoing,
        };
        game.refresh();
        game
    }

    /// Recompute the legal-move cache and outcome for the current position.
    fn refresh(&mut self) {
        let mut buf = std::mem::take(&mut self.legal);
        legal_moves_into(&mut self.position, &mut buf);
        self.legal = buf;
        self.outcome = outcome::evaluate(&self.position, &self.legal, &self.hashes);
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn legal_moves(&self) -> &[Move] {
        &self.legal
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn in_check(&self) -> bool {
        self.position.in_check(self.position.side_to_move)
    }

    pub fn claimable_draws(&self) -> DrawClaims {
        outcome::claimable_draws(&self.position, &self.hashes)
    }

    /// Legal destination squares from `from`, for highlight drawing.
    pub fn destinations_from(&self, from: u8) -> Vec<u8> {
        let mut dests = Vec::new();
        for mv in &self.legal {
            if mv.from == from && !dests.contains(&mv.to) {
                dests.push(mv.to);
            }
        }
        dests
    }

    /// SAN for a move in the current position (must be legal).
    pub fn san_of(&self, mv: Move) -> String {
        notation::move_to_san(&self.position, &self.legal, mv)
    }

    pub fn last_san(&self) -> Option<&str> {
        self.record.last().map(|r| r.san.as_str())
    }

    pub fn san_history(&self) -> impl Iterator<Item = &str> {
        self.record.iter().map(|r| r.san.as_str())
    }

    pub fn ply(&self) -> usize {
        self.record.len()
    }

    pub fn result_string(&self) -> &'static str {
        self.outcome.result_string()
    }

    /// Apply a legal move. Terminal outcomes are sticky: once the game is
    /// over every further attempt fails with `GameAlreadyOver`. A move not
    /// drawn from `legal_moves` fails with `IllegalMoveApplied` and leaves
    /// the game unchanged.
    pub fn play(&mut self, mv: Move) -> Result<Outcome, GameError> {
        if self.outcome.is_terminal() {
            return Err(GameError::GameAlreadyOver);
        }
        if !self.legal.contains(&mv) {
            return Err(GameError::IllegalMoveApplied);
        }

        let san = notation::move_to_san(&self.position, &self.legal, mv);
        let undo = self.position.make_move(mv);
        self.record.push(Record { mv, san, undo });
        self.hashes.push(self.position.position_hash());
        self.refresh();
        Ok(self.outcome)
    }

    /// Decode SAN or coordinate text against the current legal set, then play.
    pub fn play_text(&mut self, text: &str) -> Result<(Move, Outcome), GameError> {
        if self.outcome.is_terminal() {
            return Err(GameError::GameAlreadyOver);
        }
        let mv = notation::parse_move(&self.position, &self.legal, text)?;
        let out = self.play(mv)?;
        Ok((mv, out))
    }

    /// Undo by truncating the record; restores the prior position exactly,
    /// clocks and castling rights included, and clears a terminal outcome.
    pub fn undo(&mut self) -> Option<Move> {
        let rec = self.record.pop()?;
        self.hashes.pop();
        self.position.unmake_move(rec.mv, rec.undo);
        self.refresh();
        Some(rec.mv)
    }
}
