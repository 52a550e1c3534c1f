//! Selection interaction state machine, shared by any front end.
//!
//! Front ends translate raw input (pixel clicks, keystrokes) into the event
//! kinds consumed here; the machine turns event sequences into validated
//! moves without ever touching an input device itself.

use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::errors::NotationError;
use crate::game::Game;
use crate::notation;
use crate::types::{Move, PieceKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    SquareChosen(u8),
    TextMove(String),
    /// Answer to a `NeedsPromotion` response.
    PromotionChosen(PieceKind),
    RandomMove,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionResponse {
    /// Nothing selected; nothing to do.
    None,
    /// A piece of the side to move was selected; destinations for highlights.
    Selected { from: u8, destinations: Vec<u8> },
    /// The chosen move is a promotion and needs a piece kind first.
    NeedsPromotion { from: u8, to: u8 },
    /// A fully specified move, validated against the legal set.
    MoveReady(Move),
    /// Text input failed to decode; selection state is unchanged.
    Rejected(NotationError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Idle,
    Selected { from: u8 },
    AwaitingPromotion { from: u8, to: u8 },
}

#[derive(Clone, Debug)]
pub struct Selector {
    state: State,
}

impl Default for Selector {
    fn default() -> Self {
        Self::new()
    }
}

impl Selector {
    pub fn new() -> Self {
        Selector { state: State::Idle }
    }

    pub fn selected_square(&self) -> Option<u8> {
        match self.state {
            State::Selected { from } | State::AwaitingPromotion { from, .. } => Some(from),
            State::Idle => None,
        }
    }

    pub fn awaiting_promotion(&self) -> Option<(u8, u8)> {
        match self.state {
            State::AwaitingPromotion { from, to } => Some((from, to)),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.state = State::Idle;
    }

    pub fn handle(&mut self, game: &Game, event: InputEvent) -> SelectionResponse {
        match event {
            InputEvent::SquareChosen(sq) => self.on_square(game, sq),
            InputEvent::TextMove(text) => {
                match notation::parse_move(game.position(), game.legal_moves(), &text) {
                    Ok(mv) => {
                        self.state = State::Idle;
                        SelectionResponse::MoveReady(mv)
                    }
                    Err(e) => SelectionResponse::Rejected(e),
                }
            }
            InputEvent::PromotionChosen(kind) => self.on_promotion(game, kind),
            InputEvent::RandomMove => {
                self.state = State::Idle;
                match game.legal_moves().choose(&mut thread_rng()) {
                    Some(&mv) => SelectionResponse::MoveReady(mv),
                    None => SelectionResponse::None,
                }
            }
        }
    }

    fn on_square(&mut self, game: &Game, sq: u8) -> SelectionResponse {
        // A second click on a cached destination completes the move.
        if let State::Selected { from } = self.state {
            let candidate = game
                .legal_moves()
                .iter()
                .copied()
                .find(|m| m.from == from && m.to == sq);
            if let Some(mv) = candidate {
                if mv.promo.is_some() {
                    self.state = State::AwaitingPromotion { from, to: sq };
                    return SelectionResponse::NeedsPromotion { from, to: sq };
                }
                self.state = State::Idle;
                return SelectionResponse::MoveReady(mv);
            }
        }

        // Otherwise: reselect on own piece, deselect on anything else.
        let own_piece = game
            .position()
            .piece_at(sq)
            .map_or(false, |p| p.color == game.position().side_to_move);
        if own_piece {
            self.state = State::Selected { from: sq };
            SelectionResponse::Selected {
                from: sq,
                destinations: game.destinations_from(sq),
            }
        } else {
            self.state = State::Idle;
            SelectionResponse::None
        }
    }

    fn on_promotion(&mut self, game: &Game, kind: PieceKind) -> SelectionResponse {
        let State::AwaitingPromotion { from, to } = self.state else {
            return SelectionResponse::None;
        };
        self.state = State::Idle;
        match game
            .legal_moves()
            .iter()
            .copied()
            .find(|m| m.from == from && m.to == to && m.promo == Some(kind))
        {
            Some(mv) => SelectionResponse::MoveReady(mv),
            None => SelectionResponse::None,
        }
    }
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod selection_tests;
