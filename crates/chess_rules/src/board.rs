use crate::attacks::{bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks};
use crate::bitboard::Bitboard;
use crate::errors::FenError;
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        wk: false,
        wq: false,
        bk: false,
        bq: false,
    };
    pub const ALL: CastlingRights = CastlingRights {
        wk: true,
        wq: true,
        bk: true,
        bq: true,
    };
}

/// The position store: a 64-square mailbox for piece lookup plus redundant
/// bitboards for attack and generation queries. `set_piece` keeps the two in
/// sync; the mailbox and bitboards are private for exactly that reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    board: [Option<Piece>; 64],
    by_color: [Bitboard; 2],
    by_kind: [[Bitboard; 6]; 2],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    /// Square behind a pawn that just advanced two; valid for one move only.
    pub en_passant: Option<u8>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

/// Everything `unmake_move` needs to restore the prior position exactly.
#[derive(Clone, Copy, Debug)]
pub struct Undo {
    captured: Option<Piece>,
    castling: CastlingRights,
    en_passant: Option<u8>,
    halfmove_clock: u32,
    fullmove_number: u32,
    rook_move: Option<(u8, u8)>, // (from, to) of the rook when castling
    ep_captured_sq: Option<u8>,  // square the en-passant victim stood on
}

impl Position {
    fn empty() -> Self {
        Position {
            board: [None; 64],
            by_color: [Bitboard::EMPTY; 2],
            by_kind: [[Bitboard::EMPTY; 6]; 2],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// The standard initial setup.
    pub fn startpos() -> Self {
        let mut p = Position::empty();
        p.castling = CastlingRights::ALL;

        for f in 0..8u8 {
            p.set_piece(
                8 + f,
                Some(Piece {
                    color: Color::White,
                    kind: PieceKind::Pawn,
                }),
            );
            p.set_piece(
                48 + f,
                Some(Piece {
                    color: Color::Black,
                    kind: PieceKind::Pawn,
                }),
            );
        }
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            p.set_piece(
                f as u8,
                Some(Piece {
                    color: Color::White,
                    kind,
                }),
            );
            p.set_piece(
                56 + f as u8,
                Some(Piece {
                    color: Color::Black,
                    kind,
                }),
            );
        }
        p
    }

    /// Parse a six-field Forsyth-Edwards string. Clock fields may be omitted.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::FieldCount(parts.len()));
        }

        let mut pos = Position::empty();

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank: i8 = 7 - rank_idx as i8; // FEN lists rank 8 first
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let piece =
                        Piece::from_fen_char(ch).ok_or(FenError::BadPieceChar(ch))?;
                    let square = sq(file, rank)
                        .ok_or_else(|| FenError::BadRankWidth(rank_str.to_string()))?;
                    pos.set_piece(square, Some(piece));
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::BadRankWidth(rank_str.to_string()));
                }
            }
            if file != 8 {
                return Err(FenError::BadRankWidth(rank_str.to_string()));
            }
        }

        pos.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::BadSideToMove(other.to_string())),
        };

        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => pos.castling.wk = true,
                    'Q' => pos.castling.wq = true,
                    'k' => pos.castling.bk = true,
                    'q' => pos.castling.bq = true,
                    _ => return Err(FenError::BadCastling(parts[2].to_string())),
                }
            }
        }

        pos.en_passant = if parts[3] == "-" {
            None
        } else {
            let ep =
                coord_to_sq(parts[3]).ok_or_else(|| FenError::BadEnPassant(parts[3].to_string()))?;
            // The target sits behind a pawn that just double-pushed, so it
            // can only be on rank 6 (White to move) or rank 3 (Black).
            let wanted_rank = match pos.side_to_move {
                Color::White => 5,
                Color::Black => 2,
            };
            if rank_of(ep) != wanted_rank {
                return Err(FenError::BadEnPassant(parts[3].to_string()));
            }
            Some(ep)
        };

        let halfmove_part = parts.get(4).copied().unwrap_or("0");
        let fullmove_part = parts.get(5).copied().unwrap_or("1");
        pos.halfmove_clock = halfmove_part
            .parse()
            .map_err(|_| FenError::BadClock(halfmove_part.to_string()))?;
        pos.fullmove_number = fullmove_part
            .parse()
            .map_err(|_| FenError::BadClock(fullmove_part.to_string()))?;

        // Exactly one king per side.
        if pos.pieces(Color::White, PieceKind::King).popcount() != 1
            || pos.pieces(Color::Black, PieceKind::King).popcount() != 1
        {
            return Err(FenError::KingCount);
        }

        Ok(pos)
    }

    /// Serialize to Forsyth-Edwards notation; round-trips with `from_fen`.
    pub fn to_fen(&self) -> String {
        let mut out = String::new();
        for rank in (0..8i8).rev() {
            let mut empties = 0;
            for file in 0..8i8 {
                let square = sq(file, rank).unwrap();
                match self.piece_at(square) {
                    Some(pc) => {
                        if empties > 0 {
                            out.push_str(&empties.to_string());
                            empties = 0;
                        }
                        out.push(pc.fen_char());
                    }
                    None => empties += 1,
                }
            }
            if empties > 0 {
                out.push_str(&empties.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        if self.castling == CastlingRights::NONE {
            out.push('-');
        } else {
            if self.castling.wk {
                out.push('K');
            }
            if self.castling.wq {
                out.push('Q');
            }
            if self.castling.bk {
                out.push('k');
            }
            if self.castling.bq {
                out.push('q');
            }
        }

        out.push(' ');
        match self.en_passant {
            Some(ep) => out.push_str(&sq_to_coord(ep)),
            None => out.push('-'),
        }

        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }

    #[inline]
    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }

    /// Place or remove a piece, keeping mailbox and bitboards consistent.
    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        if let Some(old) = self.board[sq as usize] {
            self.by_color[old.color.idx()].clear(sq);
            self.by_kind[old.color.idx()][old.kind.idx()].clear(sq);
        }
        self.board[sq as usize] = pc;
        if let Some(new) = pc {
            self.by_color[new.color.idx()].set(sq);
            self.by_kind[new.color.idx()][new.kind.idx()].set(sq);
        }
    }

    #[inline]
    pub fn pieces(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.by_kind[color.idx()][kind.idx()]
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.by_color[color.idx()]
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.by_color[0] | self.by_color[1]
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        self.pieces(c, PieceKind::King).lsb()
    }

    // =========================================================================
    // Attack calculator
    // =========================================================================

    /// Is `target` attacked by any piece of color `by`? Pure query.
    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        let them = by.idx();

        // A pawn of `by` attacks `target` exactly when a pawn of the other
        // color standing on `target` would attack the pawn's square.
        if !(pawn_attacks(target, by.other()) & self.by_kind[them][PieceKind::Pawn.idx()])
            .is_empty()
        {
            return true;
        }
        if !(knight_attacks(target) & self.by_kind[them][PieceKind::Knight.idx()]).is_empty() {
            return true;
        }
        if !(king_attacks(target) & self.by_kind[them][PieceKind::King.idx()]).is_empty() {
            return true;
        }

        let occ = self.occupied();
        let diag_sliders =
            self.by_kind[them][PieceKind::Bishop.idx()] | self.by_kind[them][PieceKind::Queen.idx()];
        if !(bishop_attacks(target, occ) & diag_sliders).is_empty() {
            return true;
        }
        let line_sliders =
            self.by_kind[them][PieceKind::Rook.idx()] | self.by_kind[them][PieceKind::Queen.idx()];
        if !(rook_attacks(target, occ) & line_sliders).is_empty() {
            return true;
        }

        false
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.other()),
            None => false,
        }
    }

    /// Would playing `mv` leave the mover's own king in check? This is the
    /// filter that turns pseudo-legal into legal.
    pub fn would_leave_in_check(&mut self, mv: Move) -> bool {
        let mover = self.side_to_move;
        let undo = self.make_move(mv);
        let illegal = self.in_check(mover);
        self.unmake_move(mv, undo);
        illegal
    }

    // =========================================================================
    // Move applier
    // =========================================================================

    /// Apply a move assumed legal, updating all derived state atomically.
    /// Legality is the generator's responsibility; the checked entry point
    /// for callers is `Game::play`.
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let from = mv.from;
        let to = mv.to;
        let moved = self.piece_at(from).expect("no piece on from-square");
        let mut captured = self.piece_at(to);

        let mut undo = Undo {
            captured: None,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            rook_move: None,
            ep_captured_sq: None,
        };

        self.en_passant = None;

        // En-passant removes the passed pawn, not the destination occupant.
        if mv.is_en_passant {
            let dir: i8 = match moved.color {
                Color::White => -1,
                Color::Black => 1,
            };
            if let Some(cs) = sq(file_of(to), rank_of(to) + dir) {
                captured = self.piece_at(cs);
                self.set_piece(cs, None);
                undo.ep_captured_sq = Some(cs);
            }
        }
        undo.captured = captured;

        self.set_piece(from, None);
        match mv.promo {
            Some(kind) => self.set_piece(
                to,
                Some(Piece {
                    color: moved.color,
                    kind,
                }),
            ),
            None => self.set_piece(to, Some(moved)),
        }

        // Castling also moves the rook.
        if mv.is_castle && moved.kind == PieceKind::King {
            let rook_sq = match (moved.color, to) {
                (Color::White, 6) => Some((7u8, 5u8)),
                (Color::White, 2) => Some((0u8, 3u8)),
                (Color::Black, 62) => Some((63u8, 61u8)),
                (Color::Black, 58) => Some((56u8, 59u8)),
                _ => None,
            };
            if let Some((rf, rt)) = rook_sq {
                let rook = self.piece_at(rf).expect("castling without rook");
                self.set_piece(rf, None);
                self.set_piece(rt, Some(rook));
                undo.rook_move = Some((rf, rt));
            }
        }

        // A right is permanently lost once the relevant king or rook moves
        // or the rook is captured on its home square.
        match moved.color {
            Color::White => {
                if moved.kind == PieceKind::King {
                    self.castling.wk = false;
                    self.castling.wq = false;
                }
                if moved.kind == PieceKind::Rook {
                    if from == 0 {
                        self.castling.wq = false;
                    }
                    if from == 7 {
                        self.castling.wk = false;
                    }
                }
            }
            Color::Black => {
                if moved.kind == PieceKind::King {
                    self.castling.bk = false;
                    self.castling.bq = false;
                }
                if moved.kind == PieceKind::Rook {
                    if from == 56 {
                        self.castling.bq = false;
                    }
                    if from == 63 {
                        self.castling.bk = false;
                    }
                }
            }
        }
        if let Some(cp) = captured {
            if cp.kind == PieceKind::Rook {
                match cp.color {
                    Color::White => {
                        if to == 0 {
                            self.castling.wq = false;
                        }
                        if to == 7 {
                            self.castling.wk = false;
                        }
                    }
                    Color::Black => {
                        if to == 56 {
                            self.castling.bq = false;
                        }
                        if to == 63 {
                            self.castling.bk = false;
                        }
                    }
                }
            }
        }

        // Double pawn push exposes the square passed over for one move.
        if mv.is_double_push {
            let ep_rank = (rank_of(from) + rank_of(to)) / 2;
            self.en_passant = sq(file_of(from), ep_rank);
        }

        if moved.kind == PieceKind::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();

        undo
    }

    /// Restore the position exactly as it was before `make_move(mv)`,
    /// including clocks and castling rights.
    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        if let Some((rf, rt)) = undo.rook_move {
            let rook = self.piece_at(rt).expect("unmake castling without rook");
            self.set_piece(rt, None);
            self.set_piece(rf, Some(rook));
        }

        let mut piece_on_to = self.piece_at(mv.to).expect("unmake without piece on to-square");
        if mv.promo.is_some() {
            piece_on_to = Piece {
                color: piece_on_to.color,
                kind: PieceKind::Pawn,
            };
        }
        self.set_piece(mv.to, None);
        self.set_piece(mv.from, Some(piece_on_to));

        if mv.is_en_passant {
            if let Some(cs) = undo.ep_captured_sq {
                self.set_piece(cs, undo.captured);
            }
        } else {
            self.set_piece(mv.to, undo.captured);
        }
    }
}
