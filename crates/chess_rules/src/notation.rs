//! SAN and UCI move text, encoded and decoded against a position's legal
//! move set. The same text can denote different moves in different
//! positions, so every decode takes the current legal set.

use crate::board::Position;
use crate::errors::NotationError;
use crate::movegen::legal_moves;
use crate::types::*;

/// Coordinate notation: `e2e4`, `e7e8q`.
pub fn move_to_uci(mv: Move) -> String {
    let mut s = String::new();
    s.push_str(&sq_to_coord(mv.from));
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promo {
        // promo letters are lowercase in UCI
        if let Some(c) = p.san_letter() {
            s.push(c.to_ascii_lowercase());
        }
    }
    s
}

/// Decode coordinate notation against the legal set. A promotion move
/// without its fifth character matches nothing: the codec rejects kind-less
/// promotions rather than guessing.
pub fn parse_uci(legal: &[Move], text: &str) -> Result<Move, NotationError> {
    let bytes = text.as_bytes();
    if bytes.len() != 4 && bytes.len() != 5 {
        return Err(NotationError::Malformed(text.to_string()));
    }
    let from =
        coord_to_sq(&text[0..2]).ok_or_else(|| NotationError::Malformed(text.to_string()))?;
    let to = coord_to_sq(&text[2..4]).ok_or_else(|| NotationError::Malformed(text.to_string()))?;
    let promo = if bytes.len() == 5 {
        Some(
            PieceKind::from_san_letter((bytes[4] as char).to_ascii_uppercase())
                .ok_or_else(|| NotationError::Malformed(text.to_string()))?,
        )
    } else {
        None
    };

    legal
        .iter()
        .copied()
        .find(|m| m.from == from && m.to == to && m.promo == promo)
        .ok_or_else(|| NotationError::Unknown(text.to_string()))
}

/// Standard Algebraic Notation with minimal disambiguation and a `+`/`#`
/// suffix derived by applying the move.
pub fn move_to_san(pos: &Position, legal: &[Move], mv: Move) -> String {
    let mut san = if mv.is_castle {
        if file_of(mv.to) == 6 {
            "O-O".to_string()
        } else {
            "O-O-O".to_string()
        }
    } else {
        let piece = pos.piece_at(mv.from).expect("SAN encode without piece");
        let is_capture = pos.piece_at(mv.to).is_some() || mv.is_en_passant;
        let mut s = String::new();

        match piece.kind.san_letter() {
            Some(letter) => {
                s.push(letter);
                s.push_str(&disambiguation(pos, legal, mv, piece.kind));
            }
            None => {
                // Pawn captures always carry the source file.
                if is_capture {
                    s.push((b'a' + mv.from % 8) as char);
                }
            }
        }
        if is_capture {
            s.push('x');
        }
        s.push_str(&sq_to_coord(mv.to));
        if let Some(promo) = mv.promo {
            s.push('=');
            s.push(promo.san_letter().expect("promotion to a pawn or king"));
        }
        s
    };

    // Check and checkmate suffixes come from actually playing the move.
    let mut scratch = pos.clone();
    scratch.make_move(mv);
    let opponent = scratch.side_to_move;
    if scratch.in_check(opponent) {
        if legal_moves(&scratch).is_empty() {
            san.push('#');
        } else {
            san.push('+');
        }
    }
    san
}

/// File, then rank, then both: only as much as needed to make the source
/// square unique among same-kind pieces that can legally reach `mv.to`.
fn disambiguation(pos: &Position, legal: &[Move], mv: Move, kind: PieceKind) -> String {
    let rivals: Vec<u8> = legal
        .iter()
        .filter(|m| {
            !m.is_castle
                && m.to == mv.to
                && m.from != mv.from
                && pos.piece_at(m.from).map(|p| p.kind) == Some(kind)
        })
        .map(|m| m.from)
        .collect();
    if rivals.is_empty() {
        return String::new();
    }

    let file = (b'a' + mv.from % 8) as char;
    let rank = (b'1' + mv.from / 8) as char;
    let file_clashes = rivals.iter().any(|&s| file_of(s) == file_of(mv.from));
    let rank_clashes = rivals.iter().any(|&s| rank_of(s) == rank_of(mv.from));

    if !file_clashes {
        file.to_string()
    } else if !rank_clashes {
        rank.to_string()
    } else {
        format!("{file}{rank}")
    }
}

/// Decode SAN against the legal set, resolving the notation's piece kind,
/// destination, and disambiguation hints. Tolerates `+ # ! ?` suffixes and
/// the `0-0` castling spelling.
pub fn parse_san(pos: &Position, legal: &[Move], text: &str) -> Result<Move, NotationError> {
    let body = text.trim().trim_end_matches(|c| matches!(c, '+' | '#' | '!' | '?'));
    if body.is_empty() {
        return Err(NotationError::Malformed(text.to_string()));
    }

    if let Some(kingside) = match body {
        "O-O" | "0-0" => Some(true),
        "O-O-O" | "0-0-0" => Some(false),
        _ => None,
    } {
        let wanted_file = if kingside { 6 } else { 2 };
        return legal
            .iter()
            .copied()
            .find(|m| m.is_castle && file_of(m.to) == wanted_file)
            .ok_or_else(|| NotationError::Unknown(text.to_string()));
    }

    let (body, promo) = split_promotion(body, text)?;

    // The destination square is always the trailing coordinate.
    if body.len() < 2 {
        return Err(NotationError::Malformed(text.to_string()));
    }
    let (prefix, dest_str) = body.split_at(body.len() - 2);
    let dest = coord_to_sq(dest_str).ok_or_else(|| NotationError::Malformed(text.to_string()))?;

    let mut chars = prefix.chars().peekable();
    let kind = match chars.peek().copied().and_then(PieceKind::from_san_letter) {
        Some(k) => {
            chars.next();
            k
        }
        None => PieceKind::Pawn,
    };

    let mut from_file: Option<i8> = None;
    let mut from_rank: Option<i8> = None;
    for c in chars {
        match c {
            'a'..='h' if from_file.is_none() => from_file = Some((c as u8 - b'a') as i8),
            '1'..='8' if from_rank.is_none() => from_rank = Some((c as u8 - b'1') as i8),
            'x' | ':' => {} // capture marker carries no information we need
            _ => return Err(NotationError::Malformed(text.to_string())),
        }
    }

    let matches_hints = |m: &Move, check_promo: bool| {
        !m.is_castle
            && m.to == dest
            && pos.piece_at(m.from).map(|p| p.kind) == Some(kind)
            && from_file.map_or(true, |f| file_of(m.from) == f)
            && from_rank.map_or(true, |r| rank_of(m.from) == r)
            && (!check_promo || m.promo == promo)
    };

    let mut found: Vec<Move> = legal
        .iter()
        .copied()
        .filter(|m| matches_hints(m, true))
        .collect();
    match found.len() {
        1 => Ok(found.remove(0)),
        0 => {
            // Promotion text without (or with a wrong) kind: reject as
            // malformed rather than "unknown" when the move itself exists.
            if legal.iter().any(|m| matches_hints(m, false)) {
                Err(NotationError::Malformed(text.to_string()))
            } else {
                Err(NotationError::Unknown(text.to_string()))
            }
        }
        _ => Err(NotationError::Ambiguous(text.to_string())),
    }
}

/// Accepts `e8=Q` and the bare `e8Q` spelling.
fn split_promotion<'a>(
    body: &'a str,
    original: &str,
) -> Result<(&'a str, Option<PieceKind>), NotationError> {
    if let Some(eq) = body.find('=') {
        let suffix = &body[eq + 1..];
        let mut suffix_chars = suffix.chars();
        let kind = suffix_chars
            .next()
            .and_then(PieceKind::from_san_letter)
            .ok_or_else(|| NotationError::Malformed(original.to_string()))?;
        if suffix_chars.next().is_some() {
            return Err(NotationError::Malformed(original.to_string()));
        }
        return Ok((&body[..eq], Some(kind)));
    }
    let mut rev = body.chars().rev();
    if let (Some(last), Some(before)) = (rev.next(), rev.next()) {
        if before.is_ascii_digit() && last != 'K' {
            if let Some(kind) = PieceKind::from_san_letter(last) {
                return Ok((&body[..body.len() - 1], Some(kind)));
            }
        }
    }
    Ok((body, None))
}

/// Front-end entry point: SAN first, coordinate notation as fallback, so
/// prompts accept either form.
pub fn parse_move(pos: &Position, legal: &[Move], text: &str) -> Result<Move, NotationError> {
    match parse_san(pos, legal, text) {
        Ok(mv) => Ok(mv),
        Err(san_err) => parse_uci(legal, text.trim()).map_err(|_| san_err),
    }
}
