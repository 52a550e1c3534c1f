//! Terminal interface: bordered board, captured-piece summary, legal moves
//! grouped by piece, and a SAN/UCI prompt.

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

use chess_rules::{
    Color, Game, InputEvent, Piece, PieceKind, Position, SelectionResponse, Selector,
};

const ALL_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

pub fn clear_screen() {
    // ANSI clear plus cursor home; a no-op on terminals that ignore it.
    print!("\x1b[2J\x1b[1;1H");
}

/// Letter board with file/rank labels, rank 8 at the top.
pub fn render_board(pos: &Position) -> String {
    let mut out = String::new();
    out.push_str("  a b c d e f g h\n");
    out.push_str(" +-+-+-+-+-+-+-+-+\n");
    for rank in (0..8).rev() {
        let label = (b'1' + rank as u8) as char;
        out.push(label);
        for file in 0..8 {
            out.push('|');
            match pos.piece_at((rank * 8 + file) as u8) {
                Some(pc) => out.push(pc.fen_char()),
                None => out.push('.'),
            }
        }
        out.push('|');
        out.push(label);
        out.push('\n');
    }
    out.push_str(" +-+-+-+-+-+-+-+-+\n");
    out.push_str("  a b c d e f g h\n");
    out
}

fn piece_value(kind: PieceKind) -> u32 {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight | PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        PieceKind::King => 0,
    }
}

fn initial_count(kind: PieceKind) -> u32 {
    match kind {
        PieceKind::Pawn => 8,
        PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook => 2,
        PieceKind::Queen | PieceKind::King => 1,
    }
}

/// Pieces missing from the board relative to the starting set, as FEN
/// letters. First list: black pieces captured by White; second: white
/// pieces captured by Black. Promotions can push a count past its starting
/// value; those clamp to zero rather than going negative.
pub fn captured_pieces(pos: &Position) -> (Vec<char>, Vec<char>) {
    let mut by_white = Vec::new();
    let mut by_black = Vec::new();
    for kind in ALL_KINDS {
        for (color, out) in [(Color::Black, &mut by_white), (Color::White, &mut by_black)] {
            let on_board = pos.pieces(color, kind).popcount();
            let missing = initial_count(kind).saturating_sub(on_board);
            let letter = Piece { color, kind }.fen_char();
            for _ in 0..missing {
                out.push(letter);
            }
        }
    }
    (by_white, by_black)
}

fn join(letters: &[char]) -> String {
    letters
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn print_game_info(game: &Game) {
    let (by_white, by_black) = captured_pieces(game.position());
    let white_score: u32 = by_white
        .iter()
        .filter_map(|&c| Piece::from_fen_char(c))
        .map(|p| piece_value(p.kind))
        .sum();
    let black_score: u32 = by_black
        .iter()
        .filter_map(|&c| Piece::from_fen_char(c))
        .map(|p| piece_value(p.kind))
        .sum();

    println!("Captured by White: {} (Score: {})", join(&by_white), white_score);
    println!("Captured by Black: {} (Score: {})", join(&by_black), black_score);
    if white_score > black_score {
        println!("White has a material advantage of +{}", white_score - black_score);
    } else if black_score > white_score {
        println!("Black has a material advantage of +{}", black_score - white_score);
    } else {
        println!("Material is even.");
    }
    println!("{}", "-".repeat(20));
}

fn print_legal_moves(game: &Game) {
    let mut by_piece: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
    for &mv in game.legal_moves() {
        if let Some(piece) = game.position().piece_at(mv.from) {
            by_piece
                .entry(piece.kind.name())
                .or_default()
                .push(game.san_of(mv));
        }
    }
    if by_piece.is_empty() {
        println!("No legal moves available.");
        return;
    }
    println!("Legal moves:");
    for (name, mut moves) in by_piece {
        moves.sort();
        println!("  {}: {}", name, moves.join(", "));
    }
}

fn side_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

pub fn run() -> anyhow::Result<()> {
    let mut game = Game::new();
    let mut selector = Selector::new();
    let stdin = io::stdin();
    let mut line = String::new();
    let mut notice: Option<String> = None;

    loop {
        clear_screen();
        print!("{}", render_board(game.position()));
        println!();
        print_game_info(&game);
        if let Some(msg) = notice.take() {
            println!("{msg}");
        }
        if game.outcome().is_terminal() {
            break;
        }

        let check = if game.in_check() { " (in check)" } else { "" };
        println!("{}'s turn.{check}", side_name(game.position().side_to_move));
        print_legal_moves(&game);

        let claims = game.claimable_draws();
        if claims.fifty_moves {
            println!("A fifty-move draw may be claimed with 'draw'.");
        }
        if claims.threefold {
            println!("A threefold-repetition draw may be claimed with 'draw'.");
        }

        println!();
        println!("Enter a move in SAN (e4, Nf3) or UCI (e2e4), or 'random', 'undo', 'fen', 'quit'.");
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(()); // EOF
        }
        let text = line.trim();
        match text {
            "" => continue,
            "quit" | "exit" => return Ok(()),
            "undo" => {
                if game.undo().is_none() {
                    notice = Some("Nothing to undo.".to_string());
                }
            }
            "fen" => notice = Some(game.position().to_fen()),
            "draw" if claims.any() => {
                println!("\nDraw claimed.");
                println!("Result: 1/2-1/2");
                return Ok(());
            }
            "random" => {
                if let SelectionResponse::MoveReady(mv) =
                    selector.handle(&game, InputEvent::RandomMove)
                {
                    apply(&mut game, mv, &mut notice);
                }
            }
            _ => match selector.handle(&game, InputEvent::TextMove(text.to_string())) {
                SelectionResponse::MoveReady(mv) => apply(&mut game, mv, &mut notice),
                SelectionResponse::Rejected(e) => {
                    notice = Some(format!("{e}. Try again."));
                }
                _ => {}
            },
        }
    }

    println!("Game over!");
    println!("{}", game.outcome());
    println!("Result: {}", game.result_string());
    Ok(())
}

fn apply(game: &mut Game, mv: chess_rules::Move, notice: &mut Option<String>) {
    match game.play(mv) {
        Ok(_) => {
            let san = game.last_san().unwrap_or("");
            tracing::debug!("played {san}");
            *notice = Some(format!("Played {san}"));
        }
        Err(e) => *notice = Some(e.to_string()),
    }
}
