//! Demo mode: play a short random game in the console, pausing between
//! moves, then write the final position to a file.

use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use chess_rules::{Game, InputEvent, SelectionResponse, Selector};

use crate::cli;
use crate::config::Settings;

pub fn run(settings: &Settings) -> anyhow::Result<()> {
    println!("--- Starting demo: {} random moves ---", settings.demo_moves);
    let mut game = Game::new();
    let mut selector = Selector::new();

    for i in 0..settings.demo_moves {
        if game.outcome().is_terminal() {
            println!("Game over before {} moves.", settings.demo_moves);
            break;
        }
        let SelectionResponse::MoveReady(mv) = selector.handle(&game, InputEvent::RandomMove)
        else {
            break;
        };
        game.play(mv)?;

        cli::clear_screen();
        print!("{}", cli::render_board(game.position()));
        let san = game.last_san().unwrap_or("");
        println!("\nMove {}: played {san}", i + 1);
        thread::sleep(Duration::from_millis(settings.demo_delay_ms));
    }

    println!("\n--- Demo finished ---");
    print!("{}", cli::render_board(game.position()));
    println!("Result so far: {}", game.result_string());

    let dir = Path::new(&settings.demo_output_dir);
    fs::create_dir_all(dir)?;
    let path = dir.join("final_position.txt");
    let mut report = String::new();
    report.push_str(&cli::render_board(game.position()));
    report.push('\n');
    report.push_str("FEN: ");
    report.push_str(&game.position().to_fen());
    report.push('\n');
    report.push_str("Moves: ");
    report.push_str(&game.san_history().collect::<Vec<_>>().join(" "));
    report.push('\n');
    fs::write(&path, report)?;
    tracing::info!("final position saved to {}", path.display());
    println!("Final position saved to {}", path.display());
    Ok(())
}
