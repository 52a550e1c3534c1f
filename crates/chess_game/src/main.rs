//! Chess front end.
//!
//! Play in the terminal, in a window, or both at once; `demo` plays a short
//! random game unattended.

use std::io::{self, BufRead, Write};

mod cli;
mod combined;
mod config;
mod demo;
mod gui;

fn print_usage() {
    println!("Chess");
    println!();
    println!("Usage:");
    println!("  chess_game cli       - play in the terminal");
    println!("  chess_game gui       - play in a window");
    println!("  chess_game combined  - window input, console display");
    println!("  chess_game demo      - watch a short random game");
    println!();
    println!("With no argument, an interactive menu is shown.");
    println!("Settings are read from {} when present.", config::SETTINGS_FILE);
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let settings = config::load();

    let arg = std::env::args().nth(1);
    match arg.as_deref() {
        Some("cli") => cli::run(),
        Some("gui") => gui::run(settings, false).map_err(|e| anyhow::anyhow!("{e}")),
        Some("combined") => combined::run(settings).map_err(|e| anyhow::anyhow!("{e}")),
        Some("demo") => demo::run(&settings),
        Some(other) => {
            eprintln!("Invalid argument: {other}");
            print_usage();
            std::process::exit(1);
        }
        None => menu(settings),
    }
}

/// No-argument path: ask which interface to start.
fn menu(settings: config::Settings) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("Choose interface: (1) CLI or (2) GUI: ");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        match line.trim() {
            "1" => return cli::run(),
            "2" => return gui::run(settings.clone(), false).map_err(|e| anyhow::anyhow!("{e}")),
            _ => println!("Invalid choice. Please enter 1 or 2."),
        }
    }
}
