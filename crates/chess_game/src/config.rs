//! Settings loaded from an optional `chess_game.toml` next to the binary's
//! working directory. Every field has a default, so the file can name just
//! the values it changes, or not exist at all.

use serde::Deserialize;
use std::path::Path;

pub const SETTINGS_FILE: &str = "chess_game.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Window edge length in logical pixels; the board is square.
    pub window_size: f32,
    pub light_square: [u8; 3],
    pub dark_square: [u8; 3],
    pub selected_square: [u8; 3],
    pub target_square: [u8; 3],
    /// Number of random moves the demo plays.
    pub demo_moves: u32,
    /// Pause between demo moves, in milliseconds.
    pub demo_delay_ms: u64,
    /// Where the demo writes the final position.
    pub demo_output_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            window_size: 640.0,
            light_square: [240, 217, 181],
            dark_square: [181, 136, 99],
            selected_square: [246, 246, 105],
            target_square: [106, 168, 79],
            demo_moves: 10,
            demo_delay_ms: 1000,
            demo_output_dir: "demo_output".to_string(),
        }
    }
}

/// Read the settings file if it exists; fall back to defaults on any
/// problem, with a warning rather than a hard failure.
pub fn load() -> Settings {
    let path = Path::new(SETTINGS_FILE);
    if !path.exists() {
        return Settings::default();
    }
    match std::fs::read_to_string(path) {
        Ok(text) => match toml::from_str(&text) {
            Ok(settings) => {
                tracing::info!("loaded settings from {SETTINGS_FILE}");
                settings
            }
            Err(e) => {
                tracing::warn!("ignoring malformed {SETTINGS_FILE}: {e}");
                Settings::default()
            }
        },
        Err(e) => {
            tracing::warn!("could not read {SETTINGS_FILE}: {e}");
            Settings::default()
        }
    }
}
