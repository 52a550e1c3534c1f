//! Combined mode: moves come from the window, and the console repaints the
//! board, captured pieces, and turn line after every one.

use crate::config::Settings;
use crate::gui;

pub fn run(settings: Settings) -> Result<(), eframe::Error> {
    gui::run(settings, true)
}
