//! egui board window: click-to-move with highlights and a promotion picker.
//! The same app powers plain `gui` mode and `combined` mode, which mirrors
//! every move to the console.

use eframe::egui;

use chess_rules::{
    Color, Game, InputEvent, Piece, PieceKind, SelectionResponse, Selector,
};

use crate::cli;
use crate::config::Settings;

fn piece_glyph(piece: Piece) -> &'static str {
    match (piece.kind, piece.color) {
        (PieceKind::Pawn, Color::White) => "♙",
        (PieceKind::Knight, Color::White) => "♘",
        (PieceKind::Bishop, Color::White) => "♗",
        (PieceKind::Rook, Color::White) => "♖",
        (PieceKind::Queen, Color::White) => "♕",
        (PieceKind::King, Color::White) => "♔",
        (PieceKind::Pawn, Color::Black) => "♟",
        (PieceKind::Knight, Color::Black) => "♞",
        (PieceKind::Bishop, Color::Black) => "♝",
        (PieceKind::Rook, Color::Black) => "♜",
        (PieceKind::Queen, Color::Black) => "♛",
        (PieceKind::King, Color::Black) => "♚",
    }
}

fn color32(rgb: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

pub struct ChessApp {
    game: Game,
    selector: Selector,
    /// Highlight squares for the current selection.
    destinations: Vec<u8>,
    status: String,
    settings: Settings,
    /// Combined mode: repaint the console board after every move.
    mirror_to_console: bool,
}

impl ChessApp {
    pub fn new(settings: Settings, mirror_to_console: bool) -> Self {
        let mut app = ChessApp {
            game: Game::new(),
            selector: Selector::new(),
            destinations: Vec::new(),
            status: String::new(),
            settings,
            mirror_to_console,
        };
        app.status = app.status_line();
        if mirror_to_console {
            app.print_mirror();
        }
        app
    }

    fn status_line(&self) -> String {
        if self.game.outcome().is_terminal() {
            return format!("{}  {}", self.game.outcome(), self.game.result_string());
        }
        let side = match self.game.position().side_to_move {
            Color::White => "White",
            Color::Black => "Black",
        };
        let check = if self.game.in_check() { ", in check" } else { "" };
        match self.game.last_san() {
            Some(san) => format!("{side} to move{check}. Last move: {san}"),
            None => format!("{side} to move{check}."),
        }
    }

    fn print_mirror(&self) {
        cli::clear_screen();
        print!("{}", cli::render_board(self.game.position()));
        println!();
        cli::print_game_info(&self.game);
        if self.game.outcome().is_terminal() {
            println!("--- Game Over ---");
            println!("{}", self.game.outcome());
            println!("Result: {}", self.game.result_string());
        } else {
            println!("--- {} ---", self.status);
            println!("Make your move in the window.");
        }
    }

    fn reset(&mut self) {
        self.game = Game::new();
        self.selector.reset();
        self.destinations.clear();
        self.after_change();
    }

    fn undo(&mut self) {
        if self.game.undo().is_some() {
            self.selector.reset();
            self.destinations.clear();
            self.after_change();
        }
    }

    fn after_change(&mut self) {
        self.status = self.status_line();
        if self.mirror_to_console {
            self.print_mirror();
        }
    }

    fn dispatch(&mut self, event: InputEvent) {
        match self.selector.handle(&self.game, event) {
            SelectionResponse::Selected { destinations, .. } => {
                self.destinations = destinations;
            }
            SelectionResponse::MoveReady(mv) => {
                self.destinations.clear();
                if let Err(e) = self.game.play(mv) {
                    tracing::warn!("rejected move: {e}");
                }
                self.after_change();
            }
            SelectionResponse::NeedsPromotion { .. } => {
                self.destinations.clear();
                self.status = "Choose a piece to promote to.".to_string();
            }
            SelectionResponse::None => self.destinations.clear(),
            SelectionResponse::Rejected(e) => {
                self.status = e.to_string();
            }
        }
    }

    fn on_square_clicked(&mut self, square: u8) {
        if self.game.outcome().is_terminal() || self.selector.awaiting_promotion().is_some() {
            return;
        }
        self.dispatch(InputEvent::SquareChosen(square));
    }

    fn draw_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("New game").clicked() {
                self.reset();
            }
            if ui.button("Undo").clicked() {
                self.undo();
            }
            if ui.button("Random move").clicked() && !self.game.outcome().is_terminal() {
                self.dispatch(InputEvent::RandomMove);
            }
            ui.label(&self.status);
        });
    }

    fn draw_promotion_picker(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Promote to:");
            for kind in [
                PieceKind::Queen,
                PieceKind::Rook,
                PieceKind::Bishop,
                PieceKind::Knight,
            ] {
                if ui.button(kind.name()).clicked() {
                    self.dispatch(InputEvent::PromotionChosen(kind));
                }
            }
        });
    }

    fn draw_board(&mut self, ui: &mut egui::Ui) {
        let board_size = ui.available_width().min(ui.available_height());
        let square_size = board_size / 8.0;

        let board_rect = egui::Rect::from_min_size(
            ui.cursor().min,
            egui::vec2(board_size, board_size),
        );
        let board_response = ui.allocate_rect(board_rect, egui::Sense::click());

        let mut clicked_square = None;
        // Rank 8 is drawn at the top; square 0 (a1) is bottom left.
        for rank in 0..8u8 {
            for file in 0..8u8 {
                let square = rank * 8 + file;
                let rect = egui::Rect::from_min_size(
                    egui::pos2(
                        board_rect.min.x + file as f32 * square_size,
                        board_rect.min.y + (7 - rank) as f32 * square_size,
                    ),
                    egui::vec2(square_size, square_size),
                );

                let fill = if self.selector.selected_square() == Some(square) {
                    color32(self.settings.selected_square)
                } else if self.destinations.contains(&square) {
                    color32(self.settings.target_square)
                } else if (rank + file) % 2 == 1 {
                    color32(self.settings.light_square)
                } else {
                    color32(self.settings.dark_square)
                };
                ui.painter().rect_filled(rect, 0.0, fill);

                if let Some(piece) = self.game.position().piece_at(square) {
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        piece_glyph(piece),
                        egui::FontId::proportional(square_size * 0.8),
                        if piece.color == Color::White {
                            egui::Color32::WHITE
                        } else {
                            egui::Color32::BLACK
                        },
                    );
                }

                if board_response.clicked() {
                    if let Some(pos) = board_response.interact_pointer_pos() {
                        if rect.contains(pos) {
                            clicked_square = Some(square);
                        }
                    }
                }
            }
        }

        if let Some(square) = clicked_square {
            self.on_square_clicked(square);
        }
    }
}

impl eframe::App for ChessApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.draw_controls(ui);
        });

        if self.selector.awaiting_promotion().is_some() {
            egui::TopBottomPanel::bottom("promotion").show(ctx, |ui| {
                self.draw_promotion_picker(ui);
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_board(ui);
        });
    }
}

pub fn run(settings: Settings, mirror_to_console: bool) -> Result<(), eframe::Error> {
    let size = settings.window_size;
    let options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(size, size + 60.0)),
        ..Default::default()
    };
    eframe::run_native(
        "Chess",
        options,
        Box::new(move |_cc| Box::new(ChessApp::new(settings, mirror_to_console))),
    )
}
