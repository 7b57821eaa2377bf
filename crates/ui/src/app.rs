use std::path::Path;
use std::time::Instant;

use egui::{Color32, Rect, Sense, Vec2};
use atomic_ai::{AILoggerExtensions, RetryPolicy, SearchEngine, SourcedTurn};
use atomic_engine::{Color, GameLogger, GameState, Move, MoveTrust, Piece, Ply, Square};

const LOG_DIR: &str = "logs";

/// Human plays White by clicking; Black is answered by the search engine
/// through the retry policy.
pub struct ChessApp {
    state: GameState,
    selected_square: Option<Square>,
    legal_moves: Vec<Square>,
    last_explosion: Vec<Square>,
    status: String,
    logger: GameLogger,
    engine: SearchEngine,
    policy: RetryPolicy,
    turn_started: Instant,
    log_saved: bool,
}

impl ChessApp {
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
            selected_square: None,
            legal_moves: Vec::new(),
            last_explosion: Vec::new(),
            status: "White to move".to_string(),
            logger: GameLogger::new(),
            engine: SearchEngine::new(),
            policy: RetryPolicy::default(),
            turn_started: Instant::now(),
            log_saved: false,
        }
    }
}

impl Default for ChessApp {
    fn default() -> Self {
        Self::new()
    }
}

impl eframe::App for ChessApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::right("controls").show(ctx, |ui| {
            ui.heading("Atomic Chess");
            ui.label(&self.status);
            ui.separator();

            if ui.button("🔄 New game").clicked() {
                self.reset();
            }

            let mut advanced = self.logger.should_log_advanced();
            if ui.checkbox(&mut advanced, "Advanced logging").changed() {
                if advanced {
                    self.logger.enable_advanced_logging();
                } else {
                    self.logger.disable_advanced_logging();
                }
            }

            ui.separator();
            ui.label("Position:");
            ui.monospace(self.state.fen());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available_size = ui.available_size();
            let board_size = (available_size.x.min(available_size.y) - 20.0).max(0.0);
            let square_size = board_size / 8.0;
            if square_size <= 0.0 {
                return;
            }

            let board_rect = Rect::from_min_size(ui.cursor().min, Vec2::splat(board_size));
            let response = ui.allocate_rect(board_rect, Sense::click());

            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let relative_pos = pos - board_rect.min;
                    if let Some(clicked_square) =
                        Square::from_coords(relative_pos.x, relative_pos.y, square_size)
                    {
                        self.handle_square_click(clicked_square);
                    }
                }
            }

            self.draw_board(ui, board_rect, square_size);
        });
    }
}

impl ChessApp {
    fn reset(&mut self) {
        if !self.state.game_over && self.logger.move_count() > 0 {
            self.logger.log_game_aborted("new game requested");
            self.save_log("aborted");
        }
        self.state = GameState::reset();
        self.clear_selection();
        self.last_explosion.clear();
        self.status = "White to move".to_string();
        self.logger.log_reset();
        self.turn_started = Instant::now();
        self.log_saved = false;
    }

    fn clear_selection(&mut self) {
        self.selected_square = None;
        self.legal_moves.clear();
    }

    fn handle_square_click(&mut self, clicked_square: Square) {
        if self.state.game_over || self.state.side_to_move() != Color::White {
            return;
        }

        if let Some(selected) = self.selected_square {
            if selected == clicked_square {
                self.clear_selection();
                return;
            }
            if self.legal_moves.contains(&clicked_square) {
                self.play_human_move(Move::new(selected, clicked_square));
                return;
            }
        }

        match self.state.select(clicked_square) {
            Some(targets) => {
                self.selected_square = Some(clicked_square);
                self.legal_moves = targets;
            }
            None => self.clear_selection(),
        }
    }

    fn play_human_move(&mut self, mv: Move) {
        match self.state.make_move(mv, MoveTrust::Untrusted) {
            Ok(ply) => {
                let elapsed = self.turn_started.elapsed().as_millis() as u64;
                self.logger.log_human_move(&ply, elapsed);
                self.accept(ply);
                self.clear_selection();

                if !self.state.game_over {
                    self.play_engine_move();
                }
            }
            Err(err) => {
                self.logger.log_rejected_move(&mv.to_string(), &err);
                self.status = format!("Rejected: {}", err);
            }
        }
        self.turn_started = Instant::now();
    }

    fn play_engine_move(&mut self) {
        let mut rng = rand::rng();
        let turn = self.policy.request_move(&self.state, &mut self.engine, &mut rng, &mut self.logger);
        self.logger.log_turn_summary(&turn);

        match turn {
            SourcedTurn::Suggested { ply, .. } | SourcedTurn::Fallback { ply, .. } => self.accept(ply),
            SourcedTurn::Forfeit { state, .. } => {
                self.state = state;
                self.last_explosion.clear();
                self.update_status();
            }
            SourcedTurn::GameOver => {}
        }
    }

    fn accept(&mut self, ply: Ply) {
        self.last_explosion = match &ply.explosion {
            Some(explosion) => explosion.destroyed.iter().map(|(square, _)| *square).collect(),
            None => Vec::new(),
        };
        self.state = ply.state;
        self.update_status();
    }

    fn update_status(&mut self) {
        self.status = match self.state.winner {
            Some(outcome) => format!("Game over: {}", outcome),
            None => format!("{} to move", self.state.side_to_move().name()),
        };

        if self.state.game_over && !self.log_saved {
            self.save_log("game over");
        }
    }

    fn save_log(&mut self, reason: &str) {
        self.log_saved = true;
        if let Err(err) = self.logger.save_to_file(Path::new(LOG_DIR), reason) {
            self.status = format!("{} (log not saved: {})", self.status, err);
        }
    }

    fn draw_board(&self, ui: &mut egui::Ui, board_rect: Rect, square_size: f32) {
        let painter = ui.painter();

        for square in Square::all() {
            let is_light = (square.row + square.col) % 2 == 0;

            let square_rect = Rect::from_min_size(
                board_rect.min
                    + Vec2::new(square.col as f32 * square_size, square.row as f32 * square_size),
                Vec2::splat(square_size),
            );

            let base_color = if is_light {
                Color32::from_rgb(240, 217, 181)
            } else {
                Color32::from_rgb(181, 136, 99)
            };

            let square_color = if Some(square) == self.selected_square {
                Color32::from_rgb(255, 255, 0)
            } else if self.last_explosion.contains(&square) {
                Color32::from_rgb(230, 120, 80)
            } else {
                base_color
            };

            painter.rect_filled(square_rect, 0.0, square_color);

            if self.legal_moves.contains(&square) {
                let center = square_rect.center();
                let hint = Color32::from_rgba_premultiplied(128, 128, 128, 179);

                if self.state.board().get_piece(square).is_some() {
                    // Capture: donut
                    painter.circle_filled(center, square_size * 0.4, hint);
                    painter.circle_filled(center, square_size * 0.25, square_color);
                } else {
                    painter.circle_filled(center, square_size * 0.15, hint);
                }
            }

            if let Some(piece) = self.state.board().get_piece(square) {
                self.draw_piece(painter, piece, square_rect);
            }
        }

        painter.rect_stroke(board_rect, 0.0, egui::Stroke::new(2.0, Color32::BLACK));
    }

    fn draw_piece(&self, painter: &egui::Painter, piece: Piece, square_rect: Rect) {
        let size = square_rect.size() * 0.8;
        painter.text(
            square_rect.center(),
            egui::Align2::CENTER_CENTER,
            piece.symbol(),
            egui::FontId::proportional(size.x),
            Color32::BLACK,
        );
    }
}
