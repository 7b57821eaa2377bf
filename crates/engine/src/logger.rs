use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::error::{FenDefect, MoveError};
use crate::game::Ply;
use crate::types::{Color, Outcome};

/// In-memory game log. Written to disk on request with `save_to_file`.
#[derive(Debug)]
pub struct GameLogger {
    pub log_buffer: String,
    pub advanced_logging: bool,
    game_start_time: Instant,
    move_count: u32,
    indent_level: usize,
}

impl GameLogger {
    pub fn new() -> Self {
        let mut logger = Self {
            log_buffer: String::with_capacity(64 * 1024),
            advanced_logging: false,
            game_start_time: Instant::now(),
            move_count: 0,
            indent_level: 0,
        };

        logger.write_header();
        logger
    }

    fn write_header(&mut self) {
        self.log("💣 === Atomic Chess Game Log Started ===");
        self.log(&format!("📅 Date: {}", chrono::Local::now().format("%m/%d/%Y %H:%M:%S")));
    }

    pub fn should_log_advanced(&self) -> bool {
        self.advanced_logging
    }

    pub fn enable_advanced_logging(&mut self) {
        self.advanced_logging = true;
        self.log("🔬 Advanced logging enabled - board diagram after every ply");
    }

    pub fn disable_advanced_logging(&mut self) {
        self.advanced_logging = false;
        self.log("📊 Advanced logging disabled - Basic mode active");
    }

    pub fn log(&mut self, message: &str) {
        self.log_buffer.push_str(message);
        self.log_buffer.push('\n');
    }

    pub fn log_with_indent(&mut self, message: &str) {
        let indent = "  ".repeat(self.indent_level);
        self.log_buffer.push_str(&format!("{}{}\n", indent, message));
    }

    pub fn increase_indent(&mut self) { self.indent_level += 1; }
    pub fn decrease_indent(&mut self) {
        if self.indent_level > 0 { self.indent_level -= 1; }
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    // 🎯 MOVE LOGGING
    pub fn log_human_move(&mut self, ply: &Ply, time_ms: u64) {
        self.log_ply(ply, &format!("Human move - {}ms", time_ms));
    }

    pub fn log_source_move(&mut self, ply: &Ply, attempt: u32) {
        self.log_ply(ply, &format!("Engine move - attempt {}", attempt));
    }

    pub fn log_fallback_move(&mut self, ply: &Ply, failed_attempts: usize) {
        self.log_ply(ply, &format!("Random fallback after {} failed attempts", failed_attempts));
    }

    fn log_ply(&mut self, ply: &Ply, label: &str) {
        self.move_count += 1;
        let capture = match ply.captured {
            Some(victim) => format!(" x{}", victim.kind.name()),
            None => String::new(),
        };
        self.log(&format!(
            "{}. {} {}{} ({})",
            self.move_count,
            ply.moved.kind.name(),
            ply.mv,
            capture,
            label
        ));

        if let Some(explosion) = &ply.explosion {
            self.increase_indent();
            self.log_with_indent(&format!(
                "💥 Explosion on {} destroys {} piece(s)",
                explosion.center,
                explosion.destroyed.len()
            ));
            self.increase_indent();
            let destroyed = explosion.destroyed.clone();
            for (square, piece) in destroyed {
                self.log_with_indent(&format!(
                    "├─ {} {} {}",
                    piece.symbol(),
                    piece.color.name(),
                    square
                ));
            }
            self.decrease_indent();
            for color in explosion.destroyed_kings() {
                self.log_with_indent(&format!("👑 {} king destroyed", color.name()));
            }
            self.decrease_indent();
        }

        if self.should_log_advanced() {
            self.increase_indent();
            for line in ply.state.board().diagram() {
                self.log_with_indent(&line);
            }
            for line in ply.state.board().debug_material() {
                self.log_with_indent(&line);
            }
            self.log_with_indent(&format!("FEN: {}", ply.state.fen()));
            self.decrease_indent();
        }

        if let Some(outcome) = ply.state.winner {
            self.log_game_over(outcome);
        }
    }

    pub fn log_rejected_move(&mut self, input: &str, err: &MoveError) {
        self.log(&format!("🚫 Rejected move '{}': {}", input, err));
    }

    pub fn log_codec_defects(&mut self, fen: &str, defects: &[FenDefect]) {
        if defects.is_empty() {
            return;
        }
        self.log(&format!("⚠️ Position record has {} defect(s): {}", defects.len(), fen));
        self.increase_indent();
        for defect in defects {
            self.log_with_indent(&format!("├─ {}", defect));
        }
        self.decrease_indent();
    }

    // 🎯 MOVE SOURCE
    pub fn log_source_request(&mut self, attempt: u32, max_attempts: u32, fen: &str) {
        self.log(&format!("📡 Requesting move (attempt {}/{}): {}", attempt, max_attempts, fen));
    }

    pub fn log_source_failure(&mut self, attempt: u32, reason: &str) {
        self.log_with_indent(&format!("❌ Attempt {} failed: {}", attempt, reason));
    }

    pub fn log_forfeit(&mut self, loser: Color) {
        self.log(&format!("🏳️ {} has no moves left and forfeits", loser.name()));
    }

    pub fn log_game_over(&mut self, outcome: Outcome) {
        let elapsed = self.game_start_time.elapsed().as_secs();
        self.log(&format!(
            "🏁 Game over after {} plies ({}s): {}",
            self.move_count, elapsed, outcome
        ));
    }

    pub fn log_game_aborted(&mut self, reason: &str) {
        self.log(&format!("🛑 Game finished abruptly - {}", reason));
    }

    /// Start a fresh log for a new game. Earlier games are dropped from the buffer.
    pub fn log_reset(&mut self) {
        self.move_count = 0;
        self.indent_level = 0;
        self.game_start_time = Instant::now();
        self.log_buffer.clear();
        self.write_header();
        self.log("🔄 === New game ===");
    }

    /// Write the buffer to `<dir>/<timestamp>.txt` and return the path.
    ///
    /// Never overwrites an earlier log: a clashing name gets a `_N` suffix.
    pub fn save_to_file(&mut self, dir: &Path, reason: &str) -> io::Result<PathBuf> {
        fs::create_dir_all(dir)?;

        let stamp = chrono::Local::now().format("%m_%d_%Y_%H_%M_%S_%3f").to_string();
        let mut path = dir.join(format!("{}.txt", stamp));
        let mut suffix = 1;
        while path.exists() {
            path = dir.join(format!("{}_{}.txt", stamp, suffix));
            suffix += 1;
        }

        self.log(&format!("💾 Game ended: {} - Saving log", reason));

        let mut file = File::create(&path)?;
        file.write_all(self.log_buffer.as_bytes())?;
        Ok(path)
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}
