use atomic_engine::{apply_move, decode_strict, GameState, Move, MoveTrust};
use crate::evaluation::*;
use crate::source::{MoveSource, SourceError};
use crate::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub depth: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { depth: DEFAULT_SEARCH_DEPTH }
    }
}

/// Fixed-depth alpha-beta over atomic pseudo-legal moves.
pub struct SearchEngine {
    pub nodes_searched: u64,
    pub config: SearchConfig,
    advanced_logging_enabled: bool,
    log_callback: Option<Box<dyn FnMut(&str)>>,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            nodes_searched: 0,
            config,
            advanced_logging_enabled: false,
            log_callback: None,
        }
    }

    pub fn set_advanced_logging<F>(&mut self, enabled: bool, callback: Option<F>)
    where
        F: FnMut(&str) + 'static,
    {
        self.advanced_logging_enabled = enabled;
        self.log_callback = callback.map(|f| Box::new(f) as Box<dyn FnMut(&str)>);
    }

    pub fn search(&mut self, state: &GameState, depth: u32) -> SearchResult {
        self.nodes_searched = 0;
        let depth = depth.clamp(1, MAX_DEPTH);

        if self.advanced_logging_enabled {
            self.log(&format!("🚀 Starting search at depth {} for {}", depth, state.fen()));
        }

        let (best_move, evaluation) = self.alphabeta_root(state, depth as i32);

        if self.advanced_logging_enabled {
            self.log(&format!(
                "🏆 Search completed. Best move: {}, Evaluation: {}, Nodes: {}",
                best_move.map(|m| m.to_string()).unwrap_or("None".to_string()),
                evaluation,
                self.nodes_searched
            ));
        }

        SearchResult {
            best_move,
            evaluation,
            depth,
            nodes_searched: self.nodes_searched,
        }
    }

    fn alphabeta_root(&mut self, state: &GameState, depth: i32) -> (Option<Move>, i32) {
        if state.game_over {
            return (None, evaluate_position(state, 0));
        }
        let mut moves = state.all_moves();
        if moves.is_empty() {
            return (None, -MATE_SCORE);
        }

        self.order_moves(state, &mut moves);

        let mut best_score = -MATE_SCORE - 1;
        let mut best_move = None;
        let mut alpha = -MATE_SCORE - 1;
        let beta = MATE_SCORE + 1;

        for (move_index, &mv) in moves.iter().enumerate() {
            let ply = match apply_move(state, mv, MoveTrust::Trusted) {
                Ok(ply) => ply,
                Err(_) => continue,
            };

            let score = -self.alphabeta(&ply.state, depth - 1, -beta, -alpha, 1);

            if score > best_score {
                best_score = score;
                best_move = Some(mv);

                if self.advanced_logging_enabled {
                    self.log(&format!(
                        "    ⭐ [{}/{}] NEW BEST {} → {}",
                        move_index + 1,
                        moves.len(),
                        mv,
                        score
                    ));
                }
            }

            if score > alpha {
                alpha = score;
            }
        }

        (best_move, best_score)
    }

    fn alphabeta(&mut self, state: &GameState, depth: i32, mut alpha: i32, beta: i32, ply: u32) -> i32 {
        self.nodes_searched += 1;

        if state.game_over || depth <= 0 {
            return evaluate_position(state, ply);
        }

        let mut moves = state.all_moves();
        if moves.is_empty() {
            // No move at all loses on the spot
            return -MATE_SCORE + ply as i32;
        }

        self.order_moves(state, &mut moves);

        for &mv in &moves {
            let next = match apply_move(state, mv, MoveTrust::Trusted) {
                Ok(next) => next,
                Err(_) => continue,
            };

            let score = -self.alphabeta(&next.state, depth - 1, -beta, -alpha, ply + 1);

            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }

    /// Captures first, most valuable victim first.
    fn order_moves(&self, state: &GameState, moves: &mut Vec<Move>) {
        let board = state.board();
        moves.sort_by_key(|&mv| {
            if !board.is_capture(mv) {
                return 0;
            }
            match (board.get_piece(mv.from), board.get_piece(mv.to)) {
                (Some(attacker), Some(victim)) => {
                    -(10000 + piece_value(victim.kind) - piece_value(attacker.kind) / 10)
                }
                _ => 0,
            }
        });
    }

    fn log(&mut self, message: &str) {
        if let Some(ref mut callback) = self.log_callback {
            callback(message);
        }
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSource for SearchEngine {
    fn suggest_move(&mut self, fen: &str) -> Result<String, SourceError> {
        let position = decode_strict(fen).map_err(SourceError::BadPosition)?;
        let state = GameState::from_position(position);
        let depth = self.config.depth;
        self.search(&state, depth)
            .best_move
            .map(|mv| mv.to_string())
            .ok_or(SourceError::NoMove)
    }
}
