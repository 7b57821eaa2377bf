use atomic_engine::{Move, PieceKind};

/// Search result containing best move and evaluation
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub evaluation: i32,
    pub depth: u32,
    pub nodes_searched: u64,
}

/// Basic piece values for evaluation. The king is worth the game.
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20000,
    }
}

/// Evaluation constants
pub const MATE_SCORE: i32 = 100000;
pub const DRAW_SCORE: i32 = 0;

/// Maximum search depth
pub const MAX_DEPTH: u32 = 8;
pub const DEFAULT_SEARCH_DEPTH: u32 = 3;

/// Requests made to a move source before falling back to a random move.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
