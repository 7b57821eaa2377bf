use crate::game::{apply_move, GameState};
use crate::types::{Move, MoveTrust};
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct PerftResult {
    pub nodes: u64,
    pub captures: u64,
    pub explosions: u64,
    pub pieces_destroyed: u64,
    pub king_losses: u64,
    pub time_ms: u128,
}

impl PerftResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes_per_second(&self) -> u64 {
        if self.time_ms == 0 {
            return 0;
        }
        (self.nodes * 1000) / (self.time_ms as u64)
    }
}

#[derive(Debug)]
pub struct PerftTestCase {
    pub name: &'static str,
    pub fen: &'static str,
    pub expected_results: &'static [(u32, u64)], // (depth, expected_nodes)
}

// Captures cannot happen before ply 3, so the first depths match orthodox chess
pub const PERFT_POSITIONS: &[PerftTestCase] = &[
    PerftTestCase {
        name: "Starting Position",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        expected_results: &[
            (1, 20),
            (2, 400),
            (3, 8_902),
        ],
    },
    PerftTestCase {
        name: "Lone Kings",
        fen: "4k3/8/8/8/8/8/8/4K3 w KQkq - 0 1",
        expected_results: &[
            (1, 5),
            (2, 25),
        ],
    },
];

/// Count leaf nodes of the pseudo-legal move tree. Finished games have no children.
pub fn perft(state: &GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    if state.game_over {
        return 0;
    }

    let mut nodes = 0;
    for mv in state.all_moves() {
        if let Ok(ply) = apply_move(state, mv, MoveTrust::Trusted) {
            nodes += perft(&ply.state, depth - 1);
        }
    }
    nodes
}

/// Perft that also tallies what happened on the last ply.
pub fn perft_detailed(state: &GameState, depth: u32) -> PerftResult {
    let start_time = Instant::now();
    let mut result = PerftResult::new();
    perft_detailed_inner(state, depth, &mut result);
    result.time_ms = start_time.elapsed().as_millis();
    result
}

fn perft_detailed_inner(state: &GameState, depth: u32, result: &mut PerftResult) {
    if depth == 0 {
        result.nodes += 1;
        return;
    }
    if state.game_over {
        return;
    }

    for mv in state.all_moves() {
        let ply = match apply_move(state, mv, MoveTrust::Trusted) {
            Ok(ply) => ply,
            Err(_) => continue,
        };

        if depth == 1 {
            if ply.captured.is_some() {
                result.captures += 1;
            }
            if let Some(explosion) = &ply.explosion {
                result.explosions += 1;
                result.pieces_destroyed += explosion.destroyed.len() as u64;
            }
            if ply.state.game_over {
                result.king_losses += 1;
            }
        }

        perft_detailed_inner(&ply.state, depth - 1, result);
    }
}

/// Divide perft - shows per-move breakdown for debugging
pub fn perft_divide(state: &GameState, depth: u32) -> Vec<(Move, u64)> {
    let mut results = Vec::new();
    if depth == 0 {
        return results;
    }

    for mv in state.all_moves() {
        if let Ok(ply) = apply_move(state, mv, MoveTrust::Trusted) {
            results.push((mv, perft(&ply.state, depth - 1)));
        }
    }

    results.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.to_string().cmp(&b.0.to_string())));
    results
}

/// Run a single perft test
pub fn run_perft_test(state: &GameState, depth: u32, expected: u64) -> bool {
    println!("Running perft depth {} (expected: {})", depth, expected);

    let start_time = Instant::now();
    let nodes = perft(state, depth);
    let elapsed = start_time.elapsed();

    let success = nodes == expected;
    let status = if success { "✅ PASS" } else { "❌ FAIL" };

    println!("{} - Depth {}: {} nodes in {:.3}s", status, depth, nodes, elapsed.as_secs_f64());

    if !success {
        println!("Expected: {}, Got: {}", expected, nodes);
    }

    success
}

/// Run all perft tests for a position
pub fn run_position_tests(test_case: &PerftTestCase, max_depth: Option<u32>) -> bool {
    println!("\n🏁 Testing: {}", test_case.name);
    println!("FEN: {}", test_case.fen);

    let (state, decoded) = GameState::from_fen(test_case.fen);
    if !decoded.is_clean() {
        println!("❌ Bad position record: {:?}", decoded.defects);
        return false;
    }

    let mut all_passed = true;
    for &(depth, expected) in test_case.expected_results {
        if let Some(max) = max_depth {
            if depth > max {
                break;
            }
        }

        let passed = run_perft_test(&state, depth, expected);
        all_passed &= passed;

        if !passed {
            println!("🔍 Running divide to debug:");
            for (mv, nodes) in perft_divide(&state, depth).iter().take(10) {
                println!("  {}: {}", mv, nodes);
            }
        }
    }

    all_passed
}
