use atomic_ai::{
    AILoggerExtensions, RetryPolicy, ScriptedSource, SearchEngine, SourceError, SourcedTurn,
};
use atomic_engine::{GameLogger, GameState};

fn main() {
    println!("🤖 Testing Atomic Search");
    println!("{}", "=".repeat(50));

    let mut search_engine = SearchEngine::new();

    println!("Initial position (White to move):");
    let result = search_engine.search(&GameState::new(), 4);
    match result.best_move {
        Some(mv) => {
            println!("✅ Best move found: {}", mv);
            println!("📊 Evaluation: {}", result.evaluation);
            println!("🔍 Nodes searched: {}", result.nodes_searched);
            println!("📏 Search depth: {}", result.depth);
        }
        None => println!("❌ No move found!"),
    }

    // The knight on g5 can blow up the black king through f7
    println!("\n🎯 Testing tactical position:");
    let (tactical, _) = GameState::from_fen("rnbqkb1r/pppppppp/8/6N1/8/8/PPPPPPPP/RNBQKB1R w KQkq - 0 1");
    let tactical_result = search_engine.search(&tactical, 3);
    match tactical_result.best_move {
        Some(mv) => {
            println!("✅ Tactical move: {}", mv);
            println!("📊 Evaluation: {}", tactical_result.evaluation);
            println!("🔍 Nodes searched: {}", tactical_result.nodes_searched);
        }
        None => println!("❌ No tactical move found!"),
    }

    println!("\n📡 Testing retry policy with a flaky source:");
    let state = GameState::new();
    let mut source = ScriptedSource::new(vec![
        Err(SourceError::Transport("timeout".to_string())),
        Ok("e2".to_string()),
        Ok("e7e5".to_string()),
    ]);
    let mut logger = GameLogger::new();
    let mut rng = rand::rng();
    let turn = RetryPolicy::default().request_move(&state, &mut source, &mut rng, &mut logger);
    logger.log_turn_summary(&turn);

    match &turn {
        SourcedTurn::Suggested { ply, attempts, .. } => {
            println!("✅ Played {} on attempt {}", ply.mv, attempts)
        }
        SourcedTurn::Fallback { ply, .. } => println!("🎲 Random fallback: {}", ply.mv),
        SourcedTurn::Forfeit { .. } => println!("🏳️ Forfeit"),
        SourcedTurn::GameOver => println!("🏁 Game already over"),
    }
    for failure in turn.failures() {
        println!("   ❌ {}", failure);
    }
    println!("📜 Unused scripted responses: {}", source.remaining());
    println!("\n{}", logger.log_buffer);
}
