use atomic_engine::{Color, GameState, Outcome};
use crate::types::*;

/// Evaluate a position from the perspective of the side to move.
/// Positive = good for the side to move, negative = bad.
///
/// `ply` is the distance from the search root, so quicker wins score higher.
pub fn evaluate_position(state: &GameState, ply: u32) -> i32 {
    let us = state.side_to_move();

    if let Some(outcome) = state.winner {
        return match outcome {
            Outcome::Draw => DRAW_SCORE,
            _ if outcome.winner() == Some(us) => MATE_SCORE - ply as i32,
            _ => -MATE_SCORE + ply as i32,
        };
    }

    evaluate_material(state, us)
}

/// Material balance for `us`, kings included.
fn evaluate_material(state: &GameState, us: Color) -> i32 {
    let mut score = 0;
    for (_, piece) in state.board().pieces() {
        let value = piece_value(piece.kind);
        if piece.color == us {
            score += value;
        } else {
            score -= value;
        }
    }
    score
}
