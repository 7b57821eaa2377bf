use atomic_engine::GameLogger;

use crate::retry::SourcedTurn;
use crate::types::SearchResult;

/// Search and move-source summaries written into the game log.
pub trait AILoggerExtensions {
    fn log_search_result(&mut self, result: &SearchResult);
    fn log_turn_summary(&mut self, turn: &SourcedTurn);
}

impl AILoggerExtensions for GameLogger {
    fn log_search_result(&mut self, result: &SearchResult) {
        if !GameLogger::should_log_advanced(self) {
            return;
        }
        let best = result
            .best_move
            .map(|mv| mv.to_string())
            .unwrap_or_else(|| "None".to_string());
        GameLogger::increase_indent(self);
        GameLogger::log_with_indent(
            self,
            &format!(
                "🧠 Search depth {} → {} (eval {}, {} nodes)",
                result.depth, best, result.evaluation, result.nodes_searched
            ),
        );
        GameLogger::decrease_indent(self);
    }

    fn log_turn_summary(&mut self, turn: &SourcedTurn) {
        let summary = match turn {
            SourcedTurn::Suggested { attempts, failures, .. } if failures.is_empty() => {
                format!("📊 Source answered on attempt {}", attempts)
            }
            SourcedTurn::Suggested { attempts, failures, .. } => {
                format!("📊 Source answered on attempt {} after {} failure(s)", attempts, failures.len())
            }
            SourcedTurn::Fallback { failures, .. } => {
                format!("📊 Source gave up after {} attempt(s), random move played", failures.len())
            }
            SourcedTurn::Forfeit { failures, .. } => {
                format!("📊 Source gave up after {} attempt(s), side forfeited", failures.len())
            }
            SourcedTurn::GameOver => return,
        };
        GameLogger::log(self, &summary);
    }
}
