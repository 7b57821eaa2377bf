use std::collections::VecDeque;
use std::error::Error;
use std::fmt;

use atomic_engine::FenDefect;

/// Anything that answers a position record with a move record.
///
/// Implementations may be remote; the retry policy treats every error the
/// same way, as one failed attempt.
pub trait MoveSource {
    fn suggest_move(&mut self, fen: &str) -> Result<String, SourceError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The request never produced an answer.
    Transport(String),
    /// The source could not read the position it was given.
    BadPosition(FenDefect),
    /// The source had nothing to suggest.
    NoMove,
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Transport(reason) => write!(f, "transport failure: {}", reason),
            SourceError::BadPosition(defect) => write!(f, "unreadable position: {}", defect),
            SourceError::NoMove => write!(f, "no move suggested"),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SourceError::BadPosition(defect) => Some(defect),
            _ => None,
        }
    }
}

/// Replays canned responses in order and remembers every request.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    responses: VecDeque<Result<String, SourceError>>,
    pub requests: Vec<String>,
}

impl ScriptedSource {
    pub fn new<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = Result<String, SourceError>>,
    {
        Self { responses: responses.into_iter().collect(), requests: Vec::new() }
    }

    /// Convenience for scripts made only of move strings.
    pub fn from_moves(moves: &[&str]) -> Self {
        Self::new(moves.iter().map(|mv| Ok(mv.to_string())))
    }

    pub fn remaining(&self) -> usize {
        self.responses.len()
    }
}

impl MoveSource for ScriptedSource {
    fn suggest_move(&mut self, fen: &str) -> Result<String, SourceError> {
        self.requests.push(fen.to_string());
        self.responses
            .pop_front()
            .unwrap_or_else(|| Err(SourceError::Transport("script exhausted".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_source_replays_in_order() {
        let mut source = ScriptedSource::new(vec![
            Ok("e7e5".to_string()),
            Err(SourceError::NoMove),
        ]);
        assert_eq!(source.suggest_move("a").unwrap(), "e7e5");
        assert_eq!(source.suggest_move("b"), Err(SourceError::NoMove));
        assert!(matches!(source.suggest_move("c"), Err(SourceError::Transport(_))));
        assert_eq!(source.requests, vec!["a", "b", "c"]);
        assert_eq!(source.remaining(), 0);
    }
}
