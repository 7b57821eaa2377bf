//! Bounded retry around a `MoveSource`, with a random fallback and forfeit.

use std::fmt;

use atomic_engine::{
    parse_move, GameLogger, GameState, Move, MoveError, MoveParseError, MoveTrust, Ply,
};
use rand::Rng;

use crate::source::{MoveSource, SourceError};
use crate::types::DEFAULT_MAX_ATTEMPTS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Also require suggestions to be in the piece's pseudo-legal set.
    /// Off by default: suggestions are applied as trusted moves.
    pub verify_pseudo_legal: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: DEFAULT_MAX_ATTEMPTS, verify_pseudo_legal: false }
    }
}

/// Why one request to the source did not yield a playable move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptFailure {
    Transport(SourceError),
    Malformed(MoveParseError),
    /// The source square does not hold a piece of the side to move.
    WrongSide(Move),
    Rejected(MoveError),
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptFailure::Transport(err) => write!(f, "{}", err),
            AttemptFailure::Malformed(err) => write!(f, "malformed move: {}", err),
            AttemptFailure::WrongSide(mv) => {
                write!(f, "{} does not start on a piece of the side to move", mv)
            }
            AttemptFailure::Rejected(err) => write!(f, "rejected: {}", err),
        }
    }
}

/// How the side to move got (or failed to get) its move.
#[derive(Debug, Clone)]
pub enum SourcedTurn {
    Suggested { ply: Ply, attempts: u32, failures: Vec<AttemptFailure> },
    Fallback { ply: Ply, failures: Vec<AttemptFailure> },
    Forfeit { state: GameState, failures: Vec<AttemptFailure> },
    /// The game had already ended; nothing was requested.
    GameOver,
}

impl SourcedTurn {
    /// The state after this turn, or `None` when nothing happened.
    pub fn state(&self) -> Option<&GameState> {
        match self {
            SourcedTurn::Suggested { ply, .. } | SourcedTurn::Fallback { ply, .. } => Some(&ply.state),
            SourcedTurn::Forfeit { state, .. } => Some(state),
            SourcedTurn::GameOver => None,
        }
    }

    pub fn failures(&self) -> &[AttemptFailure] {
        match self {
            SourcedTurn::Suggested { failures, .. }
            | SourcedTurn::Fallback { failures, .. }
            | SourcedTurn::Forfeit { failures, .. } => failures,
            SourcedTurn::GameOver => &[],
        }
    }
}

impl RetryPolicy {
    /// Ask `source` for a move for the side to move, at most `max_attempts` times.
    ///
    /// After the last failed attempt a uniformly random pseudo-legal move is
    /// played; if the side to move has none it forfeits.
    pub fn request_move<S, R>(
        &self,
        state: &GameState,
        source: &mut S,
        rng: &mut R,
        logger: &mut GameLogger,
    ) -> SourcedTurn
    where
        S: MoveSource + ?Sized,
        R: Rng,
    {
        if state.game_over {
            return SourcedTurn::GameOver;
        }

        let fen = state.fen();
        let mut failures = Vec::new();

        for attempt in 1..=self.max_attempts {
            logger.log_source_request(attempt, self.max_attempts, &fen);
            match self.try_suggestion(state, source, &fen) {
                Ok(ply) => {
                    logger.log_source_move(&ply, attempt);
                    return SourcedTurn::Suggested { ply, attempts: attempt, failures };
                }
                Err(failure) => {
                    logger.log_source_failure(attempt, &failure.to_string());
                    failures.push(failure);
                }
            }
        }

        self.fallback(state, rng, logger, failures)
    }

    fn try_suggestion<S>(&self, state: &GameState, source: &mut S, fen: &str) -> Result<Ply, AttemptFailure>
    where
        S: MoveSource + ?Sized,
    {
        let text = source.suggest_move(fen).map_err(AttemptFailure::Transport)?;
        let mv = parse_move(&text).map_err(AttemptFailure::Malformed)?;

        match state.board().get_piece(mv.from) {
            Some(piece) if piece.color == state.side_to_move() => {}
            _ => return Err(AttemptFailure::WrongSide(mv)),
        }

        let trust = if self.verify_pseudo_legal { MoveTrust::Untrusted } else { MoveTrust::Trusted };
        state.make_move(mv, trust).map_err(AttemptFailure::Rejected)
    }

    fn fallback<R: Rng>(
        &self,
        state: &GameState,
        rng: &mut R,
        logger: &mut GameLogger,
        failures: Vec<AttemptFailure>,
    ) -> SourcedTurn {
        let moves = state.all_moves();
        if moves.is_empty() {
            logger.log_forfeit(state.side_to_move());
            let state = state.forfeit();
            if let Some(outcome) = state.winner {
                logger.log_game_over(outcome);
            }
            return SourcedTurn::Forfeit { state, failures };
        }

        let mv = moves[rng.random_range(0..moves.len())];
        match state.make_move(mv, MoveTrust::Untrusted) {
            Ok(ply) => {
                logger.log_fallback_move(&ply, failures.len());
                SourcedTurn::Fallback { ply, failures }
            }
            Err(err) => {
                // Generated moves always apply; treat the impossible case as a loss
                logger.log_rejected_move(&mv.to_string(), &err);
                logger.log_forfeit(state.side_to_move());
                SourcedTurn::Forfeit { state: state.forfeit(), failures }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ScriptedSource;
    use atomic_engine::{Color, Outcome};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn after(moves: &[&str]) -> GameState {
        let mut state = GameState::new();
        for mv in moves {
            state = state.play(mv, MoveTrust::Untrusted).unwrap().state;
        }
        state
    }

    fn run(policy: RetryPolicy, state: &GameState, source: &mut ScriptedSource) -> (SourcedTurn, GameLogger) {
        let mut rng = StdRng::seed_from_u64(7);
        let mut logger = GameLogger::new();
        let turn = policy.request_move(state, source, &mut rng, &mut logger);
        (turn, logger)
    }

    #[test]
    fn first_good_answer_is_played() {
        let state = after(&["e2e4"]);
        let mut source = ScriptedSource::from_moves(&["e7e5"]);
        let (turn, logger) = run(RetryPolicy::default(), &state, &mut source);

        match turn {
            SourcedTurn::Suggested { ply, attempts, failures } => {
                assert_eq!(attempts, 1);
                assert!(failures.is_empty());
                assert_eq!(ply.mv.to_string(), "e7e5");
                assert_eq!(ply.state.side_to_move(), Color::White);
            }
            other => panic!("expected a suggested move, got {:?}", other),
        }
        assert_eq!(source.requests, vec![state.fen()]);
        assert!(logger.log_buffer.contains("Engine move - attempt 1"));
    }

    #[test]
    fn bad_answers_are_retried() {
        let state = after(&["e2e4"]);
        let mut source = ScriptedSource::new(vec![
            Err(SourceError::Transport("connection refused".to_string())),
            Ok("e7".to_string()),
            Ok("g8f6".to_string()),
        ]);
        let (turn, logger) = run(RetryPolicy::default(), &state, &mut source);

        match &turn {
            SourcedTurn::Suggested { attempts, failures, .. } => {
                assert_eq!(*attempts, 3);
                assert_eq!(failures.len(), 2);
                assert!(matches!(failures[0], AttemptFailure::Transport(_)));
                assert!(matches!(failures[1], AttemptFailure::Malformed(MoveParseError::TooShort(_))));
            }
            other => panic!("expected a suggested move, got {:?}", other),
        }
        assert!(logger.log_buffer.contains("❌ Attempt 1 failed: transport failure: connection refused"));
    }

    #[test]
    fn moving_the_wrong_side_counts_as_a_failure() {
        let state = after(&["e2e4"]);
        let mut source = ScriptedSource::from_moves(&["d2d4", "e5e4", "b8c6"]);
        let (turn, _) = run(RetryPolicy::default(), &state, &mut source);

        let failures = turn.failures();
        assert_eq!(failures.len(), 2);
        assert_eq!(
            failures[0],
            AttemptFailure::WrongSide(parse_move("d2d4").unwrap())
        );
        assert!(matches!(turn, SourcedTurn::Suggested { attempts: 3, .. }));
    }

    #[test]
    fn trusted_suggestions_skip_the_pattern_check() {
        let state = after(&["e2e4"]);

        let mut lenient = ScriptedSource::from_moves(&["d8d4"]);
        let (turn, _) = run(RetryPolicy::default(), &state, &mut lenient);
        assert!(matches!(turn, SourcedTurn::Suggested { attempts: 1, .. }));

        let strict = RetryPolicy { verify_pseudo_legal: true, ..RetryPolicy::default() };
        let mut source = ScriptedSource::from_moves(&["d8d4", "d7d5"]);
        let (turn, _) = run(strict, &state, &mut source);
        assert!(matches!(
            turn.failures(),
            [AttemptFailure::Rejected(MoveError::NotPseudoLegal(_))]
        ));
    }

    #[test]
    fn exhausted_attempts_fall_back_to_a_random_pseudo_legal_move() {
        let state = after(&["e2e4"]);
        let mut source = ScriptedSource::from_moves(&["zz", "a1a9", "h1h2"]);
        let (turn, logger) = run(RetryPolicy::default(), &state, &mut source);

        match turn {
            SourcedTurn::Fallback { ply, failures } => {
                assert_eq!(failures.len(), 3);
                assert!(state.all_moves().contains(&ply.mv));
                assert_eq!(state.board().get_piece(ply.mv.from).unwrap().color, Color::Black);
            }
            other => panic!("expected a fallback move, got {:?}", other),
        }
        assert_eq!(source.requests.len(), 3);
        assert!(logger.log_buffer.contains("Random fallback after 3 failed attempts"));
    }

    #[test]
    fn fallback_is_reproducible_with_a_seed() {
        let state = GameState::new();
        let policy = RetryPolicy { max_attempts: 0, ..RetryPolicy::default() };
        let pick = || {
            let mut source = ScriptedSource::default();
            match run(policy, &state, &mut source).0 {
                SourcedTurn::Fallback { ply, .. } => ply.mv,
                other => panic!("expected a fallback move, got {:?}", other),
            }
        };
        assert_eq!(pick(), pick());
    }

    #[test]
    fn no_moves_at_all_forfeits() {
        // Black's king is walled in by its own pawns, and none of them can move
        let (state, _) = GameState::from_fen("kp6/pp6/pp6/pp6/pp6/pp6/pp6/pp5K b KQkq - 0 1");
        assert!(!state.game_over);
        assert!(state.all_moves().is_empty());
        let mut source = ScriptedSource::default();
        let (turn, logger) = run(RetryPolicy::default(), &state, &mut source);

        match turn {
            SourcedTurn::Forfeit { state, failures } => {
                assert_eq!(failures.len(), 3);
                assert!(state.game_over);
                assert_eq!(state.winner, Some(Outcome::WhiteWins));
            }
            other => panic!("expected a forfeit, got {:?}", other),
        }
        assert!(logger.log_buffer.contains("Black has no moves left and forfeits"));
    }

    #[test]
    fn finished_games_are_not_requested() {
        let (state, _) = GameState::from_fen("4k3/8/8/8/8/8/8/8 w KQkq - 0 1");
        let mut source = ScriptedSource::from_moves(&["e8e7"]);
        let (turn, _) = run(RetryPolicy::default(), &state, &mut source);
        assert!(matches!(turn, SourcedTurn::GameOver));
        assert!(source.requests.is_empty());
        assert!(turn.state().is_none());
    }
}
