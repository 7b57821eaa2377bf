use std::error::Error;
use std::fmt;

use crate::types::{Move, Square};

/// A defect found while decoding a position record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenDefect {
    /// The board field did not split into 8 rank groups.
    RankCount(usize),
    /// A rank group whose digits and pieces do not add up to 8 cells.
    RankWidth { rank: usize, cells: usize },
    /// A character outside `1-8` and `pnbrqk` (either case).
    UnknownChar { rank: usize, ch: char },
    MissingSideToMove,
    UnknownSideToMove(String),
}

impl fmt::Display for FenDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenDefect::RankCount(count) => {
                write!(f, "board should have 8 ranks, found {}", count)
            }
            FenDefect::RankWidth { rank, cells } => {
                write!(f, "rank group {} covers {} cells instead of 8", rank + 1, cells)
            }
            FenDefect::UnknownChar { rank, ch } => {
                write!(f, "unknown character '{}' in rank group {}", ch, rank + 1)
            }
            FenDefect::MissingSideToMove => write!(f, "missing side-to-move field"),
            FenDefect::UnknownSideToMove(field) => {
                write!(f, "side to move should be 'w' or 'b', found '{}'", field)
            }
        }
    }
}

impl Error for FenDefect {}

/// Failure to read a 4-character move record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    TooShort(String),
    InvalidSquare(String),
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::TooShort(input) => {
                write!(f, "move '{}' is shorter than 4 characters", input)
            }
            MoveParseError::InvalidSquare(square) => {
                write!(f, "'{}' is not a square between a1 and h8", square)
            }
        }
    }
}

impl Error for MoveParseError {}

/// Why a move was rejected. A rejected move never changes the game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    NoPiece(Square),
    NotPseudoLegal(Move),
    GameOver,
    Parse(MoveParseError),
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::NoPiece(square) => write!(f, "no piece on {}", square),
            MoveError::NotPseudoLegal(mv) => write!(f, "{} is not a move for that piece", mv),
            MoveError::GameOver => write!(f, "the game is over"),
            MoveError::Parse(err) => write!(f, "{}", err),
        }
    }
}

impl Error for MoveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MoveError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MoveParseError> for MoveError {
    fn from(err: MoveParseError) -> Self {
        MoveError::Parse(err)
    }
}
