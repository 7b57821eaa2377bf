//! Position record codec.
//!
//! The record is `<ranks> <w|b> KQkq - 0 1`. Only the board and the side to
//! move are real state; castling, en passant and the clocks are emitted as
//! constants and ignored on input.

use crate::board::Board;
use crate::error::FenDefect;
use crate::game::Position;
use crate::types::*;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Fields after the side to move. Never tracked as game state.
pub const FEN_SUFFIX: &str = "KQkq - 0 1";

/// Best-effort decode result plus everything that was wrong with the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub position: Position,
    pub defects: Vec<FenDefect>,
}

impl Decoded {
    pub fn is_clean(&self) -> bool {
        self.defects.is_empty()
    }
}

/// Lenient decode: always produces a position.
///
/// Unknown characters are skipped without advancing the column, cells past
/// the eighth column are dropped, and a missing or unknown side to move reads
/// as white. Every such repair is listed in `defects`.
pub fn decode(text: &str) -> Decoded {
    let mut defects = Vec::new();
    let mut fields = text.split_whitespace();

    let board = decode_board(fields.next().unwrap_or(""), &mut defects);

    let side_to_move = match fields.next() {
        Some("w") => Color::White,
        Some("b") => Color::Black,
        Some(other) => {
            defects.push(FenDefect::UnknownSideToMove(other.to_string()));
            Color::White
        }
        None => {
            defects.push(FenDefect::MissingSideToMove);
            Color::White
        }
    };

    Decoded { position: Position { board, side_to_move }, defects }
}

/// Strict decode: the first defect is an error.
pub fn decode_strict(text: &str) -> Result<Position, FenDefect> {
    let decoded = decode(text);
    match decoded.defects.into_iter().next() {
        Some(defect) => Err(defect),
        None => Ok(decoded.position),
    }
}

fn decode_board(placement: &str, defects: &mut Vec<FenDefect>) -> Board {
    let mut board = Board::empty();
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        defects.push(FenDefect::RankCount(ranks.len()));
    }

    for (row, rank_str) in ranks.iter().take(8).enumerate() {
        let mut cells = 0usize;

        for ch in rank_str.chars() {
            if let Some(run) = ch.to_digit(10).filter(|run| (1..=8).contains(run)) {
                cells += run as usize;
            } else if let Some(piece) = Piece::from_fen_char(ch) {
                if cells < 8 {
                    board.set_piece(Square::new(row as u8, cells as u8), Some(piece));
                }
                cells += 1;
            } else {
                defects.push(FenDefect::UnknownChar { rank: row, ch });
            }
        }

        if cells != 8 {
            defects.push(FenDefect::RankWidth { rank: row, cells });
        }
    }

    board
}

/// Encode a board and side to move as a position record.
pub fn encode(board: &Board, side_to_move: Color) -> String {
    let mut fen = String::with_capacity(64);

    for row in 0..8u8 {
        let mut empty_count = 0;
        for col in 0..8u8 {
            match board.get_piece(Square::new(row, col)) {
                Some(piece) => {
                    if empty_count > 0 {
                        fen.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    fen.push(piece.fen_char());
                }
                None => empty_count += 1,
            }
        }
        if empty_count > 0 {
            fen.push_str(&empty_count.to_string());
        }
        if row < 7 {
            fen.push('/');
        }
    }

    fen.push(' ');
    fen.push(side_to_move.fen_char());
    fen.push(' ');
    fen.push_str(FEN_SUFFIX);
    fen
}
