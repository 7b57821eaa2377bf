//! Game state machine: reset, select and move over immutable `GameState` values.

use crate::board::{Board, Explosion};
use crate::error::MoveError;
use crate::fen::{self, Decoded};
use crate::notation::parse_move;
use crate::types::*;

/// Board plus side to move. The position record is derived from this, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub board: Board,
    pub side_to_move: Color,
}

impl Position {
    pub fn new() -> Self {
        Self { board: Board::new(), side_to_move: Color::White }
    }

    pub fn fen(&self) -> String {
        fen::encode(&self.board, self.side_to_move)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub position: Position,
    pub game_over: bool,
    pub winner: Option<Outcome>,
}

/// Result of one accepted move.
#[derive(Debug, Clone)]
pub struct Ply {
    pub mv: Move,
    pub moved: Piece,
    pub captured: Option<Piece>,
    pub explosion: Option<Explosion>,
    pub state: GameState,
}

impl GameState {
    /// Standard start, white to move.
    pub fn new() -> Self {
        Self { position: Position::new(), game_over: false, winner: None }
    }

    pub fn reset() -> Self {
        Self::new()
    }

    /// Build a state from a position record, leniently.
    ///
    /// The terminal status is computed from the board, so a record with a
    /// missing king starts out finished.
    pub fn from_fen(text: &str) -> (Self, Decoded) {
        let decoded = fen::decode(text);
        let state = Self::from_position(decoded.position.clone());
        (state, decoded)
    }

    pub fn from_position(position: Position) -> Self {
        let winner = terminal_status(&position.board);
        Self { position, game_over: winner.is_some(), winner }
    }

    pub fn board(&self) -> &Board {
        &self.position.board
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }

    pub fn fen(&self) -> String {
        self.position.fen()
    }

    /// Destinations for the piece on `square`, if it belongs to the side to move.
    ///
    /// Returns `None` ("nothing selected") for empty cells, the opponent's
    /// pieces, and any square once the game is over.
    pub fn select(&self, square: Square) -> Option<Vec<Square>> {
        if self.game_over {
            return None;
        }
        match self.board().get_piece(square) {
            Some(piece) if piece.color == self.side_to_move() => {
                Some(self.board().get_pseudo_legal_moves(square))
            }
            _ => None,
        }
    }

    /// Every pseudo-legal move of the side to move.
    pub fn all_moves(&self) -> Vec<Move> {
        self.board().get_all_moves(self.side_to_move())
    }

    /// Apply a move unless the game has already ended.
    pub fn make_move(&self, mv: Move, trust: MoveTrust) -> Result<Ply, MoveError> {
        if self.game_over {
            return Err(MoveError::GameOver);
        }
        apply_move(self, mv, trust)
    }

    /// Parse a move record and apply it.
    pub fn play(&self, text: &str, trust: MoveTrust) -> Result<Ply, MoveError> {
        let mv = parse_move(text)?;
        self.make_move(mv, trust)
    }

    /// The side to move loses on the spot.
    pub fn forfeit(&self) -> GameState {
        let loser = self.side_to_move();
        GameState {
            position: self.position.clone(),
            game_over: true,
            winner: Some(Outcome::win_for(loser.opposite())),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply one move with atomic capture semantics and return the successor state.
///
/// The input state is never modified: a rejected move leaves the caller with
/// exactly what it had.
pub fn apply_move(state: &GameState, mv: Move, trust: MoveTrust) -> Result<Ply, MoveError> {
    let board = state.board();
    if board.is_empty(mv.from) {
        return Err(MoveError::NoPiece(mv.from));
    }
    if trust == MoveTrust::Untrusted && !board.is_pseudo_legal(mv) {
        return Err(MoveError::NotPseudoLegal(mv));
    }

    let mut next = board.clone();
    let effect = next.apply_atomic_move(mv).ok_or(MoveError::NoPiece(mv.from))?;

    let winner = terminal_status(&next);
    let position = Position { board: next, side_to_move: state.side_to_move().opposite() };

    Ok(Ply {
        mv,
        moved: effect.moved,
        captured: effect.captured,
        explosion: effect.explosion,
        state: GameState { position, game_over: winner.is_some(), winner },
    })
}

/// `None` while both kings stand; otherwise the result.
///
/// Both kings gone at once (one explosion can take out both) is a draw.
pub fn terminal_status(board: &Board) -> Option<Outcome> {
    match (board.has_king(Color::White), board.has_king(Color::Black)) {
        (true, true) => None,
        (true, false) => Some(Outcome::WhiteWins),
        (false, true) => Some(Outcome::BlackWins),
        (false, false) => Some(Outcome::Draw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn state(fen: &str) -> GameState {
        let (state, decoded) = GameState::from_fen(fen);
        assert!(decoded.is_clean(), "{:?}", decoded.defects);
        state
    }

    #[test]
    fn reset_is_the_standard_start() {
        let game = GameState::reset();
        assert_eq!(game.fen(), fen::STARTING_FEN);
        assert!(!game.game_over);
        assert_eq!(game.winner, None);
    }

    #[test]
    fn select_only_own_pieces() {
        let game = GameState::new();
        let moves = game.select(sq("b1")).unwrap();
        assert_eq!(moves.len(), 2);
        assert_eq!(game.select(sq("b8")), None);
        assert_eq!(game.select(sq("e4")), None);
        // A blocked piece is still selected, with nowhere to go
        assert_eq!(game.select(sq("a1")), Some(vec![]));
    }

    #[test]
    fn quiet_move_flips_side() {
        let game = GameState::new();
        let ply = game.play("g1f3", MoveTrust::Untrusted).unwrap();
        assert_eq!(ply.state.side_to_move(), Color::Black);
        assert!(ply.captured.is_none());
        assert_eq!(
            ply.state.fen(),
            "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R b KQkq - 0 1"
        );
    }

    #[test]
    fn untrusted_illegal_move_is_rejected() {
        let game = GameState::new();
        let result = game.play("e2e5", MoveTrust::Untrusted);
        assert_eq!(
            result.unwrap_err(),
            MoveError::NotPseudoLegal(Move::new(sq("e2"), sq("e5")))
        );
        assert_eq!(game, GameState::new());
    }

    #[test]
    fn trusted_move_skips_the_pattern_check() {
        let game = GameState::new();
        let ply = game.play("e2e5", MoveTrust::Trusted).unwrap();
        assert!(ply.state.board().is_empty(sq("e2")));
        assert_eq!(ply.state.board().get_piece(sq("e5")), Piece::from_fen_char('P'));
    }

    #[test]
    fn empty_source_is_rejected_even_when_trusted() {
        let game = GameState::new();
        assert_eq!(
            game.play("e4e5", MoveTrust::Trusted).unwrap_err(),
            MoveError::NoPiece(sq("e4"))
        );
    }

    #[test]
    fn exploding_the_king_ends_the_game() {
        // White knight takes f7; the blast reaches the black king on e8
        let game = state("rnbqkb1r/pppppppp/8/6N1/8/8/PPPPPPPP/RNBQKB1R w KQkq - 0 1");
        let ply = game.play("g5f7", MoveTrust::Untrusted).unwrap();
        assert!(ply.explosion.is_some());
        assert!(ply.state.game_over);
        assert_eq!(ply.state.winner, Some(Outcome::WhiteWins));
        assert_eq!(ply.state.side_to_move(), Color::Black);
    }

    #[test]
    fn no_moves_after_game_over() {
        let game = state("4k3/8/8/8/8/8/8/8 w KQkq - 0 1");
        assert!(game.game_over);
        assert_eq!(game.winner, Some(Outcome::BlackWins));
        assert_eq!(game.play("e8e7", MoveTrust::Untrusted).unwrap_err(), MoveError::GameOver);
        assert_eq!(game.select(sq("e8")), None);
        // The applicator itself does not look at the flag
        assert!(apply_move(&game, Move::new(sq("e8"), sq("e7")), MoveTrust::Trusted).is_ok());
    }

    #[test]
    fn double_king_loss_is_a_draw() {
        let game = state("8/8/8/3kpK2/8/8/8/4R3 w KQkq - 0 1");
        let ply = game.play("e1e5", MoveTrust::Untrusted).unwrap();
        assert!(ply.state.game_over);
        assert_eq!(ply.state.winner, Some(Outcome::Draw));
    }

    #[test]
    fn removing_the_white_king_means_black_wins() {
        let mut board = Board::new();
        board.set_piece(sq("e1"), None);
        assert_eq!(terminal_status(&board), Some(Outcome::BlackWins));
        assert_eq!(terminal_status(&Board::new()), None);
    }

    #[test]
    fn forfeit_hands_the_win_to_the_opponent() {
        let game = GameState::new().play("e2e4", MoveTrust::Untrusted).unwrap().state;
        let over = game.forfeit();
        assert!(over.game_over);
        assert_eq!(over.winner, Some(Outcome::WhiteWins));
        assert_eq!(over.position, game.position);
    }
}
