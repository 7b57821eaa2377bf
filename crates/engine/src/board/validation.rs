use crate::types::*;
use super::Board;

impl Board {
    /// Check that a move appears in its piece's pseudo-legal set.
    ///
    /// There is no king-safety filtering and no turn check; those are the
    /// caller's business.
    pub fn is_pseudo_legal(&self, mv: Move) -> bool {
        if self.is_empty(mv.from) {
            return false; // No piece to move
        }
        self.get_pseudo_legal_moves(mv.from).contains(&mv.to)
    }

    /// Every pseudo-legal move for one side.
    pub fn get_all_moves(&self, color: Color) -> Vec<Move> {
        let mut all_moves = Vec::new();
        for (square, _) in self.pieces_of(color) {
            for target in self.get_pseudo_legal_moves(square) {
                all_moves.push(Move::new(square, target));
            }
        }
        all_moves
    }

    pub fn is_capture(&self, mv: Move) -> bool {
        !self.is_empty(mv.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(text: &str) -> Move {
        crate::notation::parse_move(text).unwrap()
    }

    #[test]
    fn twenty_opening_moves_per_side() {
        let board = Board::new();
        assert_eq!(board.get_all_moves(Color::White).len(), 20);
        assert_eq!(board.get_all_moves(Color::Black).len(), 20);
    }

    #[test]
    fn pseudo_legal_membership() {
        let board = Board::new();
        assert!(board.is_pseudo_legal(mv("e2e4")));
        assert!(board.is_pseudo_legal(mv("g8f6")));
        assert!(!board.is_pseudo_legal(mv("e2e5")));
        assert!(!board.is_pseudo_legal(mv("e4e5")));
        assert!(!board.is_pseudo_legal(mv("d1d3")));
    }

    #[test]
    fn capture_means_occupied_destination() {
        let mut board = Board::new();
        board.set_piece(Square::from_algebraic("d3").unwrap(), Piece::from_fen_char('p'));
        assert!(board.is_capture(mv("e2d3")));
        assert!(!board.is_capture(mv("e2e3")));
    }
}
