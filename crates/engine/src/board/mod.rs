use crate::types::*;
// Declare submodules
pub mod moves;
pub mod validation;
pub mod explosion;
pub mod debug;

pub use explosion::Explosion;

/// 8x8 grid of optional pieces, indexed `[row][col]` in position-record order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    pub squares: [[Option<Piece>; 8]; 8],
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// Standard starting layout.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_starting_position();
        board
    }

    pub fn empty() -> Self {
        Self { squares: [[None; 8]; 8] }
    }

    fn setup_starting_position(&mut self) {
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            let col = col as u8;
            // Black back rank (row 0) and pawns (row 1)
            self.set_piece(Square::new(0, col), Some(Piece::new(kind, Color::Black)));
            self.set_piece(Square::new(1, col), Some(Piece::new(PieceKind::Pawn, Color::Black)));
            // White pawns (row 6) and back rank (row 7)
            self.set_piece(Square::new(6, col), Some(Piece::new(PieceKind::Pawn, Color::White)));
            self.set_piece(Square::new(7, col), Some(Piece::new(kind, Color::White)));
        }
    }

    // Basic board operations
    pub fn get_piece(&self, square: Square) -> Option<Piece> {
        self.squares[square.row as usize][square.col as usize]
    }

    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.row as usize][square.col as usize] = piece;
    }

    /// Empty the cell and hand back whatever stood there.
    pub fn take_piece(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.row as usize][square.col as usize].take()
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.get_piece(square).is_none()
    }

    /// Every occupied cell, top row first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| self.get_piece(square).map(|piece| (square, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    pub fn has_king(&self, color: Color) -> bool {
        self.pieces_of(color).any(|(_, piece)| piece.kind == PieceKind::King)
    }

    pub fn count(&self, color: Color, kind: PieceKind) -> usize {
        self.pieces_of(color).filter(|(_, piece)| piece.kind == kind).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_layout() {
        let board = Board::new();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(
            board.get_piece(Square::from_algebraic("e1").unwrap()),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            board.get_piece(Square::from_algebraic("d8").unwrap()),
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
        assert_eq!(board.count(Color::White, PieceKind::Pawn), 8);
        assert_eq!(board.count(Color::Black, PieceKind::Knight), 2);
        assert!(board.has_king(Color::White));
        assert!(board.has_king(Color::Black));
    }

    #[test]
    fn take_piece_empties_the_cell() {
        let mut board = Board::new();
        let e2 = Square::from_algebraic("e2").unwrap();
        let taken = board.take_piece(e2);
        assert_eq!(taken, Some(Piece::new(PieceKind::Pawn, Color::White)));
        assert!(board.is_empty(e2));
        assert_eq!(board.take_piece(e2), None);
    }
}
