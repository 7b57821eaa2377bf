use crate::types::*;
use super::Board;

impl Board {
    /// Destination squares for the piece on `square`, ignoring king safety.
    ///
    /// Empty cells yield no moves. The result has no meaningful order.
    pub fn get_pseudo_legal_moves(&self, square: Square) -> Vec<Square> {
        let piece = match self.get_piece(square) {
            Some(piece) => piece,
            None => return Vec::new(),
        };

        match piece.kind {
            PieceKind::Pawn => self.get_pawn_moves(square, piece.color),
            PieceKind::Knight => self.get_step_moves(square, piece.color, &KNIGHT_OFFSETS),
            PieceKind::Bishop => self.get_sliding_moves(square, piece.color, &BISHOP_DIRECTIONS),
            PieceKind::Rook => self.get_sliding_moves(square, piece.color, &ROOK_DIRECTIONS),
            PieceKind::Queen => self.get_queen_moves(square, piece.color),
            PieceKind::King => self.get_step_moves(square, piece.color, &KING_OFFSETS),
        }
    }

    /// Generate pawn moves. No en passant and no promotion.
    pub fn get_pawn_moves(&self, square: Square, color: Color) -> Vec<Square> {
        let mut moves = Vec::new();
        let direction = color.pawn_direction();

        // Forward moves
        if let Some(forward) = square.offset(direction, 0) {
            if self.is_empty(forward) {
                moves.push(forward);

                // Double step from the home row, both cells empty
                if square.row == color.pawn_home_row() {
                    if let Some(double) = forward.offset(direction, 0) {
                        if self.is_empty(double) {
                            moves.push(double);
                        }
                    }
                }
            }
        }

        // Diagonal captures
        for dc in [-1, 1] {
            if let Some(target) = square.offset(direction, dc) {
                if let Some(victim) = self.get_piece(target) {
                    if victim.color != color {
                        moves.push(target);
                    }
                }
            }
        }

        moves
    }

    /// Single-step pieces (knight, king): empty or enemy-occupied targets.
    fn get_step_moves(&self, square: Square, color: Color, offsets: &[(i8, i8)]) -> Vec<Square> {
        offsets
            .iter()
            .filter_map(|&(dr, dc)| square.offset(dr, dc))
            .filter(|&target| match self.get_piece(target) {
                Some(occupant) => occupant.color != color,
                None => true,
            })
            .collect()
    }

    fn get_queen_moves(&self, square: Square, color: Color) -> Vec<Square> {
        let mut moves = self.get_sliding_moves(square, color, &ROOK_DIRECTIONS);
        moves.extend(self.get_sliding_moves(square, color, &BISHOP_DIRECTIONS));
        moves
    }

    /// Generate sliding piece moves in given directions
    fn get_sliding_moves(&self, square: Square, color: Color, directions: &[(i8, i8)]) -> Vec<Square> {
        let mut moves = Vec::new();

        for &(dr, dc) in directions {
            let mut current = square;
            while let Some(target) = current.offset(dr, dc) {
                match self.get_piece(target) {
                    None => moves.push(target),
                    Some(occupant) => {
                        if occupant.color != color {
                            moves.push(target); // Enemy piece, can capture
                        }
                        break;
                    }
                }
                current = target;
            }
        }

        moves
    }
}
