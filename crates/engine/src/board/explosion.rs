use crate::types::*;
use super::Board;

/// Pieces removed by one atomic capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explosion {
    pub center: Square,
    /// The capturing piece first, then every non-pawn neighbour that was destroyed.
    pub destroyed: Vec<(Square, Piece)>,
}

impl Explosion {
    pub fn destroyed_kings(&self) -> impl Iterator<Item = Color> + '_ {
        self.destroyed
            .iter()
            .filter(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(_, piece)| piece.color)
    }
}

/// What a single ply did to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveEffect {
    pub moved: Piece,
    pub captured: Option<Piece>,
    pub explosion: Option<Explosion>,
}

impl Board {
    /// Move a piece and resolve the atomic capture rule. No legality check.
    ///
    /// Returns `None`, leaving the board untouched, when `mv.from` is empty.
    pub fn apply_atomic_move(&mut self, mv: Move) -> Option<MoveEffect> {
        let moved = self.get_piece(mv.from)?;
        let captured = self.get_piece(mv.to);

        self.set_piece(mv.to, Some(moved));
        self.set_piece(mv.from, None);

        // Pawn takes pawn is the one capture that does not explode
        let explosion = match captured {
            Some(victim) if !(moved.is_pawn() && victim.is_pawn()) => Some(self.explode(mv.to)),
            _ => None,
        };

        Some(MoveEffect { moved, captured, explosion })
    }

    /// Clear `center` unconditionally and every non-pawn piece around it.
    pub fn explode(&mut self, center: Square) -> Explosion {
        let mut destroyed = Vec::new();

        if let Some(capturer) = self.take_piece(center) {
            destroyed.push((center, capturer));
        }

        for square in center.neighbours() {
            match self.get_piece(square) {
                Some(piece) if !piece.is_pawn() => {
                    self.set_piece(square, None);
                    destroyed.push((square, piece));
                }
                _ => {}
            }
        }

        Explosion { center, destroyed }
    }
}
