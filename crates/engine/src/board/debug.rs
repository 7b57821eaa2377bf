use std::fmt;

use crate::types::*;
use super::Board;

impl Board {
    /// Text diagram of the board, eighth rank first.
    pub fn diagram(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(10);
        for row in 0..8u8 {
            let mut line = format!("{} ", 8 - row);
            for col in 0..8u8 {
                let cell = match self.get_piece(Square::new(row, col)) {
                    Some(piece) => piece.fen_char(),
                    None => '.',
                };
                line.push(' ');
                line.push(cell);
            }
            lines.push(line);
        }
        lines.push("   a b c d e f g h".to_string());
        lines
    }

    /// Piece counts per side, shown in the advanced game log.
    pub fn debug_material(&self) -> Vec<String> {
        let mut debug_info = Vec::new();
        for color in [Color::White, Color::Black] {
            let counts: Vec<String> = PieceKind::ALL
                .iter()
                .map(|&kind| format!("{}{}", kind.fen_char(), self.count(color, kind)))
                .collect();
            debug_info.push(format!("{}: {}", color.name(), counts.join(" ")));
        }
        debug_info
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.diagram() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
