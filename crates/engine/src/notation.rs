use crate::error::MoveParseError;
use crate::types::{Move, Square};

/// Parse a move record such as `"e2e4"`.
///
/// Only the first four characters are read, so `"e7e8q"` parses as `e7e8`.
pub fn parse_move(text: &str) -> Result<Move, MoveParseError> {
    let head: String = text.chars().take(4).collect();
    if head.chars().count() < 4 {
        return Err(MoveParseError::TooShort(text.to_string()));
    }

    let (from_text, to_text) = head.split_at(head.char_indices().nth(2).map_or(2, |(i, _)| i));
    let from = Square::from_algebraic(from_text)
        .ok_or_else(|| MoveParseError::InvalidSquare(from_text.to_string()))?;
    let to = Square::from_algebraic(to_text)
        .ok_or_else(|| MoveParseError::InvalidSquare(to_text.to_string()))?;

    Ok(Move::new(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_square_pair() {
        let mv = parse_move("e2e4").unwrap();
        assert_eq!(mv.from, Square::new(6, 4));
        assert_eq!(mv.to, Square::new(4, 4));
        assert_eq!(mv.to_string(), "e2e4");
    }

    #[test]
    fn extra_characters_are_ignored() {
        assert_eq!(parse_move("e7e8q").unwrap().to_string(), "e7e8");
    }

    #[test]
    fn short_input_is_rejected() {
        assert_eq!(parse_move("e2e"), Err(MoveParseError::TooShort("e2e".to_string())));
        assert!(matches!(parse_move(""), Err(MoveParseError::TooShort(_))));
    }

    #[test]
    fn off_board_squares_are_rejected() {
        assert_eq!(parse_move("z9e4"), Err(MoveParseError::InvalidSquare("z9".to_string())));
        assert_eq!(parse_move("e2e0"), Err(MoveParseError::InvalidSquare("e0".to_string())));
        assert!(matches!(parse_move("é2e4"), Err(MoveParseError::InvalidSquare(_))));
    }
}
