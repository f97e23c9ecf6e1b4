//! Human-readable coordinates: column letter plus row number counted from the bottom
//!
//! On a 10x10 board the top-left cell is `A10` and the bottom-right cell is `J1`.

use super::{BoardSize, Pos};
use crate::error::MoveError;

/// Render a position as `E5`-style notation
pub fn format_pos(pos: Pos, size: BoardSize) -> String {
    let col = (b'A' + pos.col) as char;
    let row = size.get() - pos.row as usize;
    format!("{}{}", col, row)
}

/// Parse `E5`-style notation (case-insensitive, surrounding whitespace ignored)
pub fn parse_pos(text: &str, size: BoardSize) -> Result<Pos, MoveError> {
    let trimmed = text.trim();
    let invalid = || MoveError::InvalidCoordinate(trimmed.to_string());

    let mut chars = trimmed.chars();
    let letter = chars.next().filter(char::is_ascii_alphabetic).ok_or_else(invalid)?;
    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let number: u32 = digits.parse().map_err(|_| invalid())?;

    let sz = size.get() as i32;
    let col = i32::from(letter.to_ascii_uppercase() as u8 - b'A');
    let row = i32::try_from(number)
        .ok()
        .and_then(|n| sz.checked_sub(n))
        .ok_or_else(invalid)?;

    if !(0..sz).contains(&row) || !(0..sz).contains(&col) {
        return Err(MoveError::OutOfBounds { row, col });
    }

    Ok(Pos::new(row as u8, col as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten() -> BoardSize {
        BoardSize::try_from(10).unwrap()
    }

    #[test]
    fn test_format_corners() {
        assert_eq!(format_pos(Pos::new(0, 0), ten()), "A10");
        assert_eq!(format_pos(Pos::new(9, 9), ten()), "J1");
        assert_eq!(format_pos(Pos::new(5, 4), ten()), "E5");
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(parse_pos("e5", ten()), Ok(Pos::new(5, 4)));
        assert_eq!(parse_pos(" A10 ", ten()), Ok(Pos::new(0, 0)));
        assert_eq!(parse_pos("j1", ten()), Ok(Pos::new(9, 9)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_pos("", ten()), Err(MoveError::InvalidCoordinate(_))));
        assert!(matches!(parse_pos("55", ten()), Err(MoveError::InvalidCoordinate(_))));
        assert!(matches!(parse_pos("E", ten()), Err(MoveError::InvalidCoordinate(_))));
        assert!(matches!(parse_pos("Ex", ten()), Err(MoveError::InvalidCoordinate(_))));
    }

    #[test]
    fn test_parse_rejects_off_board() {
        assert!(matches!(parse_pos("K1", ten()), Err(MoveError::OutOfBounds { .. })));
        assert!(matches!(parse_pos("A11", ten()), Err(MoveError::OutOfBounds { .. })));
        assert!(matches!(parse_pos("A0", ten()), Err(MoveError::OutOfBounds { .. })));
    }

    #[test]
    fn test_parse_rejects_signs_and_huge_numbers() {
        for text in ["E-2147483648", "E99999999999", "E+5", "E-1", "E 5"] {
            assert!(
                matches!(parse_pos(text, ten()), Err(MoveError::InvalidCoordinate(_))),
                "{} should be rejected",
                text
            );
        }
        assert_eq!(
            parse_pos("E4294967295", ten()),
            Err(MoveError::InvalidCoordinate("E4294967295".to_string()))
        );
        assert_eq!(
            parse_pos("E2147483647", ten()),
            Err(MoveError::OutOfBounds { row: 10 - i32::MAX, col: 4 })
        );
    }
}
