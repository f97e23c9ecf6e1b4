//! Win condition checking for freestyle Gomoku
//!
//! Five or more stones in a row wins (overlines count). A full board with no
//! five is a draw.

use crate::board::{Board, Pos, Stone};

/// Direction vectors for line checking (4 directions)
pub(crate) const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];

/// A move is legal when it lands on an empty cell of the board
#[inline]
pub fn is_valid_move(board: &Board, pos: Pos) -> bool {
    board.contains(pos.row as i32, pos.col as i32) && board.is_empty(pos)
}

/// Count same-colored stones from `pos` (exclusive) walking along `(dr, dc)`
#[inline]
fn run_length(board: &Board, pos: Pos, dr: i32, dc: i32, color: Stone) -> usize {
    let mut count = 0;
    let mut r = pos.row as i32 + dr;
    let mut c = pos.col as i32 + dc;
    while board.get_at(r, c) == Some(color) {
        count += 1;
        r += dr;
        c += dc;
    }
    count
}

/// Five-in-a-row check through a specific position.
///
/// Only checks the 4 lines through `pos`; `pos` itself counts as `color`
/// whether or not it is occupied, so this also answers "would playing here win".
#[inline]
pub fn has_five_at_pos(board: &Board, pos: Pos, color: Stone) -> bool {
    DIRECTIONS.iter().any(|&(dr, dc)| {
        1 + run_length(board, pos, dr, dc, color) + run_length(board, pos, -dr, -dc, color) >= 5
    })
}

/// The first five positions of a winning line through `pos`, ordered along the line
pub fn find_five_line_at_pos(board: &Board, pos: Pos, color: Stone) -> Option<[Pos; 5]> {
    for &(dr, dc) in &DIRECTIONS {
        let back = run_length(board, pos, -dr, -dc, color) as i32;
        let forward = run_length(board, pos, dr, dc, color) as i32;
        if back + forward + 1 < 5 {
            continue;
        }

        let start_r = pos.row as i32 - dr * back;
        let start_c = pos.col as i32 - dc * back;
        let mut line = [pos; 5];
        for (i, slot) in line.iter_mut().enumerate() {
            let i = i as i32;
            *slot = Pos::new((start_r + dr * i) as u8, (start_c + dc * i) as u8);
        }
        return Some(line);
    }
    None
}

/// Find the positions of any five-in-a-row for `stone`
pub fn find_five_positions(board: &Board, stone: Stone) -> Option<[Pos; 5]> {
    let stones = board.stones(stone)?;
    stones
        .iter_ones()
        .find_map(|pos| find_five_line_at_pos(board, pos, stone))
}

/// Check if there's 5+ in a row for the given color
pub fn has_five_in_row(board: &Board, stone: Stone) -> bool {
    find_five_positions(board, stone).is_some()
}

/// Check for a winner anywhere on the board
pub fn check_winner(board: &Board) -> Option<Stone> {
    [Stone::Black, Stone::White]
        .into_iter()
        .find(|&stone| has_five_in_row(board, stone))
}

/// Full board and nobody has five
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && check_winner(board).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardSize;

    fn board() -> Board {
        Board::new(BoardSize::try_from(10).unwrap())
    }

    #[test]
    fn test_five_in_row_horizontal() {
        let mut b = board();
        for i in 0..5 {
            b.place_stone(Pos::new(4, i), Stone::Black);
        }
        assert!(has_five_in_row(&b, Stone::Black));
        assert!(!has_five_in_row(&b, Stone::White));
        assert_eq!(check_winner(&b), Some(Stone::Black));
    }

    #[test]
    fn test_five_in_row_vertical_at_edge() {
        let mut b = board();
        for i in 5..10 {
            b.place_stone(Pos::new(i, 9), Stone::White);
        }
        assert_eq!(check_winner(&b), Some(Stone::White));
    }

    #[test]
    fn test_five_in_row_anti_diagonal() {
        let mut b = board();
        for i in 0..5u8 {
            b.place_stone(Pos::new(i, 9 - i), Stone::Black);
        }
        assert!(has_five_at_pos(&b, Pos::new(2, 7), Stone::Black));
    }

    #[test]
    fn test_four_is_not_win() {
        let mut b = board();
        for i in 0..4 {
            b.place_stone(Pos::new(4, i), Stone::Black);
        }
        assert!(!has_five_in_row(&b, Stone::Black));
        assert_eq!(check_winner(&b), None);
    }

    #[test]
    fn test_overline_wins() {
        let mut b = board();
        for i in 0..7 {
            b.place_stone(Pos::new(2, i), Stone::Black);
        }
        assert!(has_five_in_row(&b, Stone::Black));
    }

    #[test]
    fn test_has_five_at_empty_pos_predicts_win() {
        let mut b = board();
        for i in [0, 1, 3, 4] {
            b.place_stone(Pos::new(6, i), Stone::White);
        }
        assert!(has_five_at_pos(&b, Pos::new(6, 2), Stone::White));
        assert!(!has_five_at_pos(&b, Pos::new(6, 5), Stone::White));
    }

    #[test]
    fn test_find_five_line_ordered() {
        let mut b = board();
        for i in 2..7u8 {
            b.place_stone(Pos::new(i, i), Stone::Black);
        }
        let line = find_five_line_at_pos(&b, Pos::new(4, 4), Stone::Black).unwrap();
        let expected: Vec<Pos> = (2..7u8).map(|i| Pos::new(i, i)).collect();
        assert_eq!(line.to_vec(), expected);
    }

    #[test]
    fn test_valid_move() {
        let mut b = board();
        let pos = Pos::new(3, 3);
        assert!(is_valid_move(&b, pos));
        b.place_stone(pos, Stone::Black);
        assert!(!is_valid_move(&b, pos));
        // On the bitboard but outside a 10x10 board
        assert!(!is_valid_move(&b, Pos::new(12, 0)));
    }

    #[test]
    fn test_draw_on_full_board() {
        let mut b = Board::new(BoardSize::try_from(5).unwrap());
        // Rows alternate BBWWB / WWBBW patterns so no line of five forms
        let rows = ["BBWWB", "WWBBW", "BBWWB", "WWBBW", "BBWWB"];
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                let stone = if ch == 'B' { Stone::Black } else { Stone::White };
                b.place_stone(Pos::new(r as u8, c as u8), stone);
            }
        }
        assert!(b.is_full());
        assert_eq!(check_winner(&b), None);
        assert!(is_draw(&b));
    }
}
