//! Game rules for freestyle Gomoku
//!
//! - Black moves first, players alternate
//! - Five or more stones in a row wins
//! - A full board without a five is a draw

pub mod win;

pub use win::{
    check_winner, find_five_line_at_pos, find_five_positions, has_five_at_pos, has_five_in_row,
    is_draw, is_valid_move,
};
