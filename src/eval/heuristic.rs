//! Heuristic evaluation function for Gomoku board positions
//!
//! This module provides the evaluation function for the minimax search.
//! It evaluates board positions based on:
//! - Pattern scoring (fives, fours, threes, twos)
//! - Positional bonuses (center control)

use crate::board::{Board, Pos, Stone};
use crate::rules::win::DIRECTIONS;

use super::patterns::{line_score, PatternScore};

/// Weight per distance unit from center
const POSITION_WEIGHT: i32 = 3;

/// Evaluate the board from the perspective of the given color.
///
/// Returns a score where:
/// - Positive values indicate advantage for `color`
/// - Negative values indicate disadvantage for `color`
///
/// The evaluation is symmetric: `evaluate(b, Black) == -evaluate(b, White)`,
/// which negamax relies on.
#[must_use]
pub fn evaluate(board: &Board, color: Stone) -> i32 {
    let opponent = color.opponent();

    let pattern_score = evaluate_patterns(board, color) - evaluate_patterns(board, opponent);
    let position_score = evaluate_positions(board, color) - evaluate_positions(board, opponent);

    pattern_score + position_score
}

/// Value of playing `color` at the empty cell `pos`, summed over the four lines
/// through it. Used for move ordering and threat detection.
#[must_use]
pub fn point_score(board: &Board, pos: Pos, color: Stone) -> i32 {
    DIRECTIONS
        .iter()
        .map(|&(dr, dc)| {
            let (forward, forward_open) = scan_run(board, pos, dr, dc, color);
            let (back, back_open) = scan_run(board, pos, -dr, -dc, color);
            line_score(1 + forward + back, u8::from(forward_open) + u8::from(back_open))
        })
        .sum()
}

/// Length of the `color` run starting next to `pos`, and whether the cell past it is free
fn scan_run(board: &Board, pos: Pos, dr: i32, dc: i32, color: Stone) -> (usize, bool) {
    let mut count = 0;
    let mut r = pos.row as i32 + dr;
    let mut c = pos.col as i32 + dc;
    loop {
        match board.get_at(r, c) {
            Some(s) if s == color => count += 1,
            Some(Stone::Empty) => return (count, true),
            _ => return (count, false),
        }
        r += dr;
        c += dc;
    }
}

/// Evaluate pattern-based score for a color.
///
/// Each line segment is counted once, from its "start" stone (no same-color
/// stone in the negative direction). Multiple strong threats get a bonus since
/// the opponent can only block one of them.
fn evaluate_patterns(board: &Board, color: Stone) -> i32 {
    let Some(stones) = board.stones(color) else {
        return 0;
    };

    let mut score = 0;
    let mut open_fours = 0i32;
    let mut closed_fours = 0i32;
    let mut open_threes = 0i32;

    for pos in stones.iter_ones() {
        for &(dr, dc) in &DIRECTIONS {
            let pattern_score = evaluate_line(board, pos, dr, dc, color);
            score += pattern_score;

            if pattern_score >= PatternScore::FIVE {
                continue;
            } else if pattern_score >= PatternScore::OPEN_FOUR {
                open_fours += 1;
            } else if pattern_score >= PatternScore::CLOSED_FOUR {
                closed_fours += 1;
            } else if pattern_score >= PatternScore::OPEN_THREE {
                open_threes += 1;
            }
        }
    }

    if open_fours >= 1 && (closed_fours >= 1 || open_threes >= 1) {
        score += PatternScore::OPEN_FOUR;
    }
    if closed_fours >= 2 {
        score += PatternScore::OPEN_FOUR;
    }
    if closed_fours >= 1 && open_threes >= 1 {
        score += PatternScore::OPEN_FOUR;
    }
    if open_threes >= 2 {
        score += PatternScore::OPEN_FOUR;
    }

    score
}

/// Evaluate a single line pattern from a position in a given direction.
///
/// Counts consecutive stones and open ends, allowing a single gap so that
/// `O_OOO`, `OO_OO` and `_O_OO_` are recognised.
fn evaluate_line(board: &Board, pos: Pos, dr: i32, dc: i32, color: Stone) -> i32 {
    let prev_r = pos.row as i32 - dr;
    let prev_c = pos.col as i32 - dc;
    let mut open_ends = 0u8;
    match board.get_at(prev_r, prev_c) {
        Some(s) if s == color => return 0, // Not the start of this segment
        Some(Stone::Empty) => open_ends += 1,
        _ => {}
    }

    let mut count = 1;
    let mut has_gap = false;
    let mut total_span = 1;

    let mut r = pos.row as i32 + dr;
    let mut c = pos.col as i32 + dc;
    while let Some(stone) = board.get_at(r, c) {
        match stone {
            s if s == color => {
                count += 1;
                total_span += 1;
            }
            Stone::Empty if !has_gap && board.get_at(r + dr, c + dc) == Some(color) => {
                has_gap = true;
                total_span += 1;
            }
            Stone::Empty => {
                open_ends += 1;
                break;
            }
            _ => break, // Opponent stone blocks
        }
        r += dr;
        c += dc;
    }

    // A gap pattern is never a five; filling the gap is still one move away.
    if has_gap {
        match count {
            5.. => PatternScore::OPEN_FOUR,
            4 if total_span == 5 => PatternScore::OPEN_FOUR,
            4 => PatternScore::CLOSED_FOUR,
            3 if open_ends == 2 => PatternScore::OPEN_THREE,
            3 if open_ends == 1 => PatternScore::CLOSED_THREE,
            _ => 0,
        }
    } else {
        line_score(count, open_ends)
    }
}

/// Positional bonus: stones nearer the center can join more lines.
///
/// Distances are measured in doubled coordinates so even-sized boards, whose
/// center falls between cells, stay in integer arithmetic.
fn evaluate_positions(board: &Board, color: Stone) -> i32 {
    let Some(stones) = board.stones(color) else {
        return 0;
    };

    let span = board.size() as i32 - 1;
    let max_dist = 2 * span;

    stones
        .iter_ones()
        .map(|pos| {
            let dist = (2 * pos.row as i32 - span).abs() + (2 * pos.col as i32 - span).abs();
            (max_dist - dist) * POSITION_WEIGHT
        })
        .sum()
}
