//! Main AI Engine integrating all search components
//!
//! The engine follows a priority system to pick a move:
//!
//! 1. **Opening**: play the center of an empty board
//! 2. **Immediate win**: complete a five
//! 3. **Defense**: block the opponent's five, then the opponent's open-four threat
//! 4. **Alpha-Beta**: regular search with transposition table
//!
//! # Example
//!
//! ```
//! use gomoku::{AIEngine, Board, BoardSize, Pos, Stone};
//!
//! let mut engine = AIEngine::with_config(4, 3, 300);
//! let mut board = Board::new(BoardSize::try_from(10).unwrap());
//! board.place_stone(Pos::new(4, 4), Stone::Black);
//!
//! let result = engine.get_move_with_stats(&board, Stone::White);
//! println!("Best move: {:?}", result.best_move);
//! println!("Search type: {:?}", result.search_type);
//! ```

use std::time::{Duration, Instant};

use tracing::debug;

use crate::board::{Board, Pos, Stone};
use crate::eval::{point_score, PatternScore};
use crate::rules::{has_five_at_pos, is_valid_move};
use crate::search::{SearchResult, Searcher, TTStats};

/// Type of search that produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Center of an empty board
    Opening,
    /// Found a move that completes five
    ImmediateWin,
    /// Block the opponent's winning threat
    Defense,
    /// Regular alpha-beta search result
    AlphaBeta,
}

/// Result of a move search with statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Evaluation score of the position after the move
    pub score: i32,
    /// Type of search that found this move
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn direct(pos: Pos, score: i32, search_type: SearchType, start: Instant) -> Self {
        Self {
            best_move: Some(pos),
            score,
            search_type,
            time_ms: start.elapsed().as_millis() as u64,
            nodes: 1,
        }
    }

    #[inline]
    fn from_alphabeta(result: SearchResult, start: Instant) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            search_type: SearchType::AlphaBeta,
            time_ms: start.elapsed().as_millis() as u64,
            nodes: result.nodes,
        }
    }
}

/// Main AI Engine for Gomoku.
///
/// # Configuration
///
/// - Transposition table size (memory usage)
/// - Maximum search depth
/// - Time limit per move
pub struct AIEngine {
    searcher: Searcher,
    max_depth: i8,
    time_limit: Duration,
}

impl AIEngine {
    /// Create an engine with a 16 MB table, depth 4 and a 500ms time limit.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(16, 4, 500)
    }

    /// Create an AI engine with custom configuration.
    ///
    /// * `tt_size_mb` - Transposition table size in megabytes
    /// * `max_depth` - Maximum search depth for alpha-beta
    /// * `time_limit_ms` - Time limit in milliseconds
    #[must_use]
    pub fn with_config(tt_size_mb: usize, max_depth: i8, time_limit_ms: u64) -> Self {
        Self {
            searcher: Searcher::new(tt_size_mb),
            max_depth,
            time_limit: Duration::from_millis(time_limit_ms),
        }
    }

    /// Get the best move for the given position, or `None` on a full board.
    #[must_use]
    pub fn get_move(&mut self, board: &Board, color: Stone) -> Option<Pos> {
        self.get_move_with_stats(board, color).best_move
    }

    /// Get the best move with search statistics.
    #[must_use]
    pub fn get_move_with_stats(&mut self, board: &Board, color: Stone) -> MoveResult {
        let start = Instant::now();
        let result = self.choose_move(board, color, start);

        debug!(
            color = color.name(),
            best_move = ?result.best_move,
            search_type = ?result.search_type,
            score = result.score,
            nodes = result.nodes,
            time_ms = result.time_ms,
            "AI search finished"
        );

        result
    }

    fn choose_move(&mut self, board: &Board, color: Stone, start: Instant) -> MoveResult {
        // 1. Opening
        if board.is_board_empty() {
            return MoveResult::direct(board.center(), 0, SearchType::Opening, start);
        }

        // 2. Immediate win
        if let Some(win_move) = find_completing_move(board, color) {
            return MoveResult::direct(win_move, PatternScore::FIVE, SearchType::ImmediateWin, start);
        }

        // 3a. Opponent's immediate win must be blocked
        let opponent = color.opponent();
        if let Some(block) = find_completing_move(board, opponent) {
            return MoveResult::direct(block, -PatternScore::FIVE / 2, SearchType::Defense, start);
        }

        // 3b. Opponent's open-four threat, unless we can force with a four of our own
        if let Some(block) = find_open_four_block(board, color) {
            return MoveResult::direct(block, -PatternScore::OPEN_FOUR, SearchType::Defense, start);
        }

        // 4. Alpha-beta
        let result = self.searcher.search(board, color, self.max_depth, self.time_limit);
        MoveResult::from_alphabeta(result, start)
    }

    pub fn set_max_depth(&mut self, depth: i8) {
        self.max_depth = depth;
    }

    pub fn set_time_limit(&mut self, time_ms: u64) {
        self.time_limit = Duration::from_millis(time_ms);
    }

    /// Clear the transposition table. Call this when starting a new game.
    pub fn clear_cache(&mut self) {
        self.searcher.clear_tt();
    }

    #[must_use]
    pub fn max_depth(&self) -> i8 {
        self.max_depth
    }

    #[must_use]
    pub fn tt_stats(&self) -> TTStats {
        self.searcher.tt_stats()
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// First empty cell (row-major) where `color` would complete five
fn find_completing_move(board: &Board, color: Stone) -> Option<Pos> {
    board
        .positions()
        .find(|&p| is_valid_move(board, p) && has_five_at_pos(board, p, color))
}

/// Block where the opponent would make an open four, choosing the cell that
/// also helps us most. Skipped when we can make a four ourselves.
fn find_open_four_block(board: &Board, color: Stone) -> Option<Pos> {
    let opponent = color.opponent();
    let empties = || board.positions().filter(|&p| board.is_empty(p));

    if empties().any(|p| point_score(board, p, color) >= PatternScore::CLOSED_FOUR) {
        return None;
    }

    empties()
        .filter_map(|p| {
            let threat = point_score(board, p, opponent);
            (threat >= PatternScore::OPEN_FOUR).then(|| (p, threat + point_score(board, p, color)))
        })
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
        .map(|(p, _)| p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardSize;

    fn board() -> Board {
        Board::new(BoardSize::try_from(10).unwrap())
    }

    #[test]
    fn test_engine_with_config() {
        let engine = AIEngine::with_config(1, 6, 100);
        assert_eq!(engine.max_depth(), 6);
        assert_eq!(AIEngine::default().max_depth(), 4);
    }

    #[test]
    fn test_engine_empty_board_plays_center() {
        let mut engine = AIEngine::with_config(1, 3, 200);
        let result = engine.get_move_with_stats(&board(), Stone::Black);
        assert_eq!(result.best_move, Some(Pos::new(4, 4)));
        assert_eq!(result.search_type, SearchType::Opening);
    }

    #[test]
    fn test_engine_finds_immediate_win() {
        let mut b = board();
        for i in 0..4 {
            b.place_stone(Pos::new(4, i), Stone::Black);
        }
        b.place_stone(Pos::new(0, 0), Stone::White);

        let mut engine = AIEngine::with_config(1, 3, 200);
        let result = engine.get_move_with_stats(&b, Stone::Black);
        assert_eq!(result.best_move, Some(Pos::new(4, 4)));
        assert_eq!(result.search_type, SearchType::ImmediateWin);
    }

    #[test]
    fn test_engine_prefers_win_over_block() {
        let mut b = board();
        for i in 0..4 {
            b.place_stone(Pos::new(2, i), Stone::Black);
            b.place_stone(Pos::new(7, i), Stone::White);
        }

        let mut engine = AIEngine::with_config(1, 3, 200);
        let result = engine.get_move_with_stats(&b, Stone::White);
        assert_eq!(result.best_move, Some(Pos::new(7, 4)));
        assert_eq!(result.search_type, SearchType::ImmediateWin);
    }

    #[test]
    fn test_engine_blocks_opponent_win() {
        let mut b = board();
        for i in 0..4 {
            b.place_stone(Pos::new(4, i), Stone::White);
        }
        b.place_stone(Pos::new(8, 8), Stone::Black);

        let mut engine = AIEngine::with_config(1, 3, 200);
        let result = engine.get_move_with_stats(&b, Stone::Black);
        assert_eq!(result.best_move, Some(Pos::new(4, 4)));
        assert_eq!(result.search_type, SearchType::Defense);
    }

    #[test]
    fn test_engine_blocks_open_three() {
        let mut b = board();
        for i in 3..6 {
            b.place_stone(Pos::new(4, i), Stone::White);
        }
        b.place_stone(Pos::new(0, 0), Stone::Black);

        let mut engine = AIEngine::with_config(1, 3, 200);
        let result = engine.get_move_with_stats(&b, Stone::Black);
        let mv = result.best_move.unwrap();
        assert!(mv == Pos::new(4, 2) || mv == Pos::new(4, 6), "got {:?}", mv);
        assert_eq!(result.search_type, SearchType::Defense);
    }

    #[test]
    fn test_engine_alpha_beta_legal_move() {
        let mut b = board();
        b.place_stone(Pos::new(4, 4), Stone::Black);
        b.place_stone(Pos::new(5, 5), Stone::White);

        let mut engine = AIEngine::with_config(1, 3, 300);
        let result = engine.get_move_with_stats(&b, Stone::Black);
        assert_eq!(result.search_type, SearchType::AlphaBeta);
        assert!(b.is_empty(result.best_move.unwrap()));
    }

    #[test]
    fn test_engine_full_board_no_move() {
        let mut b = Board::new(BoardSize::try_from(5).unwrap());
        let rows = ["BBWWB", "WWBBW", "BBWWB", "WWBBW", "BBWWB"];
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                let stone = if ch == 'B' { Stone::Black } else { Stone::White };
                b.place_stone(Pos::new(r as u8, c as u8), stone);
            }
        }
        let mut engine = AIEngine::with_config(1, 2, 100);
        assert_eq!(engine.get_move(&b, Stone::White), None);
    }

    #[test]
    fn test_engine_clear_cache() {
        let mut b = board();
        b.place_stone(Pos::new(4, 4), Stone::Black);
        let mut engine = AIEngine::with_config(1, 2, 200);
        let _ = engine.get_move(&b, Stone::White);
        assert!(engine.tt_stats().used > 0);
        engine.clear_cache();
        assert_eq!(engine.tt_stats().used, 0);
    }
}
