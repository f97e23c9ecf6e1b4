//! Alpha-Beta search with iterative deepening and transposition table
//!
//! Negamax with alpha-beta pruning. Candidate moves are the empty cells within
//! two steps of an existing stone, ordered by how much they build our lines
//! plus how much they break the opponent's.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use gomoku::board::{Board, BoardSize, Pos, Stone};
//! use gomoku::search::Searcher;
//!
//! let mut searcher = Searcher::new(4);
//! let mut board = Board::new(BoardSize::try_from(10).unwrap());
//! board.place_stone(Pos::new(4, 4), Stone::Black);
//!
//! let result = searcher.search(&board, Stone::White, 3, Duration::from_millis(300));
//! assert!(result.best_move.is_some());
//! ```

use std::time::{Duration, Instant};

use crate::board::{Board, Pos, Stone, TOTAL_CELLS};
use crate::eval::{evaluate, point_score, PatternScore};
use crate::rules::has_five_at_pos;

use super::{EntryType, TTStats, TranspositionTable, ZobristTable};

/// Infinity score for alpha-beta bounds
const INF: i32 = PatternScore::FIVE * 2;

/// Score for a completed five, reduced by the ply it happens at
const WIN_SCORE: i32 = PatternScore::FIVE;

/// Maximum moves to consider at root
const MAX_ROOT_MOVES: usize = 24;

/// Maximum moves to consider at internal nodes
const MAX_INTERNAL_MOVES: usize = 12;

/// Candidates must lie within this Chebyshev distance of a stone
const CANDIDATE_RADIUS: i32 = 2;

/// Time is polled every this many nodes
const TIME_CHECK_INTERVAL: u64 = 1024;

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Evaluation score of the best move
    pub score: i32,
    /// Depth completed in iterative deepening
    pub depth: i8,
    /// Total nodes searched
    pub nodes: u64,
}

/// Alpha-beta searcher owning its transposition table
pub struct Searcher {
    zobrist: ZobristTable,
    tt: TranspositionTable,
    nodes: u64,
    start_time: Instant,
    time_limit: Duration,
    /// Depth 1 always completes so there is always a move to return
    can_stop: bool,
    stopped: bool,
}

impl Searcher {
    /// Create a searcher with a transposition table of `tt_size_mb` megabytes
    #[must_use]
    pub fn new(tt_size_mb: usize) -> Self {
        Self {
            zobrist: ZobristTable::new(),
            tt: TranspositionTable::new(tt_size_mb),
            nodes: 0,
            start_time: Instant::now(),
            time_limit: Duration::from_millis(500),
            can_stop: false,
            stopped: false,
        }
    }

    /// Iterative deepening search up to `max_depth` plies or until `time_limit`
    /// runs out. Results of an interrupted iteration are discarded.
    pub fn search(
        &mut self,
        board: &Board,
        color: Stone,
        max_depth: i8,
        time_limit: Duration,
    ) -> SearchResult {
        self.nodes = 0;
        self.start_time = Instant::now();
        self.time_limit = time_limit;
        self.stopped = false;

        let mut work_board = board.clone();
        let mut best_result = SearchResult {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
        };

        for depth in 1..=max_depth.max(1) {
            self.can_stop = depth > 1;
            let result = self.search_root(&mut work_board, color, depth);
            if self.stopped {
                break;
            }

            best_result = result;

            // A forced result does not change with more depth
            if best_result.score.abs() >= WIN_SCORE - 100 {
                break;
            }
        }

        best_result.nodes = self.nodes;
        best_result
    }

    /// Root-level search with full alpha-beta window.
    fn search_root(&mut self, board: &mut Board, color: Stone, depth: i8) -> SearchResult {
        let hash = self.zobrist.hash(board, color);
        let tt_move = self.tt.get_best_move(hash);
        let mut moves = generate_moves(board, color, tt_move);
        moves.truncate(MAX_ROOT_MOVES);

        let mut alpha = -INF;
        let beta = INF;
        let mut best_move = None;
        let mut best_score = -INF;

        for mov in moves {
            board.place_stone(mov, color);
            let score = if has_five_at_pos(board, mov, color) {
                WIN_SCORE - 1
            } else {
                let child_hash = self.zobrist.update_place(hash, mov, color);
                -self.alpha_beta(board, color.opponent(), depth - 1, -beta, -alpha, child_hash, 1)
            };
            board.remove_stone(mov);

            if self.stopped {
                break;
            }

            if score > best_score {
                best_score = score;
                best_move = Some(mov);
            }
            alpha = alpha.max(score);
        }

        if best_move.is_none() {
            best_score = 0;
        } else if !self.stopped {
            self.tt.store(hash, depth, best_score, EntryType::Exact, best_move, 0);
        }

        SearchResult {
            best_move,
            score: best_score,
            depth,
            nodes: self.nodes,
        }
    }

    /// Negamax alpha-beta. Scores are from the perspective of `color`.
    #[allow(clippy::too_many_arguments)]
    fn alpha_beta(
        &mut self,
        board: &mut Board,
        color: Stone,
        depth: i8,
        mut alpha: i32,
        beta: i32,
        hash: u64,
        ply: i32,
    ) -> i32 {
        self.nodes += 1;
        if self.nodes % TIME_CHECK_INTERVAL == 0 {
            self.check_time();
        }
        if self.stopped {
            return 0;
        }

        if board.is_full() {
            return 0;
        }
        if depth <= 0 {
            return evaluate(board, color);
        }

        if let Some(score) = self.tt.probe(hash, depth, alpha, beta, ply) {
            return score;
        }

        let original_alpha = alpha;
        let tt_move = self.tt.get_best_move(hash);
        let mut moves = generate_moves(board, color, tt_move);
        moves.truncate(MAX_INTERNAL_MOVES);

        let mut best_score = -INF;
        let mut best_move = None;

        for mov in moves {
            board.place_stone(mov, color);
            let score = if has_five_at_pos(board, mov, color) {
                WIN_SCORE - (ply + 1)
            } else {
                let child_hash = self.zobrist.update_place(hash, mov, color);
                -self.alpha_beta(board, color.opponent(), depth - 1, -beta, -alpha, child_hash, ply + 1)
            };
            board.remove_stone(mov);

            if self.stopped {
                return 0;
            }

            if score > best_score {
                best_score = score;
                best_move = Some(mov);
            }
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        let entry_type = if best_score <= original_alpha {
            EntryType::UpperBound
        } else if best_score >= beta {
            EntryType::LowerBound
        } else {
            EntryType::Exact
        };
        self.tt.store(hash, depth, best_score, entry_type, best_move, ply);

        best_score
    }

    fn check_time(&mut self) {
        if self.can_stop && self.start_time.elapsed() >= self.time_limit {
            self.stopped = true;
        }
    }

    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }

    #[must_use]
    pub fn tt_stats(&self) -> TTStats {
        self.tt.stats()
    }
}

/// Candidate moves for `color`, best first.
///
/// Winning moves come first, then the TT move, then the rest ordered by
/// attack plus defense value. An empty board yields only the center.
pub fn generate_moves(board: &Board, color: Stone, tt_move: Option<Pos>) -> Vec<Pos> {
    if board.is_board_empty() {
        return vec![board.center()];
    }

    let mut near = [false; TOTAL_CELLS];
    for pos in board.black.iter_ones().chain(board.white.iter_ones()) {
        for dr in -CANDIDATE_RADIUS..=CANDIDATE_RADIUS {
            for dc in -CANDIDATE_RADIUS..=CANDIDATE_RADIUS {
                if let Some(p) = board.pos_at(pos.row as i32 + dr, pos.col as i32 + dc) {
                    near[p.to_index()] = true;
                }
            }
        }
    }

    let opponent = color.opponent();
    let mut scored: Vec<(Pos, i32)> = board
        .positions()
        .filter(|&p| near[p.to_index()] && board.is_empty(p))
        .map(|p| {
            let attack = point_score(board, p, color);
            let score = if attack >= PatternScore::FIVE {
                i32::MAX
            } else if Some(p) == tt_move {
                i32::MAX - 1
            } else {
                attack + point_score(board, p, opponent)
            };
            (p, score)
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    scored.into_iter().map(|(p, _)| p).collect()
}
