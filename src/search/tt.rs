//! Transposition Table for caching search results
//!
//! # Example
//!
//! ```
//! use gomoku::board::Pos;
//! use gomoku::search::{EntryType, TranspositionTable};
//!
//! let mut tt = TranspositionTable::new(1); // 1 MB
//!
//! let hash = 0x1234_5678_9ABC_DEF0;
//! tt.store(hash, 5, 100, EntryType::Exact, Some(Pos::new(4, 4)), 0);
//!
//! assert_eq!(tt.probe(hash, 5, -1000, 1000, 0), Some(100));
//! assert_eq!(tt.get_best_move(hash), Some(Pos::new(4, 4)));
//! ```

use crate::board::Pos;
use crate::eval::PatternScore;

/// Scores beyond this are wins counted in plies, not evaluations
const WIN_THRESHOLD: i32 = PatternScore::FIVE - 128;

/// Win scores are stored as distance from the stored node, not the root
#[inline]
fn score_to_tt(score: i32, ply: i32) -> i32 {
    if score > WIN_THRESHOLD {
        score + ply
    } else if score < -WIN_THRESHOLD {
        score - ply
    } else {
        score
    }
}

#[inline]
fn score_from_tt(score: i32, ply: i32) -> i32 {
    if score > WIN_THRESHOLD {
        score - ply
    } else if score < -WIN_THRESHOLD {
        score + ply
    } else {
        score
    }
}

/// Entry type for score interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Exact score - the search completed normally
    Exact,
    /// Lower bound - score >= stored value (beta cutoff)
    LowerBound,
    /// Upper bound - score <= stored value (alpha fail-low)
    UpperBound,
}

/// Transposition table entry
#[derive(Debug, Clone, Copy)]
pub struct TTEntry {
    pub hash: u64,
    pub depth: i8,
    pub score: i32,
    pub entry_type: EntryType,
    pub best_move: Option<Pos>,
}

/// Direct-mapped transposition table: each hash maps to exactly one slot,
/// with depth-preferred replacement.
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    size: usize,
}

impl TranspositionTable {
    /// Create a table of roughly `size_mb` megabytes (at least 1024 slots).
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<Option<TTEntry>>();
        let size = ((size_mb * 1024 * 1024) / entry_size).max(1024);

        Self {
            entries: vec![None; size],
            size,
        }
    }

    #[inline]
    fn slot(&self, hash: u64) -> usize {
        (hash % self.size as u64) as usize
    }

    /// Usable score for this position, if a deep enough entry exists whose
    /// bound applies to the `(alpha, beta)` window. `ply` is the distance
    /// of the probing node from the search root.
    #[must_use]
    pub fn probe(&self, hash: u64, depth: i8, alpha: i32, beta: i32, ply: i32) -> Option<i32> {
        let entry = self.entries[self.slot(hash)]?;
        if entry.hash != hash || entry.depth < depth {
            return None;
        }

        let score = score_from_tt(entry.score, ply);
        match entry.entry_type {
            EntryType::Exact => Some(score),
            EntryType::LowerBound if score >= beta => Some(score),
            EntryType::UpperBound if score <= alpha => Some(score),
            _ => None,
        }
    }

    /// Best move from a previous search of this position, for move ordering
    #[must_use]
    pub fn get_best_move(&self, hash: u64) -> Option<Pos> {
        self.entries[self.slot(hash)]
            .filter(|e| e.hash == hash)
            .and_then(|e| e.best_move)
    }

    /// Store a result. Replaces when the slot is empty, holds the same
    /// position, or the new search is at least as deep.
    pub fn store(
        &mut self,
        hash: u64,
        depth: i8,
        score: i32,
        entry_type: EntryType,
        best_move: Option<Pos>,
        ply: i32,
    ) {
        let idx = self.slot(hash);

        let should_replace = match &self.entries[idx] {
            None => true,
            Some(e) => e.hash == hash || e.depth <= depth,
        };

        if should_replace {
            self.entries[idx] = Some(TTEntry {
                hash,
                depth,
                score: score_to_tt(score, ply),
                entry_type,
                best_move,
            });
        }
    }

    pub fn clear(&mut self) {
        self.entries.fill(None);
    }

    #[must_use]
    pub fn stats(&self) -> TTStats {
        let used = self.entries.iter().filter(|e| e.is_some()).count();
        TTStats {
            size: self.size,
            used,
            usage_percent: (used as f64 / self.size as f64 * 100.0) as u8,
        }
    }
}

/// Statistics about transposition table usage.
#[derive(Debug, Clone, Copy)]
pub struct TTStats {
    /// Total number of slots in the table
    pub size: usize,
    /// Number of slots currently occupied
    pub used: usize,
    /// Percentage of table in use (0-100)
    pub usage_percent: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_respect_window() {
        let mut tt = TranspositionTable::new(1);
        tt.store(42, 4, 300, EntryType::LowerBound, None, 0);
        assert_eq!(tt.probe(42, 4, -1000, 200, 0), Some(300));
        assert_eq!(tt.probe(42, 4, -1000, 500, 0), None);

        tt.store(43, 4, -300, EntryType::UpperBound, None, 0);
        assert_eq!(tt.probe(43, 4, -200, 1000, 0), Some(-300));
        assert_eq!(tt.probe(43, 4, -500, 1000, 0), None);
    }

    #[test]
    fn test_shallow_entry_not_used_for_score() {
        let mut tt = TranspositionTable::new(1);
        let mv = Some(Pos::new(2, 2));
        tt.store(7, 2, 10, EntryType::Exact, mv, 0);
        assert_eq!(tt.probe(7, 3, -100, 100, 0), None);
        // Move is still available for ordering
        assert_eq!(tt.get_best_move(7), mv);
    }

    #[test]
    fn test_hash_mismatch_misses() {
        let mut tt = TranspositionTable::new(1);
        let size = tt.stats().size as u64;
        tt.store(5, 3, 10, EntryType::Exact, Some(Pos::new(1, 1)), 0);
        // Same slot, different position
        assert_eq!(tt.probe(5 + size, 1, -100, 100, 0), None);
        assert_eq!(tt.get_best_move(5 + size), None);
    }

    #[test]
    fn test_win_scores_follow_ply() {
        let mut tt = TranspositionTable::new(1);
        // Win two plies below a node stored at ply 3
        let win = PatternScore::FIVE - 5;
        tt.store(9, 4, win, EntryType::Exact, None, 3);
        assert_eq!(tt.probe(9, 4, -100, 100, 3), Some(win));
        assert_eq!(tt.probe(9, 4, -100, 100, 1), Some(PatternScore::FIVE - 3));

        tt.store(11, 4, -win, EntryType::Exact, None, 3);
        assert_eq!(tt.probe(11, 4, -100, 100, 5), Some(-(PatternScore::FIVE - 7)));

        // Ordinary evaluations are stored as-is
        tt.store(13, 4, 500, EntryType::Exact, None, 3);
        assert_eq!(tt.probe(13, 4, -1000, 1000, 1), Some(500));
    }

    #[test]
    fn test_clear_and_stats() {
        let mut tt = TranspositionTable::new(1);
        tt.store(1, 1, 0, EntryType::Exact, None, 0);
        assert_eq!(tt.stats().used, 1);
        tt.clear();
        assert_eq!(tt.stats().used, 0);
    }
}
