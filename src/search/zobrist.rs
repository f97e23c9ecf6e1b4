//! Zobrist hashing for position identification
//!
//! Zobrist hashing allows O(1) incremental hash updates when placing/removing stones.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, BoardSize, Pos, Stone};
//! use gomoku::search::ZobristTable;
//!
//! let zt = ZobristTable::new();
//! let mut board = Board::new(BoardSize::try_from(10).unwrap());
//!
//! let hash1 = zt.hash(&board, Stone::Black);
//!
//! let pos = Pos::new(4, 4);
//! board.place_stone(pos, Stone::Black);
//! let hash2 = zt.hash(&board, Stone::White);
//!
//! // Incremental update is equivalent to full recomputation
//! assert_eq!(zt.update_place(hash1, pos, Stone::Black), hash2);
//! ```

use crate::board::{Board, Pos, Stone, TOTAL_CELLS};

/// Zobrist hash table for position hashing.
///
/// Holds one random value per (cell, color) over the largest supported
/// board, so a single table serves every board size.
pub struct ZobristTable {
    black: [u64; TOTAL_CELLS],
    white: [u64; TOTAL_CELLS],
    /// XORed in when black is to move
    black_to_move: u64,
}

impl ZobristTable {
    /// Create a table with deterministic values (fixed-seed LCG), so hashes
    /// are reproducible across runs.
    #[must_use]
    pub fn new() -> Self {
        // Constants from Knuth's MMIX LCG
        let mut seed: u64 = 0x1234_5678_9ABC_DEF0;
        let mut next_rand = || {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            seed
        };

        let mut black = [0u64; TOTAL_CELLS];
        let mut white = [0u64; TOTAL_CELLS];
        for i in 0..TOTAL_CELLS {
            black[i] = next_rand();
            white[i] = next_rand();
        }

        Self {
            black,
            white,
            black_to_move: next_rand(),
        }
    }

    /// Compute the full hash for a board position.
    #[must_use]
    pub fn hash(&self, board: &Board, side_to_move: Stone) -> u64 {
        let mut h = 0u64;

        for pos in board.black.iter_ones() {
            h ^= self.black[pos.to_index()];
        }
        for pos in board.white.iter_ones() {
            h ^= self.white[pos.to_index()];
        }

        if side_to_move == Stone::Black {
            h ^= self.black_to_move;
        }

        h
    }

    /// Incrementally update hash after placing a stone. Also toggles the
    /// side-to-move component.
    #[inline]
    #[must_use]
    pub fn update_place(&self, hash: u64, pos: Pos, stone: Stone) -> u64 {
        let idx = pos.to_index();
        let stone_hash = match stone {
            Stone::Black => self.black[idx],
            Stone::White => self.white[idx],
            Stone::Empty => 0,
        };
        hash ^ stone_hash ^ self.black_to_move
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardSize;

    fn board() -> Board {
        Board::new(BoardSize::try_from(10).unwrap())
    }

    #[test]
    fn test_zobrist_side_to_move() {
        let zt = ZobristTable::new();
        let b = board();
        assert_ne!(zt.hash(&b, Stone::Black), zt.hash(&b, Stone::White));
        assert_eq!(zt.hash(&b, Stone::White), 0);
    }

    #[test]
    fn test_zobrist_deterministic() {
        let mut b = board();
        b.place_stone(Pos::new(2, 3), Stone::White);
        assert_eq!(
            ZobristTable::new().hash(&b, Stone::Black),
            ZobristTable::new().hash(&b, Stone::Black)
        );
    }

    #[test]
    fn test_zobrist_color_matters() {
        let zt = ZobristTable::new();
        let mut black = board();
        black.place_stone(Pos::new(5, 5), Stone::Black);
        let mut white = board();
        white.place_stone(Pos::new(5, 5), Stone::White);
        assert_ne!(zt.hash(&black, Stone::Black), zt.hash(&white, Stone::Black));
    }

    #[test]
    fn test_zobrist_place_is_reversible() {
        let zt = ZobristTable::new();
        let b = board();
        let h = zt.hash(&b, Stone::Black);
        let pos = Pos::new(1, 8);
        let placed = zt.update_place(h, pos, Stone::Black);
        assert_ne!(placed, h);
        assert_eq!(zt.update_place(placed, pos, Stone::Black), h);
    }
}
