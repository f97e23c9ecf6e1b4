//! Board structure sized at runtime

use super::bitboard::Bitboard;
use super::{BoardSize, Pos, Stone};

/// Game board. Only the top-left `size x size` corner of the bitboards is used.
#[derive(Debug, Clone)]
pub struct Board {
    size: BoardSize,
    /// Black stones bitboard
    pub black: Bitboard,
    /// White stones bitboard
    pub white: Bitboard,
}

impl Board {
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            black: Bitboard::new(),
            white: Bitboard::new(),
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size.get()
    }

    #[inline]
    pub fn board_size(&self) -> BoardSize {
        self.size
    }

    /// Check that signed coordinates fall on this board
    #[inline]
    pub fn contains(&self, row: i32, col: i32) -> bool {
        let sz = self.size() as i32;
        row >= 0 && row < sz && col >= 0 && col < sz
    }

    /// Position at signed coordinates, if on the board
    #[inline]
    pub fn pos_at(&self, row: i32, col: i32) -> Option<Pos> {
        self.contains(row, col).then(|| Pos::new(row as u8, col as u8))
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if self.black.get(pos) {
            Stone::Black
        } else if self.white.get(pos) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Stone at signed coordinates; `None` off the board
    #[inline]
    pub fn get_at(&self, row: i32, col: i32) -> Option<Stone> {
        self.pos_at(row, col).map(|pos| self.get(pos))
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.black.get(pos) && !self.white.get(pos)
    }

    /// Place a stone without any rule checks
    #[inline]
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) {
        match stone {
            Stone::Black => self.black.set(pos),
            Stone::White => self.white.set(pos),
            Stone::Empty => {}
        }
    }

    #[inline]
    pub fn remove_stone(&mut self, pos: Pos) {
        self.black.clear(pos);
        self.white.clear(pos);
    }

    /// Get bitboard for a color (returns None for Empty)
    #[inline]
    pub fn stones(&self, stone: Stone) -> Option<&Bitboard> {
        match stone {
            Stone::Black => Some(&self.black),
            Stone::White => Some(&self.white),
            Stone::Empty => None,
        }
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.black.count() + self.white.count()
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.black.is_empty() && self.white.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count() as usize == self.size() * self.size()
    }

    /// Center cell (upper-left of the four central cells on even boards)
    pub fn center(&self) -> Pos {
        let mid = ((self.size() - 1) / 2) as u8;
        Pos::new(mid, mid)
    }

    /// Remove every stone, keeping the size
    pub fn clear(&mut self) {
        self.black = Bitboard::new();
        self.white = Bitboard::new();
    }

    /// All cells of the board in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let sz = self.size() as u8;
        (0..sz).flat_map(move |row| (0..sz).map(move |col| Pos::new(row, col)))
    }
}
