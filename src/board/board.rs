//! Flat row-major board

use super::{Pos, Stone, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE};
use crate::error::EngineError;

/// Game board: `size * size` cells in row-major order.
///
/// The engine never mutates a caller's board; search code works on its own
/// clone and undoes every speculative placement with [`Board::remove_stone`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Stone>,
    stones: usize,
}

impl Board {
    /// Empty board of the default size (15x15)
    pub fn new() -> Self {
        Self::with_size(DEFAULT_BOARD_SIZE)
    }

    /// Empty board of the given size
    pub fn with_size(size: usize) -> Self {
        debug_assert!(size > 0 && size <= MAX_BOARD_SIZE);
        Self {
            size,
            cells: vec![Stone::Empty; size * size],
            stones: 0,
        }
    }

    /// Build a board from a flat cell slice supplied by a collaborator.
    pub fn from_cells(size: usize, cells: &[Stone]) -> Result<Self, EngineError> {
        if cells.len() != size * size {
            return Err(EngineError::BoardSizeMismatch {
                expected: size * size,
                actual: cells.len(),
            });
        }
        let stones = cells.iter().filter(|&&s| s != Stone::Empty).count();
        Ok(Self {
            size,
            cells: cells.to_vec(),
            stones,
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Raw cells, row-major
    #[inline]
    pub fn cells(&self) -> &[Stone] {
        &self.cells
    }

    /// Check that (row, col) lies on the board
    #[inline]
    pub fn is_valid(&self, row: i32, col: i32) -> bool {
        let size = self.size as i32;
        row >= 0 && row < size && col >= 0 && col < size
    }

    /// Position for (row, col) if it lies on the board
    #[inline]
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn pos_at(&self, row: i32, col: i32) -> Option<Pos> {
        self.is_valid(row, col).then(|| Pos::new(row as u8, col as u8))
    }

    #[inline]
    pub fn index(&self, pos: Pos) -> usize {
        pos.to_index(self.size)
    }

    #[inline]
    pub fn pos(&self, idx: usize) -> Pos {
        Pos::from_index(idx, self.size)
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        self.cells[self.index(pos)]
    }

    /// Stone at (row, col), or `None` off the board
    #[inline]
    pub fn get_at(&self, row: i32, col: i32) -> Option<Stone> {
        self.pos_at(row, col).map(|p| self.get(p))
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Stone::Empty
    }

    /// Place a stone on an empty cell
    #[inline]
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) {
        let idx = self.index(pos);
        debug_assert_eq!(self.cells[idx], Stone::Empty, "cell {:?} already occupied", pos);
        if stone != Stone::Empty {
            self.stones += 1;
        }
        self.cells[idx] = stone;
    }

    /// Remove a stone
    #[inline]
    pub fn remove_stone(&mut self, pos: Pos) {
        let idx = self.index(pos);
        if self.cells[idx] != Stone::Empty {
            self.stones -= 1;
        }
        self.cells[idx] = Stone::Empty;
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> usize {
        self.stones
    }

    /// Check if board has no stones
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.stones == 0
    }

    /// Check if every cell is occupied
    #[inline]
    pub fn is_full(&self) -> bool {
        self.stones == self.cells.len()
    }

    /// Center cell (`size * size / 2`, the true center on odd sizes)
    #[inline]
    pub fn center(&self) -> Pos {
        self.pos(self.size * self.size / 2)
    }

    /// Iterate over occupied positions of one color
    pub fn stones_of(&self, stone: Stone) -> impl Iterator<Item = Pos> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |&(_, &s)| s == stone)
            .map(move |(i, _)| Pos::from_index(i, self.size))
    }

    /// Iterate over all occupied positions
    pub fn occupied(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s != Stone::Empty)
            .map(move |(i, _)| Pos::from_index(i, self.size))
    }

    /// Iterate over empty positions in index order
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s == Stone::Empty)
            .map(move |(i, _)| Pos::from_index(i, self.size))
    }

    /// ASCII diagram with column letters and 1-based row numbers
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.size + 1) * (self.size * 2 + 4));
        out.push_str("   ");
        for c in 0..self.size {
            out.push(' ');
            out.push(char::from(b'A' + c as u8));
        }
        out.push('\n');
        for r in 0..self.size {
            out.push_str(&format!("{:>3}", r + 1));
            for c in 0..self.size {
                out.push(' ');
                out.push(self.cells[r * self.size + c].symbol());
            }
            out.push('\n');
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
