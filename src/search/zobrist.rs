//! Zobrist hashing for position identification
//!
//! Zobrist hashing allows O(1) incremental hash updates when placing/removing
//! stones. The search uses it to key a cache of static evaluations.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Stone, Pos};
//! use gomoku::search::ZobristTable;
//!
//! let zt = ZobristTable::new(15);
//! let mut board = Board::new();
//!
//! let hash1 = zt.hash(&board);
//!
//! let pos = Pos::new(7, 7);
//! board.place_stone(pos, Stone::Black);
//! let hash2 = zt.hash(&board);
//!
//! // Incremental update is equivalent to full recomputation
//! assert_eq!(zt.update(hash1, board.index(pos), Stone::Black), hash2);
//! ```

use std::collections::HashMap;

use crate::board::{Board, Stone};

/// Zobrist hash table for position hashing.
///
/// Uses XOR-based hashing with precomputed random values for each
/// (cell, stone color) combination.
#[derive(Debug, Clone)]
pub struct ZobristTable {
    /// Random values for black stones at each cell
    black: Vec<u64>,
    /// Random values for white stones at each cell
    white: Vec<u64>,
}

impl ZobristTable {
    /// Create a table for a `size` x `size` board with deterministic values.
    ///
    /// Uses a linear congruential generator with a fixed seed so hashes are
    /// reproducible across runs.
    #[must_use]
    pub fn new(size: usize) -> Self {
        // Constants from Knuth's MMIX LCG
        let mut seed: u64 = 0x1234_5678_9ABC_DEF0;
        let mut next_rand = || {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1);
            seed
        };

        let cells = size * size;
        let mut black = Vec::with_capacity(cells);
        let mut white = Vec::with_capacity(cells);
        for _ in 0..cells {
            black.push(next_rand());
            white.push(next_rand());
        }

        Self { black, white }
    }

    /// Compute the full hash for a board position.
    #[must_use]
    pub fn hash(&self, board: &Board) -> u64 {
        board
            .occupied()
            .fold(0u64, |h, pos| h ^ self.update(0, board.index(pos), board.get(pos)))
    }

    /// Incrementally update a hash after placing or removing a stone.
    ///
    /// XOR is its own inverse, so the same call undoes a placement.
    #[inline]
    #[must_use]
    pub fn update(&self, hash: u64, idx: usize, stone: Stone) -> u64 {
        let stone_hash = match stone {
            Stone::Black => self.black[idx],
            Stone::White => self.white[idx],
            Stone::Empty => 0,
        };
        hash ^ stone_hash
    }
}

/// Cache of static evaluations keyed by Zobrist hash.
///
/// Lives for one move decision: the evaluation perspective and weights are
/// fixed for its lifetime.
#[derive(Debug, Default)]
pub struct EvalCache {
    entries: HashMap<u64, f64>,
    hits: u64,
}

impl EvalCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached score for `hash`, computing and storing it on a miss.
    pub fn get_or_insert_with(&mut self, hash: u64, eval: impl FnOnce() -> f64) -> f64 {
        if let Some(&score) = self.entries.get(&hash) {
            self.hits += 1;
            return score;
        }
        let score = eval();
        self.entries.insert(hash, score);
        score
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
    }
}
