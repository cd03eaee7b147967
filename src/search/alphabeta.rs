//! Bounded minimax search with alpha-beta pruning
//!
//! Scores are always from the engine's point of view: the engine maximizes,
//! the opponent minimizes. Every ply multiplies the child score by [`DECAY`],
//! so a win found sooner outranks the same win found later.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Stone, Pos};
//! use gomoku::eval::ScoreTable;
//! use gomoku::search::{SearchParams, Searcher};
//!
//! let mut board = Board::new();
//! for c in 3..7 {
//!     board.place_stone(Pos::new(7, c), Stone::Black);
//! }
//!
//! let mut searcher = Searcher::new(15, Stone::Black, 5, ScoreTable::default(), SearchParams::default());
//! let result = searcher.search(&mut board, 2, f64::NEG_INFINITY, f64::INFINITY, true);
//! assert_eq!(result.best_move, Some(Pos::new(7, 2)));
//! ```

use crate::board::{Board, Pos, Stone};
use crate::eval::{evaluate, ScoreTable, Weights};
use crate::rules::wins_with;

use super::candidates::{generate_candidates, rank_candidates, CANDIDATE_RADIUS};
use super::zobrist::{EvalCache, ZobristTable};

/// Score of a completed line for the side that made it.
///
/// Larger than any static evaluation the score table can produce.
pub const WIN_SCORE: f64 = 1.0e12;

/// Per-ply discount applied to child scores
pub const DECAY: f64 = 0.9;

/// Candidate widths and evaluation weights for one search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    /// Candidates kept at the root
    pub root_width: usize,
    /// Candidates kept below the root
    pub inner_width: usize,
    pub weights: Weights,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            root_width: 15,
            inner_width: 10,
            weights: Weights::default(),
        }
    }
}

/// Result of a search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    /// Score from the engine's perspective
    pub score: f64,
    /// Move chosen at this node, `None` at a leaf
    pub best_move: Option<Pos>,
}

impl SearchOutcome {
    fn leaf(score: f64) -> Self {
        Self {
            score,
            best_move: None,
        }
    }
}

/// Depth-bounded searcher.
///
/// Holds the engine's color, the scoring setup, and a static-evaluation
/// cache that is valid for as long as those stay fixed.
pub struct Searcher {
    me: Stone,
    win_length: usize,
    table: ScoreTable,
    params: SearchParams,
    zobrist: ZobristTable,
    cache: EvalCache,
    nodes: u64,
}

impl Searcher {
    #[must_use]
    pub fn new(
        board_size: usize,
        me: Stone,
        win_length: usize,
        table: ScoreTable,
        params: SearchParams,
    ) -> Self {
        Self {
            me,
            win_length,
            table,
            params,
            zobrist: ZobristTable::new(board_size),
            cache: EvalCache::new(),
            nodes: 0,
        }
    }

    /// Nodes visited since construction
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Static evaluations served from the cache
    pub fn cache_hits(&self) -> u64 {
        self.cache.hits()
    }

    /// Alpha-beta search from `board` with `depth` plies left.
    ///
    /// `maximizing` is true when the engine is to move. The board is used for
    /// speculative placements and is restored before returning.
    pub fn search(
        &mut self,
        board: &mut Board,
        depth: u8,
        alpha: f64,
        beta: f64,
        maximizing: bool,
    ) -> SearchOutcome {
        let hash = self.zobrist.hash(board);
        let outcome = self.node(board, depth, alpha, beta, maximizing, 0, hash, true);
        tracing::trace!(
            nodes = self.nodes,
            cache_hits = self.cache.hits(),
            cached = self.cache.len(),
            score = outcome.score,
            "search finished"
        );
        outcome
    }

    /// The same search without pruning.
    ///
    /// Visits the same tree as [`Searcher::search`] and must return the same
    /// score; slow, only meant for small boards.
    pub fn minimax(&mut self, board: &mut Board, depth: u8, maximizing: bool) -> SearchOutcome {
        let hash = self.zobrist.hash(board);
        self.node(
            board,
            depth,
            f64::NEG_INFINITY,
            f64::INFINITY,
            maximizing,
            0,
            hash,
            false,
        )
    }

    /// Static evaluation of the current position, cached by hash.
    fn static_eval(&mut self, board: &Board, hash: u64) -> f64 {
        let (me, win_length) = (self.me, self.win_length);
        let (table, weights) = (&self.table, &self.params.weights);
        self.cache
            .get_or_insert_with(hash, || evaluate(board, me, win_length, table, weights))
    }

    #[allow(clippy::too_many_arguments)]
    fn node(
        &mut self,
        board: &mut Board,
        depth: u8,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
        ply: usize,
        hash: u64,
        prune: bool,
    ) -> SearchOutcome {
        self.nodes += 1;

        let mover = if maximizing { self.me } else { self.me.opponent() };
        let sign = if maximizing { 1.0 } else { -1.0 };

        let candidates = generate_candidates(board, CANDIDATE_RADIUS);
        if board.is_full() || candidates.is_empty() {
            return SearchOutcome::leaf(self.static_eval(board, hash));
        }

        // The side to move completes a line
        if let Some(&win) = candidates
            .iter()
            .find(|&&pos| wins_with(board, pos, mover, self.win_length))
        {
            return SearchOutcome {
                score: sign * WIN_SCORE,
                best_move: Some(win),
            };
        }

        // The other side threatens to complete a line
        let threats: Vec<Pos> = candidates
            .iter()
            .copied()
            .filter(|&pos| wins_with(board, pos, mover.opponent(), self.win_length))
            .collect();
        if threats.len() >= 2 {
            // Only one can be blocked: the loss lands one ply later
            return SearchOutcome {
                score: -sign * WIN_SCORE * DECAY,
                best_move: Some(threats[0]),
            };
        }

        if depth == 0 {
            return SearchOutcome::leaf(self.static_eval(board, hash));
        }

        let moves = if threats.len() == 1 {
            threats
        } else {
            let width = if ply == 0 {
                self.params.root_width
            } else {
                self.params.inner_width
            };
            rank_candidates(
                board,
                &candidates,
                mover,
                self.win_length,
                &self.table,
                &self.params.weights,
                width,
            )
        };

        let mut best = SearchOutcome {
            score: if maximizing {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            },
            best_move: None,
        };

        for pos in moves {
            let child_hash = self.zobrist.update(hash, board.index(pos), mover);
            board.place_stone(pos, mover);
            // Window in the child's scale, so the decayed score compares exactly
            let child = self.node(
                board,
                depth - 1,
                alpha / DECAY,
                beta / DECAY,
                !maximizing,
                ply + 1,
                child_hash,
                prune,
            );
            board.remove_stone(pos);

            let score = child.score * DECAY;
            let improves = if maximizing {
                score > best.score
            } else {
                score < best.score
            };
            if improves || best.best_move.is_none() {
                best = SearchOutcome {
                    score,
                    best_move: Some(pos),
                };
            }

            if !prune {
                continue;
            }
            if maximizing {
                alpha = alpha.max(best.score);
            } else {
                beta = beta.min(best.score);
            }
            if beta <= alpha {
                break;
            }
        }

        best
    }
}
