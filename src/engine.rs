//! Move-selection engine integrating all components
//!
//! [`GomokuAI`] picks one move for the side it plays. The decision follows a
//! priority system and stops at the first stage that yields a move:
//!
//! 1. **Opening book**: first stone and the reply to it
//! 2. **Immediate win**: a move that completes a line
//! 3. **Immediate block**: the opponent's completing cell
//! 4. **Threat scan**: create a decisive threat, or (Medium/Hard) occupy the
//!    opponent's decisive point
//! 5. **Random move**: Easy only, with a configured probability
//! 6. **Alpha-Beta**: bounded search with difficulty-dependent depth
//!
//! # Example
//!
//! ```
//! use gomoku::{Difficulty, GomokuAI, Stone};
//!
//! let mut ai = GomokuAI::new(15, 5).unwrap().with_seed(7);
//! ai.set_difficulty(Difficulty::Hard);
//! ai.set_pieces(Stone::Black).unwrap();
//!
//! let cells = vec![Stone::Empty; 225];
//! assert_eq!(ai.find_best_move(&cells).unwrap(), 112);
//! ```

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Pos, Stone};
use crate::config::{validate_dimensions, EngineConfig};
use crate::error::EngineError;
use crate::eval::{evaluate_point, ScoreTable};
use crate::policy::{opening_move, random_move, threat_move, Difficulty, DifficultyProfile};
use crate::record::{export_game_record, MoveHistory};
use crate::search::{immediate_wins, Searcher, WIN_SCORE};

/// Stage of the decision that produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Opening book move
    Opening,
    /// Move completes a line
    ImmediateWin,
    /// Move blocks the opponent's completing cell
    Defense,
    /// Move creates, or denies, a decisive threat
    Threat,
    /// Easy-mode random nearby move
    Random,
    /// Regular alpha-beta search result
    AlphaBeta,
}

/// Result of a move decision with statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    pub best_move: Pos,
    /// Row-major index of `best_move`
    pub index: usize,
    /// Score from the engine's perspective (search and win results only)
    pub score: f64,
    pub search_type: SearchType,
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
}

/// Computer opponent for one game.
///
/// Board size and win length are fixed at construction. The difficulty and
/// the engine's color may change between moves.
#[derive(Debug, Clone)]
pub struct GomokuAI {
    board_size: usize,
    win_length: usize,
    difficulty: Difficulty,
    me: Stone,
    random_move_chance: f64,
    table: ScoreTable,
    history: MoveHistory,
    rng: StdRng,
}

impl GomokuAI {
    /// Create an engine for a `board_size` x `board_size` board where
    /// `win_length` in a row wins.
    ///
    /// The engine plays White at Medium difficulty until told otherwise.
    pub fn new(board_size: usize, win_length: usize) -> Result<Self, EngineError> {
        Self::from_config(&EngineConfig {
            board_size,
            win_length,
            ..EngineConfig::default()
        })
    }

    /// Create an engine from a validated configuration.
    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        validate_dimensions(config.board_size, config.win_length)?;
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            board_size: config.board_size,
            win_length: config.win_length,
            difficulty: config.difficulty,
            me: Stone::White,
            random_move_chance: config.random_move_chance,
            table: config.scores.clone(),
            history: MoveHistory::new(),
            rng,
        })
    }

    /// Replace the random source used by Easy mode.
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Seed the random source used by Easy mode.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(StdRng::seed_from_u64(seed))
    }

    /// Copy of this engine with an independent random stream.
    ///
    /// Used to run a decision off-thread without sharing the RNG.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        let seed: u64 = self.rng.gen();
        self.clone().with_seed(seed)
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Set the engine's color. Starts a new game record.
    pub fn set_pieces(&mut self, stone: Stone) -> Result<(), EngineError> {
        if stone == Stone::Empty {
            return Err(EngineError::NotEngineStone);
        }
        self.me = stone;
        self.history.clear();
        Ok(())
    }

    /// The engine's color
    pub fn pieces(&self) -> Stone {
        self.me
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Profile the next decision uses with `stone_count` stones on the board.
    pub fn profile(&self, stone_count: usize) -> DifficultyProfile {
        let mut profile = DifficultyProfile::for_difficulty(self.difficulty, stone_count);
        if self.difficulty == Difficulty::Easy {
            profile.random_move_chance = self.random_move_chance;
        }
        profile
    }

    /// Pick a move on a row-major cell array and return its index.
    pub fn find_best_move(&mut self, cells: &[Stone]) -> Result<usize, EngineError> {
        let board = Board::from_cells(self.board_size, cells)?;
        Ok(self.find_best_move_with_stats(&board)?.index)
    }

    /// Pick a move and report how it was found.
    ///
    /// The board is never modified; speculative placements happen on a
    /// private copy. The chosen move is appended to the history.
    pub fn find_best_move_with_stats(&mut self, board: &Board) -> Result<MoveResult, EngineError> {
        let result = self.decide(board)?;
        self.history.push(result.best_move, self.me);
        tracing::info!(
            stone = self.me.name(),
            mv = %result.best_move.label(),
            index = result.index,
            kind = ?result.search_type,
            score = result.score,
            nodes = result.nodes,
            time_ms = result.time_ms,
            "engine move"
        );
        Ok(result)
    }

    fn decide(&mut self, board: &Board) -> Result<MoveResult, EngineError> {
        let start = Instant::now();
        if board.size() != self.board_size {
            return Err(EngineError::BoardSizeMismatch {
                expected: self.board_size * self.board_size,
                actual: board.size() * board.size(),
            });
        }
        if board.is_full() {
            return Err(EngineError::NoLegalMove);
        }

        let me = self.me;
        let opponent = me.opponent();
        let mut work = board.clone();
        let profile = self.profile(work.stone_count());
        let finish = |pos: Pos, score: f64, search_type: SearchType, nodes: u64| MoveResult {
            best_move: pos,
            index: pos.to_index(board.size()),
            score,
            search_type,
            time_ms: start.elapsed().as_millis() as u64,
            nodes,
        };

        // 0. Opening book
        if let Some(pos) = opening_move(&work) {
            tracing::debug!(mv = %pos.label(), "opening book");
            return Ok(finish(pos, 0.0, SearchType::Opening, 0));
        }

        // 1. Complete our own line
        if let Some(&pos) = immediate_wins(&mut work, me, self.win_length).first() {
            tracing::debug!(mv = %pos.label(), "immediate win");
            return Ok(finish(pos, WIN_SCORE, SearchType::ImmediateWin, 0));
        }

        // 2. Block the opponent's completing cell
        let blocks = immediate_wins(&mut work, opponent, self.win_length);
        if let Some(&pos) = blocks.first() {
            tracing::debug!(mv = %pos.label(), threats = blocks.len(), "immediate block");
            return Ok(finish(pos, 0.0, SearchType::Defense, 0));
        }

        // 3. Decisive threats
        if let Some(pos) =
            threat_move(&mut work, me, self.win_length, &self.table, profile.block_threats)
        {
            let score = evaluate_point(&mut work, pos, me, self.win_length, &self.table);
            tracing::debug!(mv = %pos.label(), score, "threat scan");
            return Ok(finish(pos, score as f64, SearchType::Threat, 0));
        }

        // 4. Easy mode sometimes skips the search
        if let Some(pos) = random_move(&work, &profile, &mut self.rng) {
            tracing::debug!(mv = %pos.label(), "random nearby move");
            return Ok(finish(pos, 0.0, SearchType::Random, 0));
        }

        // 5. Bounded search
        let mut searcher = Searcher::new(
            self.board_size,
            me,
            self.win_length,
            self.table.clone(),
            profile.search_params(),
        );
        let outcome = searcher.search(
            &mut work,
            profile.depth,
            f64::NEG_INFINITY,
            f64::INFINITY,
            true,
        );
        tracing::debug!(
            depth = profile.depth,
            nodes = searcher.nodes(),
            cache_hits = searcher.cache_hits(),
            "alpha-beta search"
        );

        let pos = outcome
            .best_move
            .or_else(|| work.empty_cells().next())
            .ok_or(EngineError::NoLegalMove)?;
        Ok(finish(pos, outcome.score, SearchType::AlphaBeta, searcher.nodes()))
    }

    /// Forget the recorded moves. Call when a new game starts.
    pub fn reset_move_history(&mut self) {
        self.history.clear();
    }

    /// Record a move made outside the engine, usually the opponent's.
    pub fn record_move(&mut self, index: usize, stone: Stone) -> Result<(), EngineError> {
        let cells = self.board_size * self.board_size;
        if index >= cells {
            return Err(EngineError::IndexOutOfRange { index, cells });
        }
        if stone == Stone::Empty {
            return Err(EngineError::NotEngineStone);
        }
        self.history.push(Pos::from_index(index, self.board_size), stone);
        Ok(())
    }

    /// Transcript of the recorded moves ending in `board`.
    pub fn export_game_record(&self, board: &Board, self_is_black: bool) -> String {
        export_game_record(&self.history, board, self.win_length, self_is_black)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(difficulty: Difficulty, me: Stone) -> GomokuAI {
        let mut ai = GomokuAI::new(15, 5).unwrap().with_seed(1);
        ai.set_difficulty(difficulty);
        ai.set_pieces(me).unwrap();
        ai
    }

    #[test]
    fn test_engine_creation() {
        let ai = GomokuAI::new(15, 5).unwrap();
        assert_eq!(ai.board_size(), 15);
        assert_eq!(ai.win_length(), 5);
        assert_eq!(ai.difficulty(), Difficulty::Medium);
        assert!(ai.history().is_empty());
    }

    #[test]
    fn test_engine_rejects_bad_dimensions() {
        assert!(matches!(
            GomokuAI::new(4, 5),
            Err(EngineError::Config(_))
        ));
        assert!(GomokuAI::new(30, 5).is_err());
        assert!(GomokuAI::new(15, 1).is_err());
    }

    #[test]
    fn test_set_pieces_rejects_empty() {
        let mut ai = GomokuAI::new(15, 5).unwrap();
        assert!(matches!(ai.set_pieces(Stone::Empty), Err(EngineError::NotEngineStone)));
        assert_eq!(ai.pieces(), Stone::White);
    }

    #[test]
    fn test_engine_empty_board() {
        let mut ai = engine(Difficulty::Hard, Stone::Black);
        let result = ai.find_best_move_with_stats(&Board::new()).unwrap();
        assert_eq!(result.index, 112);
        assert_eq!(result.search_type, SearchType::Opening);
    }

    #[test]
    fn test_engine_finds_immediate_win() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let mut ai = engine(difficulty, Stone::Black);
            let mut board = Board::new();
            for i in 0..4 {
                board.place_stone(Pos::new(9, i), Stone::Black);
            }
            board.place_stone(Pos::new(10, 0), Stone::White);
            board.place_stone(Pos::new(10, 1), Stone::White);

            let result = ai.find_best_move_with_stats(&board).unwrap();
            assert_eq!(result.best_move, Pos::new(9, 4), "{difficulty}");
            assert_eq!(result.search_type, SearchType::ImmediateWin);
        }
    }

    #[test]
    fn test_engine_blocks_opponent_win() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let mut ai = engine(difficulty, Stone::Black);
            let mut board = Board::new();
            for i in 0..4 {
                board.place_stone(Pos::new(9, i), Stone::White);
            }
            board.place_stone(Pos::new(10, 0), Stone::Black);
            board.place_stone(Pos::new(3, 3), Stone::Black);

            let result = ai.find_best_move_with_stats(&board).unwrap();
            assert_eq!(result.best_move, Pos::new(9, 4), "{difficulty}");
            assert_eq!(result.search_type, SearchType::Defense);
        }
    }

    #[test]
    fn test_win_preferred_over_block() {
        let mut ai = engine(Difficulty::Medium, Stone::White);
        let mut board = Board::new();
        for i in 0..4 {
            board.place_stone(Pos::new(2, i + 3), Stone::Black);
            board.place_stone(Pos::new(12, i + 3), Stone::White);
        }
        let result = ai.find_best_move_with_stats(&board).unwrap();
        assert_eq!(result.search_type, SearchType::ImmediateWin);
        assert_eq!(result.best_move.row, 12);
    }

    #[test]
    fn test_engine_responds_to_open_three() {
        let mut ai = engine(Difficulty::Medium, Stone::White);
        let mut board = Board::new();
        for c in 6..9 {
            board.place_stone(Pos::new(7, c), Stone::Black);
        }
        board.place_stone(Pos::new(8, 7), Stone::White);
        board.place_stone(Pos::new(6, 6), Stone::White);

        let result = ai.find_best_move_with_stats(&board).unwrap();
        assert!(
            result.best_move == Pos::new(7, 5) || result.best_move == Pos::new(7, 9),
            "got {:?}",
            result.best_move
        );
    }

    #[test]
    fn test_engine_search_result() {
        let mut ai = engine(Difficulty::Medium, Stone::White);
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);
        board.place_stone(Pos::new(6, 7), Stone::White);
        board.place_stone(Pos::new(8, 8), Stone::Black);

        let result = ai.find_best_move_with_stats(&board).unwrap();
        assert_eq!(result.search_type, SearchType::AlphaBeta);
        assert!(result.nodes > 0);
        assert!(board.is_empty(result.best_move));
        assert_eq!(result.index, board.index(result.best_move));
    }

    #[test]
    fn test_engine_multiple_searches_are_deterministic() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);
        board.place_stone(Pos::new(7, 8), Stone::White);
        board.place_stone(Pos::new(6, 6), Stone::Black);

        let mut a = engine(Difficulty::Medium, Stone::White);
        let mut b = engine(Difficulty::Medium, Stone::White);
        let ra = a.find_best_move_with_stats(&board).unwrap();
        let rb = b.find_best_move_with_stats(&board).unwrap();
        assert_eq!(ra.best_move, rb.best_move);
        assert_eq!(ra.score, rb.score);
    }

    #[test]
    fn test_easy_random_moves_follow_seed() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);
        board.place_stone(Pos::new(7, 8), Stone::White);

        let config = EngineConfig {
            difficulty: Difficulty::Easy,
            random_move_chance: 1.0,
            seed: Some(5),
            ..EngineConfig::default()
        };
        let mut a = GomokuAI::from_config(&config).unwrap();
        let mut b = GomokuAI::from_config(&config).unwrap();
        for _ in 0..5 {
            let ra = a.find_best_move_with_stats(&board).unwrap();
            let rb = b.find_best_move_with_stats(&board).unwrap();
            assert_eq!(ra.search_type, SearchType::Random);
            assert_eq!(ra.best_move, rb.best_move);
            assert_eq!(ra.best_move.chebyshev(Pos::new(7, 7)).min(ra.best_move.chebyshev(Pos::new(7, 8))), 1);
        }
    }

    #[test]
    fn test_board_size_mismatch() {
        let mut ai = GomokuAI::new(15, 5).unwrap();
        let err = ai.find_best_move(&[Stone::Empty; 10]).unwrap_err();
        assert!(matches!(
            err,
            EngineError::BoardSizeMismatch {
                expected: 225,
                actual: 10
            }
        ));
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut ai = GomokuAI::new(5, 5).unwrap();
        let cells: Vec<Stone> = (0..25)
            .map(|i| if (i / 5 + i % 5 / 2) % 2 == 0 { Stone::Black } else { Stone::White })
            .collect();
        assert!(matches!(ai.find_best_move(&cells), Err(EngineError::NoLegalMove)));
    }

    #[test]
    fn test_history_and_export() {
        let mut ai = engine(Difficulty::Hard, Stone::Black);
        let mut board = Board::new();

        let first = ai.find_best_move(board.cells()).unwrap();
        board.place_stone(Pos::from_index(first, 15), Stone::Black);
        ai.record_move(97, Stone::White).unwrap();
        board.place_stone(Pos::from_index(97, 15), Stone::White);

        assert_eq!(ai.history().len(), 2);
        let text = ai.export_game_record(&board, true);
        assert!(text.contains("1. Black H8 (7,7)"));
        assert!(text.contains("2. White H7 (6,7)"));

        assert!(matches!(
            ai.record_move(225, Stone::White),
            Err(EngineError::IndexOutOfRange { index: 225, cells: 225 })
        ));

        ai.reset_move_history();
        assert!(ai.history().is_empty());
    }

    #[test]
    fn test_set_pieces_resets_history() {
        let mut ai = engine(Difficulty::Medium, Stone::Black);
        ai.record_move(0, Stone::White).unwrap();
        ai.set_pieces(Stone::White).unwrap();
        assert!(ai.history().is_empty());
    }

    #[test]
    fn test_fork_is_independent() {
        let mut ai = engine(Difficulty::Easy, Stone::White);
        let mut forked = ai.fork();
        forked.record_move(0, Stone::Black).unwrap();
        assert!(ai.history().is_empty());
        assert_eq!(forked.difficulty(), Difficulty::Easy);
    }
}
