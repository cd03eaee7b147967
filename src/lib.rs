//! Gomoku move-selection engine
//!
//! A computer opponent for free-style Gomoku, parametric over the board size
//! and the number of stones in a row needed to win:
//! - Default 15x15 board, up to 26x26
//! - 5-in-a-row to win by default (overlines allowed)
//! - No forbidden moves, no captures
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Flat row-major board representation
//! - [`rules`]: Win detection along the four line directions
//! - [`eval`]: Threat detection, pattern scores and heuristics
//! - [`search`]: Candidate generation and alpha-beta search
//! - [`policy`]: Opening book, difficulty profiles and Easy-mode randomness
//! - [`record`]: Move history and transcript export
//! - [`engine`]: Main AI engine integrating all components
//! - [`worker`]: Off-thread decisions with stale-result discarding
//! - [`config`]: TOML configuration
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{Board, Difficulty, GomokuAI, Pos, Stone};
//!
//! let mut board = Board::new();
//! let mut ai = GomokuAI::new(15, 5).unwrap().with_seed(42);
//! ai.set_difficulty(Difficulty::Medium);
//! ai.set_pieces(Stone::White).unwrap();
//!
//! board.place_stone(Pos::new(7, 7), Stone::Black);
//! ai.record_move(board.index(Pos::new(7, 7)), Stone::Black).unwrap();
//!
//! // AI responds as White
//! let idx = ai.find_best_move(board.cells()).unwrap();
//! board.place_stone(board.pos(idx), Stone::White);
//! println!("{}", ai.export_game_record(&board, false));
//! ```
//!
//! # Search Priority
//!
//! The AI engine follows this priority:
//! 1. Opening book
//! 2. Immediate winning move
//! 3. Block the opponent's immediate win
//! 4. Decisive threats (open four, double four, four plus open three)
//! 5. Easy-mode random nearby move
//! 6. Alpha-Beta search with a static-evaluation cache

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod policy;
pub mod record;
pub mod rules;
pub mod search;
pub mod worker;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone, DEFAULT_BOARD_SIZE, DEFAULT_WIN_LENGTH, MAX_BOARD_SIZE};
pub use config::EngineConfig;
pub use engine::{GomokuAI, MoveResult, SearchType};
pub use error::{ConfigError, EngineError};
pub use policy::{Difficulty, DifficultyProfile};
pub use record::{MoveHistory, MoveRecord};
pub use worker::BackgroundSearch;
