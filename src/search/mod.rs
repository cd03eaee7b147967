//! Search module for Gomoku AI
//!
//! Contains:
//! - Candidate generation and ordering near existing stones
//! - Zobrist hashing and a static-evaluation cache
//! - Bounded minimax with alpha-beta pruning and per-ply decay

pub mod alphabeta;
pub mod candidates;
pub mod zobrist;

pub use alphabeta::{SearchOutcome, SearchParams, Searcher, DECAY, WIN_SCORE};
pub use candidates::{
    generate_candidates, immediate_wins, nearby_moves, rank_candidates, CANDIDATE_RADIUS,
};
pub use zobrist::{EvalCache, ZobristTable};
