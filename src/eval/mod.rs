//! Evaluation module for Gomoku positions
//!
//! This module provides pattern recognition and scoring for board positions.
//! The evaluation considers:
//! - Line segments (twos, threes, fours, fives), gapped or contiguous
//! - Combinations of threats the opponent cannot answer with one move
//! - Defensive weighting
//! - Positional bonuses (center control)

pub mod heuristic;
pub mod patterns;
pub mod threats;

pub use heuristic::{center_bonus, evaluate, evaluate_point, line_score, point_threats, Weights};
pub use patterns::{ScoreTable, ThreatCategory};
pub use threats::{classify, detect_threats, summarize, ThreatInfo, ThreatSummary};
