//! Game rules for free-style Gomoku
//!
//! This module implements the win condition: an unbroken line of
//! `win_length` or more stones. There are no forbidden moves.

pub mod win;

// Re-exports for convenient access
pub use win::{
    check_win, check_winner, has_any_five, run_length, winning_line, wins_with, LineRun,
};
