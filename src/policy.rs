//! Opening book and difficulty policy
//!
//! Decides everything that happens around the search: the first one or two
//! moves, how deep and wide to search, how the evaluation is weighted, and
//! how often Easy plays a random nearby move instead of searching.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Pos, Stone};
use crate::error::ConfigError;
use crate::eval::{evaluate_point, point_threats, ScoreTable, Weights};
use crate::search::{generate_candidates, nearby_moves, SearchParams, CANDIDATE_RADIUS};

/// Stones on the board below which Hard searches one ply deeper
pub const HARD_EARLY_GAME_STONES: usize = 10;

/// Engine strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ConfigError::Validation(format!(
                "unknown difficulty '{other}' (expected easy, medium or hard)"
            ))),
        }
    }
}

/// Search settings derived from a difficulty and the game phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    pub depth: u8,
    pub root_width: usize,
    pub inner_width: usize,
    pub weights: Weights,
    /// Probability of skipping the search for a random nearby move
    pub random_move_chance: f64,
    /// How many of the best nearby cells the random move picks from
    pub random_pool: usize,
    /// Whether the threat scan also answers the opponent's decisive threats
    pub block_threats: bool,
}

impl DifficultyProfile {
    /// Profile for `difficulty` with `stone_count` stones on the board.
    pub fn for_difficulty(difficulty: Difficulty, stone_count: usize) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                depth: 1,
                root_width: 8,
                inner_width: 8,
                weights: Weights {
                    offense: 1.0,
                    defense: 0.8,
                    position: 1.0,
                },
                random_move_chance: 0.3,
                random_pool: 5,
                block_threats: false,
            },
            Difficulty::Medium => Self {
                depth: 2,
                root_width: 15,
                inner_width: 10,
                weights: Weights {
                    offense: 1.0,
                    defense: 1.1,
                    position: 1.0,
                },
                random_move_chance: 0.0,
                random_pool: 0,
                block_threats: true,
            },
            Difficulty::Hard => Self {
                depth: if stone_count < HARD_EARLY_GAME_STONES { 4 } else { 3 },
                root_width: 15,
                inner_width: 8,
                weights: Weights {
                    offense: 1.0,
                    defense: 1.2,
                    position: 1.0,
                },
                random_move_chance: 0.0,
                random_pool: 0,
                block_threats: true,
            },
        }
    }

    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            root_width: self.root_width,
            inner_width: self.inner_width,
            weights: self.weights,
        }
    }
}

/// Book move for the first stone or the reply to it.
///
/// Empty board: the center. One stone on the center: the cell directly
/// above it. One stone elsewhere: the center.
pub fn opening_move(board: &Board) -> Option<Pos> {
    let center = board.center();
    match board.stone_count() {
        0 => Some(center),
        1 => {
            let first = board.occupied().next()?;
            if first == center {
                board
                    .pos_at(i32::from(center.row) - 1, i32::from(center.col))
                    .filter(|&p| board.is_empty(p))
            } else {
                Some(center)
            }
        }
        _ => None,
    }
}

/// Easy-mode weakening: sometimes play a random cell next to the stones.
///
/// Rolls `random_move_chance` on `rng` and, on success, picks uniformly
/// among the top `random_pool` cells of [`nearby_moves`].
pub fn random_move(board: &Board, profile: &DifficultyProfile, rng: &mut StdRng) -> Option<Pos> {
    if profile.random_pool == 0 || profile.random_move_chance <= 0.0 {
        return None;
    }
    if !rng.gen_bool(profile.random_move_chance.min(1.0)) {
        return None;
    }
    let nearby = nearby_moves(board);
    let pool = nearby.len().min(profile.random_pool);
    if pool == 0 {
        return None;
    }
    Some(nearby[rng.gen_range(0..pool)])
}

/// Decisive threat scan, run after the immediate win and block checks.
///
/// Returns a move that creates a decisive threat for `me` (open four, two
/// fours, four plus open three). With `block_threats` set, otherwise returns
/// the point where the opponent would create one. Among several such cells
/// the one with the best point evaluation wins, ties going to the lower
/// index.
pub fn threat_move(
    board: &mut Board,
    me: Stone,
    win_length: usize,
    table: &ScoreTable,
    block_threats: bool,
) -> Option<Pos> {
    if board.is_board_empty() {
        return None;
    }
    let candidates = generate_candidates(board, CANDIDATE_RADIUS);

    if let Some(pos) = best_decisive(board, &candidates, me, win_length, table) {
        return Some(pos);
    }
    if block_threats {
        return best_decisive(board, &candidates, me.opponent(), win_length, table);
    }
    None
}

fn best_decisive(
    board: &mut Board,
    candidates: &[Pos],
    stone: Stone,
    win_length: usize,
    table: &ScoreTable,
) -> Option<Pos> {
    let mut best: Option<(Pos, i64)> = None;
    for &pos in candidates {
        if !point_threats(board, pos, stone, win_length, table).is_decisive() {
            continue;
        }
        let score = evaluate_point(board, pos, stone, win_length, table);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((pos, score));
        }
    }
    best.map(|(pos, _)| pos)
}
