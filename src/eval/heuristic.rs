//! Heuristic evaluation for Gomoku positions
//!
//! Two scores are provided:
//! - [`evaluate_point`]: value of putting one stone on one cell, used to rank
//!   candidate moves
//! - [`evaluate`]: static evaluation of a whole position for the search leaves

use serde::{Deserialize, Serialize};

use crate::board::{Board, Pos, Stone, DIRECTIONS};
use crate::rules::run_length;

use super::patterns::{ScoreTable, ThreatCategory};
use super::threats::{classify, scan_segment, summarize, ThreatInfo, ThreatSummary};

/// Relative weights of attack, defence and position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub offense: f64,
    pub defense: f64,
    pub position: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            offense: 1.0,
            defense: 1.0,
            position: 1.0,
        }
    }
}

/// Bonus for closeness to the center: zero in the corners, largest in the
/// middle.
#[inline]
pub fn center_bonus(board: &Board, pos: Pos, table: &ScoreTable) -> i64 {
    let center = (board.size() / 2) as i64;
    let max_dist = 2 * center;
    let dist = (i64::from(pos.row) - center).abs() + (i64::from(pos.col) - center).abs();
    (max_dist - dist).max(0) * table.center
}

/// Strongest threat along one direction through `pos`.
///
/// Combines the contiguous run through `pos` with every gapped segment that
/// contains `pos`, so `OO_O` + `pos` on the gap reads as a four.
fn best_line_threat(
    board: &Board,
    pos: Pos,
    dr: i32,
    dc: i32,
    stone: Stone,
    win_length: usize,
    table: &ScoreTable,
) -> Option<ThreatCategory> {
    let run = run_length(board, pos, dr, dc, stone, win_length);
    let mut best = classify(run.consecutive, run.open_ends, false, win_length);

    let idx = board.index(pos);
    for back in 0..win_length as i32 {
        let Some(start) = board.pos_at(
            i32::from(pos.row) - back * dr,
            i32::from(pos.col) - back * dc,
        ) else {
            break;
        };
        if let Some(ThreatInfo { category, positions, .. }) =
            scan_segment(board, start, dr, dc, stone, win_length, table)
        {
            if positions.contains(&idx) && best.map_or(true, |b| category < b) {
                best = Some(category);
            }
        }
    }
    best
}

/// Score of placing `stone` on the empty cell `pos`.
///
/// [`line_score`] plus the center bonus of `pos`.
pub fn evaluate_point(
    board: &mut Board,
    pos: Pos,
    stone: Stone,
    win_length: usize,
    table: &ScoreTable,
) -> i64 {
    line_score(board, pos, stone, win_length, table) + center_bonus(board, pos, table)
}

/// Threat score of placing `stone` on the empty cell `pos`.
///
/// The stone is placed on `board`, the four lines through it are classified,
/// and the stone is removed again before returning. Combination bonuses apply
/// when the lines together form a double threat.
pub fn line_score(
    board: &mut Board,
    pos: Pos,
    stone: Stone,
    win_length: usize,
    table: &ScoreTable,
) -> i64 {
    let summary = point_threats(board, pos, stone, win_length, table);
    summary.total + summary.combo_count() * table.combo
}

/// Threat summary a single placement would produce on the lines through it.
///
/// `total` holds the category scores without combination bonuses.
pub fn point_threats(
    board: &mut Board,
    pos: Pos,
    stone: Stone,
    win_length: usize,
    table: &ScoreTable,
) -> ThreatSummary {
    debug_assert!(board.is_empty(pos));
    board.place_stone(pos, stone);
    let mut summary = ThreatSummary::default();
    for &(dr, dc) in &DIRECTIONS {
        if let Some(category) = best_line_threat(board, pos, dr, dc, stone, win_length, table) {
            summary.add(category, table.score(category));
        }
    }
    board.remove_stone(pos);
    summary
}

/// Positional score of all stones of one color.
fn evaluate_positions(board: &Board, stone: Stone, table: &ScoreTable) -> i64 {
    board
        .stones_of(stone)
        .map(|pos| center_bonus(board, pos, table))
        .sum()
}

/// Evaluate the board from the perspective of `me`.
///
/// `own threats * offense - opponent threats * defense + position * weight`.
/// The evaluation is deliberately asymmetric: at Medium and Hard the defence
/// weight is at least the offence weight.
#[must_use]
pub fn evaluate(
    board: &Board,
    me: Stone,
    win_length: usize,
    table: &ScoreTable,
    weights: &Weights,
) -> f64 {
    let opponent = me.opponent();
    let mine = summarize(board, me, win_length, table);
    let theirs = summarize(board, opponent, win_length, table);

    let position =
        evaluate_positions(board, me, table) - evaluate_positions(board, opponent, table);

    mine.total as f64 * weights.offense - theirs.total as f64 * weights.defense
        + position as f64 * weights.position
}
