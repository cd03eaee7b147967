//! Candidate move generation and ordering
//!
//! Only empty cells near existing stones are considered. Ranking by the
//! point evaluation and truncating to the top few keeps the branching factor
//! small enough for a full-width search on a 15x15 board.

use crate::board::{Board, Pos, Stone};
use crate::eval::{center_bonus, line_score, ScoreTable, Weights};
use crate::rules::wins_with;

/// Chebyshev radius around stones for search candidates
pub const CANDIDATE_RADIUS: i32 = 2;

/// Chebyshev radius for the Easy-mode neighbourhood
pub const NEARBY_RADIUS: i32 = 1;

/// Mark every empty cell within `radius` of a stone.
fn near_stones(board: &Board, radius: i32) -> Vec<bool> {
    let size = board.size();
    let mut seen = vec![false; size * size];

    for pos in board.occupied() {
        for dr in -radius..=radius {
            for dc in -radius..=radius {
                let r = i32::from(pos.row) + dr;
                let c = i32::from(pos.col) + dc;
                if let Some(p) = board.pos_at(r, c) {
                    if board.is_empty(p) {
                        seen[board.index(p)] = true;
                    }
                }
            }
        }
    }
    seen
}

/// Empty cells within `radius` of any stone, in row-major order.
///
/// On an empty board the center is the only candidate.
pub fn generate_candidates(board: &Board, radius: i32) -> Vec<Pos> {
    if board.is_board_empty() {
        return vec![board.center()];
    }

    near_stones(board, radius)
        .iter()
        .enumerate()
        .filter(|&(_, &near)| near)
        .map(|(idx, _)| board.pos(idx))
        .collect()
}

/// Ordering score of one candidate for `me`.
///
/// The center bonus is counted once, in the position term.
pub fn score_candidate(
    board: &mut Board,
    pos: Pos,
    me: Stone,
    win_length: usize,
    table: &ScoreTable,
    weights: &Weights,
) -> f64 {
    let offense = line_score(board, pos, me, win_length, table);
    let defense = line_score(board, pos, me.opponent(), win_length, table);
    let position = center_bonus(board, pos, table);

    offense as f64 * weights.offense
        + defense as f64 * weights.defense
        + position as f64 * weights.position
}

/// Rank `candidates` for `me`, best first, keeping at most `width`.
///
/// Ties keep the input order, so row-major input gives ties broken by index.
pub fn rank_candidates(
    board: &mut Board,
    candidates: &[Pos],
    me: Stone,
    win_length: usize,
    table: &ScoreTable,
    weights: &Weights,
    width: usize,
) -> Vec<Pos> {
    let mut scored: Vec<(Pos, f64)> = candidates
        .iter()
        .map(|&pos| (pos, score_candidate(board, pos, me, win_length, table, weights)))
        .collect();

    // Stable sort: equal scores stay in index order
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(width.max(1));
    scored.into_iter().map(|(pos, _)| pos).collect()
}

/// Empty cells next to a stone, ranked by how many stones touch them.
///
/// Ties are broken by index. Used for the Easy-mode random pick.
pub fn nearby_moves(board: &Board) -> Vec<Pos> {
    if board.is_board_empty() {
        return vec![board.center()];
    }

    let mut ranked: Vec<(Pos, usize)> = generate_candidates(board, NEARBY_RADIUS)
        .into_iter()
        .map(|pos| {
            let neighbours = (-1..=1)
                .flat_map(|dr| (-1..=1).map(move |dc| (dr, dc)))
                .filter(|&(dr, dc)| (dr, dc) != (0, 0))
                .filter(|&(dr, dc)| {
                    board
                        .get_at(i32::from(pos.row) + dr, i32::from(pos.col) + dc)
                        .is_some_and(|s| s != Stone::Empty)
                })
                .count();
            (pos, neighbours)
        })
        .collect();

    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.into_iter().map(|(pos, _)| pos).collect()
}

/// Every cell where `stone` completes a line right away, in row-major order.
///
/// Looks at the full candidate list, never a truncated one.
pub fn immediate_wins(board: &mut Board, stone: Stone, win_length: usize) -> Vec<Pos> {
    if board.is_board_empty() {
        return Vec::new();
    }
    generate_candidates(board, CANDIDATE_RADIUS)
        .into_iter()
        .filter(|&pos| wins_with(board, pos, stone, win_length))
        .collect()
}
