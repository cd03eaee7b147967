//! Threat detection over line segments
//!
//! A segment is a run of one side's stones along a direction, allowed to
//! contain a single one-cell gap (`OO_OO`). Each segment is classified into a
//! [`ThreatCategory`] and scored from the [`ScoreTable`].

use crate::board::{Board, Pos, Stone, DIRECTIONS};

use super::patterns::{ScoreTable, ThreatCategory};

/// One detected threat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreatInfo {
    pub category: ThreatCategory,
    pub score: i64,
    /// Board indices of the stones forming the segment, in line order
    pub positions: Vec<usize>,
}

impl ThreatInfo {
    /// Check if the threat uses the given cell
    pub fn contains(&self, idx: usize) -> bool {
        self.positions.contains(&idx)
    }
}

/// Classify a run of `stones` stones relative to `win_length`.
///
/// `gapped` runs are one empty cell short of being contiguous; filling the gap
/// of a gapped run that is one stone short completes a line.
pub fn classify(
    stones: usize,
    open_ends: u8,
    gapped: bool,
    win_length: usize,
) -> Option<ThreatCategory> {
    if gapped {
        if stones + 1 >= win_length {
            return Some(ThreatCategory::PotentialWin);
        }
    } else if stones >= win_length {
        return Some(ThreatCategory::Five);
    }

    match (win_length - stones, open_ends) {
        (_, 0) => None,
        (1, 2) => Some(ThreatCategory::OpenFour),
        (1, _) => Some(ThreatCategory::BlockedFour),
        (2, 2) => Some(ThreatCategory::OpenThree),
        (2, _) => Some(ThreatCategory::BlockedThree),
        (3, 2) => Some(ThreatCategory::OpenTwo),
        (3, _) => Some(ThreatCategory::BlockedTwo),
        _ => None,
    }
}

/// Count cells from (row, col) stepping by (dr, dc) that do not hold an
/// opponent stone, stopping at the board edge or after `limit` cells.
fn free_run(board: &Board, mut r: i32, mut c: i32, dr: i32, dc: i32, stone: Stone, limit: usize) -> usize {
    let opponent = stone.opponent();
    let mut free = 0;
    while free < limit {
        match board.get_at(r, c) {
            Some(s) if s != opponent => free += 1,
            _ => break,
        }
        r += dr;
        c += dc;
    }
    free
}

/// Classify the segment starting at `start` along `(dr, dc)`.
///
/// Returns `None` if `start` is not the first stone of its run (the previous
/// cell holds the same stone), if the segment is too weak to matter, or if it
/// has no room left to grow into a winning line.
#[allow(clippy::cast_possible_wrap)]
pub fn scan_segment(
    board: &Board,
    start: Pos,
    dr: i32,
    dc: i32,
    stone: Stone,
    win_length: usize,
    table: &ScoreTable,
) -> Option<ThreatInfo> {
    let prev_r = i32::from(start.row) - dr;
    let prev_c = i32::from(start.col) - dc;
    let prev = board.get_at(prev_r, prev_c);
    if prev == Some(stone) || board.get(start) != stone {
        return None;
    }

    let mut open_ends = u8::from(prev == Some(Stone::Empty));
    let mut positions = vec![board.index(start)];
    let mut has_gap = false;
    let mut span = 1;

    // Extend in positive direction, allowing one gap unless the run before
    // it is already a four
    let mut r = i32::from(start.row) + dr;
    let mut c = i32::from(start.col) + dc;
    while let Some(p) = board.pos_at(r, c) {
        match board.get(p) {
            s if s == stone => {
                positions.push(board.index(p));
                span += 1;
            }
            Stone::Empty
                if !has_gap
                    && positions.len() + 1 < win_length
                    && board.get_at(r + dr, c + dc) == Some(stone) =>
            {
                has_gap = true;
                span += 1;
            }
            Stone::Empty => {
                open_ends += 1;
                break;
            }
            _ => break, // Opponent stone blocks
        }
        r += dr;
        c += dc;
    }

    // Dead segment: not enough room on this line to ever complete it
    let behind = free_run(board, prev_r, prev_c, -dr, -dc, stone, win_length);
    let ahead = free_run(board, r, c, dr, dc, stone, win_length);
    if span + behind + ahead < win_length {
        return None;
    }

    let category = classify(positions.len(), open_ends, has_gap, win_length)?;
    Some(ThreatInfo {
        category,
        score: table.score(category),
        positions,
    })
}

/// Detect every threat `stone` has on the board.
///
/// Segments in the same direction that share a stone (`O_OO_O`, the tail of
/// `OO_OO`) are one threat: the group keeps its strongest reading.
pub fn detect_threats(
    board: &Board,
    stone: Stone,
    win_length: usize,
    table: &ScoreTable,
) -> Vec<ThreatInfo> {
    let mut by_direction: [Vec<LineGroup>; 4] = Default::default();

    for pos in board.stones_of(stone) {
        for (d, &(dr, dc)) in DIRECTIONS.iter().enumerate() {
            let Some(threat) = scan_segment(board, pos, dr, dc, stone, win_length, table) else {
                continue;
            };
            let groups = &mut by_direction[d];
            match groups
                .iter_mut()
                .find(|g| threat.positions.iter().any(|p| g.stones.contains(p)))
            {
                Some(group) => group.merge(threat),
                None => groups.push(LineGroup {
                    stones: threat.positions.clone(),
                    best: threat,
                }),
            }
        }
    }

    by_direction
        .into_iter()
        .flatten()
        .map(|group| group.best)
        .collect()
}

/// Overlapping segments along one direction.
struct LineGroup {
    stones: Vec<usize>,
    best: ThreatInfo,
}

impl LineGroup {
    fn merge(&mut self, threat: ThreatInfo) {
        for &p in &threat.positions {
            if !self.stones.contains(&p) {
                self.stones.push(p);
            }
        }
        let stronger = threat.category < self.best.category
            || (threat.category == self.best.category
                && threat.positions.len() > self.best.positions.len());
        if stronger {
            self.best = threat;
        }
    }
}

/// Aggregated threats of one side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThreatSummary {
    pub fives: u32,
    pub open_fours: u32,
    /// Blocked fours and gapped potential wins
    pub fours: u32,
    pub open_threes: u32,
    /// Sum of threat scores including combination bonuses
    pub total: i64,
}

impl ThreatSummary {
    /// Fold a list of threats, adding combination bonuses.
    pub fn from_threats<'a>(
        threats: impl IntoIterator<Item = &'a ThreatInfo>,
        table: &ScoreTable,
    ) -> Self {
        let mut summary = ThreatSummary::default();
        for threat in threats {
            summary.add(threat.category, threat.score);
        }
        summary.total += summary.combo_count() * table.combo;
        summary
    }

    /// Count one threat of `category` worth `score`, without combo bonuses.
    pub fn add(&mut self, category: ThreatCategory, score: i64) {
        self.total += score;
        match category {
            ThreatCategory::Five => self.fives += 1,
            ThreatCategory::OpenFour => self.open_fours += 1,
            c if c.is_four() => self.fours += 1,
            ThreatCategory::OpenThree => self.open_threes += 1,
            _ => {}
        }
    }

    /// Number of combination bonuses that apply
    pub fn combo_count(&self) -> i64 {
        let fours = self.open_fours + self.fours;
        let mut combos = 0;
        // Two fours: only one can be blocked
        if fours >= 2 {
            combos += 1;
        }
        // Four plus open three: blocking the four lets the three promote
        if fours >= 1 && self.open_threes >= 1 {
            combos += 1;
        }
        // Two open threes: one becomes an open four
        if self.open_threes >= 2 {
            combos += 1;
        }
        combos
    }

    /// Threats that win by force unless the opponent has a faster one
    pub fn is_decisive(&self) -> bool {
        self.fives > 0 || self.open_fours > 0 || self.fours >= 2 || (self.fours >= 1 && self.open_threes >= 1)
    }
}

/// Detect and summarize in one call.
pub fn summarize(board: &Board, stone: Stone, win_length: usize, table: &ScoreTable) -> ThreatSummary {
    let threats = detect_threats(board, stone, win_length, table);
    ThreatSummary::from_threats(&threats, table)
}
