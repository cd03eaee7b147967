//! Pattern scores for Gomoku evaluation
//!
//! The magnitudes are a tuning choice and can be overridden from the config
//! file; [`ScoreTable::validate`] enforces the orderings the search relies on.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Threat categories, from strongest to weakest.
///
/// "Four", "three" and "two" are relative to the win length: a four is one
/// stone short of a win, a three two stones short, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ThreatCategory {
    /// Completed line
    Five,
    /// _OOOO_ : both ends open, cannot be stopped
    OpenFour,
    /// O_OOO or OO_OO : filling the gap completes a line
    PotentialWin,
    /// XOOOO_ : one way to complete
    BlockedFour,
    /// _OOO_ or _O_OO_ : becomes an open four if not answered
    OpenThree,
    /// XOOO_ : one side blocked
    BlockedThree,
    /// _OO_
    OpenTwo,
    /// XOO_
    BlockedTwo,
}

impl ThreatCategory {
    /// Any kind of four: one move from completing a line
    #[inline]
    pub fn is_four(self) -> bool {
        matches!(
            self,
            ThreatCategory::OpenFour | ThreatCategory::PotentialWin | ThreatCategory::BlockedFour
        )
    }
}

/// Tunable score for each threat category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTable {
    pub five: i64,
    pub open_four: i64,
    pub potential_win: i64,
    pub blocked_four: i64,
    pub open_three: i64,
    pub blocked_three: i64,
    pub open_two: i64,
    pub blocked_two: i64,
    /// Bonus for combinations the opponent cannot answer with one move:
    /// two open threes, a four plus an open three, or two fours
    pub combo: i64,
    /// Weight per Manhattan distance unit closer to the center
    pub center: i64,
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            five: 1_000_000,
            open_four: 100_000,
            potential_win: 60_000,
            blocked_four: 50_000,
            open_three: 10_000,
            blocked_three: 1_500,
            open_two: 1_000,
            blocked_two: 200,
            combo: 100_000,
            center: 3,
        }
    }
}

impl ScoreTable {
    /// Score for a category
    #[inline]
    pub fn score(&self, category: ThreatCategory) -> i64 {
        match category {
            ThreatCategory::Five => self.five,
            ThreatCategory::OpenFour => self.open_four,
            ThreatCategory::PotentialWin => self.potential_win,
            ThreatCategory::BlockedFour => self.blocked_four,
            ThreatCategory::OpenThree => self.open_three,
            ThreatCategory::BlockedThree => self.blocked_three,
            ThreatCategory::OpenTwo => self.open_two,
            ThreatCategory::BlockedTwo => self.blocked_two,
        }
    }

    /// Check the orderings the evaluation depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ladder = [
            ("five", self.five),
            ("open_four", self.open_four),
            ("potential_win", self.potential_win),
            ("blocked_four", self.blocked_four),
            ("open_three", self.open_three),
            ("blocked_three", self.blocked_three),
            ("open_two", self.open_two),
            ("blocked_two", self.blocked_two),
        ];
        for pair in ladder.windows(2) {
            let (hi_name, hi) = pair[0];
            let (lo_name, lo) = pair[1];
            // potential_win may tie blocked_four; every other step is strict
            let ok = if hi_name == "potential_win" { hi >= lo } else { hi > lo };
            if !ok {
                return Err(ConfigError::Validation(format!(
                    "scores.{hi_name} ({hi}) must exceed scores.{lo_name} ({lo})"
                )));
            }
        }
        if self.blocked_two <= 0 {
            return Err(ConfigError::Validation(
                "scores.blocked_two must be > 0".into(),
            ));
        }
        if self.open_four <= self.blocked_four + self.open_three {
            return Err(ConfigError::Validation(
                "scores.open_four must exceed blocked_four + open_three".into(),
            ));
        }
        if self.combo <= 0 || self.center < 0 {
            return Err(ConfigError::Validation(
                "scores.combo must be > 0 and scores.center >= 0".into(),
            ));
        }
        Ok(())
    }
}
