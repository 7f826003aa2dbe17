use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::error::{MatchupError, Result};

/// One historical game from a team's point of view.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct GameRecord {
    pub team: String,
    pub date: NaiveDate,

    /// Points the team scored
    pub points_scored: u32,

    /// Points the opponent scored
    pub points_allowed: u32,
}

impl GameRecord {
    pub fn new(team: impl Into<String>, date: NaiveDate, points_scored: u32, points_allowed: u32) -> Self {
        GameRecord {
            team: team.into(),
            date,
            points_scored,
            points_allowed,
        }
    }
}

/// Inclusive date bounds. A missing bound is open.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self> {
        let window = DateWindow { start, end };
        window.validate()?;
        Ok(window)
    }

    /// Window covering every game on or after `start`
    pub fn starting(start: NaiveDate) -> Self {
        DateWindow {
            start: Some(start),
            end: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > end {
                return Err(MatchupError::InvalidConfiguration(format!(
                    "date window starts ({}) after it ends ({})",
                    start, end
                )));
            }
        }
        Ok(())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }
}

/// Read-only collection of loaded game records.
#[derive(Clone, Debug, Default)]
pub struct GameLog {
    records: Vec<GameRecord>,
}

impl GameLog {
    pub fn new(records: Vec<GameRecord>) -> Self {
        GameLog { records }
    }

    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct team identifiers, sorted.
    pub fn team_ids(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.team.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn contains_team(&self, team: &str) -> bool {
        self.records.iter().any(|r| r.team == team)
    }

    /// Records falling inside `window`, in load order.
    pub fn in_window(&self, window: &DateWindow) -> Vec<GameRecord> {
        self.records
            .iter()
            .filter(|r| window.contains(r.date))
            .cloned()
            .collect()
    }

    /// Earliest and latest game dates, if any games are loaded.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.iter().map(|r| r.date).min()?;
        let last = self.records.iter().map(|r| r.date).max()?;
        Some((first, last))
    }
}

impl FromIterator<GameRecord> for GameLog {
    fn from_iter<I: IntoIterator<Item = GameRecord>>(iter: I) -> Self {
        GameLog::new(iter.into_iter().collect())
    }
}
