use std::fmt;

use crate::simulator::ResultTally;

/// Finalized outcome of a matchup simulation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct MatchupReport {
    pub team_one: String,
    pub team_two: String,
    pub tally: ResultTally,

    /// Seed the run was drawn from, when it can be replayed
    pub seed: Option<u64>,
}

impl MatchupReport {
    pub fn new(team_one: impl Into<String>, team_two: impl Into<String>, tally: ResultTally) -> Self {
        MatchupReport {
            team_one: team_one.into(),
            team_two: team_two.into(),
            tally,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn trials(&self) -> usize {
        self.tally.trials()
    }

    pub fn team_one_win_rate(&self) -> f64 {
        self.tally.team_one_win_rate()
    }

    pub fn team_two_win_rate(&self) -> f64 {
        self.tally.team_two_win_rate()
    }

    pub fn tie_rate(&self) -> f64 {
        self.tally.tie_rate()
    }
}

impl fmt::Display for MatchupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} won {:.4}% of the time.", self.team_one, 100.0 * self.team_one_win_rate())?;
        writeln!(f, "{} won {:.4}% of the time.", self.team_two, 100.0 * self.team_two_win_rate())?;
        write!(f, "Both tied at {:.4}% of the time.", 100.0 * self.tie_rate())
    }
}
