use crate::constants::{DEFAULT_TRIALS, SEED_ENV, TRIALS_ENV};
use crate::error::{MatchupError, Result};
use crate::estimator::DegeneratePolicy;
use crate::record::DateWindow;

/// Configuration for one head-to-head simulation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    pub team_one: String,
    pub team_two: String,

    /// Number of simulated games
    pub trials: usize,

    /// Only games inside this window feed the team profiles
    pub window: DateWindow,

    /// Fixed seed for reproducible runs. Drawn from entropy when unset.
    pub seed: Option<u64>,

    pub degenerate_policy: DegeneratePolicy,
}

impl SimulationConfig {
    pub fn new(team_one: impl Into<String>, team_two: impl Into<String>) -> Self {
        SimulationConfig {
            team_one: team_one.into(),
            team_two: team_two.into(),
            trials: DEFAULT_TRIALS,
            window: DateWindow::default(),
            seed: None,
            degenerate_policy: DegeneratePolicy::default(),
        }
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_window(mut self, window: DateWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate_policy = policy;
        self
    }

    /// Apply `MATCHUP_TRIALS` and `MATCHUP_SEED` from the process environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(TRIALS_ENV) {
            self.trials = parse_override(TRIALS_ENV, &raw)?;
        }
        if let Some(raw) = lookup(SEED_ENV) {
            self.seed = Some(parse_override(SEED_ENV, &raw)?);
        }
        Ok(self)
    }

    /// Validate the simulation configuration
    pub fn validate(&self) -> Result<()> {
        if self.team_one.trim().is_empty() || self.team_two.trim().is_empty() {
            return Err(MatchupError::InvalidConfiguration(
                "team identifiers must not be empty".to_string(),
            ));
        }

        if self.team_one == self.team_two {
            return Err(MatchupError::InvalidConfiguration(format!(
                "a team cannot play itself ({})",
                self.team_one
            )));
        }

        if self.trials == 0 {
            return Err(MatchupError::InvalidConfiguration(
                "trials must be greater than 0".to_string(),
            ));
        }

        self.window.validate()
    }
}

fn parse_override<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| MatchupError::InvalidConfiguration(format!("{}={:?}: {}", key, raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::new("GSW", "CLE");
        assert_eq!(config.trials, 10_000);
        assert_eq!(config.window, DateWindow::default());
        assert!(config.seed.is_none());
        assert_eq!(config.degenerate_policy, DegeneratePolicy::Reject);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_trials() {
        let config = SimulationConfig::new("GSW", "CLE").with_trials(0);
        assert!(matches!(config.validate(), Err(MatchupError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_validate_same_team() {
        assert!(SimulationConfig::new("GSW", "GSW").validate().is_err());
        assert!(SimulationConfig::new("", "GSW").validate().is_err());
    }

    #[test]
    fn test_validate_inverted_window() {
        let window = DateWindow {
            start: NaiveDate::from_ymd_opt(2018, 6, 1),
            end: NaiveDate::from_ymd_opt(2017, 10, 1),
        };
        let config = SimulationConfig::new("GSW", "CLE").with_window(window);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides_applied() {
        let env: HashMap<&str, &str> = [(TRIALS_ENV, "2500"), (SEED_ENV, " 42 ")].into_iter().collect();
        let config = SimulationConfig::new("GSW", "CLE")
            .with_overrides_from(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.trials, 2500);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_missing_overrides_keep_values() {
        let config = SimulationConfig::new("GSW", "CLE")
            .with_seed(9)
            .with_overrides_from(|_| None)
            .unwrap();
        assert_eq!(config.trials, 10_000);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_bad_override_rejected() {
        let result = SimulationConfig::new("GSW", "CLE")
            .with_overrides_from(|key| (key == TRIALS_ENV).then(|| "lots".to_string()));
        assert!(matches!(result, Err(MatchupError::InvalidConfiguration(_))));
    }
}
