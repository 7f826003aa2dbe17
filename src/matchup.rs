use rand::Rng;
use std::sync::atomic::AtomicBool;
use tracing::event;

use crate::config::SimulationConfig;
use crate::error::{MatchupError, Result};
use crate::estimator::estimate_with_policy;
use crate::record::GameLog;
use crate::report::MatchupReport;
use crate::simulator::{simulate, simulate_parallel};
use crate::team::TeamProfile;

/// Two estimated team profiles ready to be simulated.
///
/// Built from a loaded [`GameLog`] and a [`SimulationConfig`]. Picking
/// different teams or a different window builds a new `Matchup`; profiles
/// are never recomputed in place.
#[derive(Clone, Debug)]
pub struct Matchup {
    config: SimulationConfig,
    team_one: TeamProfile,
    team_two: TeamProfile,
}

impl Matchup {
    /// Validate `config` and estimate both teams' profiles from `log`.
    ///
    /// # Errors
    /// * [`MatchupError::InvalidConfiguration`] for an invalid config
    /// * [`MatchupError::UnknownTeam`] if a team never appears in `log`
    /// * [`MatchupError::EmptyDataset`] / [`MatchupError::DegenerateDistribution`]
    ///   if a team has too few games inside the window
    pub fn prepare(log: &GameLog, config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        for team in [&config.team_one, &config.team_two] {
            if !log.contains_team(team) {
                return Err(MatchupError::UnknownTeam(team.clone()));
            }
        }

        let games = log.in_window(&config.window);
        let team_one = estimate_with_policy(&games, &config.team_one, config.degenerate_policy)?;
        let team_two = estimate_with_policy(&games, &config.team_two, config.degenerate_policy)?;

        event!(
            tracing::Level::DEBUG,
            team_one = config.team_one.as_str(),
            team_two = config.team_two.as_str(),
            games = games.len(),
            "Prepared matchup"
        );

        Ok(Matchup {
            config,
            team_one,
            team_two,
        })
    }

    /// Same settings, different pair of teams.
    pub fn with_teams(&self, log: &GameLog, team_one: &str, team_two: &str) -> Result<Self> {
        let mut config = self.config.clone();
        config.team_one = team_one.to_string();
        config.team_two = team_two.to_string();
        Matchup::prepare(log, config)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn team_one_profile(&self) -> &TeamProfile {
        &self.team_one
    }

    pub fn team_two_profile(&self) -> &TeamProfile {
        &self.team_two
    }

    /// Simulate across the rayon pool using the configured seed, or a fresh
    /// one recorded in the report.
    pub fn run(&self) -> Result<MatchupReport> {
        self.run_parallel(None)
    }

    /// Like [`Matchup::run`], stopping early once `cancel` is set.
    pub fn run_with_cancel(&self, cancel: &AtomicBool) -> Result<MatchupReport> {
        self.run_parallel(Some(cancel))
    }

    /// Simulate on the calling thread with a caller-supplied generator.
    pub fn run_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<MatchupReport> {
        let tally = simulate(
            &self.team_one,
            &self.config.team_one,
            &self.team_two,
            &self.config.team_two,
            self.config.trials,
            rng,
        )?;
        Ok(MatchupReport::new(&self.config.team_one, &self.config.team_two, tally))
    }

    fn run_parallel(&self, cancel: Option<&AtomicBool>) -> Result<MatchupReport> {
        let seed = self.config.seed.unwrap_or_else(|| {
            let seed = rand::random::<u64>();
            event!(tracing::Level::INFO, seed, "No seed configured, drew one from entropy");
            seed
        });

        let tally = simulate_parallel(
            &self.team_one,
            &self.config.team_one,
            &self.team_two,
            &self.config.team_two,
            self.config.trials,
            seed,
            cancel,
        )?;

        Ok(MatchupReport::new(&self.config.team_one, &self.config.team_two, tally).with_seed(seed))
    }
}
