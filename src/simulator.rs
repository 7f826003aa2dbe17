use rand::distributions::Distribution;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use statrs::distribution::Normal;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::event;

use crate::constants::TRIAL_BATCH_SIZE;
use crate::error::{MatchupError, Result};
use crate::team::TeamProfile;

/// Result of a single simulated game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrialOutcome {
    TeamOneWin,
    TeamTwoWin,
    Tie,
}

/// Win/loss/tie counters for one simulation run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResultTally {
    pub team_one_wins: usize,
    pub team_two_wins: usize,
    pub ties: usize,
}

impl ResultTally {
    pub fn record(&mut self, outcome: TrialOutcome) {
        match outcome {
            TrialOutcome::TeamOneWin => self.team_one_wins += 1,
            TrialOutcome::TeamTwoWin => self.team_two_wins += 1,
            TrialOutcome::Tie => self.ties += 1,
        }
    }

    /// Combine counters from two disjoint sets of trials
    pub fn merge(self, other: ResultTally) -> ResultTally {
        ResultTally {
            team_one_wins: self.team_one_wins + other.team_one_wins,
            team_two_wins: self.team_two_wins + other.team_two_wins,
            ties: self.ties + other.ties,
        }
    }

    pub fn trials(&self) -> usize {
        self.team_one_wins + self.team_two_wins + self.ties
    }

    pub fn team_one_win_rate(&self) -> f64 {
        self.rate(self.team_one_wins)
    }

    pub fn team_two_win_rate(&self) -> f64 {
        self.rate(self.team_two_wins)
    }

    pub fn tie_rate(&self) -> f64 {
        self.rate(self.ties)
    }

    fn rate(&self, count: usize) -> f64 {
        match self.trials() {
            0 => 0.0,
            n => count as f64 / n as f64,
        }
    }
}

/// Round a simulated score half away from zero.
///
/// 100.5 becomes 101 and -100.5 becomes -101.
pub fn round_score(score: f64) -> i64 {
    score.round() as i64
}

/// Classify a game from the two unrounded scores.
pub fn compare_scores(team_one_score: f64, team_two_score: f64) -> TrialOutcome {
    use std::cmp::Ordering::*;

    match round_score(team_one_score).cmp(&round_score(team_two_score)) {
        Greater => TrialOutcome::TeamOneWin,
        Less => TrialOutcome::TeamTwoWin,
        Equal => TrialOutcome::Tie,
    }
}

/// A normal distribution, or a point mass when the spread is zero.
#[derive(Clone, Debug)]
enum ScoreDistribution {
    Fixed(f64),
    Normal(Normal),
}

impl ScoreDistribution {
    fn new(mean: f64, std_dev: f64) -> Result<Self> {
        if std_dev == 0.0 {
            return Ok(ScoreDistribution::Fixed(mean));
        }
        Normal::new(mean, std_dev)
            .map(ScoreDistribution::Normal)
            .map_err(|e| MatchupError::InvalidProfile {
                reason: format!("N({}, {}): {}", mean, std_dev, e),
            })
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            ScoreDistribution::Fixed(value) => *value,
            ScoreDistribution::Normal(normal) => normal.sample(rng),
        }
    }
}

/// Single-game model for a validated pair of profiles.
///
/// Each team's score is the average of a draw from its own scoring
/// distribution and a draw from the opponent's points-allowed distribution.
#[derive(Clone, Debug)]
pub struct TrialModel {
    one_offense: ScoreDistribution,
    two_defense: ScoreDistribution,
    two_offense: ScoreDistribution,
    one_defense: ScoreDistribution,
}

impl TrialModel {
    pub fn new(team_one: &TeamProfile, team_two: &TeamProfile) -> Result<Self> {
        team_one.validate()?;
        team_two.validate()?;

        Ok(TrialModel {
            one_offense: ScoreDistribution::new(team_one.mean_scored, team_one.std_scored)?,
            two_defense: ScoreDistribution::new(team_two.mean_allowed, team_two.std_allowed)?,
            two_offense: ScoreDistribution::new(team_two.mean_scored, team_two.std_scored)?,
            one_defense: ScoreDistribution::new(team_one.mean_allowed, team_one.std_allowed)?,
        })
    }

    /// Simulate one game.
    pub fn play<R: Rng + ?Sized>(&self, rng: &mut R) -> TrialOutcome {
        let team_one_score = (self.one_offense.sample(rng) + self.two_defense.sample(rng)) / 2.0;
        let team_two_score = (self.two_offense.sample(rng) + self.one_defense.sample(rng)) / 2.0;
        compare_scores(team_one_score, team_two_score)
    }

    /// Simulate `trials` games and count the outcomes.
    pub fn play_many<R: Rng + ?Sized>(&self, trials: usize, rng: &mut R) -> ResultTally {
        let mut tally = ResultTally::default();
        for _ in 0..trials {
            tally.record(self.play(rng));
        }
        tally
    }
}

/// Simulate a single game between two teams.
pub fn run_trial<R: Rng + ?Sized>(
    team_one: &TeamProfile,
    team_two: &TeamProfile,
    rng: &mut R,
) -> Result<TrialOutcome> {
    Ok(TrialModel::new(team_one, team_two)?.play(rng))
}

fn check_trial_count(trial_count: usize) -> Result<()> {
    if trial_count == 0 {
        return Err(MatchupError::InvalidConfiguration(
            "trial count must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

/// Run `trial_count` independent games on the calling thread.
///
/// Both profiles and the trial count are checked before the first draw, so
/// the call either completes every trial or returns an error.
pub fn simulate<R: Rng + ?Sized>(
    team_one: &TeamProfile,
    team_one_name: &str,
    team_two: &TeamProfile,
    team_two_name: &str,
    trial_count: usize,
    rng: &mut R,
) -> Result<ResultTally> {
    check_trial_count(trial_count)?;
    let model = TrialModel::new(team_one, team_two)?;

    event!(
        tracing::Level::INFO,
        team_one = team_one_name,
        team_two = team_two_name,
        trials = trial_count,
        "Starting matchup simulation"
    );

    let tally = model.play_many(trial_count, rng);

    event!(
        tracing::Level::INFO,
        team_one_wins = tally.team_one_wins,
        team_two_wins = tally.team_two_wins,
        ties = tally.ties,
        "Finished matchup simulation"
    );

    Ok(tally)
}

/// Generator for one batch of a seeded parallel run.
///
/// Every batch shares the seed but draws from its own ChaCha stream.
pub fn batch_rng(seed: u64, batch: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(batch as u64);
    rng
}

/// Run `trial_count` games across the rayon thread pool.
///
/// Trials are split into batches of [`TRIAL_BATCH_SIZE`]; batch `i` draws
/// from [`batch_rng`]`(seed, i)`, so the tally depends only on the seed and
/// the trial count. `cancel` is checked before each batch starts.
///
/// # Errors
/// * [`MatchupError::InvalidConfiguration`] if `trial_count` is 0
/// * [`MatchupError::InvalidProfile`] if either profile is malformed
/// * [`MatchupError::Cancelled`] if `cancel` was set during the run
pub fn simulate_parallel(
    team_one: &TeamProfile,
    team_one_name: &str,
    team_two: &TeamProfile,
    team_two_name: &str,
    trial_count: usize,
    seed: u64,
    cancel: Option<&AtomicBool>,
) -> Result<ResultTally> {
    check_trial_count(trial_count)?;
    let model = TrialModel::new(team_one, team_two)?;
    let num_batches = trial_count.div_ceil(TRIAL_BATCH_SIZE);

    event!(
        tracing::Level::INFO,
        team_one = team_one_name,
        team_two = team_two_name,
        trials = trial_count,
        batches = num_batches,
        seed,
        "Starting parallel matchup simulation"
    );

    let completed = AtomicUsize::new(0);
    let tally = (0..num_batches)
        .into_par_iter()
        .map(|batch| {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                return Err(MatchupError::Cancelled {
                    completed: completed.load(Ordering::Relaxed),
                });
            }

            let start = batch * TRIAL_BATCH_SIZE;
            let trials = TRIAL_BATCH_SIZE.min(trial_count - start);
            let tally = model.play_many(trials, &mut batch_rng(seed, batch));
            completed.fetch_add(trials, Ordering::Relaxed);

            event!(tracing::Level::TRACE, batch, trials, "Finished trial batch");
            Ok(tally)
        })
        .try_reduce(ResultTally::default, |a, b| Ok(a.merge(b)))?;

    event!(
        tracing::Level::INFO,
        team_one_wins = tally.team_one_wins,
        team_two_wins = tally.team_two_wins,
        ties = tally.ties,
        "Finished parallel matchup simulation"
    );

    Ok(tally)
}
