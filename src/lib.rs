//! Matchup Core - Monte Carlo head-to-head win probabilities.
//!
//! Estimates each team's scoring and points-allowed distributions from its
//! game history, then simulates many games between two teams to estimate
//! how often each one wins. Python bindings are available behind the
//! `python` feature.

pub mod config;
pub mod constants;
pub mod error;
pub mod estimator;
pub mod matchup;
pub mod record;
pub mod report;
pub mod simulator;
pub mod team;

#[cfg(feature = "python")]
mod python;

pub use config::SimulationConfig;
pub use constants::{DEFAULT_TRIALS, TRIAL_BATCH_SIZE};
pub use error::{MatchupError, Result};
pub use estimator::{estimate, estimate_with_policy, DegeneratePolicy};
pub use matchup::Matchup;
pub use record::{DateWindow, GameLog, GameRecord};
pub use report::MatchupReport;
pub use simulator::{run_trial, simulate, simulate_parallel, ResultTally, TrialModel, TrialOutcome};
pub use team::TeamProfile;
