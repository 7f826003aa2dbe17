/// Trials per simulation when the caller does not specify a count
pub const DEFAULT_TRIALS: usize = 10_000;

/// Trials per parallel work unit.
///
/// Batch boundaries fix which generator stream draws which trial, so changing
/// this value changes seeded results.
pub const TRIAL_BATCH_SIZE: usize = 1_000;

/// Environment variable overriding the trial count
pub const TRIALS_ENV: &str = "MATCHUP_TRIALS";

/// Environment variable supplying a fixed random seed
pub const SEED_ENV: &str = "MATCHUP_SEED";
