use statrs::statistics::Statistics;
use tracing::event;

use crate::error::{MatchupError, Result};
use crate::record::GameRecord;
use crate::team::TeamProfile;

/// How to treat a team with exactly one qualifying game.
///
/// Sample standard deviation has zero degrees of freedom there.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DegeneratePolicy {
    /// Fail with [`MatchupError::DegenerateDistribution`]
    #[default]
    Reject,

    /// Use the single game as the mean with a spread of 0.0
    ZeroSpread,
}

/// Estimate a team's scoring profile using [`DegeneratePolicy::Reject`].
///
/// `records` may contain every team; only rows for `team_id` are used.
pub fn estimate(records: &[GameRecord], team_id: &str) -> Result<TeamProfile> {
    estimate_with_policy(records, team_id, DegeneratePolicy::default())
}

/// Estimate a team's scoring profile.
///
/// Means are arithmetic, spreads are sample standard deviations (N - 1).
///
/// # Errors
/// * [`MatchupError::EmptyDataset`] if no record belongs to `team_id`
/// * [`MatchupError::DegenerateDistribution`] if one record does and the
///   policy is `Reject`
pub fn estimate_with_policy(
    records: &[GameRecord],
    team_id: &str,
    policy: DegeneratePolicy,
) -> Result<TeamProfile> {
    let (scored, allowed): (Vec<f64>, Vec<f64>) = records
        .iter()
        .filter(|r| r.team == team_id)
        .map(|r| (f64::from(r.points_scored), f64::from(r.points_allowed)))
        .unzip();

    let profile = match scored.len() {
        0 => {
            return Err(MatchupError::EmptyDataset {
                team: team_id.to_string(),
            })
        }
        1 => match policy {
            DegeneratePolicy::Reject => {
                return Err(MatchupError::DegenerateDistribution {
                    team: team_id.to_string(),
                })
            }
            DegeneratePolicy::ZeroSpread => TeamProfile::new(scored[0], 0.0, allowed[0], 0.0),
        },
        _ => TeamProfile::new(
            scored.iter().mean(),
            scored.iter().std_dev(),
            allowed.iter().mean(),
            allowed.iter().std_dev(),
        ),
    };

    event!(
        tracing::Level::DEBUG,
        team = team_id,
        games = scored.len(),
        mean_scored = profile.mean_scored,
        std_scored = profile.std_scored,
        mean_allowed = profile.mean_allowed,
        std_allowed = profile.std_allowed,
        "Estimated team profile"
    );

    Ok(profile)
}
