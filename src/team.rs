use std::fmt;

use crate::error::{MatchupError, Result};

/// Scoring distribution parameters for one team.
///
/// Scored and allowed points are each modelled as a normal distribution.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TeamProfile {
    /// Mean points scored per game
    pub mean_scored: f64,

    /// Sample standard deviation of points scored
    pub std_scored: f64,

    /// Mean points allowed per game
    pub mean_allowed: f64,

    /// Sample standard deviation of points allowed
    pub std_allowed: f64,
}

impl TeamProfile {
    pub fn new(mean_scored: f64, std_scored: f64, mean_allowed: f64, std_allowed: f64) -> Self {
        TeamProfile {
            mean_scored,
            std_scored,
            mean_allowed,
            std_allowed,
        }
    }

    /// Check that means are finite and spreads are finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        for (field, mean) in [("mean_scored", self.mean_scored), ("mean_allowed", self.mean_allowed)] {
            if !mean.is_finite() {
                return Err(MatchupError::InvalidProfile {
                    reason: format!("{} is {}", field, mean),
                });
            }
        }
        for (field, std) in [("std_scored", self.std_scored), ("std_allowed", self.std_allowed)] {
            if !std.is_finite() || std < 0.0 {
                return Err(MatchupError::InvalidProfile {
                    reason: format!("{} must be finite and non-negative, got {}", field, std),
                });
            }
        }
        Ok(())
    }

    /// Expected score against `opponent`, before rounding.
    pub fn expected_score_against(&self, opponent: &TeamProfile) -> f64 {
        (self.mean_scored + opponent.mean_allowed) / 2.0
    }
}

impl fmt::Display for TeamProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scored {:.2} ± {:.2} | allowed {:.2} ± {:.2}",
            self.mean_scored, self.std_scored, self.mean_allowed, self.std_allowed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_profile() {
        assert!(TeamProfile::new(110.0, 10.0, 100.0, 8.0).validate().is_ok());
        assert!(TeamProfile::new(110.0, 0.0, 100.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_negative_spread_rejected() {
        let profile = TeamProfile::new(110.0, -1.0, 100.0, 8.0);
        assert!(matches!(profile.validate(), Err(MatchupError::InvalidProfile { .. })));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(TeamProfile::new(f64::NAN, 10.0, 100.0, 8.0).validate().is_err());
        assert!(TeamProfile::new(110.0, 10.0, 100.0, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_expected_score_blends_offense_and_defense() {
        let a = TeamProfile::new(110.0, 10.0, 100.0, 8.0);
        let b = TeamProfile::new(100.0, 10.0, 108.0, 8.0);
        assert!((a.expected_score_against(&b) - 109.0).abs() < 1e-12);
        assert!((b.expected_score_against(&a) - 100.0).abs() < 1e-12);
    }
}
