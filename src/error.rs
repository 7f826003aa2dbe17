use thiserror::Error;

/// Errors raised while estimating team profiles or simulating a matchup
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchupError {
    #[error("No games found for team {team} in the selected window")]
    EmptyDataset { team: String },

    #[error("Team {team} has a single qualifying game; spread is undefined")]
    DegenerateDistribution { team: String },

    #[error("Unknown team: {0}")]
    UnknownTeam(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid team profile: {reason}")]
    InvalidProfile { reason: String },

    #[error("Simulation cancelled after {completed} trials")]
    Cancelled { completed: usize },
}

/// Result type for matchup operations
pub type Result<T> = std::result::Result<T, MatchupError>;
