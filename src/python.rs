//! Python bindings, built with the `python` feature.
//!
//! Loading game data and plotting stay on the Python side; records are
//! passed in as `(team, date, points_scored, points_allowed)` tuples.

use chrono::NaiveDate;
use pyo3::exceptions::{PyInterruptedError, PyValueError};
use pyo3::prelude::*;

use crate::constants::DEFAULT_TRIALS;
use crate::error::MatchupError;
use crate::estimator::{estimate_with_policy, DegeneratePolicy};
use crate::record::GameRecord;
use crate::report::MatchupReport;
use crate::simulator::simulate_parallel;
use crate::team::TeamProfile;

impl From<MatchupError> for PyErr {
    fn from(err: MatchupError) -> PyErr {
        match err {
            MatchupError::Cancelled { .. } => PyInterruptedError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Team scoring profile exposed to Python.
#[pyclass(name = "TeamProfile")]
#[derive(Clone, Debug)]
pub struct PyTeamProfile {
    inner: TeamProfile,
}

#[pymethods]
impl PyTeamProfile {
    #[new]
    pub fn new(mean_scored: f64, std_scored: f64, mean_allowed: f64, std_allowed: f64) -> PyResult<Self> {
        let inner = TeamProfile::new(mean_scored, std_scored, mean_allowed, std_allowed);
        inner.validate()?;
        Ok(PyTeamProfile { inner })
    }

    #[getter]
    fn mean_scored(&self) -> f64 {
        self.inner.mean_scored
    }

    #[getter]
    fn std_scored(&self) -> f64 {
        self.inner.std_scored
    }

    #[getter]
    fn mean_allowed(&self) -> f64 {
        self.inner.mean_allowed
    }

    #[getter]
    fn std_allowed(&self) -> f64 {
        self.inner.std_allowed
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "TeamProfile({}, {}, {}, {})",
            self.inner.mean_scored, self.inner.std_scored, self.inner.mean_allowed, self.inner.std_allowed
        )
    }
}

/// Simulation result exposed to Python.
#[pyclass(name = "MatchupReport")]
#[derive(Clone, Debug)]
pub struct PyMatchupReport {
    inner: MatchupReport,
}

#[pymethods]
impl PyMatchupReport {
    #[getter]
    fn team_one(&self) -> String {
        self.inner.team_one.clone()
    }

    #[getter]
    fn team_two(&self) -> String {
        self.inner.team_two.clone()
    }

    #[getter]
    fn team_one_wins(&self) -> usize {
        self.inner.tally.team_one_wins
    }

    #[getter]
    fn team_two_wins(&self) -> usize {
        self.inner.tally.team_two_wins
    }

    #[getter]
    fn ties(&self) -> usize {
        self.inner.tally.ties
    }

    #[getter]
    fn team_one_win_rate(&self) -> f64 {
        self.inner.team_one_win_rate()
    }

    #[getter]
    fn team_two_win_rate(&self) -> f64 {
        self.inner.team_two_win_rate()
    }

    #[getter]
    fn tie_rate(&self) -> f64 {
        self.inner.tie_rate()
    }

    #[getter]
    fn seed(&self) -> Option<u64> {
        self.inner.seed
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "MatchupReport({:?} {} / {:?} {} / ties {})",
            self.inner.team_one,
            self.inner.tally.team_one_wins,
            self.inner.team_two,
            self.inner.tally.team_two_wins,
            self.inner.tally.ties
        )
    }
}

/// Estimate a team's profile from `(team, date, scored, allowed)` rows.
///
/// With `allow_single_game`, a lone game yields a zero-spread profile instead
/// of raising.
#[pyfunction]
#[pyo3(signature = (records, team_id, start = None, end = None, allow_single_game = false))]
fn estimate_profile(
    records: Vec<(String, NaiveDate, u32, u32)>,
    team_id: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    allow_single_game: bool,
) -> PyResult<PyTeamProfile> {
    let window = crate::record::DateWindow::new(start, end)?;
    let games: Vec<GameRecord> = records
        .into_iter()
        .map(|(team, date, scored, allowed)| GameRecord::new(team, date, scored, allowed))
        .filter(|r| window.contains(r.date))
        .collect();

    let policy = if allow_single_game {
        DegeneratePolicy::ZeroSpread
    } else {
        DegeneratePolicy::Reject
    };
    let inner = estimate_with_policy(&games, team_id, policy)?;
    Ok(PyTeamProfile { inner })
}

/// Simulate a matchup between two profiles.
///
/// The GIL is released while trials run.
#[pyfunction]
#[pyo3(signature = (team_one, team_one_name, team_two, team_two_name, trials = DEFAULT_TRIALS, seed = None))]
fn simulate_matchup(
    py: Python<'_>,
    team_one: &PyTeamProfile,
    team_one_name: String,
    team_two: &PyTeamProfile,
    team_two_name: String,
    trials: usize,
    seed: Option<u64>,
) -> PyResult<PyMatchupReport> {
    let seed = seed.unwrap_or_else(rand::random::<u64>);
    let (one, two) = (team_one.inner, team_two.inner);
    let tally = py.allow_threads(|| {
        simulate_parallel(&one, &team_one_name, &two, &team_two_name, trials, seed, None)
    })?;

    Ok(PyMatchupReport {
        inner: MatchupReport::new(team_one_name, team_two_name, tally).with_seed(seed),
    })
}

/// Python module definition
#[pymodule]
fn matchup_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTeamProfile>()?;
    m.add_class::<PyMatchupReport>()?;

    m.add_function(wrap_pyfunction!(estimate_profile, m)?)?;
    m.add_function(wrap_pyfunction!(simulate_matchup, m)?)?;

    m.add("DEFAULT_TRIALS", DEFAULT_TRIALS)?;

    Ok(())
}
