//! Run configuration: which algorithm, which heuristic, how heavy a weighted
//! cell is, and how fast the caller should step.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use gridpath_core::Point;

use crate::distance::{euclidean, manhattan};

/// The search algorithm to run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    #[default]
    Bfs,
    Dijkstra,
    Astar,
}

impl Algorithm {
    /// Whether the algorithm reads the weight table.
    pub const fn is_weighted(self) -> bool {
        !matches!(self, Self::Bfs)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bfs => "bfs",
            Self::Dijkstra => "dijkstra",
            Self::Astar => "astar",
        })
    }
}

impl FromStr for Algorithm {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Self::Bfs),
            "dijkstra" | "djikstra" => Ok(Self::Dijkstra),
            "astar" | "a*" => Ok(Self::Astar),
            _ => Err(ParamsError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Distance estimate used by A*.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Heuristic {
    #[default]
    Euclidean,
    Manhattan,
}

impl Heuristic {
    /// Estimated remaining cost from `from` to `to`.
    #[inline]
    pub fn estimate(self, from: Point, to: Point) -> f64 {
        match self {
            Self::Euclidean => euclidean(from, to),
            Self::Manhattan => f64::from(manhattan(from, to)),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Euclidean => "euclidean",
            Self::Manhattan => "manhattan",
        })
    }
}

impl FromStr for Heuristic {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" => Ok(Self::Euclidean),
            "manhattan" => Ok(Self::Manhattan),
            _ => Err(ParamsError::UnknownHeuristic(s.to_string())),
        }
    }
}

/// Parameters of a single run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunParams {
    pub algorithm: Algorithm,
    /// Only read by A*.
    pub heuristic: Heuristic,
    /// Cost of entering a weighted cell. Must be positive.
    pub weight: u32,
    /// Scatter weighted cells over the board before a weighted search.
    pub random_weights: bool,
    /// Search-phase step rate; backtracking runs at half this rate.
    pub steps_per_second: f64,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Bfs,
            heuristic: Heuristic::Euclidean,
            weight: 5,
            random_weights: false,
            steps_per_second: 30.0,
        }
    }
}

impl RunParams {
    /// Default parameters for `algorithm`.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    /// Set the heuristic (builder).
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Set the weighted-cell cost (builder).
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// Enable or disable random weights (builder).
    pub fn with_random_weights(mut self, on: bool) -> Self {
        self.random_weights = on;
        self
    }

    /// Set the search-phase step rate (builder).
    pub fn with_steps_per_second(mut self, rate: f64) -> Self {
        self.steps_per_second = rate;
        self
    }

    /// Check that the parameters describe a runnable search.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.weight == 0 {
            return Err(ParamsError::ZeroWeight);
        }
        if !self.steps_per_second.is_finite() || self.steps_per_second <= 0.0 {
            return Err(ParamsError::InvalidRate(self.steps_per_second));
        }
        Ok(())
    }

    /// Time between two search-phase steps.
    pub fn search_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.steps_per_second)
    }

    /// Time between two backtrace steps (half the search rate).
    pub fn backtrace_interval(&self) -> Duration {
        self.search_interval() * 2
    }
}

/// Rejected run parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamsError {
    ZeroWeight,
    InvalidRate(f64),
    UnknownAlgorithm(String),
    UnknownHeuristic(String),
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroWeight => write!(f, "weighted cell cost must be positive"),
            Self::InvalidRate(r) => write!(f, "steps per second must be positive, got {r}"),
            Self::UnknownAlgorithm(s) => write!(f, "unknown algorithm \u{201c}{s}\u{201d}"),
            Self::UnknownHeuristic(s) => write!(f, "unknown heuristic \u{201c}{s}\u{201d}"),
        }
    }
}

impl std::error::Error for ParamsError {}
