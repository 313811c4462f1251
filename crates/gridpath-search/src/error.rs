use std::fmt;

use gridpath_core::Point;

use crate::config::ParamsError;

/// Errors reported by the [`Solver`](crate::Solver).
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// A run was requested without a start or end on the board.
    MissingEndpoints { start: bool, end: bool },
    /// The run parameters were rejected.
    InvalidParams(ParamsError),
    /// `step` was called with no active run.
    NotRunning,
    /// The predecessor chain ended at `at` before reaching the start.
    BacktraceBroken { at: Point },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEndpoints { start, end } => {
                let what = match (start, end) {
                    (true, true) => "a start and an end",
                    (true, false) => "a start",
                    _ => "an end",
                };
                write!(f, "place {what} before running a search")
            }
            Self::InvalidParams(e) => write!(f, "invalid run parameters: {e}"),
            Self::NotRunning => write!(f, "no search is running"),
            Self::BacktraceBroken { at } => {
                write!(f, "path reconstruction broke at {at}: no predecessor recorded")
            }
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidParams(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParamsError> for SearchError {
    fn from(e: ParamsError) -> Self {
        Self::InvalidParams(e)
    }
}
