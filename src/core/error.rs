//! Error handling logic

use std::fmt;

/// Failures surfaced by the search simulation.
///
/// Everything here is local to the controller; there is no remote failure
/// mode. `CancelledRun` and `AlreadyRunning` are not failures of the engine,
/// they only appear when a caller asks for a report from a run that never
/// produced one (see `RunOutcome::into_report`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A bit length other than the supported 9 or 16 was requested.
    InvalidConfiguration {
        /// The rejected bit length
        bit_length: u32,
    },

    /// The target is missing from the permutation. Indicates a generator bug.
    NotFound {
        /// The target value that could not be located
        target: u32,
    },

    /// The run was stopped (or superseded) before both processes finished.
    CancelledRun,

    /// `start` was called while a run was already in flight.
    AlreadyRunning,

    /// Internal bookkeeping disagreed with itself.
    InvalidState {
        /// InvalidState failure message
        message: String,
    },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::InvalidConfiguration { bit_length } => write!(
                f,
                "Invalid Configuration: {}-bit address space is not supported (use 9 or 16)",
                bit_length
            ),
            SearchError::NotFound { target } => {
                write!(f, "Target Not Found: {} is missing from the permutation", target)
            }
            SearchError::CancelledRun => write!(f, "Run Cancelled: no result was produced"),
            SearchError::AlreadyRunning => write!(f, "Already Running: a run is in progress"),
            SearchError::InvalidState { message } => write!(f, "Invalid State: {}", message),
        }
    }
}

impl std::error::Error for SearchError {}
