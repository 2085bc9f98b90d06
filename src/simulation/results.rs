// src/simulation/results.rs
use crate::core::{BitLength, SearchError};
use serde::Serialize;
use std::fmt;

/// Check counts of a completed race and the speedup they imply.
///
/// The ratio is illustrative only: it compares steps of two scripted
/// processes, not wall-clock time or real quantum hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpeedupReport {
    /// Address-space width of the run.
    pub bit_length: BitLength,
    /// Rooms the classical scan checked.
    pub classical_checks: u64,
    /// Iterations the quantum process performed.
    pub quantum_checks: u64,
}

impl SpeedupReport {
    /// Report for the given final counts.
    pub fn from_counts(bit_length: BitLength, classical_checks: u64, quantum_checks: u64) -> Self {
        Self {
            bit_length,
            classical_checks,
            quantum_checks,
        }
    }

    /// `round(classical_checks / quantum_checks)`, or `None` when the quantum
    /// process recorded no iterations.
    pub fn speedup(&self) -> Option<u64> {
        if self.quantum_checks == 0 {
            return None;
        }
        Some((self.classical_checks as f64 / self.quantum_checks as f64).round() as u64)
    }
}

impl fmt::Display for SpeedupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Race Results ({}):", self.bit_length)?;
        writeln!(f, "  Classical Method: {} checks", self.classical_checks)?;
        writeln!(f, "  Quantum Method: {} iterations", self.quantum_checks)?;
        match self.speedup() {
            Some(speedup) => write!(f, "  {}x faster using quantum search!", speedup),
            None => write!(f, "  Quantum search did not complete successfully."),
        }
    }
}

/// How a call to `SimulationController::start` ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Both processes finished uninterrupted.
    Completed(SpeedupReport),
    /// The run was stopped, reset or superseded before both finished.
    Cancelled,
    /// A run was already in flight; nothing was started.
    AlreadyRunning,
}

impl RunOutcome {
    /// The report of a completed run.
    ///
    /// # Errors
    /// `CancelledRun` or `AlreadyRunning` for the respective outcomes.
    pub fn into_report(self) -> Result<SpeedupReport, SearchError> {
        match self {
            RunOutcome::Completed(report) => Ok(report),
            RunOutcome::Cancelled => Err(SearchError::CancelledRun),
            RunOutcome::AlreadyRunning => Err(SearchError::AlreadyRunning),
        }
    }

    /// True only for `Completed`.
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed(_))
    }
}
