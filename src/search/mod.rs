// src/search/mod.rs

//! The two search processes raced against each other.
//!
//! Neither process owns any shared state. Each one reads an `AddressSpace`,
//! polls a `CancelToken` and reports every state transition as a
//! `SearchEvent` through a sink closure; the caller decides where the events
//! land. Delays are the only suspension points, so two processes joined in
//! one task interleave cooperatively.

pub mod classical;
pub mod quantum;
mod cancel;

pub use cancel::CancelToken;
pub use classical::ClassicalSearch;
pub use quantum::QuantumSearch;

use crate::core::CellState;
use std::time::Duration;

/// A state transition emitted by a search process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEvent {
    /// Classical: moved on to room `index`, holding `value`; `checks` rooms so far.
    Probe {
        /// Room being inspected
        index: usize,
        /// Value stored in that room
        value: u32,
        /// Rooms checked including this one
        checks: u64,
    },
    /// Quantum: every room enters superposition, tracking `value`.
    Prepare {
        /// The target value
        value: u32,
    },
    /// Quantum: iteration counter advanced.
    Iteration {
        /// Iterations so far, state preparation included
        checks: u64,
    },
    /// A single room changed state.
    Mark {
        /// Room index
        index: usize,
        /// New state
        state: CellState,
    },
    /// Every room takes the same state.
    Broadcast {
        /// New state for all rooms
        state: CellState,
    },
    /// Room `index` is `Found`, every other room is `Unchecked`.
    Resolve {
        /// The target room
        index: usize,
    },
}

/// How a search process terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The target was located at `index`.
    Found {
        /// Target room
        index: usize,
        /// Final check count
        checks: u64,
    },
    /// Every room was checked without a match.
    Exhausted {
        /// Final check count, equal to the number of rooms
        checks: u64,
    },
    /// The cancel token was observed at an iteration boundary.
    Cancelled {
        /// Check count when cancellation was observed
        checks: u64,
    },
}

impl SearchOutcome {
    /// Checks performed before termination.
    pub fn checks(&self) -> u64 {
        match self {
            SearchOutcome::Found { checks, .. }
            | SearchOutcome::Exhausted { checks }
            | SearchOutcome::Cancelled { checks } => *checks,
        }
    }

    /// True only for `Found`.
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }
}

/// Suspends for `delay`. A zero delay still yields to the scheduler so that
/// joined processes keep interleaving.
pub(crate) async fn pause(delay: Duration) {
    if delay.is_zero() {
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(delay).await;
    }
}
