// src/core/state.rs

use serde::Serialize;
use std::fmt;

/// Visual state of one room in one search lane.
///
/// The classical lane assigns these per room. The quantum lane broadcasts a
/// single state to the whole array each round and only singles out the
/// target room as `Amplified` or `Found`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    /// Not being looked at.
    #[default]
    Unchecked,
    /// Under inspection (classical) or in superposition (quantum).
    Checking,
    /// Target amplitude boosted by an amplification round.
    Amplified,
    /// The target room, located.
    Found,
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CellState::Unchecked => "unchecked",
            CellState::Checking => "checking",
            CellState::Amplified => "amplified",
            CellState::Found => "found",
        };
        f.write_str(label)
    }
}

/// Counters one search process reports while it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ProcessProgress {
    /// Rooms checked (classical) or iterations performed (quantum).
    pub checks_count: u64,
    /// Room under inspection, `None` while idle.
    pub current_index: Option<usize>,
    /// Value under inspection, `0` while idle.
    pub current_value: u32,
}

impl ProcessProgress {
    /// Idle progress: no checks, no current room.
    pub fn idle() -> Self {
        Self::default()
    }

    /// True until the first room or iteration is recorded.
    pub fn is_idle(&self) -> bool {
        self.checks_count == 0 && self.current_index.is_none()
    }
}

impl fmt::Display for ProcessProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.current_index {
            Some(index) => write!(
                f,
                "checks={} at room {} (value {})",
                self.checks_count, index, self.current_value
            ),
            None => write!(f, "checks={} (value {})", self.checks_count, self.current_value),
        }
    }
}
