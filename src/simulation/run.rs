// src/simulation/run.rs

use crate::core::{AddressSpace, CellState, ProcessProgress};
use crate::search::SearchEvent;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Which of the two search processes an update belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    /// Linear scan.
    Classical,
    /// Scripted amplitude amplification.
    Quantum,
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lane::Classical => f.write_str("classical"),
            Lane::Quantum => f.write_str("quantum"),
        }
    }
}

/// Progress counters and per-room states of one lane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LaneState {
    pub(crate) progress: ProcessProgress,
    pub(crate) states: Vec<CellState>,
}

impl LaneState {
    fn new(size: usize) -> Self {
        Self {
            progress: ProcessProgress::idle(),
            states: vec![CellState::Unchecked; size],
        }
    }

    fn clear(&mut self) {
        self.progress = ProcessProgress::idle();
        self.states.fill(CellState::Unchecked);
    }

    fn apply(&mut self, event: SearchEvent) {
        match event {
            SearchEvent::Probe { index, value, checks } => {
                self.progress.checks_count = checks;
                self.progress.current_index = Some(index);
                self.progress.current_value = value;
            }
            SearchEvent::Prepare { value } => {
                self.states.fill(CellState::Checking);
                self.progress.current_value = value;
            }
            SearchEvent::Iteration { checks } => {
                self.progress.checks_count = checks;
            }
            SearchEvent::Mark { index, state } => {
                if let Some(cell) = self.states.get_mut(index) {
                    *cell = state;
                }
            }
            SearchEvent::Broadcast { state } => {
                self.states.fill(state);
            }
            SearchEvent::Resolve { index } => {
                self.states.fill(CellState::Unchecked);
                if let Some(cell) = self.states.get_mut(index) {
                    *cell = CellState::Found;
                }
            }
        }
    }
}

/// Everything one run mutates: the address space, both lanes and the
/// lifecycle flags.
///
/// Owned exclusively by the controller's session and replaced wholesale on
/// reset or bit-length change; the `generation` tells a live run apart from
/// a superseded one.
#[derive(Debug, Clone)]
pub(crate) struct SimulationRun {
    generation: u64,
    space: Arc<AddressSpace>,
    pub(crate) classical: LaneState,
    pub(crate) quantum: LaneState,
    pub(crate) running: bool,
    pub(crate) cancelled: bool,
    pub(crate) completed: bool,
}

impl SimulationRun {
    pub(crate) fn new(generation: u64, space: Arc<AddressSpace>) -> Self {
        let size = space.size();
        Self {
            generation,
            space,
            classical: LaneState::new(size),
            quantum: LaneState::new(size),
            running: false,
            cancelled: false,
            completed: false,
        }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn space(&self) -> Arc<AddressSpace> {
        Arc::clone(&self.space)
    }

    /// Clears counters and states and marks the run as in flight under a
    /// new generation, so a previous start still unwinding is ignored.
    pub(crate) fn begin(&mut self) {
        self.generation += 1;
        self.classical.clear();
        self.quantum.clear();
        self.running = true;
        self.cancelled = false;
        self.completed = false;
    }

    pub(crate) fn lane(&self, lane: Lane) -> &LaneState {
        match lane {
            Lane::Classical => &self.classical,
            Lane::Quantum => &self.quantum,
        }
    }

    pub(crate) fn apply(&mut self, lane: Lane, event: SearchEvent) {
        match lane {
            Lane::Classical => self.classical.apply(event),
            Lane::Quantum => self.quantum.apply(event),
        }
    }
}
