// src/simulation/snapshot.rs

use super::results::SpeedupReport;
use super::run::{Lane, SimulationRun};
use crate::core::{AddressSpace, BitLength, CellState, ProcessProgress, RoomAddress};
use crate::noise::QubitErrorModel;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Read-only copy of the controller state, taken at one instant.
///
/// This is everything a renderer needs. The full permutation is reachable
/// through `address_space` but left out of the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Address-space width.
    pub bit_length: BitLength,
    /// Number of rooms.
    pub room_count: usize,
    /// Amplification rounds a full quantum run performs.
    pub quantum_iterations: usize,
    /// Value being searched for.
    pub target: u32,
    /// Room holding the target.
    pub target_index: usize,
    /// Classical counters.
    pub classical: ProcessProgress,
    /// Quantum counters.
    pub quantum: ProcessProgress,
    /// Per-room classical states.
    pub classical_states: Vec<CellState>,
    /// Per-room quantum states.
    pub quantum_states: Vec<CellState>,
    /// `has_error` flag per physical qubit.
    pub qubits: Vec<bool>,
    /// A run is in flight.
    pub running: bool,
    /// The last run was stopped before finishing.
    pub cancelled: bool,
    /// The last run finished uninterrupted.
    pub completed: bool,
    #[serde(skip)]
    address_space: Arc<AddressSpace>,
}

impl Snapshot {
    pub(crate) fn capture(run: &SimulationRun, qubits: &QubitErrorModel) -> Self {
        let space = run.space();
        let bit_length = space.bit_length();
        Self {
            bit_length,
            room_count: space.size(),
            quantum_iterations: bit_length.quantum_iterations(),
            target: space.target(),
            target_index: space.target_index(),
            classical: run.lane(Lane::Classical).progress,
            quantum: run.lane(Lane::Quantum).progress,
            classical_states: run.lane(Lane::Classical).states.clone(),
            quantum_states: run.lane(Lane::Quantum).states.clone(),
            qubits: qubits.qubits().to_vec(),
            running: run.running,
            cancelled: run.cancelled,
            completed: run.completed,
            address_space: space,
        }
    }

    /// The address space the snapshot was taken from.
    pub fn address_space(&self) -> &AddressSpace {
        &self.address_space
    }

    /// Counters of `lane`.
    pub fn progress(&self, lane: Lane) -> &ProcessProgress {
        match lane {
            Lane::Classical => &self.classical,
            Lane::Quantum => &self.quantum,
        }
    }

    /// Room states of `lane`.
    pub fn states(&self, lane: Lane) -> &[CellState] {
        match lane {
            Lane::Classical => &self.classical_states,
            Lane::Quantum => &self.quantum_states,
        }
    }

    /// Value to show for `lane`: its current value, or the target while idle.
    pub fn displayed_value(&self, lane: Lane) -> u32 {
        match self.progress(lane).current_value {
            0 => self.target,
            value => value,
        }
    }

    /// Binary address of `displayed_value`.
    pub fn room_address(&self, lane: Lane) -> RoomAddress {
        RoomAddress::new(self.displayed_value(lane), self.bit_length)
    }

    /// Result of the last run, only when it completed. A cancelled run
    /// never produces one.
    pub fn report(&self) -> Option<SpeedupReport> {
        self.completed.then(|| {
            SpeedupReport::from_counts(self.bit_length, self.classical.checks_count, self.quantum.checks_count)
        })
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Snapshot ({}, target {} in room {}):", self.bit_length, self.target, self.target_index)?;
        writeln!(f, "  classical: {} / {}", self.classical, self.room_count)?;
        writeln!(f, "  quantum: {} / {}", self.quantum, self.quantum_iterations)?;
        write!(
            f,
            "  running={} completed={} faulty qubits={}",
            self.running,
            self.completed,
            self.qubits.iter().filter(|&&fault| fault).count()
        )
    }
}
