// src/noise/mod.rs

//! Cosmetic physical-qubit error model shown next to the quantum lane.
//!
//! Faults are injected and corrected on two independent timers while a run
//! is in flight. Nothing here feeds back into either search.

use crate::core::search_constants::{FAULT_PROBABILITY, PHYSICAL_QUBITS};
use rand::Rng;

/// Fixed-size array of physical qubits, each either healthy or faulty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QubitErrorModel {
    faults: Vec<bool>,
}

impl Default for QubitErrorModel {
    fn default() -> Self {
        Self::new()
    }
}

impl QubitErrorModel {
    /// All `PHYSICAL_QUBITS` qubits healthy.
    pub fn new() -> Self {
        Self { faults: vec![false; PHYSICAL_QUBITS] }
    }

    /// Re-rolls every qubit independently from thread-local entropy.
    pub fn inject_faults(&mut self) {
        self.inject_faults_with(&mut rand::rng());
    }

    /// Re-rolls every qubit: faulty with probability `FAULT_PROBABILITY`.
    pub fn inject_faults_with<R: Rng>(&mut self, rng: &mut R) {
        for fault in &mut self.faults {
            *fault = rng.random_bool(FAULT_PROBABILITY);
        }
    }

    /// Error correction: clears every fault.
    pub fn correct(&mut self) {
        self.faults.fill(false);
    }

    /// `has_error` flag per qubit.
    pub fn qubits(&self) -> &[bool] {
        &self.faults
    }

    /// Number of qubits currently faulty.
    pub fn faulty_count(&self) -> usize {
        self.faults.iter().filter(|&&fault| fault).count()
    }
}
