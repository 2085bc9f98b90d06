//! Tuning constants for the simulation.

/// Constants shared by the search processes and the error model
pub mod search_constants {
    use std::time::Duration;

    /// Per-room delay of the classical scan over 512 rooms.
    pub const CLASSICAL_DELAY_9: Duration = Duration::from_millis(50);
    /// Per-room delay of the classical scan over 65536 rooms.
    pub const CLASSICAL_DELAY_16: Duration = Duration::from_millis(5);
    /// Amplification round delay for 9-bit runs.
    pub const QUANTUM_ITERATION_DELAY_9: Duration = Duration::from_millis(50);
    /// Amplification round delay for 16-bit runs.
    pub const QUANTUM_ITERATION_DELAY_16: Duration = Duration::from_millis(200);
    /// State preparation wait before the first amplification round.
    pub const QUANTUM_SETTLE_DELAY: Duration = Duration::from_millis(1000);

    /// Number of cosmetic physical qubits, independent of the bit length.
    pub const PHYSICAL_QUBITS: usize = 16;
    /// Per-qubit fault probability, re-rolled on each fault tick.
    pub const FAULT_PROBABILITY: f64 = 0.2;
    /// Fault injection period.
    pub const FAULT_PERIOD: Duration = Duration::from_millis(3000);
    /// Error correction period.
    pub const CORRECTION_PERIOD: Duration = Duration::from_millis(6000);
}
