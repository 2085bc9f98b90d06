// src/lib.rs

//! `qsearch` - Classical linear search raced against scripted amplitude
//! amplification over `2^b` rooms.
//!
//! The crate is the engine behind an educational visualization: two
//! concurrent, cancellable, time-stepped search processes share one target
//! and publish their progress through snapshots a renderer can draw. No real
//! quantum computation happens; the quantum lane only reproduces the
//! `⌊√N⌋` iteration count of Grover-style search.

pub mod core;
pub mod search;
pub mod noise;
pub mod simulation;
pub mod validation;

pub use crate::core::{AddressSpace, BitLength, CellState, ProcessProgress, RoomAddress, SearchError, SimulationConfig, Timing};
pub use crate::search::{CancelToken, ClassicalSearch, QuantumSearch, SearchEvent, SearchOutcome};
pub use crate::noise::QubitErrorModel;
pub use crate::simulation::{Lane, RunOutcome, SimulationController, Snapshot, SpeedupReport};
pub use crate::validation::{check_bijection, check_target_index, validate_address_space};

// Example 1: A full 9-bit race
// Runs both processes to completion with zero delays and reads the report.
/// ```
/// use qsearch::{BitLength, SimulationConfig, SimulationController, Timing};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SimulationConfig::new()
///     .with_bit_length(BitLength::Nine)
///     .with_timing(Timing::instant())
///     .with_seed(7);
/// let controller = SimulationController::new(config)?;
///
/// let runtime = tokio::runtime::Runtime::new()?;
/// let report = runtime.block_on(controller.start())?.into_report()?;
///
/// let snapshot = controller.snapshot();
/// // The classical scan stops exactly at the target room.
/// assert_eq!(report.classical_checks, snapshot.target_index as u64 + 1);
/// // State preparation plus floor(sqrt(512)) = 22 amplification rounds.
/// assert_eq!(report.quantum_checks, 23);
/// println!("{}", report);
/// # Ok(())
/// # }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Rejecting an unsupported width
/// ```
/// use qsearch::{SearchError, SimulationConfig, SimulationController};
///
/// let controller = SimulationController::new(SimulationConfig::new()).unwrap();
/// assert_eq!(
///     controller.change_bit_length(12),
///     Err(SearchError::InvalidConfiguration { bit_length: 12 })
/// );
/// ```
#[doc(hidden)]
const _: () = ();
