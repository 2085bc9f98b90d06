// src/simulation/mod.rs

//! Runs the classical and quantum searches side by side and aggregates
//! their progress into snapshots for a renderer.
//!
//! `SimulationController` is the only owner of run state. Both processes of
//! a run are joined inside the `start` future, so they interleave on one
//! task at their delay points; the qubit error-model timers are polled in
//! the same loop and only tick while that future is alive.

mod results;
mod run;
mod snapshot;

pub use results::{RunOutcome, SpeedupReport};
pub use run::Lane;
pub use snapshot::Snapshot;

use crate::core::search_constants::{CORRECTION_PERIOD, FAULT_PERIOD};
use crate::core::{AddressSpace, BitLength, SearchError, SimulationConfig, Timing};
use crate::noise::QubitErrorModel;
use crate::search::{CancelToken, ClassicalSearch, QuantumSearch, SearchEvent, SearchOutcome};
use crate::validation;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use run::SimulationRun;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::time::{Instant, interval_at};

/// Mutable state behind the controller handle.
struct Session {
    config: SimulationConfig,
    bit_length: BitLength,
    rng: StdRng,
    run: SimulationRun,
    cancel: CancelToken,
    qubits: QubitErrorModel,
}

impl Session {
    fn generate_space(rng: &mut StdRng, bit_length: BitLength) -> Result<Arc<AddressSpace>, SearchError> {
        let space = AddressSpace::generate_with(bit_length, rng)?;
        validation::validate_address_space(&space)?;
        Ok(Arc::new(space))
    }

    fn timing(&self) -> Timing {
        self.config.timing_for(self.bit_length)
    }

    /// Supersedes the current run (cancelling it if in flight) with a fresh
    /// one over a newly generated address space.
    fn replace_run(&mut self) -> Result<(), SearchError> {
        let space = Self::generate_space(&mut self.rng, self.bit_length)?;
        self.cancel.cancel();
        self.cancel = CancelToken::new();
        self.run = SimulationRun::new(self.run.generation() + 1, space);
        self.qubits.correct();
        Ok(())
    }
}

/// Marks the run as stopped if the `start` future is dropped before it
/// reaches `finish`.
struct RunGuard<'a> {
    controller: &'a SimulationController,
    generation: u64,
    cancel: CancelToken,
    armed: bool,
}

impl RunGuard<'_> {
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        self.cancel.cancel();
        {
            let mut session = self.controller.lock();
            if session.run.generation() != self.generation || !session.run.running {
                return;
            }
            session.run.running = false;
            session.run.cancelled = true;
            warn!("run {} dropped before finishing, cancelling it", self.generation);
        }
        self.controller.notify();
    }
}

#[derive(Debug, Clone, Copy)]
enum QubitTick {
    Fault,
    Correction,
}

/// Owner of the race: starts, stops, resets and reconfigures runs, and
/// hands out snapshots.
///
/// The handle is cheap to clone; all clones drive the same session, so
/// `stop` can be called from another task while `start` is awaiting.
#[derive(Clone)]
pub struct SimulationController {
    session: Arc<Mutex<Session>>,
    revision: Arc<watch::Sender<u64>>,
}

impl SimulationController {
    /// Creates a controller with a freshly generated address space.
    ///
    /// # Errors
    /// Propagates `SearchError::NotFound` if generation breaks its invariant.
    pub fn new(config: SimulationConfig) -> Result<Self, SearchError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let bit_length = config.bit_length;
        let space = Session::generate_space(&mut rng, bit_length)?;
        let session = Session {
            config,
            bit_length,
            rng,
            run: SimulationRun::new(0, space),
            cancel: CancelToken::new(),
            qubits: QubitErrorModel::new(),
        };
        let (revision, _) = watch::channel(0);
        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            revision: Arc::new(revision),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }

    /// Receiver whose value is bumped on every state change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Current address-space width.
    pub fn bit_length(&self) -> BitLength {
        self.lock().bit_length
    }

    /// Whether a run is in flight.
    pub fn is_running(&self) -> bool {
        self.lock().run.running
    }

    /// Copy of the current state for rendering.
    pub fn snapshot(&self) -> Snapshot {
        let session = self.lock();
        Snapshot::capture(&session.run, &session.qubits)
    }

    /// Runs both searches concurrently until both finish or the run is cancelled.
    ///
    /// Returns `RunOutcome::AlreadyRunning` without side effects if a run is
    /// in flight. Counters, indices and room states are cleared first.
    /// Dropping the future before it resolves stops the run as `stop` would.
    ///
    /// # Errors
    /// `SearchError::NotFound` if the classical scan exhausts every room.
    pub async fn start(&self) -> Result<RunOutcome, SearchError> {
        let (generation, space, timing, cancel) = {
            let mut session = self.lock();
            if session.run.running {
                debug!("start ignored: run {} already in flight", session.run.generation());
                return Ok(RunOutcome::AlreadyRunning);
            }
            session.cancel = CancelToken::new();
            session.run.begin();
            info!(
                "starting run {}: {}, target {} in room {}",
                session.run.generation(),
                session.bit_length,
                session.run.space().target(),
                session.run.space().target_index()
            );
            (session.run.generation(), session.run.space(), session.timing(), session.cancel.clone())
        };
        self.notify();
        let mut guard = RunGuard {
            controller: self,
            generation,
            cancel: cancel.clone(),
            armed: true,
        };

        let classical = ClassicalSearch::new(Arc::clone(&space), timing.classical_delay);
        let quantum = QuantumSearch::new(space, timing);
        let searches = async {
            tokio::join!(
                classical.run(&cancel, |event| self.apply(generation, Lane::Classical, event)),
                quantum.run(&cancel, |event| self.apply(generation, Lane::Quantum, event))
            )
        };
        tokio::pin!(searches);

        let now = Instant::now();
        let mut faults = interval_at(now + FAULT_PERIOD, FAULT_PERIOD);
        let mut corrections = interval_at(now + CORRECTION_PERIOD, CORRECTION_PERIOD);

        let (classical_outcome, quantum_outcome) = loop {
            tokio::select! {
                outcomes = &mut searches => break outcomes,
                _ = faults.tick() => self.tick_qubits(generation, QubitTick::Fault),
                _ = corrections.tick() => self.tick_qubits(generation, QubitTick::Correction),
            }
        };

        guard.disarm();
        self.finish(generation, &cancel, classical_outcome, quantum_outcome)
    }

    /// Cancels the run in flight. `running` drops immediately and room states
    /// freeze; the processes notice at their next iteration boundary. No-op
    /// when idle.
    pub fn stop(&self) {
        {
            let mut session = self.lock();
            if !session.run.running {
                return;
            }
            session.cancel.cancel();
            session.run.running = false;
            session.run.cancelled = true;
            info!("run {} stopped", session.run.generation());
        }
        self.notify();
    }

    /// Replaces the run with a fresh address space and cleared progress.
    ///
    /// A run still in flight is cancelled and its remaining events are
    /// discarded. Renderers should keep reset disabled while running.
    pub fn reset(&self) -> Result<(), SearchError> {
        {
            let mut session = self.lock();
            if session.run.running {
                warn!("reset while run {} is in flight, cancelling it", session.run.generation());
            }
            session.replace_run()?;
            info!("reset to run {} ({})", session.run.generation(), session.bit_length);
        }
        self.notify();
        Ok(())
    }

    /// Switches to `bit_length` bits and resets.
    ///
    /// No-op if the width is unchanged or a run is in flight.
    ///
    /// # Errors
    /// `SearchError::InvalidConfiguration` for anything other than 9 or 16.
    pub fn change_bit_length(&self, bit_length: u32) -> Result<(), SearchError> {
        let bit_length = BitLength::try_from(bit_length)?;
        {
            let mut session = self.lock();
            if session.bit_length == bit_length {
                return Ok(());
            }
            if session.run.running {
                debug!("bit length change to {} ignored while running", bit_length);
                return Ok(());
            }
            session.bit_length = bit_length;
            session.replace_run()?;
            info!("switched to {}", bit_length);
        }
        self.notify();
        Ok(())
    }

    fn apply(&self, generation: u64, lane: Lane, event: SearchEvent) {
        {
            let mut session = self.lock();
            if session.run.generation() != generation || !session.run.running {
                return;
            }
            session.run.apply(lane, event);
        }
        self.notify();
    }

    fn tick_qubits(&self, generation: u64, tick: QubitTick) {
        {
            let mut session = self.lock();
            if session.run.generation() != generation || !session.run.running {
                return;
            }
            match tick {
                QubitTick::Fault => session.qubits.inject_faults(),
                QubitTick::Correction => session.qubits.correct(),
            }
            debug!("qubit {:?} tick, {} faulty", tick, session.qubits.faulty_count());
        }
        self.notify();
    }

    fn finish(
        &self,
        generation: u64,
        cancel: &CancelToken,
        classical: SearchOutcome,
        quantum: SearchOutcome,
    ) -> Result<RunOutcome, SearchError> {
        let outcome = {
            let mut session = self.lock();
            if session.run.generation() != generation || cancel.is_cancelled() {
                info!(
                    "run {} cancelled (classical {} checks, quantum {} iterations)",
                    generation,
                    classical.checks(),
                    quantum.checks()
                );
                return Ok(RunOutcome::Cancelled);
            }

            session.run.running = false;
            if let SearchOutcome::Exhausted { checks } = classical {
                warn!("run {} exhausted all {} rooms without a match", generation, checks);
                Err(SearchError::NotFound { target: session.run.space().target() })
            } else {
                session.run.completed = true;
                let report = SpeedupReport::from_counts(
                    session.bit_length,
                    session.run.classical.progress.checks_count,
                    session.run.quantum.progress.checks_count,
                );
                info!(
                    "run {} complete: {} classical checks vs {} quantum iterations",
                    generation, report.classical_checks, report.quantum_checks
                );
                Ok(RunOutcome::Completed(report))
            }
        };
        self.notify();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CellState;

    fn controller(bit_length: BitLength) -> SimulationController {
        let config = SimulationConfig::new().with_bit_length(bit_length).with_seed(42);
        SimulationController::new(config).expect("controller")
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_while_running_is_ignored() {
        let ctl = controller(BitLength::Nine);
        let runner = ctl.clone();
        let handle = tokio::spawn(async move { runner.start().await });
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        assert_eq!(ctl.start().await, Ok(RunOutcome::AlreadyRunning));
        let outcome = handle.await.expect("join").expect("run");
        assert!(outcome.is_completed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_events_are_discarded_after_reset() {
        let ctl = controller(BitLength::Nine);
        let runner = ctl.clone();
        let handle = tokio::spawn(async move { runner.start().await });
        tokio::time::sleep(std::time::Duration::from_millis(500)).await;

        ctl.reset().expect("reset");
        let outcome = handle.await.expect("join").expect("run");
        assert_eq!(outcome, RunOutcome::Cancelled);

        let snapshot = ctl.snapshot();
        assert!(!snapshot.running);
        assert!(!snapshot.completed);
        assert_eq!(snapshot.classical.checks_count, 0);
        assert_eq!(snapshot.quantum.checks_count, 0);
        assert!(snapshot.classical_states.iter().all(|&state| state == CellState::Unchecked));
        assert!(snapshot.quantum_states.iter().all(|&state| state == CellState::Unchecked));
    }

    #[tokio::test(start_paused = true)]
    async fn test_qubit_faults_only_tick_while_running() {
        let ctl = controller(BitLength::Sixteen);
        tokio::time::sleep(FAULT_PERIOD * 3).await;
        assert!(ctl.snapshot().qubits.iter().all(|&fault| !fault));

        ctl.start().await.expect("run");
        // After the run the timers are gone; whatever state they left stays put.
        let after = ctl.snapshot().qubits;
        tokio::time::sleep(CORRECTION_PERIOD * 3).await;
        assert_eq!(ctl.snapshot().qubits, after);
    }
}
