// src/search/quantum.rs

use super::{CancelToken, SearchEvent, SearchOutcome, pause};
use crate::core::{AddressSpace, CellState, Timing};
use log::{debug, trace};
use std::sync::Arc;

/// Scripted amplitude amplification: `⌊√N⌋` rounds that alternately
/// highlight the target and return the whole array to superposition.
///
/// No amplitudes are computed; only the iteration count of Grover-style
/// search is reproduced. State changes are broadcast to the whole array,
/// with the target room the only one ever addressed individually.
#[derive(Debug, Clone)]
pub struct QuantumSearch {
    space: Arc<AddressSpace>,
    timing: Timing,
}

impl QuantumSearch {
    /// Amplify towards the target of `space` using the quantum delays of `timing`.
    pub fn new(space: Arc<AddressSpace>, timing: Timing) -> Self {
        Self { space, timing }
    }

    /// Number of amplification rounds, `⌊√size⌋`.
    pub fn iterations(&self) -> usize {
        self.space.size().isqrt()
    }

    /// Runs state preparation and every amplification round.
    ///
    /// The check counter counts state preparation as iteration 1, so an
    /// uninterrupted run ends at `⌊√size⌋ + 1`. That first count is only
    /// published after the settle delay; until then every room reads
    /// `Checking` with a count of zero.
    pub async fn run<F>(&self, cancel: &CancelToken, mut sink: F) -> SearchOutcome
    where
        F: FnMut(SearchEvent),
    {
        let index = self.space.target_index();
        let rounds = self.iterations();
        let delay = self.timing.quantum_iteration_delay;

        sink(SearchEvent::Prepare { value: self.space.target() });
        pause(self.timing.settle_delay).await;
        let mut checks = 1u64;
        sink(SearchEvent::Iteration { checks });

        for round in 0..rounds {
            if cancel.is_cancelled() {
                debug!("quantum search cancelled in round {} of {}", round + 1, rounds);
                return SearchOutcome::Cancelled { checks };
            }

            sink(SearchEvent::Mark { index, state: CellState::Amplified });
            checks += 1;
            trace!("quantum round {} of {}, checks={}", round + 1, rounds, checks);
            sink(SearchEvent::Iteration { checks });
            pause(delay).await;

            if round + 1 < rounds {
                sink(SearchEvent::Broadcast { state: CellState::Checking });
                pause(delay).await;
            }
        }

        if cancel.is_cancelled() {
            debug!("quantum search cancelled after its final round");
            return SearchOutcome::Cancelled { checks };
        }

        sink(SearchEvent::Resolve { index });
        debug!("quantum search resolved room {} after {} iterations", index, checks);
        SearchOutcome::Found { index, checks }
    }
}
