// src/search/classical.rs

use super::{CancelToken, SearchEvent, SearchOutcome, pause};
use crate::core::{AddressSpace, CellState};
use log::{debug, trace};
use std::sync::Arc;
use std::time::Duration;

/// Linear scan over the rooms in permutation order, one room per delay.
#[derive(Debug, Clone)]
pub struct ClassicalSearch {
    space: Arc<AddressSpace>,
    delay: Duration,
}

impl ClassicalSearch {
    /// Scan `space`, waiting `delay` on every room.
    pub fn new(space: Arc<AddressSpace>, delay: Duration) -> Self {
        Self { space, delay }
    }

    /// Runs the scan to the target, exhaustion or cancellation.
    ///
    /// Each room is marked `Checking` for one delay, then either `Found`
    /// (terminal) or reverted to `Unchecked`. Cancellation is polled before
    /// each room and leaves the last emitted state as it is.
    pub async fn run<F>(&self, cancel: &CancelToken, mut sink: F) -> SearchOutcome
    where
        F: FnMut(SearchEvent),
    {
        let target = self.space.target();
        let mut checks = 0u64;

        for (index, &value) in self.space.permutation().iter().enumerate() {
            if cancel.is_cancelled() {
                debug!("classical search cancelled after {} checks", checks);
                return SearchOutcome::Cancelled { checks };
            }

            checks += 1;
            trace!("classical check {}: room {} holds {}", checks, index, value);
            sink(SearchEvent::Probe { index, value, checks });
            sink(SearchEvent::Mark { index, state: CellState::Checking });
            pause(self.delay).await;

            if value == target {
                sink(SearchEvent::Mark { index, state: CellState::Found });
                debug!("classical search found {} at room {} after {} checks", target, index, checks);
                return SearchOutcome::Found { index, checks };
            }
            sink(SearchEvent::Mark { index, state: CellState::Unchecked });
        }

        SearchOutcome::Exhausted { checks }
    }
}
