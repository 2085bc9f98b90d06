// src/core/config.rs

//! Run configuration: the supported address-space sizes and their pacing.

use super::constants::search_constants::*;
use super::error::SearchError;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Width of a room address. Only two configurations are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u32")]
pub enum BitLength {
    /// 9-bit demo, 512 rooms.
    Nine,
    /// 16-bit demo, 65536 rooms.
    Sixteen,
}

impl BitLength {
    /// Number of address bits.
    pub fn bits(self) -> u32 {
        match self {
            BitLength::Nine => 9,
            BitLength::Sixteen => 16,
        }
    }

    /// Number of rooms, `2^bits`.
    pub fn size(self) -> usize {
        1usize << self.bits()
    }

    /// Amplification rounds for this size, `⌊√size⌋`.
    pub fn quantum_iterations(self) -> usize {
        self.size().isqrt()
    }
}

impl TryFrom<u32> for BitLength {
    type Error = SearchError;

    fn try_from(bit_length: u32) -> Result<Self, Self::Error> {
        match bit_length {
            9 => Ok(BitLength::Nine),
            16 => Ok(BitLength::Sixteen),
            _ => Err(SearchError::InvalidConfiguration { bit_length }),
        }
    }
}

impl From<BitLength> for u32 {
    fn from(bit_length: BitLength) -> Self {
        bit_length.bits()
    }
}

impl fmt::Display for BitLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit ({} rooms)", self.bits(), self.size())
    }
}

/// Delays applied by the two search processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Wait per classical room check.
    pub classical_delay: Duration,
    /// Wait per amplification round, and again per re-superposition.
    pub quantum_iteration_delay: Duration,
    /// Wait for quantum state preparation.
    pub settle_delay: Duration,
}

impl Timing {
    /// Default pacing: slow enough to follow 512 rooms, fast enough to scan 65536.
    pub fn for_bit_length(bit_length: BitLength) -> Self {
        match bit_length {
            BitLength::Nine => Self {
                classical_delay: CLASSICAL_DELAY_9,
                quantum_iteration_delay: QUANTUM_ITERATION_DELAY_9,
                settle_delay: QUANTUM_SETTLE_DELAY,
            },
            BitLength::Sixteen => Self {
                classical_delay: CLASSICAL_DELAY_16,
                quantum_iteration_delay: QUANTUM_ITERATION_DELAY_16,
                settle_delay: QUANTUM_SETTLE_DELAY,
            },
        }
    }

    /// No waiting at all. Processes still yield at every step.
    pub fn instant() -> Self {
        Self {
            classical_delay: Duration::ZERO,
            quantum_iteration_delay: Duration::ZERO,
            settle_delay: Duration::ZERO,
        }
    }
}

/// Settings a `SimulationController` is created with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Initial address-space width.
    pub bit_length: BitLength,
    /// Fixed pacing for every bit length. `None` uses `Timing::for_bit_length`.
    pub timing: Option<Timing>,
    /// Seed for the address-space generator. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            bit_length: BitLength::Sixteen,
            timing: None,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Default configuration (16-bit, default pacing, unseeded).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial bit length.
    pub fn with_bit_length(mut self, bit_length: BitLength) -> Self {
        self.bit_length = bit_length;
        self
    }

    /// Pins the pacing, regardless of later bit-length changes.
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = Some(timing);
        self
    }

    /// Makes address-space generation reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Pacing in effect for `bit_length`.
    pub fn timing_for(&self, bit_length: BitLength) -> Timing {
        self.timing.unwrap_or_else(|| Timing::for_bit_length(bit_length))
    }
}
