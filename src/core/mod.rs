// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod config;
pub mod address;
pub mod state;

pub use error::SearchError;
pub use config::{BitLength, SimulationConfig, Timing};
pub use address::{AddressSpace, RoomAddress};
pub use state::{CellState, ProcessProgress};

pub mod constants;
pub use constants::search_constants;
