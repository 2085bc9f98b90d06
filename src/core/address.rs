// src/core/address.rs

use super::config::BitLength;
use super::error::SearchError;
use crate::validation;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use std::fmt;

/// The rooms being searched: a shuffled permutation of `1..=2^bits`, plus
/// the target value hidden somewhere in it.
///
/// Invariant: `permutation` is a bijection on `[1, size]` and
/// `permutation[target_index] == target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSpace {
    bit_length: BitLength,
    permutation: Vec<u32>,
    target: u32,
    target_index: usize,
}

impl AddressSpace {
    /// Generates a fresh address space from thread-local entropy.
    pub fn generate(bit_length: BitLength) -> Result<Self, SearchError> {
        Self::generate_with(bit_length, &mut rand::rng())
    }

    /// Generates an address space from the supplied RNG.
    ///
    /// The permutation is a uniform Fisher-Yates shuffle of `1..=size`. The
    /// target is sampled from the shuffled array, which is uniform over
    /// values just like drawing an index first.
    pub fn generate_with<R: Rng>(bit_length: BitLength, rng: &mut R) -> Result<Self, SearchError> {
        let size = bit_length.size() as u32;
        let mut permutation: Vec<u32> = (1..=size).collect();
        permutation.shuffle(rng);

        let target = *permutation
            .choose(rng)
            .ok_or(SearchError::NotFound { target: 0 })?;
        let target_index = locate(&permutation, target)?;

        Ok(Self {
            bit_length,
            permutation,
            target,
            target_index,
        })
    }

    /// Builds an address space from a caller-chosen room order.
    ///
    /// # Errors
    /// * `InvalidState` if `permutation` is not a bijection on `[1, 2^bits]`.
    /// * `NotFound` if `target` is not in it.
    pub fn from_parts(bit_length: BitLength, permutation: Vec<u32>, target: u32) -> Result<Self, SearchError> {
        validation::check_bijection(&permutation, bit_length.size())?;
        let target_index = locate(&permutation, target)?;
        Ok(Self {
            bit_length,
            permutation,
            target,
            target_index,
        })
    }

    /// Width of a room address.
    pub fn bit_length(&self) -> BitLength {
        self.bit_length
    }

    /// Number of rooms.
    pub fn size(&self) -> usize {
        self.permutation.len()
    }

    /// Room values in search order.
    pub fn permutation(&self) -> &[u32] {
        &self.permutation
    }

    /// The value being searched for.
    pub fn target(&self) -> u32 {
        self.target
    }

    /// Position of the target in `permutation`.
    pub fn target_index(&self) -> usize {
        self.target_index
    }

    /// Value stored in room `index`, if it exists.
    pub fn value_at(&self, index: usize) -> Option<u32> {
        self.permutation.get(index).copied()
    }
}

/// Linear scan for `target`.
fn locate(permutation: &[u32], target: u32) -> Result<usize, SearchError> {
    permutation
        .iter()
        .position(|&value| value == target)
        .ok_or(SearchError::NotFound { target })
}

/// Binary form of a room number, as shown on the address panel.
///
/// The number is encoded as-is, so the bits of room `n` sum to `n`. Room
/// `2^bits` does not fit in `bits` bits and wraps to all zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomAddress {
    value: u32,
    bit_length: BitLength,
}

impl RoomAddress {
    /// Address of room `value`. A value of `0` (idle) encodes as all zeros.
    pub fn new(value: u32, bit_length: BitLength) -> Self {
        Self { value, bit_length }
    }

    /// Room number this address was built from.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// The encoded number, `value mod 2^bits`.
    pub fn address(&self) -> u32 {
        self.value % self.bit_length.size() as u32
    }

    /// MSB-first bit string, padded to the bit length.
    pub fn bits(&self) -> String {
        format!("{:0width$b}", self.address(), width = self.bit_length.bits() as usize)
    }

    /// The bit string split into a square-ish grid: 3 rows of 3 for 9-bit,
    /// 4 rows of 4 for 16-bit.
    pub fn rows(&self) -> Vec<String> {
        let dimension = match self.bit_length {
            BitLength::Nine => 3,
            BitLength::Sixteen => 4,
        };
        let bits = self.bits();
        let per_row = bits.len() / dimension;
        (0..dimension)
            .map(|row| bits[row * per_row..(row + 1) * per_row].to_string())
            .collect()
    }

    /// Place value of every set bit, MSB first; clear bits contribute `0`.
    pub fn contributions(&self) -> Vec<u32> {
        let width = self.bit_length.bits();
        self.bits()
            .chars()
            .enumerate()
            .map(|(i, bit)| if bit == '1' { 1 << (width - 1 - i as u32) } else { 0 })
            .collect()
    }

    /// Sum of `contributions`, equal to `value` for every room below `2^bits`.
    pub fn total(&self) -> u32 {
        self.contributions().iter().sum()
    }
}

impl fmt::Display for RoomAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.bits(), self.total())
    }
}
