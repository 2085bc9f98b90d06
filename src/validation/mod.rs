// src/validation/mod.rs

//! Provides functions to validate an `AddressSpace` against its invariants.

use crate::core::{AddressSpace, SearchError};

/// Checks that `permutation` holds every value of `1..=size` exactly once.
///
/// # Returns
/// * `Ok(())` if the permutation is a bijection on `[1, size]`.
/// * `Err(SearchError::InvalidState)` naming the first offending value otherwise.
pub fn check_bijection(permutation: &[u32], size: usize) -> Result<(), SearchError> {
    if permutation.len() != size {
        return Err(SearchError::InvalidState {
            message: format!("Permutation has {} rooms, expected {}", permutation.len(), size),
        });
    }

    let mut seen = vec![false; size];
    for (index, &value) in permutation.iter().enumerate() {
        let slot = (value as usize).checked_sub(1).filter(|&slot| slot < size);
        match slot {
            Some(slot) if !seen[slot] => seen[slot] = true,
            Some(_) => {
                return Err(SearchError::InvalidState {
                    message: format!("Value {} appears twice (second time at room {})", value, index),
                });
            }
            None => {
                return Err(SearchError::InvalidState {
                    message: format!("Value {} at room {} is outside [1, {}]", value, index, size),
                });
            }
        }
    }
    Ok(())
}

/// Checks that the recorded target index actually holds the target.
///
/// # Returns
/// * `Err(SearchError::NotFound)` if `permutation[target_index] != target`.
pub fn check_target_index(space: &AddressSpace) -> Result<(), SearchError> {
    match space.value_at(space.target_index()) {
        Some(value) if value == space.target() => Ok(()),
        _ => Err(SearchError::NotFound { target: space.target() }),
    }
}

/// Runs every address-space check.
pub fn validate_address_space(space: &AddressSpace) -> Result<(), SearchError> {
    check_bijection(space.permutation(), space.bit_length().size())?;
    check_target_index(space)?;
    Ok(())
}
