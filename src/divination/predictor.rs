//! Positional walk over the nine palaces
//!
//! Each count is walked from a starting palace, where the starting palace
//! itself is step one. Counts are reduced modulo nine with zero standing
//! for a full lap, so the effective step is always 1 to 9.

use crate::error::{Error, Result};
use crate::models::{Prediction, Symbol, SYMBOL_COUNT};

const CYCLE: i64 = SYMBOL_COUNT as i64;

/// Walk `count` palaces starting from `start_position`.
///
/// `start_position` must be in `0..=8`; `count` may be any integer and is
/// reduced Euclidean-modulo nine.
pub fn step(start_position: usize, count: i64) -> Symbol {
    let mut normalized = count.rem_euclid(CYCLE);
    if normalized == 0 {
        normalized = CYCLE;
    }
    let end_position = (start_position as i64 + normalized - 1).rem_euclid(CYCLE);
    Symbol::lookup(end_position as usize)
}

/// Reject non-positive counts before any walking happens
pub fn validate_numbers(num1: i64, num2: i64, num3: i64) -> Result<()> {
    for (name, value) in [("num1", num1), ("num2", num2), ("num3", num3)] {
        if value < 1 {
            return Err(Error::InvalidNumber { name, value });
        }
    }
    Ok(())
}

/// Compute the three transmissions for three positive counts
pub fn generate_prediction(num1: i64, num2: i64, num3: i64) -> Result<Prediction> {
    validate_numbers(num1, num2, num3)?;

    // Reduce before summing so large inputs cannot overflow
    let offset1 = (num1 - 1).rem_euclid(CYCLE);
    let offset2 = (num2 - 1).rem_euclid(CYCLE);

    let first = step(0, num1);
    let second = step(offset1 as usize, num2);
    let third = step(((offset1 + offset2) % CYCLE) as usize, num3);

    tracing::debug!(num1, num2, num3, %first, %second, %third, "Generated prediction");

    Ok(Prediction::from_symbols([first, second, third]))
}
