//! Post-conditions on the square builder's output
//!
//! A violation means the builder is broken, so it is fatal.

use crate::error::{AssemblyError, Result};
use shared_types::RawTx;

/// `included` must be an order-preserving subsequence of `filtered`.
pub fn check_order_preserving(filtered: &[RawTx], included: &[RawTx]) -> Result<()> {
    let mut remaining = filtered.iter();
    for (position, tx) in included.iter().enumerate() {
        if !remaining.any(|candidate| candidate == tx) {
            return Err(AssemblyError::InvariantViolation {
                reason: format!(
                    "included tx {position} is not an in-order member of the filtered set"
                ),
            });
        }
    }
    Ok(())
}

/// Square width must be a power of two no larger than `max_square_size`.
pub fn check_square_size(square_size: u64, max_square_size: u64) -> Result<()> {
    if !square_size.is_power_of_two() {
        return Err(AssemblyError::InvariantViolation {
            reason: format!("square size {square_size} is not a power of two"),
        });
    }
    if square_size > max_square_size {
        return Err(AssemblyError::InvariantViolation {
            reason: format!("square size {square_size} exceeds maximum {max_square_size}"),
        });
    }
    Ok(())
}
