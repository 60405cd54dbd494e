//! Integer helpers for counter sizing and grid arithmetic.

use crate::util::{HoughMatchError, HoughMatchResult};

/// Returns the number of bits needed to represent every value in `0..=bound`.
///
/// This is `ceil(log2(bound + 1))`, with `bits_required(0) == 0`.
pub fn bits_required(bound: u64) -> u32 {
    u64::BITS - bound.leading_zeros()
}

/// Returns `width * height`, rejecting zero-sized or overflowing grids.
pub(crate) fn grid_len(width: usize, height: usize) -> HoughMatchResult<usize> {
    if width == 0 || height == 0 {
        return Err(HoughMatchError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(HoughMatchError::InvalidDimensions { width, height })
}
