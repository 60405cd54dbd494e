//! Error types for houghmatch.

use thiserror::Error;

/// Result alias for houghmatch operations.
pub type HoughMatchResult<T> = std::result::Result<T, HoughMatchError>;

/// Errors that can occur when building, voting, or ranking.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HoughMatchError {
    /// A grid was requested with a zero or overflowing size.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The row stride is shorter than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// A backing buffer cannot hold the requested view.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Two grids that must share a size do not.
    #[error("dimension mismatch: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
    /// The ranker was asked for more results than there are cells.
    #[error("requested {requested} results but the accumulator has {available} cells")]
    TopNOutOfRange { requested: usize, available: usize },
    /// The chosen counter cannot represent the largest possible vote count.
    #[error(
        "counter too narrow: {bound} votes need {bits_required} bits, counter has {counter_bits}"
    )]
    CounterTooNarrow {
        bound: u64,
        bits_required: u32,
        counter_bits: u32,
    },
    /// A model edge point is too far from the reference point for its offset
    /// to fit in `i64`.
    #[error("offset from reference {reference:?} to point {point:?} overflows")]
    CoordinateOverflow {
        point: (i64, i64),
        reference: (i64, i64),
    },
    /// The locate configuration is invalid.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// A cancellable vote was aborted before completion.
    #[error("voting cancelled")]
    Cancelled,
}
