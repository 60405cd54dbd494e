//! Vote accumulators.
//!
//! An `Accumulator` is a dense grid of counters with exactly the scene's
//! dimensions. Cells are stored row-major (`y * width + x`), but every
//! enumeration that feeds ranking walks the grid column-major (x outer,
//! y inner); that order is the ranking tie-break.
//!
//! The counter type is explicit. `u16` matches narrow legacy tables, `u32` is
//! the default, and `u64` covers anything larger. `ensure_counter_fits` and
//! `CounterWidth` pick a width from the vote bound of the inputs.

mod counter;

pub use counter::{ensure_counter_fits, Counter, CounterWidth};

use crate::geometry::Point2D;
use crate::trace::stage_span;
use crate::util::math::grid_len;
use crate::util::{HoughMatchError, HoughMatchResult};

/// Dense grid of vote counters sized to a scene.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Accumulator<C = u32> {
    counts: Vec<C>,
    width: usize,
    height: usize,
}

impl<C: Counter> Accumulator<C> {
    /// Creates an all-zero accumulator of `width x height` cells.
    pub fn new(width: usize, height: usize) -> HoughMatchResult<Self> {
        let len = grid_len(width, height)?;
        Ok(Self {
            counts: vec![C::default(); len],
            width,
            height,
        })
    }

    /// Returns the width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns the number of cells.
    pub fn num_cells(&self) -> usize {
        self.counts.len()
    }

    /// Returns the count at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<C> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.counts.get(y * self.width + x).copied()
    }

    /// Returns the count at a location, or `None` outside the grid.
    pub fn score_at(&self, location: Point2D) -> Option<C> {
        let (x, y) = location.to_grid(self.width, self.height)?;
        self.get(x, y)
    }

    /// Returns the raw row-major counts.
    pub fn counts(&self) -> &[C] {
        &self.counts
    }

    /// Returns row `y` of the grid.
    pub fn row(&self, y: usize) -> Option<&[C]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.counts.get(start..start + self.width)
    }

    /// Adds one vote at `(x, y)`; the caller guarantees bounds.
    #[inline]
    pub(crate) fn increment(&mut self, x: usize, y: usize) {
        let idx = y * self.width + x;
        self.counts[idx] = self.counts[idx].increment();
    }

    /// Returns the largest count, or zero for an all-zero grid.
    pub fn max_score(&self) -> C {
        self.counts.iter().copied().max().unwrap_or_default()
    }

    /// Returns the sum of all cells.
    pub fn total_votes(&self) -> u64 {
        self.counts
            .iter()
            .fold(0u64, |acc, c| acc.saturating_add(c.to_u64()))
    }

    /// Enumerates `(location, count)` for every cell, x outer and y inner.
    pub fn iter_column_major(&self) -> impl Iterator<Item = (Point2D, C)> + '_ {
        let (width, height) = (self.width, self.height);
        (0..width).flat_map(move |x| {
            (0..height).map(move |y| (Point2D::from_grid(x, y), self.counts[y * width + x]))
        })
    }

    /// Adds `other` cell by cell, saturating at the counter maximum.
    pub fn merge(&mut self, other: &Accumulator<C>) -> HoughMatchResult<()> {
        if self.dims() != other.dims() {
            return Err(HoughMatchError::DimensionMismatch {
                expected: self.dims(),
                got: other.dims(),
            });
        }
        let _stage = stage_span!("merge", cells = self.counts.len());
        for (dst, &src) in self.counts.iter_mut().zip(other.counts.iter()) {
            *dst = dst.saturating_add(src);
        }
        Ok(())
    }

    /// Scales counts linearly so the maximum maps to 255.
    ///
    /// Values are floored; an all-zero grid stays all zeros. The output is
    /// row-major with `stride == width`.
    pub fn to_normalized_u8(&self) -> Vec<u8> {
        let max = u128::from(self.max_score().to_u64());
        if max == 0 {
            return vec![0u8; self.counts.len()];
        }
        self.counts
            .iter()
            .map(|c| (u128::from(c.to_u64()) * 255 / max) as u8)
            .collect()
    }
}
