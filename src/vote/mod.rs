//! Voting engine: scene edge points plus an offset table into an accumulator.
//!
//! Voting is total once an accumulator exists. The fallible entry points here
//! only validate the scene size and the counter width before the first vote
//! is cast. With the `rayon` feature, `rayon::vote_parallel` partitions the
//! scene edge points across workers that each vote into a private
//! accumulator, then sums them.

use crate::accum::{ensure_counter_fits, Accumulator, Counter};
use crate::edges::EdgePointSet;
use crate::geometry::{Offset, Point2D};
use crate::model::OffsetTable;
use crate::trace::{count_event, record_votes, stage_span};
use crate::util::HoughMatchResult;
use std::collections::HashMap;
use std::hash::Hash;
use std::ops::AddAssign;

mod cancel;
pub mod scalar;

#[cfg(feature = "rayon")]
pub mod rayon;

pub use cancel::CancelToken;
pub use scalar::{vote_into, vote_into_cancellable};

/// Counts of votes cast into the grid and dropped outside it.
///
/// `cast + dropped` always equals `edges * offsets`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VoteStats {
    /// Votes that landed inside the accumulator.
    pub cast: u64,
    /// Votes whose candidate fell outside the accumulator.
    pub dropped: u64,
}

impl AddAssign for VoteStats {
    fn add_assign(&mut self, rhs: Self) {
        self.cast += rhs.cast;
        self.dropped += rhs.dropped;
    }
}

fn max_multiplicity<T: Copy + Eq + Hash>(items: &[T]) -> u64 {
    let mut counts: HashMap<T, u64> = HashMap::with_capacity(items.len());
    let mut max = 0u64;
    for &item in items {
        let count = counts.entry(item).or_insert(0);
        *count += 1;
        max = max.max(*count);
    }
    max
}

/// Upper bound on the count any single cell can reach.
///
/// A cell `c` receives one vote per pair `(e, o)` with `e - o == c`, so it is
/// bounded both by `E` times the largest offset multiplicity and by `M` times
/// the largest edge point multiplicity. For duplicate-free inputs this is
/// `min(E, M)`.
pub fn vote_bound(edges: &[Point2D], offsets: &[Offset]) -> u64 {
    if edges.is_empty() || offsets.is_empty() {
        return 0;
    }
    let num_edges = edges.len() as u64;
    let num_offsets = offsets.len() as u64;
    let by_edges = num_edges.saturating_mul(max_multiplicity(offsets));
    let by_offsets = num_offsets.saturating_mul(max_multiplicity(edges));
    by_edges.min(by_offsets)
}

/// Votes `scene` against `table` into a fresh `width x height` accumulator.
///
/// Fails if the grid is empty or if `C` is too narrow for the vote bound;
/// neither check depends on where the votes land.
pub fn vote<C: Counter>(
    scene: &EdgePointSet,
    table: &OffsetTable,
    width: usize,
    height: usize,
) -> HoughMatchResult<(Accumulator<C>, VoteStats)> {
    let _stage = stage_span!(
        "vote",
        edges = scene.len(),
        offsets = table.len(),
        width = width,
        height = height
    );

    let mut acc = Accumulator::<C>::new(width, height)?;
    ensure_counter_fits::<C>(vote_bound(scene.points(), table.offsets()))?;
    let stats = vote_into(&mut acc, scene.points(), table);

    record_votes(stats);
    Ok((acc, stats))
}

/// Cancellable variant of [`vote`]; cancellation yields `Err(Cancelled)`.
pub fn vote_cancellable<C: Counter>(
    scene: &EdgePointSet,
    table: &OffsetTable,
    width: usize,
    height: usize,
    cancel: &CancelToken,
) -> HoughMatchResult<(Accumulator<C>, VoteStats)> {
    let _stage = stage_span!(
        "vote",
        edges = scene.len(),
        offsets = table.len(),
        cancellable = true
    );

    let mut acc = Accumulator::<C>::new(width, height)?;
    ensure_counter_fits::<C>(vote_bound(scene.points(), table.offsets()))?;
    let stats = match vote_into_cancellable(&mut acc, scene.points(), table, cancel) {
        Ok(stats) => stats,
        Err(err) => {
            count_event!("vote_cancelled", edges = scene.len());
            return Err(err);
        }
    };

    record_votes(stats);
    Ok((acc, stats))
}
