//! Sequential voting loops.
//!
//! Votes run backward: for a scene edge point `e` and offset `o`, the
//! reference point that would have produced `e` is `e - o`. Only edge points
//! are visited, so the cost is `O(E * M)` regardless of the scene area.

use crate::accum::{Accumulator, Counter};
use crate::geometry::{Offset, Point2D};
use crate::model::OffsetTable;
use crate::util::{HoughMatchError, HoughMatchResult};
use crate::vote::{CancelToken, VoteStats};

#[inline]
fn vote_point<C: Counter>(
    acc: &mut Accumulator<C>,
    edge: Point2D,
    offsets: &[Offset],
    stats: &mut VoteStats,
) {
    let (width, height) = acc.dims();
    for &offset in offsets {
        match edge
            .checked_sub_offset(offset)
            .and_then(|candidate| candidate.to_grid(width, height))
        {
            Some((x, y)) => {
                acc.increment(x, y);
                stats.cast += 1;
            }
            None => stats.dropped += 1,
        }
    }
}

/// Casts votes from `edges` into `acc`.
///
/// Candidates outside the accumulator are dropped and counted in
/// `VoteStats::dropped`; this never fails.
pub fn vote_into<C: Counter>(
    acc: &mut Accumulator<C>,
    edges: &[Point2D],
    table: &OffsetTable,
) -> VoteStats {
    let offsets = table.offsets();
    let mut stats = VoteStats::default();
    for &edge in edges {
        vote_point(acc, edge, offsets, &mut stats);
    }
    stats
}

/// Same as [`vote_into`], polling `cancel` before each edge point.
///
/// Edges may come from any iterator, so points can be streamed in. On
/// cancellation the accumulator holds the votes of the points already seen
/// and should be discarded.
pub fn vote_into_cancellable<'e, C, I>(
    acc: &mut Accumulator<C>,
    edges: I,
    table: &OffsetTable,
    cancel: &CancelToken,
) -> HoughMatchResult<VoteStats>
where
    C: Counter,
    I: IntoIterator<Item = &'e Point2D>,
{
    let offsets = table.offsets();
    let mut stats = VoteStats::default();
    for &edge in edges {
        if cancel.is_cancelled() {
            return Err(HoughMatchError::Cancelled);
        }
        vote_point(acc, edge, offsets, &mut stats);
    }
    Ok(stats)
}
