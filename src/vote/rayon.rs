//! Rayon-parallel voting (feature-gated).
//!
//! Scene edge points are split into contiguous chunks. Each chunk votes into
//! its own accumulator, so no cell is ever shared between threads; the
//! private grids are then summed in chunk order. Since addition commutes the
//! merged grid is identical to a sequential vote.

use crate::accum::{ensure_counter_fits, Accumulator, Counter};
use crate::edges::EdgePointSet;
use crate::model::OffsetTable;
use crate::trace::{count_event, record_votes, stage_span};
use crate::util::HoughMatchResult;
use crate::vote::{vote_bound, vote_into, vote_into_cancellable, CancelToken, VoteStats};
use rayon::prelude::*;

/// Returns the chunk length used to partition `num_edges` points.
fn chunk_len(num_edges: usize, min_points_per_worker: usize) -> usize {
    let workers = rayon::current_num_threads().max(1);
    num_edges
        .div_ceil(workers)
        .max(min_points_per_worker)
        .max(1)
}

fn merge_partials<C: Counter>(
    mut acc: Accumulator<C>,
    partials: Vec<(Accumulator<C>, VoteStats)>,
) -> HoughMatchResult<(Accumulator<C>, VoteStats)> {
    let mut stats = VoteStats::default();
    for (partial, partial_stats) in partials {
        acc.merge(&partial)?;
        stats += partial_stats;
    }
    Ok((acc, stats))
}

/// Votes `scene` against `table` with one private accumulator per chunk.
///
/// `min_points_per_worker` keeps small scenes from being split into chunks
/// whose accumulator setup outweighs the voting work.
pub fn vote_parallel<C: Counter>(
    scene: &EdgePointSet,
    table: &OffsetTable,
    width: usize,
    height: usize,
    min_points_per_worker: usize,
) -> HoughMatchResult<(Accumulator<C>, VoteStats)> {
    let acc = Accumulator::<C>::new(width, height)?;
    ensure_counter_fits::<C>(vote_bound(scene.points(), table.offsets()))?;

    let chunk = chunk_len(scene.len(), min_points_per_worker);
    let _stage = stage_span!(
        "vote",
        edges = scene.len(),
        offsets = table.len(),
        chunk = chunk,
        parallel = true
    );

    let partials: Vec<(Accumulator<C>, VoteStats)> = scene
        .points()
        .par_chunks(chunk)
        .map(|edges| -> HoughMatchResult<(Accumulator<C>, VoteStats)> {
            let mut private = Accumulator::<C>::new(width, height)?;
            let stats = vote_into(&mut private, edges, table);
            Ok((private, stats))
        })
        .collect::<HoughMatchResult<_>>()?;

    count_event!("vote_workers", partials = partials.len());
    let (acc, stats) = merge_partials(acc, partials)?;
    record_votes(stats);
    Ok((acc, stats))
}

/// Cancellable variant of [`vote_parallel`].
///
/// Every worker polls `cancel` between its edge points. If any worker
/// observes cancellation the whole vote fails with `Err(Cancelled)` and no
/// partial grid is returned.
pub fn vote_parallel_cancellable<C: Counter>(
    scene: &EdgePointSet,
    table: &OffsetTable,
    width: usize,
    height: usize,
    min_points_per_worker: usize,
    cancel: &CancelToken,
) -> HoughMatchResult<(Accumulator<C>, VoteStats)> {
    let acc = Accumulator::<C>::new(width, height)?;
    ensure_counter_fits::<C>(vote_bound(scene.points(), table.offsets()))?;

    let chunk = chunk_len(scene.len(), min_points_per_worker);
    let _stage = stage_span!(
        "vote",
        edges = scene.len(),
        offsets = table.len(),
        chunk = chunk,
        parallel = true,
        cancellable = true
    );

    let partials: Vec<(Accumulator<C>, VoteStats)> = scene
        .points()
        .par_chunks(chunk)
        .map(|edges| -> HoughMatchResult<(Accumulator<C>, VoteStats)> {
            let mut private = Accumulator::<C>::new(width, height)?;
            let stats = vote_into_cancellable(&mut private, edges, table, cancel)?;
            Ok((private, stats))
        })
        .collect::<HoughMatchResult<_>>()?;

    let (acc, stats) = merge_partials(acc, partials)?;
    record_votes(stats);
    Ok((acc, stats))
}
