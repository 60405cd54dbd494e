//! Top-N extraction from a populated accumulator.

use crate::accum::{Accumulator, Counter};
use crate::geometry::Point2D;
use crate::trace::{count_event, stage_span};
use crate::util::{HoughMatchError, HoughMatchResult};
use std::cmp::Ordering;

/// Candidate reference-point location with its vote count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RankedResult {
    /// Accumulator cell, i.e. the hypothesised reference point in the scene.
    pub location: Point2D,
    /// Votes in that cell when the result was taken.
    pub score: u64,
}

/// Orders results by descending score only.
///
/// Equal scores compare `Equal`, so a stable sort keeps their enumeration
/// order; that is the tie-break.
pub fn ranked_cmp_desc(a: &RankedResult, b: &RankedResult) -> Ordering {
    b.score.cmp(&a.score)
}

/// Returns the `n` highest-scoring cells.
///
/// Every cell, zero-score cells included, is enumerated column-major (x
/// outer, y inner) and stable-sorted with [`ranked_cmp_desc`], so ties keep
/// column-major order. `n` may be anywhere in `0..=width * height`.
pub fn rank_top_n<C: Counter>(
    acc: &Accumulator<C>,
    n: usize,
) -> HoughMatchResult<Vec<RankedResult>> {
    let available = acc.num_cells();
    if n > available {
        return Err(HoughMatchError::TopNOutOfRange {
            requested: n,
            available,
        });
    }
    if n == 0 {
        return Ok(Vec::new());
    }

    let _stage = stage_span!("rank", cells = available, n = n);

    let mut entries: Vec<RankedResult> = acc
        .iter_column_major()
        .map(|(location, count)| RankedResult {
            location,
            score: count.to_u64(),
        })
        .collect();
    entries.sort_by(ranked_cmp_desc);
    entries.truncate(n);

    count_event!(
        "ranked",
        count = entries.len(),
        best = entries.first().map_or(0, |r| r.score)
    );
    Ok(entries)
}
