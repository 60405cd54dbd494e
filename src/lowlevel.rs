//! Low-level building blocks for custom voting pipelines.
//!
//! These expose the individual stages behind `Locator` (offset tables,
//! voting loops, ranking, and pruning) for callers that manage their own
//! accumulators. Most users should prefer `ShapeModel` and `Locator`.

pub use crate::accum::{ensure_counter_fits, Counter};
pub use crate::model::{build_offsets, OffsetBounds, OffsetTable};
pub use crate::rank::nms::suppress_neighbors;
pub use crate::rank::topk::{rank_top_n, ranked_cmp_desc};
pub use crate::util::math::bits_required;
pub use crate::vote::{
    vote, vote_bound, vote_cancellable, vote_into, vote_into_cancellable, VoteStats,
};

#[cfg(feature = "rayon")]
pub use crate::vote::rayon::{vote_parallel, vote_parallel_cancellable};
