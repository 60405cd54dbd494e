//! HoughMatch locates a known 2D shape in a scene under pure translation
//! using a Generalized Hough Transform.
//!
//! A model's edge points become an offset table relative to a reference
//! point; scene edge points vote backward through that table into an
//! accumulator sized to the scene; the highest cells are the most likely
//! reference-point locations. Edge detection and reference-point estimation
//! stay with the caller. Parallel voting is available via the `rayon`
//! feature and instrumentation via `tracing`.

pub mod accum;
pub mod edges;
pub mod geometry;
pub mod lowlevel;
pub mod model;
mod rank;
pub mod search;
mod trace;
pub mod util;
pub mod vote;

pub use accum::{Accumulator, Counter, CounterWidth};
pub use edges::{EdgeMask, EdgePointSet};
pub use geometry::{Offset, Point2D};
pub use model::{OffsetTable, ShapeModel};
pub use util::{HoughMatchError, HoughMatchResult};

pub use rank::nms::suppress_neighbors;
pub use rank::topk::{rank_top_n, ranked_cmp_desc, RankedResult};
pub use search::{LocateConfig, Locator};
pub use vote::{CancelToken, VoteStats};
