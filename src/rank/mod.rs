//! Result ranking and pruning.
//!
//! Includes deterministic top-N extraction and Chebyshev neighbour
//! suppression.

pub(crate) mod nms;
pub(crate) mod topk;
