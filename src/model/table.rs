//! Offset table (R-table) construction.

use crate::edges::EdgePointSet;
use crate::geometry::{Offset, Point2D};
use crate::trace::{count_event, stage_span};
use crate::util::{HoughMatchError, HoughMatchResult};

/// Offsets from a reference point to each model edge point, in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OffsetTable {
    offsets: Vec<Offset>,
}

/// Axis-aligned extent of an offset table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OffsetBounds {
    /// Smallest `dx`.
    pub min_dx: i64,
    /// Smallest `dy`.
    pub min_dy: i64,
    /// Largest `dx`.
    pub max_dx: i64,
    /// Largest `dy`.
    pub max_dy: i64,
}

impl OffsetTable {
    /// Wraps precomputed offsets without reordering them.
    pub fn from_offsets(offsets: Vec<Offset>) -> Self {
        Self { offsets }
    }

    /// Returns the number of offsets, counting duplicates.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Returns true when the table has no offsets.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Returns the offsets in build order.
    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    /// Returns the bounding box of all offsets, or `None` for an empty table.
    pub fn bounds(&self) -> Option<OffsetBounds> {
        let first = self.offsets.first()?;
        let init = OffsetBounds {
            min_dx: first.dx,
            min_dy: first.dy,
            max_dx: first.dx,
            max_dy: first.dy,
        };
        Some(self.offsets.iter().fold(init, |b, o| OffsetBounds {
            min_dx: b.min_dx.min(o.dx),
            min_dy: b.min_dy.min(o.dy),
            max_dx: b.max_dx.max(o.dx),
            max_dy: b.max_dy.max(o.dy),
        }))
    }
}

/// Builds the offset table `p - reference` for every model edge point.
///
/// Output length equals input length and order follows the input. An empty
/// edge set yields an empty table. Fails with `CoordinateOverflow` only when
/// a difference does not fit in `i64`.
pub fn build_offsets(
    reference: Point2D,
    edges: &EdgePointSet,
) -> HoughMatchResult<OffsetTable> {
    let _stage = stage_span!("build_offsets", edges = edges.len());

    let offsets = edges
        .iter()
        .map(|&p| {
            p.checked_offset_from(reference)
                .ok_or(HoughMatchError::CoordinateOverflow {
                    point: (p.x, p.y),
                    reference: (reference.x, reference.y),
                })
        })
        .collect::<HoughMatchResult<Vec<Offset>>>()?;

    count_event!("offset_table", count = offsets.len());
    Ok(OffsetTable { offsets })
}
