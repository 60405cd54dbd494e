//! Shape models: a reference point plus its offset table.
//!
//! Building a model once amortizes the offset table across any number of
//! scenes. The reference point is supplied by the caller; model and scene
//! reference points are only comparable when both come from the same locator
//! at the same image scale.

use crate::edges::{EdgeMask, EdgePointSet};
use crate::geometry::Point2D;
use crate::util::HoughMatchResult;

mod table;

pub use table::{build_offsets, OffsetBounds, OffsetTable};

/// Compiled shape model used for voting.
#[derive(Clone, Debug)]
pub struct ShapeModel {
    reference: Point2D,
    table: OffsetTable,
}

impl ShapeModel {
    /// Builds a model from edge points and a reference point.
    pub fn from_edges(reference: Point2D, edges: &EdgePointSet) -> HoughMatchResult<Self> {
        Ok(Self {
            reference,
            table: build_offsets(reference, edges)?,
        })
    }

    /// Builds a model from a binary edge mask (non-zero pixels are edges).
    pub fn from_mask(reference: Point2D, mask: EdgeMask<'_>) -> HoughMatchResult<Self> {
        Self::from_edges(reference, &EdgePointSet::from_mask(mask))
    }

    /// Returns the reference point the offsets are relative to.
    pub fn reference(&self) -> Point2D {
        self.reference
    }

    /// Returns the offset table.
    pub fn table(&self) -> &OffsetTable {
        &self.table
    }

    /// Returns the number of model edge points.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true when the model has no edge points.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the extent of the model around its reference point.
    pub fn bounds(&self) -> Option<OffsetBounds> {
        self.table.bounds()
    }
}
