//! Edge point sets produced by an external edge detector.
//!
//! Sets are plain sequences: duplicates are kept and each copy votes on its
//! own. `from_mask` adapts an already-computed binary edge image by scanning
//! it column-major (x outer, y inner), which fixes the order of any offset
//! table built from it.

use crate::geometry::Point2D;

mod mask;

pub use mask::EdgeMask;

/// Ordered, non-deduplicated sequence of edge points.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgePointSet {
    points: Vec<Point2D>,
}

impl EdgePointSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing point list without reordering it.
    pub fn from_points(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    /// Collects every non-zero pixel of an edge mask in column-major order.
    pub fn from_mask(mask: EdgeMask<'_>) -> Self {
        Self {
            points: mask.edge_points().collect(),
        }
    }

    /// Appends a point.
    pub fn push(&mut self, point: Point2D) {
        self.points.push(point);
    }

    /// Returns the number of points, counting duplicates.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true when the set has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the points in insertion order.
    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    /// Iterates over the points in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point2D> {
        self.points.iter()
    }
}

impl From<Vec<Point2D>> for EdgePointSet {
    fn from(points: Vec<Point2D>) -> Self {
        Self::from_points(points)
    }
}

impl FromIterator<Point2D> for EdgePointSet {
    fn from_iter<I: IntoIterator<Item = Point2D>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a EdgePointSet {
    type Item = &'a Point2D;
    type IntoIter = std::slice::Iter<'a, Point2D>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{EdgeMask, EdgePointSet};
    use crate::geometry::Point2D;

    #[test]
    fn from_mask_scans_column_major() {
        #[rustfmt::skip]
        let mask = [
            0u8, 9, 0,
            7,   0, 1,
        ];
        let edges = EdgePointSet::from_mask(EdgeMask::new(&mask, 3, 2).unwrap());
        assert_eq!(
            edges.points(),
            &[
                Point2D::new(0, 1),
                Point2D::new(1, 0),
                Point2D::new(2, 1)
            ]
        );
    }

    #[test]
    fn from_mask_ignores_stride_padding() {
        let mask = [1u8, 0, 255, 0, 1, 255];
        let edges = EdgePointSet::from_mask(EdgeMask::with_stride(&mask, 2, 2, 3).unwrap());
        assert_eq!(edges.points(), &[Point2D::new(0, 0), Point2D::new(1, 1)]);
    }

    #[test]
    fn duplicates_are_kept() {
        let p = Point2D::new(3, 4);
        let edges: EdgePointSet = [p, p].into_iter().collect();
        assert_eq!(edges.len(), 2);
    }
}
