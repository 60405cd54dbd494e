//! Integer points and offsets on the pixel grid.
//!
//! Coordinates are signed: model edge points may sit on either side of the
//! reference point, and backward votes may land outside the scene before they
//! are bounds-checked.

use std::ops::{Add, Sub};

/// Integer pixel location (`x` is the column, `y` the row).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point2D {
    /// Column.
    pub x: i64,
    /// Row.
    pub y: i64,
}

impl Point2D {
    /// Creates a point.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Returns `(x, y)` as grid indices if the point lies in `[0, width) x [0, height)`.
    #[inline]
    pub fn to_grid(self, width: usize, height: usize) -> Option<(usize, usize)> {
        let x = usize::try_from(self.x).ok()?;
        let y = usize::try_from(self.y).ok()?;
        if x < width && y < height {
            Some((x, y))
        } else {
            None
        }
    }

    /// Steps backward along `offset`, or `None` if a coordinate would overflow.
    #[inline]
    pub fn checked_sub_offset(self, offset: Offset) -> Option<Self> {
        Some(Self {
            x: self.x.checked_sub(offset.dx)?,
            y: self.y.checked_sub(offset.dy)?,
        })
    }

    /// Returns the offset from `origin` to this point, or `None` if it does not
    /// fit in `i64`.
    #[inline]
    pub fn checked_offset_from(self, origin: Point2D) -> Option<Offset> {
        Some(Offset {
            dx: self.x.checked_sub(origin.x)?,
            dy: self.y.checked_sub(origin.y)?,
        })
    }

    /// Creates a point from grid indices.
    #[inline]
    pub(crate) fn from_grid(x: usize, y: usize) -> Self {
        Self {
            x: x as i64,
            y: y as i64,
        }
    }
}

impl From<(i64, i64)> for Point2D {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

/// Vector from a reference point to one model edge point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Offset {
    /// Horizontal displacement.
    pub dx: i64,
    /// Vertical displacement.
    pub dy: i64,
}

impl Offset {
    /// Creates an offset.
    pub const fn new(dx: i64, dy: i64) -> Self {
        Self { dx, dy }
    }
}

impl From<(i64, i64)> for Offset {
    fn from((dx, dy): (i64, i64)) -> Self {
        Self { dx, dy }
    }
}

impl Sub for Point2D {
    type Output = Offset;

    fn sub(self, rhs: Point2D) -> Offset {
        Offset {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
        }
    }
}

impl Sub<Offset> for Point2D {
    type Output = Point2D;

    fn sub(self, rhs: Offset) -> Point2D {
        Point2D {
            x: self.x - rhs.dx,
            y: self.y - rhs.dy,
        }
    }
}

impl Add<Offset> for Point2D {
    type Output = Point2D;

    fn add(self, rhs: Offset) -> Point2D {
        Point2D {
            x: self.x + rhs.dx,
            y: self.y + rhs.dy,
        }
    }
}
