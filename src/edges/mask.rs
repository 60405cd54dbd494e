//! Binary edge masks from an external edge detector.

use crate::geometry::Point2D;
use crate::util::{HoughMatchError, HoughMatchResult};

/// Borrowed `u8` edge mask; any non-zero pixel is an edge.
///
/// Rows may be padded: `stride` is the number of bytes between row starts.
#[derive(Copy, Clone, Debug)]
pub struct EdgeMask<'a> {
    pixels: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> EdgeMask<'a> {
    /// Wraps a tightly packed `width x height` mask.
    pub fn new(pixels: &'a [u8], width: usize, height: usize) -> HoughMatchResult<Self> {
        Self::with_stride(pixels, width, height, width)
    }

    /// Wraps a mask whose rows start `stride` bytes apart.
    pub fn with_stride(
        pixels: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
    ) -> HoughMatchResult<Self> {
        if width == 0 || height == 0 {
            return Err(HoughMatchError::InvalidDimensions { width, height });
        }
        if stride < width {
            return Err(HoughMatchError::InvalidStride { width, stride });
        }
        // The last row only needs `width` bytes, not a full stride.
        let needed = (height - 1)
            .checked_mul(stride)
            .and_then(|n| n.checked_add(width))
            .ok_or(HoughMatchError::InvalidDimensions { width, height })?;
        if pixels.len() < needed {
            return Err(HoughMatchError::BufferTooSmall {
                needed,
                got: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
            stride,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns true if `(x, y)` is inside the mask and non-zero.
    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.pixels[y * self.stride + x] != 0
    }

    /// Yields edge pixels column by column (x outer, y inner).
    pub fn edge_points(&self) -> impl Iterator<Item = Point2D> + 'a {
        let Self {
            pixels,
            width,
            height,
            stride,
        } = *self;
        (0..width).flat_map(move |x| {
            (0..height)
                .filter(move |&y| pixels[y * stride + x] != 0)
                .map(move |y| Point2D::from_grid(x, y))
        })
    }
}
