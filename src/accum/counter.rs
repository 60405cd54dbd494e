//! Counter types and width selection for accumulator cells.

use crate::util::math::bits_required;
use crate::util::{HoughMatchError, HoughMatchResult};
use std::fmt::Debug;

/// Unsigned integer usable as an accumulator cell.
pub trait Counter: Copy + Default + Ord + Debug + Send + Sync + 'static {
    /// Number of value bits.
    const BITS: u32;
    /// Largest representable count.
    const MAX: Self;

    /// Adds one vote, saturating at `MAX`.
    fn increment(self) -> Self;

    /// Adds two counts, saturating at `MAX`.
    fn saturating_add(self, other: Self) -> Self;

    /// Widens the count for ranking and reporting.
    fn to_u64(self) -> u64;
}

macro_rules! impl_counter {
    ($($ty:ty),+) => {
        $(
            impl Counter for $ty {
                const BITS: u32 = <$ty>::BITS;
                const MAX: Self = <$ty>::MAX;

                #[inline]
                fn increment(self) -> Self {
                    <$ty>::saturating_add(self, 1)
                }

                #[inline]
                fn saturating_add(self, other: Self) -> Self {
                    <$ty>::saturating_add(self, other)
                }

                #[inline]
                fn to_u64(self) -> u64 {
                    u64::from(self)
                }
            }
        )+
    };
}

impl_counter!(u8, u16, u32, u64);

/// Checks that `C` can hold `bound` votes in a single cell.
pub fn ensure_counter_fits<C: Counter>(bound: u64) -> HoughMatchResult<()> {
    let needed = bits_required(bound);
    if needed > C::BITS {
        return Err(HoughMatchError::CounterTooNarrow {
            bound,
            bits_required: needed,
            counter_bits: C::BITS,
        });
    }
    Ok(())
}

/// Counter width used by the high-level locate API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CounterWidth {
    /// Pick the narrowest width that fits the vote bound.
    #[default]
    Auto,
    /// 16-bit cells.
    U16,
    /// 32-bit cells.
    U32,
    /// 64-bit cells.
    U64,
}

impl CounterWidth {
    /// Returns the narrowest fixed width able to hold `bound`.
    pub fn for_bound(bound: u64) -> Self {
        match bits_required(bound) {
            0..=16 => CounterWidth::U16,
            17..=32 => CounterWidth::U32,
            _ => CounterWidth::U64,
        }
    }

    /// Returns the bit width, or `None` for `Auto`.
    pub fn bits(self) -> Option<u32> {
        match self {
            CounterWidth::Auto => None,
            CounterWidth::U16 => Some(u16::BITS),
            CounterWidth::U32 => Some(u32::BITS),
            CounterWidth::U64 => Some(u64::BITS),
        }
    }

    /// Resolves `Auto` and checks explicit widths against `bound`.
    ///
    /// The result is never `Auto`.
    pub fn resolve(self, bound: u64) -> HoughMatchResult<Self> {
        let Some(counter_bits) = self.bits() else {
            return Ok(Self::for_bound(bound));
        };
        let needed = bits_required(bound);
        if needed > counter_bits {
            return Err(HoughMatchError::CounterTooNarrow {
                bound,
                bits_required: needed,
                counter_bits,
            });
        }
        Ok(self)
    }
}
