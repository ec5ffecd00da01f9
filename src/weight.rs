/*!
# Edge Weights

All algorithms are generic over the numeric type of edge weights.
Weights are assumed to be non-negative; the maximum representable value of a type
serves as "infinity" for unreachable nodes.
Ratios and wins (which may become negative or fractional) are computed in `f64`.
*/

use std::{
    cmp::Ordering,
    fmt::{Debug, Display},
    iter::Sum,
    ops::{Add, AddAssign, Sub, SubAssign},
};

use num::{Bounded, ToPrimitive, Zero};

/// A non-negative numeric edge weight.
///
/// This trait is implemented for every type satisfying its bounds, such as `u32`, `u64`, `i64` or `f64`.
pub trait Weight:
    Copy
    + PartialOrd
    + Zero
    + Bounded
    + ToPrimitive
    + Add<Output = Self>
    + Sub<Output = Self>
    + AddAssign
    + SubAssign
    + Sum
    + Debug
    + Display
    + 'static
{
    /// The sentinel used for unreachable distances
    fn infinity() -> Self {
        Self::max_value()
    }

    /// Returns *true* if the weight equals the sentinel [`Weight::infinity`]
    fn is_unreached(&self) -> bool {
        *self == Self::max_value()
    }

    /// Returns *true* if the weight is strictly greater than zero
    fn is_positive(&self) -> bool {
        *self > Self::zero()
    }

    /// Converts the weight into `f64` for computing wins and ratios
    fn as_f64(&self) -> f64 {
        self.to_f64().unwrap_or(f64::INFINITY)
    }

    /// Total order on weights where incomparable values (`NaN`) are considered equal
    fn cmp_weight(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }

    /// Returns the smaller of both weights (`self` on ties)
    fn min_weight(self, other: Self) -> Self {
        if other < self { other } else { self }
    }
}

impl<T> Weight for T where
    T: Copy
        + PartialOrd
        + Zero
        + Bounded
        + ToPrimitive
        + Add<Output = Self>
        + Sub<Output = Self>
        + AddAssign
        + SubAssign
        + Sum
        + Debug
        + Display
        + 'static
{
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels() {
        assert!(u32::infinity().is_unreached());
        assert!(!0u64.is_unreached());
        assert!(f64::infinity().is_unreached());
        assert!(3i64.is_positive());
        assert!(!0.0f64.is_positive());
        assert_eq!(4u32.min_weight(2), 2);
        assert_eq!(f64::NAN.cmp_weight(&1.0), Ordering::Equal);
    }
}
