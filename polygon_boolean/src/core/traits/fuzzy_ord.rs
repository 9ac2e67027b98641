use super::FuzzyEq;

/// Approximate ordering for floating point values, inclusive of the epsilon band.
pub trait FuzzyOrd: FuzzyEq {
    /// `self > other - fuzzy_epsilon`.
    fn fuzzy_gt_eps(&self, other: Self, fuzzy_epsilon: Self) -> bool;

    /// `self < other + fuzzy_epsilon`.
    fn fuzzy_lt_eps(&self, other: Self, fuzzy_epsilon: Self) -> bool;

    /// Test if `self` lies in `[min, max]` widened by `fuzzy_epsilon` on both ends.
    ///
    /// Used to decide if a parametric position (scaled to a length) lies on a segment.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polygon_boolean::core::traits::*;
    /// let seg_length = 4.0f64;
    /// assert!((1.0f64 * seg_length).fuzzy_in_range_eps(0.0, seg_length, 1e-5));
    /// assert!((-1e-6f64).fuzzy_in_range_eps(0.0, seg_length, 1e-5));
    /// assert!(!(-0.5f64).fuzzy_in_range_eps(0.0, seg_length, 1e-5));
    ///```
    #[inline]
    fn fuzzy_in_range_eps(&self, min: Self, max: Self, fuzzy_epsilon: Self) -> bool {
        self.fuzzy_gt_eps(min, fuzzy_epsilon) && self.fuzzy_lt_eps(max, fuzzy_epsilon)
    }
}

macro_rules! impl_fuzzy_ord {
    ($ty:ty) => {
        impl FuzzyOrd for $ty {
            #[inline]
            fn fuzzy_gt_eps(&self, other: $ty, fuzzy_epsilon: $ty) -> bool {
                self + fuzzy_epsilon > other
            }
            #[inline]
            fn fuzzy_lt_eps(&self, other: $ty, fuzzy_epsilon: $ty) -> bool {
                *self < other + fuzzy_epsilon
            }
        }
    };
}

impl_fuzzy_ord!(f32);
impl_fuzzy_ord!(f64);
