use super::FuzzyOrd;
use static_aabb2d_index::IndexableNum;

/// Float type the polygon algorithms run on (implemented for `f32` and `f64`).
///
/// Besides the usual real number operations the type must be fuzzy comparable (vertex positions
/// are rarely exactly equal after intersecting) and usable as a coordinate in the spatial index.
pub trait Real:
    num_traits::real::Real
    + num_traits::Bounded
    + FuzzyOrd
    + std::default::Default
    + std::fmt::Debug
    + IndexableNum
    + 'static
{
    #[inline]
    fn tau() -> Self {
        Self::from(std::f64::consts::TAU).unwrap()
    }

    #[inline]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    /// Relative tolerance multiplied by the polygon extents to get the default linear tolerance of
    /// a boolean operation.
    #[inline]
    fn relative_tolerance() -> Self {
        Self::from(1e-7).unwrap()
    }

    /// Largest finite value (resolves the `Bounded`/`num_traits::real::Real` name clash).
    #[inline]
    fn max_value() -> Self {
        num_traits::real::Real::max_value()
    }
}

impl Real for f32 {
    #[inline]
    fn tau() -> Self {
        std::f32::consts::TAU
    }

    #[inline]
    fn two() -> Self {
        2.0f32
    }

    #[inline]
    fn relative_tolerance() -> Self {
        // f32 has ~7 significant digits
        1e-5f32
    }
}

impl Real for f64 {
    #[inline]
    fn tau() -> Self {
        std::f64::consts::TAU
    }

    #[inline]
    fn two() -> Self {
        2.0f64
    }

    #[inline]
    fn relative_tolerance() -> Self {
        1e-7f64
    }
}
