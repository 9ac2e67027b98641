use super::{
    base_math::{parametric_from_point, point_from_parametric},
    Vector2,
};
use crate::core::traits::Real;

/// Holds the result of intersecting two line segments (polygon edges).
#[derive(Debug, Copy, Clone)]
pub enum SegSegIntr<T>
where
    T: Real,
{
    /// Segments do not touch.
    NoIntersect,
    /// Segments touch or cross at a single point.
    Point {
        /// Parametric value for the point on the first segment.
        seg1_t: T,
        /// Parametric value for the point on the second segment.
        seg2_t: T,
    },
    /// Segments are collinear and share a stretch of non-zero length.
    Overlap {
        /// Parametric value for start of the shared stretch along the second segment.
        seg2_t0: T,
        /// Parametric value for end of the shared stretch along the second segment.
        seg2_t1: T,
    },
}

/// Clamp a parametric value to `[0, 1]`.
#[inline]
fn clamp_parametric<T>(t: T) -> T
where
    T: Real,
{
    if t < T::zero() {
        T::zero()
    } else if t > T::one() {
        T::one()
    } else {
        t
    }
}

/// Finds the intersect between the line segments `v1->v2` and `u1->u2`.
///
/// Parametric values use `P(t) = p0 + t * (p1 - p0)` for both segments. `epsilon` is a distance:
/// segments closer to parallel than `epsilon` (over their length) are treated as parallel, parallel
/// segments closer than `epsilon` to each other are collinear, and touching is decided with
/// parametric values scaled to lengths.
///
/// Degenerate (zero length) segments are not expected, polygon edges are assumed to have been
/// cleaned of repeat positions.
///
/// # Examples
///
/// ```
/// # use polygon_boolean::core::math::*;
/// let v1 = Vector2::new(0.0, 0.0);
/// let v2 = Vector2::new(2.0, 0.0);
/// let u1 = Vector2::new(1.0, -1.0);
/// let u2 = Vector2::new(1.0, 1.0);
/// match seg_seg_intr(v1, v2, u1, u2, 1e-5) {
///     SegSegIntr::Point { seg1_t, seg2_t } => {
///         assert_eq!(seg1_t, 0.5);
///         assert_eq!(seg2_t, 0.5);
///     }
///     r => unreachable!("expected crossing, got {:?}", r),
/// }
///
/// // collinear, second segment covers the second half of the first
/// let u1 = Vector2::new(1.0, 0.0);
/// let u2 = Vector2::new(3.0, 0.0);
/// match seg_seg_intr(v1, v2, u1, u2, 1e-5) {
///     SegSegIntr::Overlap { seg2_t0, seg2_t1 } => {
///         assert_eq!(seg2_t0, 0.0);
///         assert_eq!(seg2_t1, 0.5);
///     }
///     r => unreachable!("expected overlap, got {:?}", r),
/// }
/// ```
pub fn seg_seg_intr<T>(
    v1: Vector2<T>,
    v2: Vector2<T>,
    u1: Vector2<T>,
    u2: Vector2<T>,
    epsilon: T,
) -> SegSegIntr<T>
where
    T: Real,
{
    // parametric form with perpendicular products
    // http://geomalgorithms.com/a05-_intersect-1.html
    use SegSegIntr::*;

    let eps = epsilon;
    let v = v2 - v1;
    let u = u2 - u1;
    let w = v1 - u1;
    let seg1_length = v.length();
    let seg2_length = u.length();
    debug_assert!(
        seg1_length > T::zero() && seg2_length > T::zero(),
        "zero length edge"
    );

    let v_pdot_u = v.perp_dot(u);

    // scaled to a distance so a near parallel check does not depend on segment lengths
    let max_length = num_traits::real::Real::max(seg1_length, seg2_length);
    if !(v_pdot_u / max_length).fuzzy_eq_zero_eps(eps) {
        let seg1_t = u.perp_dot(w) / v_pdot_u;
        let seg2_t = v.perp_dot(w) / v_pdot_u;
        if !(seg1_t * seg1_length).fuzzy_in_range_eps(T::zero(), seg1_length, eps)
            || !(seg2_t * seg2_length).fuzzy_in_range_eps(T::zero(), seg2_length, eps)
        {
            return NoIntersect;
        }

        return Point {
            seg1_t: clamp_parametric(seg1_t),
            seg2_t: clamp_parametric(seg2_t),
        };
    }

    // parallel, check distance between the lines
    if !(u.perp_dot(w) / seg2_length).fuzzy_eq_zero_eps(eps) {
        return NoIntersect;
    }

    // collinear, find where the first segment's end points land along the second segment
    let mut seg2_t0 = parametric_from_point(u1, u2, v1);
    let mut seg2_t1 = parametric_from_point(u1, u2, v2);
    if seg2_t0 > seg2_t1 {
        std::mem::swap(&mut seg2_t0, &mut seg2_t1);
    }

    // using threshold check here to make intersect "sticky" to prefer considering it an intersect
    if !(seg2_t0 * seg2_length).fuzzy_lt_eps(seg2_length, eps)
        || !(seg2_t1 * seg2_length).fuzzy_gt_eps(T::zero(), eps)
    {
        return NoIntersect;
    }

    seg2_t0 = clamp_parametric(seg2_t0);
    seg2_t1 = clamp_parametric(seg2_t1);

    if ((seg2_t1 - seg2_t0) * seg2_length).fuzzy_eq_zero_eps(eps) {
        // segments line up end to end
        let point = point_from_parametric(u1, u2, seg2_t0);
        let seg1_t = clamp_parametric(parametric_from_point(v1, v2, point));
        return Point {
            seg1_t,
            seg2_t: seg2_t0,
        };
    }

    Overlap { seg2_t0, seg2_t1 }
}
