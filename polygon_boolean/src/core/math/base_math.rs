use super::Vector2;
use crate::core::traits::Real;

/// Returns the (min, max) values from `v1` and `v2`.
///
/// # Examples
///
/// ```
/// # use polygon_boolean::core::math::*;
/// let (min_val, max_val) = min_max(8, 4);
/// assert_eq!(min_val, 4);
/// assert_eq!(max_val, 8);
/// ```
#[inline]
pub fn min_max<T>(v1: T, v2: T) -> (T, T)
where
    T: PartialOrd,
{
    if v1 < v2 {
        (v1, v2)
    } else {
        (v2, v1)
    }
}

/// Normalize radians to be between `0` and `2PI`, e.g. `-PI/4` becomes `7PI/4` and `5PI` becomes
/// `PI`.
///
/// # Examples
///
/// ```
/// # use polygon_boolean::core::math::*;
/// # use polygon_boolean::core::traits::*;
/// use std::f64::consts::PI;
/// assert!(normalize_radians(5.0 * PI).fuzzy_eq(PI));
/// assert!(normalize_radians(-PI / 4.0).fuzzy_eq(7.0 * PI / 4.0));
/// assert!(normalize_radians(PI).fuzzy_eq(PI));
/// ```
#[inline]
pub fn normalize_radians<T>(angle: T) -> T
where
    T: Real,
{
    if angle >= T::zero() && angle <= T::tau() {
        return angle;
    }

    angle - (angle / T::tau()).floor() * T::tau()
}

/// Counter clockwise angle in `[0, 2PI)` to turn from direction `from_dir` to direction `to_dir`.
///
/// # Examples
///
/// ```
/// # use polygon_boolean::core::math::*;
/// # use polygon_boolean::core::traits::*;
/// use std::f64::consts::PI;
/// let east = Vector2::new(1.0, 0.0);
/// let north = Vector2::new(0.0, 2.0);
/// assert!(ccw_turn_angle(east, north).fuzzy_eq(PI / 2.0));
/// assert!(ccw_turn_angle(north, east).fuzzy_eq(3.0 * PI / 2.0));
/// assert!(ccw_turn_angle(east, east).fuzzy_eq(0.0));
/// ```
#[inline]
pub fn ccw_turn_angle<T>(from_dir: Vector2<T>, to_dir: Vector2<T>) -> T
where
    T: Real,
{
    let a = normalize_radians(angle(Vector2::zero(), to_dir) - angle(Vector2::zero(), from_dir));
    if a >= T::tau() {
        T::zero()
    } else {
        a
    }
}

/// Distance squared between the points `p0` and `p1`.
#[inline]
pub fn dist_squared<T>(p0: Vector2<T>, p1: Vector2<T>) -> T
where
    T: Real,
{
    let d = p0 - p1;
    d.dot(d)
}

/// Angle of the direction vector described by `p0` to `p1`.
#[inline]
pub fn angle<T>(p0: Vector2<T>, p1: Vector2<T>) -> T
where
    T: Real,
{
    T::atan2(p1.y - p0.y, p1.x - p0.x)
}

/// Midpoint of a line segment defined by `p0` to `p1`.
#[inline]
pub fn midpoint<T>(p0: Vector2<T>, p1: Vector2<T>) -> Vector2<T>
where
    T: Real,
{
    Vector2::new((p0.x + p1.x) / T::two(), (p0.y + p1.y) / T::two())
}

/// Returns the point on the line segment going from `p0` to `p1` at parametric value `t`.
#[inline]
pub fn point_from_parametric<T>(p0: Vector2<T>, p1: Vector2<T>, t: T) -> Vector2<T>
where
    T: Real,
{
    p0 + (p1 - p0).scale(t)
}

/// Returns the parametric value of the projection of `point` onto the line going from `p0` to
/// `p1` (`0` at `p0`, `1` at `p1`).
///
/// Unlike a coordinate ratio this does not require `point` to lie exactly on the line. Returns
/// zero if `p0` and `p1` are the same position.
#[inline]
pub fn parametric_from_point<T>(p0: Vector2<T>, p1: Vector2<T>, point: Vector2<T>) -> T
where
    T: Real,
{
    let v = p1 - p0;
    let len2 = v.length_squared();
    if len2 == T::zero() {
        return T::zero();
    }

    (point - p0).dot(v) / len2
}

/// Returns the closest point on the line segment from `p0` to `p1` to the `point` given.
#[inline]
pub fn line_seg_closest_point<T>(p0: Vector2<T>, p1: Vector2<T>, point: Vector2<T>) -> Vector2<T>
where
    T: Real,
{
    // See: http://geomalgorithms.com/a02-_lines.html
    let v = p1 - p0;
    let w = point - p0;
    let c1 = w.dot(v);
    if c1 < T::fuzzy_epsilon() {
        return p0;
    }

    let c2 = v.length_squared();
    if c2 < c1 + T::fuzzy_epsilon() {
        return p1;
    }

    let b = c1 / c2;
    p0 + v.scale(b)
}

/// Helper function to avoid repeating code for is_left and is_right checks.
#[inline]
fn perp_dot_test_value<T>(p0: Vector2<T>, p1: Vector2<T>, point: Vector2<T>) -> T
where
    T: Real,
{
    (p1.x - p0.x) * (point.y - p0.y) - (p1.y - p0.y) * (point.x - p0.x)
}

/// Returns true if `point` is left of a direction vector.
///
/// Direction vector is defined as `p1 - p0`.
///
/// # Examples
///
/// ```
/// # use polygon_boolean::core::math::*;
/// let p0 = Vector2::new(1.0, 1.0);
/// let p1 = Vector2::new(2.0, 2.0);
/// assert!(is_left(p0, p1, Vector2::new(0.0, 1.0)));
/// assert!(!is_left(p0, p1, Vector2::new(1.0, 0.0)));
/// ```
#[inline]
pub fn is_left<T>(p0: Vector2<T>, p1: Vector2<T>, point: Vector2<T>) -> bool
where
    T: Real,
{
    perp_dot_test_value(p0, p1, point) > T::zero()
}

/// Tests if the unit direction `w` leaving a boundary corner points into the filled side of the
/// corner.
///
/// The corner is formed by arriving along unit direction `dir_in` and leaving along unit direction
/// `dir_out`; the filled side is to the left of travel. `w` is assumed not to coincide with either
/// boundary direction (callers test that first). `epsilon` is used to decide if the corner is
/// straight.
///
/// # Examples
///
/// ```
/// # use polygon_boolean::core::math::*;
/// let east = Vector2::new(1.0, 0.0);
/// let north = Vector2::new(0.0, 1.0);
/// let north_west = Vector2::new(-1.0, 1.0).normalize();
/// let south_west = Vector2::new(-1.0, -1.0).normalize();
/// // left turn (convex corner of a counter clockwise ring)
/// assert!(direction_in_corner(east, north, north_west, 1e-8));
/// assert!(!direction_in_corner(east, north, south_west, 1e-8));
/// // straight through, filled side is up
/// assert!(direction_in_corner(east, east, north_west, 1e-8));
/// ```
pub fn direction_in_corner<T>(dir_in: Vector2<T>, dir_out: Vector2<T>, w: Vector2<T>, epsilon: T) -> bool
where
    T: Real,
{
    let turn = dir_in.perp_dot(dir_out);
    let left_of_in = dir_in.perp_dot(w) > T::zero();
    let left_of_out = dir_out.perp_dot(w) > T::zero();
    if turn > epsilon {
        // convex corner
        left_of_in && left_of_out
    } else if turn < -epsilon {
        // reflex corner
        left_of_in || left_of_out
    } else if dir_in.dot(dir_out) > T::zero() {
        // straight
        left_of_out
    } else {
        // boundary doubles back on itself, everything off the spike is filled
        true
    }
}
