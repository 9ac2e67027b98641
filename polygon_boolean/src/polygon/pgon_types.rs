use crate::core::traits::Real;

use super::Polygon;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Boolean operation to apply to two polygons.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BooleanOp {
    /// Region covered by either polygon.
    Union,
    /// Region covered by both polygons.
    Intersection,
    /// Region covered by the first polygon but not the second.
    Difference,
    /// Region covered by exactly one of the polygons.
    Xor,
}

/// How the rings produced by an operation are grouped into polygons.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum OutputShape {
    /// Every ring is returned as its own polygon (no inner polygons).
    SeparateLoops,
    /// Positive rings own the negative rings directly inside them as holes, one level deep.
    /// Islands inside holes are returned as separate polygons.
    PolygonWithHoles,
    /// Full containment nesting: holes own islands which own holes, etc.
    #[default]
    PolygonTrees,
}

/// Parameters for the polygon boolean operations.
#[derive(Debug, Clone)]
pub struct BooleanOptions<T> {
    /// Grouping of the result rings.
    pub output_shape: OutputShape,
    /// Linear tolerance used to simplify result rings and to discard slivers (rings with area less
    /// than the tolerance squared). If `None` it is derived from the smaller polygon extents.
    pub tolerance: Option<T>,
    /// Fuzzy comparison epsilon used when finding and classifying intersects.
    pub pos_equal_eps: T,
}

impl<T> BooleanOptions<T>
where
    T: Real,
{
    pub fn new() -> Self {
        Self {
            output_shape: OutputShape::default(),
            tolerance: None,
            pos_equal_eps: T::from(1e-5).unwrap(),
        }
    }

    /// Returns the options with `output_shape` replaced.
    pub fn with_output_shape(mut self, output_shape: OutputShape) -> Self {
        self.output_shape = output_shape;
        self
    }
}

impl<T> Default for BooleanOptions<T>
where
    T: Real,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Coarse relationship between one ring of polygon A and one ring of polygon B.
///
/// Only rings with no intersects between them are classified by containment, every pair that
/// touches or crosses is [PolygonRelationship::Intersection].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PolygonRelationship {
    /// Neither ring encloses the other.
    Separated,
    /// Ring A lies inside positive ring B.
    AInsideB,
    /// Ring A lies inside negative ring B (a hole).
    AIsInsideHoleOfB,
    /// Ring B lies inside positive ring A.
    BInsideA,
    /// Ring B lies inside negative ring A (a hole).
    BIsInsideHoleOfA,
    /// The rings touch or cross.
    Intersection,
    /// Same vertex cycle with the same direction.
    Equal,
    /// Same vertex cycle with opposite directions.
    EqualButOpposite,
}

impl PolygonRelationship {
    /// Returns `true` for [PolygonRelationship::Equal] and [PolygonRelationship::EqualButOpposite].
    #[inline]
    pub fn is_identical(&self) -> bool {
        matches!(
            self,
            PolygonRelationship::Equal | PolygonRelationship::EqualButOpposite
        )
    }
}

/// Result of removing self intersects from a polygon.
#[derive(Debug, Clone)]
pub struct SelfIntersectionResult<T = f64> {
    /// Resulting polygons, grouped according to the requested [OutputShape].
    pub polygons: Vec<Polygon<T>>,
    /// Negative rings which no positive ring of the result contains.
    pub stray_holes: Vec<Polygon<T>>,
}

/// Linear and area tolerance resolved for one boolean run.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tolerance<T> {
    /// Distance used to simplify result rings.
    pub linear: T,
    /// Rings with unsigned area below this are discarded.
    pub area: T,
}

impl<T> Tolerance<T>
where
    T: Real,
{
    /// Tolerance with the area tolerance derived from `linear`.
    pub fn from_linear(linear: T) -> Self {
        Self {
            linear,
            area: linear * linear,
        }
    }

    /// Resolve the tolerance for an operation between `a` and `b`.
    ///
    /// An explicit `tolerance` is used as is, otherwise it is the smaller of the two polygons'
    /// extents (larger of width and height) times [Real::relative_tolerance].
    pub fn resolve(tolerance: Option<T>, a: &Polygon<T>, b: Option<&Polygon<T>>) -> Self {
        if let Some(t) = tolerance {
            return Self::from_linear(t);
        }

        let extent = |p: &Polygon<T>| {
            p.extents()
                .map(|e| num_traits::real::Real::max(e.max_x - e.min_x, e.max_y - e.min_y))
                .unwrap_or_else(T::zero)
        };

        let mut size = extent(a);
        if let Some(b) = b {
            let b_size = extent(b);
            if b_size > T::zero() && (b_size < size || size == T::zero()) {
                size = b_size;
            }
        }

        let linear = if size > T::zero() {
            size * T::relative_tolerance()
        } else {
            T::relative_tolerance()
        };

        Self::from_linear(linear)
    }
}
