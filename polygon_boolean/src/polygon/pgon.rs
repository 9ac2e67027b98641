use super::{
    internal::pgon_boolean::{polygon_boolean, polygon_remove_self_intersections},
    BooleanOp, BooleanOptions, PolygonEdge, SelfIntersectionResult,
};
use crate::{
    core::{
        math::{is_left, Vector2},
        traits::Real,
    },
    error::{BooleanError, Operand, PolygonError},
};
use static_aabb2d_index::AABB;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Polygon made of one closed ring of vertexes plus any number of inner polygons.
///
/// The ring's last vertex connects back to the first. A counter clockwise ring (positive area)
/// is a filled region, a clockwise ring (negative area) is a hole. Inner polygons are the holes
/// of this polygon, and each hole's inner polygons are the islands inside it, and so on.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<T = f64> {
    /// Contiguous sequence of ring vertexes.
    pub vertexes: Vec<Vector2<T>>,
    /// Polygons nested directly inside this one.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub inner: Vec<Polygon<T>>,
}

impl<T> Default for Polygon<T>
where
    T: Real,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for Polygon<T> {
    type Output = Vector2<T>;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.vertexes[index]
    }
}

impl<T> IndexMut<usize> for Polygon<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.vertexes[index]
    }
}

impl<T> Polygon<T>
where
    T: Real,
{
    /// Create a new empty [Polygon].
    #[inline]
    pub fn new() -> Self {
        Polygon {
            vertexes: Vec::new(),
            inner: Vec::new(),
        }
    }

    /// Create a new empty [Polygon] with vertex storage reserved.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Polygon {
            vertexes: Vec::with_capacity(capacity),
            inner: Vec::new(),
        }
    }

    /// Create a ring from the points given (no inner polygons).
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vector2<T>>,
    {
        Polygon {
            vertexes: points.into_iter().collect(),
            inner: Vec::new(),
        }
    }

    /// Returns this polygon with `inner` added as a directly nested polygon.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polygon_boolean::polygon;
    /// # use polygon_boolean::polygon::*;
    /// # use polygon_boolean::core::traits::*;
    /// let outer = polygon![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)];
    /// // holes wind clockwise
    /// let hole = polygon![(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0)];
    /// let pgon = outer.with_inner(hole);
    /// assert_eq!(pgon.ring_count(), 2);
    /// assert!(pgon.total_area().fuzzy_eq(12.0));
    /// ```
    pub fn with_inner(mut self, inner: Polygon<T>) -> Self {
        self.inner.push(inner);
        self
    }

    /// Add a directly nested polygon.
    #[inline]
    pub fn add_inner(&mut self, inner: Polygon<T>) {
        self.inner.push(inner);
    }

    /// Add a vertex to the end of the ring.
    #[inline]
    pub fn add(&mut self, x: T, y: T) {
        self.vertexes.push(Vector2::new(x, y));
    }

    /// Add a vertex to the end of the ring.
    #[inline]
    pub fn add_vertex(&mut self, v: Vector2<T>) {
        self.vertexes.push(v);
    }

    /// Number of vertexes in the ring (inner polygons not included).
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertexes.len()
    }

    /// Returns `true` if the ring has no vertexes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertexes.is_empty()
    }

    /// Vertex at `index` in the ring.
    #[inline]
    pub fn at(&self, index: usize) -> Vector2<T> {
        self.vertexes[index]
    }

    /// Next vertex index, wrapping to the start of the ring.
    #[inline]
    pub fn next_wrapping_index(&self, index: usize) -> usize {
        let next = index + 1;
        if next == self.vertex_count() {
            0
        } else {
            next
        }
    }

    /// Previous vertex index, wrapping to the end of the ring.
    #[inline]
    pub fn prev_wrapping_index(&self, index: usize) -> usize {
        if index == 0 {
            self.vertex_count() - 1
        } else {
            index - 1
        }
    }

    /// Edge starting at vertex `index` of the ring.
    #[inline]
    pub fn edge(&self, index: usize) -> PolygonEdge<T> {
        PolygonEdge::new(self.at(index), self.at(self.next_wrapping_index(index)))
    }

    /// Iterate the edges of the ring (the last edge closes the ring).
    pub fn iter_edges(&self) -> impl Iterator<Item = PolygonEdge<T>> + '_ {
        (0..self.vertex_count()).map(move |i| self.edge(i))
    }

    /// Signed area of the ring, positive if counter clockwise and negative if clockwise.
    ///
    /// Inner polygons are not included, see [Polygon::total_area].
    ///
    /// # Examples
    ///
    /// ```
    /// # use polygon_boolean::polygon;
    /// # use polygon_boolean::core::traits::*;
    /// let mut pgon = polygon![(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)];
    /// assert!(pgon.area().fuzzy_eq(2.0));
    /// pgon.invert_mut();
    /// assert!(pgon.area().fuzzy_eq(-2.0));
    /// ```
    pub fn area(&self) -> T {
        if self.vertex_count() < 3 {
            return T::zero();
        }

        // shoelace formula
        let mut double_total_area = T::zero();
        for e in self.iter_edges() {
            double_total_area = double_total_area + e.from.x * e.to.y - e.from.y * e.to.x;
        }

        double_total_area / T::two()
    }

    /// Returns `true` if the ring is counter clockwise (filled region rather than a hole).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.area() > T::zero()
    }

    /// Signed area of the ring plus the signed area of every inner polygon, recursively.
    ///
    /// For a correctly wound polygon (holes clockwise, islands counter clockwise) this is the area
    /// of the region it covers.
    pub fn total_area(&self) -> T {
        self.rings()
            .iter()
            .fold(T::zero(), |acc, r| acc + r.area())
    }

    /// Bounding box of the ring, `None` if the ring is empty.
    ///
    /// Inner polygons are assumed to be inside the ring and are not visited.
    pub fn extents(&self) -> Option<AABB<T>> {
        let first = self.vertexes.first()?;
        let mut result = AABB::new(first.x, first.y, first.x, first.y);
        for v in self.vertexes.iter().skip(1) {
            if v.x < result.min_x {
                result.min_x = v.x;
            } else if v.x > result.max_x {
                result.max_x = v.x;
            }

            if v.y < result.min_y {
                result.min_y = v.y;
            } else if v.y > result.max_y {
                result.max_y = v.y;
            }
        }

        Some(result)
    }

    /// Winding number of the ring around `point` (inner polygons not included).
    ///
    /// Positive for counter clockwise rings and negative for clockwise rings, zero if the point
    /// is outside. Points on the boundary may return either value.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polygon_boolean::polygon;
    /// # use polygon_boolean::core::math::*;
    /// let mut pgon = polygon![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)];
    /// assert_eq!(pgon.winding_number(Vector2::new(1.0, 1.0)), 1);
    /// assert_eq!(pgon.winding_number(Vector2::new(3.0, 1.0)), 0);
    /// pgon.invert_mut();
    /// assert_eq!(pgon.winding_number(Vector2::new(1.0, 1.0)), -1);
    /// ```
    pub fn winding_number(&self, point: Vector2<T>) -> i32 {
        if self.vertex_count() < 3 {
            return 0;
        }

        let mut winding = 0;
        for e in self.iter_edges() {
            if e.from.y <= point.y {
                if e.to.y > point.y && is_left(e.from, e.to, point) {
                    // left and upward crossing
                    winding += 1;
                }
            } else if e.to.y <= point.y && !is_left(e.from, e.to, point) {
                // right and downward crossing
                winding -= 1;
            }
        }

        winding
    }

    /// Sum of the winding numbers of every ring in the polygon tree around `point`.
    pub fn tree_winding_number(&self, point: Vector2<T>) -> i32 {
        self.rings().iter().map(|r| r.winding_number(point)).sum()
    }

    /// Returns `true` if `point` is in the region covered by this polygon, holes excluded.
    ///
    /// An inverted polygon (outermost ring clockwise) covers the complement of the region it
    /// outlines.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polygon_boolean::polygon;
    /// # use polygon_boolean::core::math::*;
    /// let outer = polygon![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)];
    /// let hole = polygon![(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0)];
    /// let pgon = outer.with_inner(hole);
    /// assert!(pgon.contains_point(Vector2::new(0.5, 0.5)));
    /// assert!(!pgon.contains_point(Vector2::new(2.0, 2.0)));
    /// let inverted = pgon.copy(true, true);
    /// assert!(inverted.contains_point(Vector2::new(2.0, 2.0)));
    /// assert!(inverted.contains_point(Vector2::new(5.0, 5.0)));
    /// ```
    pub fn contains_point(&self, point: Vector2<T>) -> bool {
        let base = if self.is_positive() { 0 } else { 1 };
        base + self.tree_winding_number(point) > 0
    }

    /// Returns a copy of this polygon.
    ///
    /// Inner polygons are only copied if `copy_inner` is true. If `invert` is true every copied
    /// ring has its direction reversed (positive rings become negative and vice versa).
    pub fn copy(&self, copy_inner: bool, invert: bool) -> Self {
        let mut vertexes = self.vertexes.clone();
        if invert {
            vertexes.reverse();
        }

        let inner = if copy_inner {
            self.inner.iter().map(|p| p.copy(true, invert)).collect()
        } else {
            Vec::new()
        };

        Polygon { vertexes, inner }
    }

    /// Reverse the direction of every ring in the polygon tree.
    pub fn invert_mut(&mut self) {
        self.vertexes.reverse();
        for p in self.inner.iter_mut() {
            p.invert_mut();
        }
    }

    /// All rings of the polygon tree, depth first: this ring, then the rings of each inner
    /// polygon in order.
    ///
    /// This order defines the dense edge numbering used by the boolean operations.
    pub fn rings(&self) -> Vec<&Polygon<T>> {
        let mut result = Vec::new();
        let mut stack = vec![self];
        while let Some(p) = stack.pop() {
            result.push(p);
            // reversed so the first inner polygon is visited first
            stack.extend(p.inner.iter().rev());
        }

        result
    }

    /// Number of rings in the polygon tree.
    pub fn ring_count(&self) -> usize {
        1 + self.inner.iter().map(|p| p.ring_count()).sum::<usize>()
    }

    /// Remove repeat position vertexes and collinear vertexes (vertexes in the middle of a straight
    /// run going in the same direction) from the ring.
    ///
    /// Returns `None` if nothing was removed. Inner polygons are copied unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polygon_boolean::polygon;
    /// let pgon = polygon![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 2.0), (2.0, 2.0), (0.0, 2.0)];
    /// let result = pgon.remove_redundant(1e-5).expect("redundant vertexes were removed");
    /// assert_eq!(result.vertex_count(), 4);
    /// ```
    pub fn remove_redundant(&self, pos_equal_eps: T) -> Option<Self> {
        let vc = self.vertex_count();
        if vc < 2 {
            return None;
        }

        // helper to test if v1->v2->v3 are collinear and all going in the same direction
        let is_collinear_same_dir = |v1: Vector2<T>, v2: Vector2<T>, v3: Vector2<T>| {
            let chord = v3 - v1;
            let chord_length = chord.length();
            if chord_length <= pos_equal_eps {
                return false;
            }
            let dist_from_chord = (chord.perp_dot(v2 - v1) / chord_length).abs();
            dist_from_chord <= pos_equal_eps && (v3 - v2).dot(v2 - v1) > T::zero()
        };

        let mut result: Vec<Vector2<T>> = Vec::with_capacity(vc);
        for &v in self.vertexes.iter() {
            if result
                .last()
                .is_some_and(|last| last.fuzzy_eq_eps(v, pos_equal_eps))
            {
                continue;
            }

            while result.len() >= 2
                && is_collinear_same_dir(result[result.len() - 2], result[result.len() - 1], v)
            {
                result.pop();
            }

            result.push(v);
        }

        // process where the ring wraps around
        while result.len() > 1 && result[result.len() - 1].fuzzy_eq_eps(result[0], pos_equal_eps)
        {
            result.pop();
        }

        loop {
            let n = result.len();
            if n < 3 {
                break;
            }

            if is_collinear_same_dir(result[n - 2], result[n - 1], result[0]) {
                result.pop();
            } else if is_collinear_same_dir(result[n - 1], result[0], result[1]) {
                result.remove(0);
            } else {
                break;
            }
        }

        if result.len() == vc {
            return None;
        }

        Some(Polygon {
            vertexes: result,
            inner: self.inner.clone(),
        })
    }

    /// Translate every ring in the polygon tree by `x` and `y`.
    pub fn translate_mut(&mut self, x: T, y: T) {
        let offset = Vector2::new(x, y);
        for v in self.vertexes.iter_mut() {
            *v = *v + offset;
        }
        for p in self.inner.iter_mut() {
            p.translate_mut(x, y);
        }
    }

    /// Uniformly scale every ring in the polygon tree about the origin.
    pub fn scale_mut(&mut self, scale_factor: T) {
        for v in self.vertexes.iter_mut() {
            *v = v.scale(scale_factor);
        }
        for p in self.inner.iter_mut() {
            p.scale_mut(scale_factor);
        }
    }

    /// Check every ring has at least 3 vertexes, finite coordinates, and a non-zero area.
    ///
    /// Rings are numbered in [Polygon::rings] order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polygon_boolean::polygon;
    /// # use polygon_boolean::PolygonError;
    /// let pgon = polygon![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)];
    /// assert_eq!(pgon.validate(), Err(PolygonError::ZeroArea { ring: 0 }));
    /// ```
    pub fn validate(&self) -> Result<(), PolygonError> {
        for (ring_index, ring) in self.rings().into_iter().enumerate() {
            if ring.vertex_count() < 3 {
                return Err(PolygonError::TooFewVertexes {
                    ring: ring_index,
                    count: ring.vertex_count(),
                });
            }

            if let Some(vertex) = ring.vertexes.iter().position(|v| !v.is_finite()) {
                return Err(PolygonError::NonFiniteVertex {
                    ring: ring_index,
                    vertex,
                });
            }

            if ring.area().fuzzy_eq_zero() {
                return Err(PolygonError::ZeroArea { ring: ring_index });
            }
        }

        Ok(())
    }
}

impl<T> Polygon<T>
where
    T: Real,
{
    /// Perform a boolean operation between this polygon and `other` using default options.
    ///
    /// See [Polygon::boolean_opt].
    #[inline]
    pub fn boolean(&self, other: &Polygon<T>, operation: BooleanOp) -> Vec<Polygon<T>> {
        self.boolean_opt(other, operation, &BooleanOptions::new())
    }

    /// Perform a boolean operation between this polygon and `other`.
    ///
    /// Both polygons are expected to be valid (see [Polygon::validate]), no checks are done. Use
    /// [Polygon::try_boolean] to validate first.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polygon_boolean::polygon;
    /// # use polygon_boolean::polygon::*;
    /// # use polygon_boolean::core::traits::*;
    /// let a = polygon![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)];
    /// let b = polygon![(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)];
    /// let options = BooleanOptions::new().with_output_shape(OutputShape::SeparateLoops);
    ///
    /// let union = a.boolean_opt(&b, BooleanOp::Union, &options);
    /// assert_eq!(union.len(), 1);
    /// assert!(union[0].area().fuzzy_eq(7.0));
    ///
    /// let difference = a.boolean_opt(&b, BooleanOp::Difference, &options);
    /// assert_eq!(difference.len(), 1);
    /// assert!(difference[0].area().fuzzy_eq(3.0));
    /// ```
    pub fn boolean_opt(
        &self,
        other: &Polygon<T>,
        operation: BooleanOp,
        options: &BooleanOptions<T>,
    ) -> Vec<Polygon<T>> {
        polygon_boolean(self, other, operation, options)
    }

    /// Same as [Polygon::boolean_opt] but validates both polygons and the tolerance first.
    pub fn try_boolean(
        &self,
        other: &Polygon<T>,
        operation: BooleanOp,
        options: &BooleanOptions<T>,
    ) -> Result<Vec<Polygon<T>>, BooleanError> {
        self.validate()
            .map_err(|source| BooleanError::InvalidPolygon {
                operand: Operand::A,
                source,
            })?;
        other
            .validate()
            .map_err(|source| BooleanError::InvalidPolygon {
                operand: Operand::B,
                source,
            })?;

        if let Some(tolerance) = options.tolerance {
            if !(tolerance > T::zero() && tolerance < <T as Real>::max_value()) {
                return Err(BooleanError::InvalidTolerance);
            }
        }

        Ok(self.boolean_opt(other, operation, options))
    }

    /// Remove self intersects from this polygon using default options.
    ///
    /// See [Polygon::remove_self_intersections_opt].
    #[inline]
    pub fn remove_self_intersections(&self) -> SelfIntersectionResult<T> {
        self.remove_self_intersections_opt(&BooleanOptions::new())
    }

    /// Split this polygon at its self crossings and keep the pieces that bound its filled region
    /// (nonzero fill rule).
    ///
    /// # Examples
    ///
    /// ```
    /// # use polygon_boolean::polygon;
    /// # use polygon_boolean::core::traits::*;
    /// // figure eight, crosses itself at (1, 1)
    /// let pgon = polygon![(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)];
    /// let result = pgon.remove_self_intersections();
    /// assert_eq!(result.polygons.len(), 2);
    /// assert!(result.polygons.iter().all(|p| p.area().fuzzy_eq(1.0)));
    /// assert!(result.stray_holes.is_empty());
    /// ```
    pub fn remove_self_intersections_opt(
        &self,
        options: &BooleanOptions<T>,
    ) -> SelfIntersectionResult<T> {
        polygon_remove_self_intersections(self, options)
    }
}
