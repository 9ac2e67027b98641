use super::{Polygon, Side};
use crate::core::{
    math::{min_max, Vector2},
    traits::Real,
};
use static_aabb2d_index::AABB;

/// Directed polygon edge going from `from` to `to`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PolygonEdge<T = f64> {
    pub from: Vector2<T>,
    pub to: Vector2<T>,
}

impl<T> PolygonEdge<T>
where
    T: Real,
{
    #[inline]
    pub fn new(from: Vector2<T>, to: Vector2<T>) -> Self {
        Self { from, to }
    }

    /// Direction vector (`to - from`), not normalized.
    #[inline]
    pub fn direction(&self) -> Vector2<T> {
        self.to - self.from
    }

    #[inline]
    pub fn length(&self) -> T {
        self.direction().length()
    }

    /// Distance from `from` to the projection of `point` onto the edge's line.
    #[inline]
    pub fn distance_along(&self, point: Vector2<T>) -> T {
        let dir = self.direction();
        (point - self.from).dot(dir) / dir.length()
    }

    /// Bounding box of the edge, expanded by `expand` on all sides.
    #[inline]
    pub fn bounding_box(&self, expand: T) -> AABB<T> {
        let (min_x, max_x) = min_max(self.from.x, self.to.x);
        let (min_y, max_y) = min_max(self.from.y, self.to.y);
        AABB::new(min_x - expand, min_y - expand, max_x + expand, max_y + expand)
    }
}

#[derive(Debug)]
struct RingEntry<'a, T> {
    ring: &'a Polygon<T>,
    side: Side,
    first_edge: usize,
}

/// Dense numbering of every edge of one or two polygons.
///
/// Rings of polygon A are numbered first in [Polygon::rings] order, then the rings of polygon B.
/// Edge indexes continue across rings: the edges of a ring with `n` vertexes occupy `n`
/// consecutive indexes starting at that ring's first edge, and edge `i` of a ring starts at its
/// vertex `i`.
///
/// The numbering is rebuilt for every operation and never modifies the polygons. Intersect records
/// refer to edges by these indexes, so records are only valid for a numbering built from the same
/// polygons.
///
/// # Examples
///
/// ```
/// # use polygon_boolean::polygon;
/// # use polygon_boolean::polygon::*;
/// let a = polygon![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
/// let b = polygon![(2.0, 0.0), (3.0, 0.0), (2.5, 1.0)];
/// let numbering = EdgeNumbering::new(&a, Some(&b));
/// assert_eq!(numbering.edge_count(), 7);
/// assert_eq!(numbering.ring_count(), 2);
/// assert_eq!(numbering.edge_side(3), Side::A);
/// assert_eq!(numbering.edge_side(4), Side::B);
/// // edges wrap within their ring
/// assert_eq!(numbering.next_edge(3), 0);
/// assert_eq!(numbering.next_edge(6), 4);
/// assert_eq!(numbering.prev_edge(4), 6);
/// ```
#[derive(Debug)]
pub struct EdgeNumbering<'a, T> {
    rings: Vec<RingEntry<'a, T>>,
    a_ring_count: usize,
    a_edge_count: usize,
    edge_count: usize,
}

impl<'a, T> EdgeNumbering<'a, T>
where
    T: Real,
{
    /// Number the edges of `a` followed by the edges of `b` (if given).
    pub fn new(a: &'a Polygon<T>, b: Option<&'a Polygon<T>>) -> Self {
        fn add_rings<'a, T: Real>(
            rings: &mut Vec<RingEntry<'a, T>>,
            edge_count: &mut usize,
            p: &'a Polygon<T>,
            side: Side,
        ) {
            for ring in p.rings() {
                rings.push(RingEntry {
                    ring,
                    side,
                    first_edge: *edge_count,
                });
                *edge_count += ring.vertex_count();
            }
        }

        let mut rings = Vec::new();
        let mut edge_count = 0;
        add_rings(&mut rings, &mut edge_count, a, Side::A);
        let a_ring_count = rings.len();
        let a_edge_count = edge_count;
        if let Some(b) = b {
            add_rings(&mut rings, &mut edge_count, b, Side::B);
        }

        Self {
            rings,
            a_ring_count,
            a_edge_count,
            edge_count,
        }
    }

    /// Total number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of edges belonging to polygon A (these are edges `0..a_edge_count`).
    #[inline]
    pub fn a_edge_count(&self) -> usize {
        self.a_edge_count
    }

    /// Total number of rings.
    #[inline]
    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    /// Number of rings belonging to polygon A (these are rings `0..a_ring_count`).
    #[inline]
    pub fn a_ring_count(&self) -> usize {
        self.a_ring_count
    }

    /// Number of rings belonging to polygon B.
    #[inline]
    pub fn b_ring_count(&self) -> usize {
        self.rings.len() - self.a_ring_count
    }

    /// Ring with the global index `ring_index`.
    #[inline]
    pub fn ring(&self, ring_index: usize) -> &'a Polygon<T> {
        self.rings[ring_index].ring
    }

    /// Polygon the ring belongs to.
    #[inline]
    pub fn ring_side(&self, ring_index: usize) -> Side {
        self.rings[ring_index].side
    }

    /// Index of the first edge of the ring.
    #[inline]
    pub fn ring_first_edge(&self, ring_index: usize) -> usize {
        self.rings[ring_index].first_edge
    }

    /// Edge indexes of the ring.
    #[inline]
    pub fn ring_edges(&self, ring_index: usize) -> std::ops::Range<usize> {
        let entry = &self.rings[ring_index];
        entry.first_edge..entry.first_edge + entry.ring.vertex_count()
    }

    /// Index of the ring the edge belongs to.
    #[inline]
    pub fn edge_ring(&self, edge_index: usize) -> usize {
        debug_assert!(edge_index < self.edge_count, "edge index out of range");
        // first ring whose first edge is past the edge, minus one (empty rings are skipped over)
        self.rings
            .partition_point(|r| r.first_edge <= edge_index)
            .saturating_sub(1)
    }

    /// Polygon the edge belongs to.
    #[inline]
    pub fn edge_side(&self, edge_index: usize) -> Side {
        if edge_index < self.a_edge_count {
            Side::A
        } else {
            Side::B
        }
    }

    /// Index of the edge's start vertex within its ring.
    #[inline]
    pub fn edge_local_index(&self, edge_index: usize) -> usize {
        edge_index - self.rings[self.edge_ring(edge_index)].first_edge
    }

    /// Geometry of the edge.
    #[inline]
    pub fn edge(&self, edge_index: usize) -> PolygonEdge<T> {
        let entry = &self.rings[self.edge_ring(edge_index)];
        entry.ring.edge(edge_index - entry.first_edge)
    }

    /// Edge following `edge_index` in its ring (wraps to the ring's first edge).
    #[inline]
    pub fn next_edge(&self, edge_index: usize) -> usize {
        let entry = &self.rings[self.edge_ring(edge_index)];
        let next = edge_index + 1;
        if next == entry.first_edge + entry.ring.vertex_count() {
            entry.first_edge
        } else {
            next
        }
    }

    /// Edge preceding `edge_index` in its ring (wraps to the ring's last edge).
    #[inline]
    pub fn prev_edge(&self, edge_index: usize) -> usize {
        let entry = &self.rings[self.edge_ring(edge_index)];
        if edge_index == entry.first_edge {
            entry.first_edge + entry.ring.vertex_count() - 1
        } else {
            edge_index - 1
        }
    }
}
