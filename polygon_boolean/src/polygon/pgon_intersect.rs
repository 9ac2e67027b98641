use super::{
    internal::pgon_intersects::{find_interaction, find_self_interaction},
    EdgeNumbering, Polygon, PolygonRelationship,
};
use crate::{
    core::{math::Vector2, traits::Real},
    error::{BooleanError, Operand},
};
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Which of the two polygons (or which of the two edges of a self intersect) something refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

impl Side {
    /// The other side.
    #[inline]
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Set of flags describing how two polygon boundaries meet at an intersect point.
///
/// All flags describe local geometry at the point. "Arriving" is the boundary path coming into the
/// point along the edge's ring (the previous edge if the point is at the edge's start vertex) and
/// "leaving" is the path going out along the edge. Filled sides are to the left of travel.
///
/// # Examples
///
/// ```
/// # use polygon_boolean::polygon::*;
/// let r = Relationship::AT_START_OF_A | Relationship::AT_START_OF_B;
/// assert!(r.contains(Relationship::BOTH_LINES_START_AT_POINT));
/// assert!(r.intersects(Relationship::AT_START_OF_B | Relationship::OVERLAPPING));
/// assert!(!r.contains(Relationship::OVERLAPPING));
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Relationship(u32);

macro_rules! relationship_flags {
    ($($(#[$doc:meta])* $name:ident = $value:expr;)*) => {
        impl Relationship {
            $(
                $(#[$doc])*
                pub const $name: Relationship = Relationship($value);
            )*

            const NAMES: &'static [(&'static str, Relationship)] = &[
                $((stringify!($name), Relationship($value)),)*
            ];
        }
    };
}

relationship_flags! {
    /// The boundaries cross: each one passes from one side of the other to the other side.
    OVERLAPPING = 1 << 0;
    /// The two edges point in opposite directions.
    OPPOSITE_DIRECTIONS = 1 << 1;
    /// The two edges lie on the same line.
    COINCIDENT_LINES = 1 << 2;
    /// Both boundaries arrive at the point along the same path, in the same direction.
    SAME_LINE_BEFORE_POINT = 1 << 3;
    /// Both boundaries leave the point along the same path, in the same direction.
    SAME_LINE_AFTER_POINT = 1 << 4;
    /// The edges are collinear and edge A covers all of edge B.
    A_ENCOMPASSES_B = 1 << 5;
    /// The edges are collinear and edge B covers all of edge A.
    B_ENCOMPASSES_A = 1 << 6;
    /// Both encompass flags: the edges are the same segment.
    DOUBLE_OVERLAP = (1 << 5) | (1 << 6);
    /// The point is the start vertex of edge A.
    AT_START_OF_A = 1 << 7;
    /// The point is the start vertex of edge B.
    AT_START_OF_B = 1 << 8;
    /// Both start flags.
    BOTH_LINES_START_AT_POINT = (1 << 7) | (1 << 8);
    /// Leaving along A goes strictly into the filled side of B.
    A_INTO_B = 1 << 9;
    /// Leaving along B goes strictly into the filled side of A.
    B_INTO_A = 1 << 10;
    /// Leaving along A runs back over the path B arrives by (coincident, opposite direction).
    A_ALONG_B_REVERSED = 1 << 11;
    /// Leaving along B runs back over the path A arrives by (coincident, opposite direction).
    B_ALONG_A_REVERSED = 1 << 12;
}

impl Relationship {
    /// No flags set.
    pub const NONE: Relationship = Relationship(0);

    #[inline]
    pub fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn from_bits(bits: u32) -> Self {
        Relationship(bits)
    }

    /// Returns `true` if every flag of `other` is set.
    #[inline]
    pub fn contains(self, other: Relationship) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if any flag of `other` is set.
    #[inline]
    pub fn intersects(self, other: Relationship) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub fn insert(&mut self, other: Relationship) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: Relationship) {
        self.0 &= !other.0;
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// How the path leaving along `side` sits relative to the other polygon.
    pub fn departure(self, side: Side) -> Departure {
        if self.contains(Relationship::SAME_LINE_AFTER_POINT) {
            return Departure::Along;
        }

        let (into, reversed) = match side {
            Side::A => (Relationship::A_INTO_B, Relationship::A_ALONG_B_REVERSED),
            Side::B => (Relationship::B_INTO_A, Relationship::B_ALONG_A_REVERSED),
        };

        if self.contains(reversed) {
            Departure::Against
        } else if self.contains(into) {
            Departure::Inside
        } else {
            Departure::Outside
        }
    }

    /// The start flag for `side`.
    #[inline]
    pub fn at_start_of(side: Side) -> Relationship {
        match side {
            Side::A => Relationship::AT_START_OF_A,
            Side::B => Relationship::AT_START_OF_B,
        }
    }

    /// Returns `true` if the boundaries only touch: no crossing and no shared stretch before or
    /// after the point.
    pub fn is_glancing(self) -> bool {
        !self.intersects(
            Relationship::OVERLAPPING
                | Relationship::SAME_LINE_BEFORE_POINT
                | Relationship::SAME_LINE_AFTER_POINT
                | Relationship::A_ALONG_B_REVERSED
                | Relationship::B_ALONG_A_REVERSED,
        )
    }
}

impl BitOr for Relationship {
    type Output = Relationship;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Relationship(self.0 | rhs.0)
    }
}

impl BitOrAssign for Relationship {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Relationship {
    type Output = Relationship;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Relationship(self.0 & rhs.0)
    }
}

impl std::fmt::Debug for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut set = f.debug_set();
        for (name, flag) in Relationship::NAMES {
            // combined flags are listed through their parts
            if flag.0.count_ones() == 1 && self.contains(*flag) {
                set.entry(&format_args!("{}", name));
            }
        }
        set.finish()
    }
}

/// How the path leaving an intersect along one polygon's edge sits relative to the other polygon.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Departure {
    /// Strictly inside the other polygon's filled region.
    Inside,
    /// Strictly outside the other polygon's filled region.
    Outside,
    /// Along the other boundary in the same direction.
    Along,
    /// Along the other boundary in the opposite direction.
    Against,
}

/// One point where an edge of polygon A meets an edge of polygon B.
///
/// For self intersects both edges belong to the same polygon and `edge_a < edge_b`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SegmentIntersection<T = f64> {
    /// Dense index (see [EdgeNumbering]) of the edge on side A.
    pub edge_a: usize,
    /// Dense index (see [EdgeNumbering]) of the edge on side B.
    pub edge_b: usize,
    /// Intersect position.
    pub point: Vector2<T>,
    /// Local geometry flags.
    pub relationship: Relationship,
    /// The path leaving along edge A has been consumed (or can never be used by the running
    /// operation).
    pub visited_a: bool,
    /// The path leaving along edge B has been consumed (or can never be used by the running
    /// operation).
    pub visited_b: bool,
}

impl<T> SegmentIntersection<T>
where
    T: Real,
{
    pub fn new(
        edge_a: usize,
        edge_b: usize,
        point: Vector2<T>,
        relationship: Relationship,
    ) -> Self {
        Self {
            edge_a,
            edge_b,
            point,
            relationship,
            visited_a: false,
            visited_b: false,
        }
    }

    /// Edge index on `side`.
    #[inline]
    pub fn edge(&self, side: Side) -> usize {
        match side {
            Side::A => self.edge_a,
            Side::B => self.edge_b,
        }
    }

    #[inline]
    pub fn visited(&self, side: Side) -> bool {
        match side {
            Side::A => self.visited_a,
            Side::B => self.visited_b,
        }
    }

    #[inline]
    pub fn set_visited(&mut self, side: Side) {
        match side {
            Side::A => self.visited_a = true,
            Side::B => self.visited_b = true,
        }
    }

    /// Both sides have been consumed.
    #[inline]
    pub fn is_fully_visited(&self) -> bool {
        self.visited_a && self.visited_b
    }

    #[inline]
    pub fn reset_visited(&mut self) {
        self.visited_a = false;
        self.visited_b = false;
    }

    /// Shorthand for `self.relationship.departure(side)`.
    #[inline]
    pub fn departure(&self, side: Side) -> Departure {
        self.relationship.departure(side)
    }
}

/// Everything the boolean engine needs to know about how two polygons interact: every edge
/// intersect plus the coarse relationship of every ring pair.
///
/// Built once per operation. Runs update the visited flags and clear them again when they start.
#[derive(Debug, Clone)]
pub struct PolygonInteractionRecord<T = f64> {
    /// All edge intersects.
    pub intersections: Vec<SegmentIntersection<T>>,
    /// Relationship of ring `i` of A to ring `j` of B at index `i * b_ring_count + j` (ring
    /// indexes local to each polygon, in [Polygon::rings] order). Empty for self intersect records.
    pub ring_relationships: Vec<PolygonRelationship>,
    /// Pairs of identical rings `(lower ring, higher ring, Equal or EqualButOpposite)` of a self
    /// intersect record. Empty for records between two polygons.
    pub identical_rings: Vec<(usize, usize, PolygonRelationship)>,
    /// Number of rings in polygon A.
    pub a_ring_count: usize,
    /// Number of rings in polygon B (zero for self intersect records).
    pub b_ring_count: usize,
}

impl<T> PolygonInteractionRecord<T>
where
    T: Real,
{
    /// Find and classify all intersects between `a` and `b`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polygon_boolean::polygon;
    /// # use polygon_boolean::polygon::*;
    /// let a = polygon![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)];
    /// let b = polygon![(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)];
    /// let record = PolygonInteractionRecord::new(&a, &b, 1e-5);
    /// assert_eq!(record.intersections.len(), 2);
    /// assert!(record
    ///     .intersections
    ///     .iter()
    ///     .all(|i| i.relationship.contains(Relationship::OVERLAPPING)));
    /// assert_eq!(record.relationship(0, 0), PolygonRelationship::Intersection);
    /// ```
    pub fn new(a: &Polygon<T>, b: &Polygon<T>, pos_equal_eps: T) -> Self {
        find_interaction(a, b, pos_equal_eps)
    }

    /// Find and classify all intersects between `a` and the inverted copy of `b` (see
    /// [Polygon::copy]), which is what the difference operation runs on.
    pub fn for_difference(a: &Polygon<T>, b: &Polygon<T>, pos_equal_eps: T) -> Self {
        let subtrahend = b.copy(true, true);
        find_interaction(a, &subtrahend, pos_equal_eps)
    }

    /// Find and classify all intersects of `p` with itself (including between its rings).
    pub fn for_self_intersections(p: &Polygon<T>, pos_equal_eps: T) -> Self {
        find_self_interaction(p, pos_equal_eps)
    }

    /// Relationship of ring `ring_a` of polygon A to ring `ring_b` of polygon B.
    ///
    /// Pairs missing from the table are [PolygonRelationship::Separated].
    #[inline]
    pub fn relationship(&self, ring_a: usize, ring_b: usize) -> PolygonRelationship {
        self.ring_relationships
            .get(ring_a * self.b_ring_count + ring_b)
            .copied()
            .unwrap_or(PolygonRelationship::Separated)
    }

    /// Clear every visited flag.
    pub fn reset_visited(&mut self) {
        for intr in self.intersections.iter_mut() {
            intr.reset_visited();
        }
    }

    /// Check the record is consistent with polygons `a` and `b`: edge indexes are in range and on
    /// the right polygon, and the ring relationship table covers every ring pair.
    ///
    /// Intended for records produced outside of this crate, the boolean engine does not check.
    pub fn validate(&self, a: &Polygon<T>, b: &Polygon<T>) -> Result<(), BooleanError> {
        let numbering = EdgeNumbering::new(a, Some(b));
        let expected = numbering.a_ring_count() * numbering.b_ring_count();
        if self.a_ring_count != numbering.a_ring_count()
            || self.b_ring_count != numbering.b_ring_count()
            || self.ring_relationships.len() != expected
        {
            return Err(BooleanError::RelationshipTableMismatch {
                found: self.ring_relationships.len(),
                expected,
            });
        }

        let edge_count = numbering.edge_count();
        for (index, intr) in self.intersections.iter().enumerate() {
            for (edge, operand) in [(intr.edge_a, Operand::A), (intr.edge_b, Operand::B)] {
                if edge >= edge_count {
                    return Err(BooleanError::EdgeOutOfRange {
                        index,
                        edge,
                        edge_count,
                    });
                }

                let expected_side = match operand {
                    Operand::A => Side::A,
                    Operand::B => Side::B,
                };

                if numbering.edge_side(edge) != expected_side {
                    return Err(BooleanError::EdgeOnWrongSide {
                        index,
                        edge,
                        operand,
                    });
                }
            }
        }

        Ok(())
    }
}
