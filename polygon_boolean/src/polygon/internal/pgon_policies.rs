//! Per operation rules plugged into the tracing engine in [super::pgon_boolean].
//!
//! A policy decides where loops may start, which way to leave every intersect, when a loop is
//! complete, and what happens to rings that never meet the other polygon.
use crate::{
    core::{
        math::{midpoint, Vector2},
        traits::Real,
    },
    polygon::{
        Departure, Polygon, PolygonRelationship, Relationship, SegmentIntersection, Side,
    },
};

/// Region a traced loop bounds, relative to the other polygon.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TraceRegion {
    /// Loop follows boundary that lies outside the other polygon. Stretches shared with the other
    /// polygon in the same direction are followed on polygon A.
    Outside,
    /// Loop follows boundary that lies inside the other polygon. Stretches shared with the other
    /// polygon in the same direction are followed on polygon B.
    Inside,
    /// Any boundary, used for self intersect removal.
    Unrestricted,
}

impl TraceRegion {
    /// Returns `true` if a loop tracing this region follows a path leaving along `side` with the
    /// given departure.
    pub fn keeps(self, departure: Departure, side: Side) -> bool {
        match (self, departure) {
            (TraceRegion::Unrestricted, _) => true,
            (TraceRegion::Outside, Departure::Outside) => true,
            (TraceRegion::Outside, Departure::Along) => side == Side::A,
            (TraceRegion::Inside, Departure::Inside) => true,
            (TraceRegion::Inside, Departure::Along) => side == Side::B,
            _ => false,
        }
    }
}

/// Intersect side a loop starts from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StartingPoint {
    /// Index of the intersect.
    pub index: usize,
    /// Side the loop leaves the intersect by.
    pub side: Side,
    /// Region the loop bounds.
    pub region: TraceRegion,
}

/// What to do with a ring that has no intersects.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RingFate {
    Keep,
    KeepInverted,
    Discard,
}

/// How a ring without intersects sits relative to the other polygon.
#[derive(Debug, Clone)]
pub struct RingContext {
    /// Polygon the ring belongs to.
    pub side: Side,
    /// Relationship of the ring to every ring of the other polygon, in [Polygon::rings] order.
    pub relationships: Vec<PolygonRelationship>,
    /// The other polygon's outermost ring is negative (it covers everything outside of it).
    pub other_inverted: bool,
}

impl RingContext {
    /// Returns `true` if the ring lies in the region covered by the other polygon.
    ///
    /// Counts the other polygon's rings enclosing this one: +1 for positive rings and -1 for holes,
    /// starting at 1 if the other polygon is inverted.
    pub fn inside_other(&self) -> bool {
        let base = if self.other_inverted { 1 } else { 0 };
        let winding: i32 = self
            .relationships
            .iter()
            .map(|r| match (self.side, r) {
                (Side::A, PolygonRelationship::AInsideB)
                | (Side::B, PolygonRelationship::BInsideA) => 1,
                (Side::A, PolygonRelationship::AIsInsideHoleOfB)
                | (Side::B, PolygonRelationship::BIsInsideHoleOfA) => -1,
                _ => 0,
            })
            .sum();

        base + winding > 0
    }
}

/// Shared switching rule: never switch onto a side already consumed and never at a point where the
/// boundaries only touch.
#[inline]
pub fn base_switch_check<T>(intr: &SegmentIntersection<T>, arriving: Side) -> bool
where
    T: Real,
{
    !intr.visited(arriving.other()) && !intr.relationship.is_glancing()
}

/// Rules of one boolean operation.
pub trait OperationPolicy<T>
where
    T: Real,
{
    /// Region a loop leaving `intr` along `side` would bound, `None` if no loop of this operation
    /// may start there.
    fn starting_region(&self, intr: &SegmentIntersection<T>, side: Side) -> Option<TraceRegion>;

    /// First unvisited intersect side a loop may start from.
    fn valid_starting_intersection(
        &self,
        intersections: &[SegmentIntersection<T>],
    ) -> Option<StartingPoint> {
        intersections.iter().enumerate().find_map(|(index, intr)| {
            [Side::A, Side::B].into_iter().find_map(|side| {
                if intr.visited(side) {
                    return None;
                }

                self.starting_region(intr, side)
                    .map(|region| StartingPoint {
                        index,
                        side,
                        region,
                    })
            })
        })
    }

    /// Returns `true` if any loop of this operation may ever leave `intr` along `side`.
    fn is_valid_departure(&self, intr: &SegmentIntersection<T>, side: Side) -> bool;

    /// Returns `true` if a loop bounding `region` arriving at `intr` along `arriving` continues
    /// along the other side.
    fn switch_at_this_intersection(
        &self,
        intr: &SegmentIntersection<T>,
        arriving: Side,
        region: TraceRegion,
    ) -> bool {
        if !base_switch_check(intr, arriving) {
            return false;
        }

        let other = arriving.other();
        let stay = region.keeps(intr.departure(arriving), arriving);
        let go = region.keeps(intr.departure(other), other);
        !stay && go
    }

    /// Returns `true` if leaving intersect `index` along `departing` closes the loop.
    fn polygon_completed(&self, index: usize, departing: Side, start: &StartingPoint) -> bool {
        index == start.index && departing == start.side
    }

    /// Final adjustment of a traced loop, `None` drops it.
    fn finish_loop(&self, ring: Polygon<T>, _region: TraceRegion) -> Option<Polygon<T>> {
        Some(ring)
    }

    /// Fate of a ring that has no intersects and no identical partner.
    fn handle_non_intersecting(&self, context: &RingContext) -> RingFate;

    /// Returns `true` if one copy of an identical ring pair is kept.
    fn handle_identical(&self, relationship: PolygonRelationship) -> bool;
}

/// Region covered by either polygon.
#[derive(Debug, Copy, Clone, Default)]
pub struct UnionPolicy;

impl<T> OperationPolicy<T> for UnionPolicy
where
    T: Real,
{
    fn starting_region(&self, intr: &SegmentIntersection<T>, side: Side) -> Option<TraceRegion> {
        self.is_valid_departure(intr, side)
            .then_some(TraceRegion::Outside)
    }

    fn is_valid_departure(&self, intr: &SegmentIntersection<T>, side: Side) -> bool {
        TraceRegion::Outside.keeps(intr.departure(side), side)
    }

    fn handle_non_intersecting(&self, context: &RingContext) -> RingFate {
        if context.inside_other() {
            RingFate::Discard
        } else {
            RingFate::Keep
        }
    }

    fn handle_identical(&self, relationship: PolygonRelationship) -> bool {
        relationship == PolygonRelationship::Equal
    }
}

/// Region covered by both polygons.
#[derive(Debug, Copy, Clone, Default)]
pub struct IntersectionPolicy;

impl<T> OperationPolicy<T> for IntersectionPolicy
where
    T: Real,
{
    fn starting_region(&self, intr: &SegmentIntersection<T>, side: Side) -> Option<TraceRegion> {
        self.is_valid_departure(intr, side)
            .then_some(TraceRegion::Inside)
    }

    fn is_valid_departure(&self, intr: &SegmentIntersection<T>, side: Side) -> bool {
        TraceRegion::Inside.keeps(intr.departure(side), side)
    }

    fn handle_non_intersecting(&self, context: &RingContext) -> RingFate {
        if context.inside_other() {
            RingFate::Keep
        } else {
            RingFate::Discard
        }
    }

    fn handle_identical(&self, relationship: PolygonRelationship) -> bool {
        relationship == PolygonRelationship::Equal
    }
}

/// Region covered by polygon A but not polygon B.
///
/// Runs the intersection rules against the inverted copy of B, so polygon B given to the engine
/// (and the interaction record) must already be inverted.
#[derive(Debug, Copy, Clone, Default)]
pub struct DifferencePolicy;

impl<T> OperationPolicy<T> for DifferencePolicy
where
    T: Real,
{
    fn starting_region(&self, intr: &SegmentIntersection<T>, side: Side) -> Option<TraceRegion> {
        IntersectionPolicy.starting_region(intr, side)
    }

    fn is_valid_departure(&self, intr: &SegmentIntersection<T>, side: Side) -> bool {
        IntersectionPolicy.is_valid_departure(intr, side)
    }

    fn handle_non_intersecting(&self, context: &RingContext) -> RingFate {
        <IntersectionPolicy as OperationPolicy<T>>::handle_non_intersecting(
            &IntersectionPolicy,
            context,
        )
    }

    fn handle_identical(&self, relationship: PolygonRelationship) -> bool {
        <IntersectionPolicy as OperationPolicy<T>>::handle_identical(
            &IntersectionPolicy,
            relationship,
        )
    }
}

/// Region covered by exactly one polygon.
///
/// Traces the outside loops as is and the inside loops inverted, the inverted loops become holes
/// of (or cut away from) the outside loops.
#[derive(Debug, Copy, Clone, Default)]
pub struct XorPolicy;

impl<T> OperationPolicy<T> for XorPolicy
where
    T: Real,
{
    fn starting_region(&self, intr: &SegmentIntersection<T>, side: Side) -> Option<TraceRegion> {
        let departure = intr.departure(side);
        if TraceRegion::Outside.keeps(departure, side) {
            Some(TraceRegion::Outside)
        } else if TraceRegion::Inside.keeps(departure, side) {
            Some(TraceRegion::Inside)
        } else {
            None
        }
    }

    fn is_valid_departure(&self, intr: &SegmentIntersection<T>, side: Side) -> bool {
        self.starting_region(intr, side).is_some()
    }

    fn finish_loop(&self, mut ring: Polygon<T>, region: TraceRegion) -> Option<Polygon<T>> {
        if region == TraceRegion::Inside {
            ring.invert_mut();
        }

        Some(ring)
    }

    fn handle_non_intersecting(&self, context: &RingContext) -> RingFate {
        if context.inside_other() {
            RingFate::KeepInverted
        } else {
            RingFate::Keep
        }
    }

    fn handle_identical(&self, _relationship: PolygonRelationship) -> bool {
        false
    }
}

/// Splits a polygon at its self crossings and keeps the loops bounding its filled region (nonzero
/// fill rule).
///
/// Loops are traced from any unvisited side and switch sides at every crossing, so each loop
/// bounds a region of constant winding number. The loop is then kept, inverted, or dropped by
/// sampling the polygon's fill just left and just right of the loop's longest edge.
///
/// Glancing touches never switch, so a ring that only touches itself at a vertex (without crossing)
/// comes out as one ring through that vertex rather than as separate loops. A ring repeated with
/// the same direction is kept once, a ring repeated inverted cancels out.
#[derive(Debug, Copy, Clone)]
pub struct SelfIntersectionPolicy<'a, T> {
    polygon: &'a Polygon<T>,
}

impl<'a, T> SelfIntersectionPolicy<'a, T>
where
    T: Real,
{
    pub fn new(polygon: &'a Polygon<T>) -> Self {
        Self { polygon }
    }

    fn is_filled(&self, point: Vector2<T>) -> bool {
        self.polygon.tree_winding_number(point) != 0
    }
}

impl<T> OperationPolicy<T> for SelfIntersectionPolicy<'_, T>
where
    T: Real,
{
    fn starting_region(&self, _intr: &SegmentIntersection<T>, _side: Side) -> Option<TraceRegion> {
        Some(TraceRegion::Unrestricted)
    }

    fn is_valid_departure(&self, _intr: &SegmentIntersection<T>, _side: Side) -> bool {
        true
    }

    fn switch_at_this_intersection(
        &self,
        intr: &SegmentIntersection<T>,
        arriving: Side,
        _region: TraceRegion,
    ) -> bool {
        base_switch_check(intr, arriving) && intr.relationship.contains(Relationship::OVERLAPPING)
    }

    fn finish_loop(&self, mut ring: Polygon<T>, _region: TraceRegion) -> Option<Polygon<T>> {
        let longest = ring.iter_edges().fold(None, |acc: Option<(T, Vector2<T>, Vector2<T>)>, e| {
            let length = e.length();
            match acc {
                Some((max, _, _)) if max >= length => acc,
                _ => Some((length, e.from, e.to)),
            }
        });

        let (length, from, to) = longest?;
        if length <= T::zero() {
            return None;
        }

        // sample at a fraction of the loop's typical width off the edge
        let width = ring.area().abs() / length;
        let offset = num_traits::real::Real::min(length, width) * T::from(1e-3)?;
        let mid = midpoint(from, to);
        let normal = (to - from).unit_perp().scale(offset);
        match (self.is_filled(mid + normal), self.is_filled(mid - normal)) {
            (true, false) => Some(ring),
            (false, true) => {
                ring.invert_mut();
                Some(ring)
            }
            _ => None,
        }
    }

    fn handle_non_intersecting(&self, _context: &RingContext) -> RingFate {
        RingFate::Keep
    }

    fn handle_identical(&self, relationship: PolygonRelationship) -> bool {
        relationship == PolygonRelationship::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::vec2;

    #[test]
    fn trace_region_keeps() {
        assert!(TraceRegion::Outside.keeps(Departure::Outside, Side::B));
        assert!(TraceRegion::Outside.keeps(Departure::Along, Side::A));
        assert!(!TraceRegion::Outside.keeps(Departure::Along, Side::B));
        assert!(!TraceRegion::Outside.keeps(Departure::Against, Side::A));
        assert!(TraceRegion::Inside.keeps(Departure::Along, Side::B));
        assert!(!TraceRegion::Inside.keeps(Departure::Outside, Side::A));
        assert!(TraceRegion::Unrestricted.keeps(Departure::Against, Side::A));
    }

    #[test]
    fn ring_context_winding() {
        let inside_hole = RingContext {
            side: Side::A,
            relationships: vec![
                PolygonRelationship::AInsideB,
                PolygonRelationship::AIsInsideHoleOfB,
            ],
            other_inverted: false,
        };
        assert!(!inside_hole.inside_other());

        let inside_inverted = RingContext {
            side: Side::B,
            relationships: vec![PolygonRelationship::Separated],
            other_inverted: true,
        };
        assert!(inside_inverted.inside_other());

        let island = RingContext {
            side: Side::B,
            relationships: vec![
                PolygonRelationship::BInsideA,
                PolygonRelationship::BIsInsideHoleOfA,
                PolygonRelationship::BInsideA,
            ],
            other_inverted: false,
        };
        assert!(island.inside_other());
    }

    #[test]
    fn crossing_switches_sides() {
        let crossing = SegmentIntersection::new(
            1,
            4,
            vec2(2.0, 1.0),
            Relationship::OVERLAPPING | Relationship::A_INTO_B,
        );

        let union: &dyn OperationPolicy<f64> = &UnionPolicy;
        let intersection: &dyn OperationPolicy<f64> = &IntersectionPolicy;
        // leaving along A goes into B, a union loop arriving on A continues on B
        assert!(union.switch_at_this_intersection(&crossing, Side::A, TraceRegion::Outside));
        assert!(!union.switch_at_this_intersection(&crossing, Side::B, TraceRegion::Outside));
        assert!(intersection.switch_at_this_intersection(&crossing, Side::B, TraceRegion::Inside));
        assert!(!intersection.switch_at_this_intersection(&crossing, Side::A, TraceRegion::Inside));
        assert!(!union.is_valid_departure(&crossing, Side::A));
        assert_eq!(
            XorPolicy.starting_region(&crossing, Side::A),
            Some(TraceRegion::Inside)
        );

        let mut visited = crossing;
        visited.set_visited(Side::B);
        assert!(!union.switch_at_this_intersection(&visited, Side::A, TraceRegion::Outside));
    }

    #[test]
    fn touch_never_switches() {
        let touch = SegmentIntersection::new(
            2,
            4,
            vec2(1.0, 1.0),
            Relationship::BOTH_LINES_START_AT_POINT,
        );
        let union: &dyn OperationPolicy<f64> = &UnionPolicy;
        assert!(touch.relationship.is_glancing());
        assert!(!union.switch_at_this_intersection(&touch, Side::A, TraceRegion::Outside));
        assert_eq!(
            union.valid_starting_intersection(&[touch]),
            Some(StartingPoint {
                index: 0,
                side: Side::A,
                region: TraceRegion::Outside
            })
        );
    }
}
