//! Finding and classifying the intersects between polygon edges.
//!
//! Every contact point between two edges becomes one [SegmentIntersection] recorded on the edges
//! the boundaries leave the point by (a point at the end vertex of an edge is recorded on the next
//! edge), with its [Relationship] flags computed from the directions both boundaries arrive and
//! leave by.
use std::collections::BTreeMap;

use crate::{
    core::{
        math::{direction_in_corner, point_from_parametric, seg_seg_intr, SegSegIntr, Vector2},
        traits::Real,
    },
    polygon::{
        EdgeNumbering, Polygon, PolygonEdge, PolygonInteractionRecord, PolygonRelationship,
        Relationship, SegmentIntersection, Side,
    },
};
use static_aabb2d_index::{
    StaticAABB2DIndex, StaticAABB2DIndexBuildError, StaticAABB2DIndexBuilder, AABB,
};

/// Find all intersects between the edges of `a` and the edges of `b` and the relationship of every
/// ring pair.
pub fn find_interaction<T>(
    a: &Polygon<T>,
    b: &Polygon<T>,
    pos_equal_eps: T,
) -> PolygonInteractionRecord<T>
where
    T: Real,
{
    let numbering = EdgeNumbering::new(a, Some(b));
    let a_ring_count = numbering.a_ring_count();
    let b_ring_count = numbering.b_ring_count();
    let mut ring_relationships = vec![PolygonRelationship::Separated; a_ring_count * b_ring_count];

    // identical rings are resolved as a whole and get no intersects
    let mut identical = vec![false; ring_relationships.len()];
    for ra in 0..a_ring_count {
        for rb in 0..b_ring_count {
            let ring_b = numbering.ring(a_ring_count + rb);
            if let Some(rel) = identical_relationship(numbering.ring(ra), ring_b, pos_equal_eps) {
                ring_relationships[ra * b_ring_count + rb] = rel;
                identical[ra * b_ring_count + rb] = true;
            }
        }
    }

    let a_edge_count = numbering.a_edge_count();
    let aabb_index = create_edge_index(&numbering, 0..a_edge_count, pos_equal_eps);
    let mut contacts = ContactSet::new();
    let mut query_stack = Vec::with_capacity(8);
    for edge_b in a_edge_count..numbering.edge_count() {
        if is_degenerate(&numbering, edge_b, pos_equal_eps) {
            continue;
        }

        let rb = numbering.edge_ring(edge_b) - a_ring_count;
        let bb = numbering.edge(edge_b).bounding_box(pos_equal_eps);
        let mut query_visitor = |edge_a: usize| {
            let ra = numbering.edge_ring(edge_a);
            if !identical[ra * b_ring_count + rb]
                && !is_degenerate(&numbering, edge_a, pos_equal_eps)
            {
                add_contacts(&numbering, edge_a, edge_b, pos_equal_eps, &mut contacts);
            }
        };

        aabb_index.visit_query_with_stack(
            bb.min_x,
            bb.min_y,
            bb.max_x,
            bb.max_y,
            &mut query_visitor,
            &mut query_stack,
        );
    }

    let intersections = contacts.into_intersections(&numbering, pos_equal_eps);

    let mut has_intersects = vec![false; ring_relationships.len()];
    for intr in intersections.iter() {
        let ra = numbering.edge_ring(intr.edge_a);
        let rb = numbering.edge_ring(intr.edge_b) - a_ring_count;
        has_intersects[ra * b_ring_count + rb] = true;
    }

    for ra in 0..a_ring_count {
        for rb in 0..b_ring_count {
            let i = ra * b_ring_count + rb;
            if identical[i] {
                continue;
            }

            ring_relationships[i] = if has_intersects[i] {
                PolygonRelationship::Intersection
            } else {
                containment_relationship(numbering.ring(ra), numbering.ring(a_ring_count + rb))
            };
        }
    }

    log::debug!(
        "found {} intersects between {} rings of A and {} rings of B",
        intersections.len(),
        a_ring_count,
        b_ring_count
    );

    PolygonInteractionRecord {
        intersections,
        ring_relationships,
        identical_rings: Vec::new(),
        a_ring_count,
        b_ring_count,
    }
}

/// Find all intersects between the edges of `p` (within a ring and between its rings).
///
/// Adjacent edges of a ring (ignoring zero length edges between them) are not tested against each
/// other. The edge on side A of each intersect is the lower edge index. Rings identical to another
/// ring are listed in [PolygonInteractionRecord::identical_rings] and get no intersects.
pub fn find_self_interaction<T>(p: &Polygon<T>, pos_equal_eps: T) -> PolygonInteractionRecord<T>
where
    T: Real,
{
    let numbering = EdgeNumbering::new(p, None);
    let ring_count = numbering.ring_count();
    let mut identical_rings = Vec::new();
    let mut identical = vec![false; ring_count * ring_count];
    for ri in 0..ring_count {
        for rj in ri + 1..ring_count {
            let rel = identical_relationship(numbering.ring(ri), numbering.ring(rj), pos_equal_eps);
            if let Some(rel) = rel {
                identical_rings.push((ri, rj, rel));
                identical[ri * ring_count + rj] = true;
                identical[rj * ring_count + ri] = true;
            }
        }
    }

    let edge_count = numbering.edge_count();
    let aabb_index = create_edge_index(&numbering, 0..edge_count, pos_equal_eps);
    let mut contacts = ContactSet::new();
    let mut query_stack = Vec::with_capacity(8);
    for edge_j in 0..edge_count {
        if is_degenerate(&numbering, edge_j, pos_equal_eps) {
            continue;
        }

        let rj = numbering.edge_ring(edge_j);
        let bb = numbering.edge(edge_j).bounding_box(pos_equal_eps);
        let mut query_visitor = |edge_i: usize| {
            if edge_i >= edge_j
                || identical[numbering.edge_ring(edge_i) * ring_count + rj]
                || is_degenerate(&numbering, edge_i, pos_equal_eps)
                || next_live_edge(&numbering, edge_i, pos_equal_eps) == edge_j
                || next_live_edge(&numbering, edge_j, pos_equal_eps) == edge_i
            {
                return;
            }

            add_contacts(&numbering, edge_i, edge_j, pos_equal_eps, &mut contacts);
        };

        aabb_index.visit_query_with_stack(
            bb.min_x,
            bb.min_y,
            bb.max_x,
            bb.max_y,
            &mut query_visitor,
            &mut query_stack,
        );
    }

    let intersections = contacts.into_intersections(&numbering, pos_equal_eps);
    log::debug!(
        "found {} self intersects and {} identical ring pairs across {} rings",
        intersections.len(),
        identical_rings.len(),
        ring_count
    );

    PolygonInteractionRecord {
        intersections,
        ring_relationships: Vec::new(),
        identical_rings,
        a_ring_count: ring_count,
        b_ring_count: 0,
    }
}

/// Returns [PolygonRelationship::Equal] or [PolygonRelationship::EqualButOpposite] if the two
/// rings have the same cycle of vertexes (forward or reversed), otherwise `None`.
pub fn identical_relationship<T>(
    ring_a: &Polygon<T>,
    ring_b: &Polygon<T>,
    pos_equal_eps: T,
) -> Option<PolygonRelationship>
where
    T: Real,
{
    let n = ring_a.vertex_count();
    if n == 0 || n != ring_b.vertex_count() {
        return None;
    }

    let first = ring_a.at(0);
    for k in (0..n).filter(|&k| ring_b.at(k).fuzzy_eq_eps(first, pos_equal_eps)) {
        if (0..n).all(|i| ring_a.at(i).fuzzy_eq_eps(ring_b.at((k + i) % n), pos_equal_eps)) {
            return Some(PolygonRelationship::Equal);
        }

        if (0..n).all(|i| ring_a.at(i).fuzzy_eq_eps(ring_b.at((k + n - i) % n), pos_equal_eps)) {
            return Some(PolygonRelationship::EqualButOpposite);
        }
    }

    None
}

/// Relationship of two rings whose boundaries do not touch.
pub fn containment_relationship<T>(ring_a: &Polygon<T>, ring_b: &Polygon<T>) -> PolygonRelationship
where
    T: Real,
{
    let (Some(ea), Some(eb)) = (ring_a.extents(), ring_b.extents()) else {
        return PolygonRelationship::Separated;
    };

    if ea.max_x < eb.min_x || eb.max_x < ea.min_x || ea.max_y < eb.min_y || eb.max_y < ea.min_y {
        return PolygonRelationship::Separated;
    }

    // boundaries do not touch so any vertex decides containment
    if ring_b.winding_number(ring_a.at(0)) != 0 {
        if ring_b.is_positive() {
            PolygonRelationship::AInsideB
        } else {
            PolygonRelationship::AIsInsideHoleOfB
        }
    } else if ring_a.winding_number(ring_b.at(0)) != 0 {
        if ring_a.is_positive() {
            PolygonRelationship::BInsideA
        } else {
            PolygonRelationship::BIsInsideHoleOfA
        }
    } else {
        PolygonRelationship::Separated
    }
}

fn create_edge_index<T>(
    numbering: &EdgeNumbering<'_, T>,
    edges: std::ops::Range<usize>,
    expand: T,
) -> StaticAABB2DIndex<T>
where
    T: Real,
{
    let mut builder = StaticAABB2DIndexBuilder::new(edges.len());
    for edge in edges {
        let bb: AABB<T> = numbering.edge(edge).bounding_box(expand);
        builder.add(bb.min_x, bb.min_y, bb.max_x, bb.max_y);
    }

    match builder.build() {
        Ok(x) => x,
        Err(e) => match e {
            StaticAABB2DIndexBuildError::ItemCountError { .. } => {
                unreachable!("internal library error: count mismatch when building spatial index")
            }
            StaticAABB2DIndexBuildError::NumericCastError => {
                panic!("failed to cast coordinate type: {e}")
            }
        },
    }
}

/// Edge shorter than the epsilon. These get no contacts and are stepped over when finding the
/// edges around a vertex.
fn is_degenerate<T>(numbering: &EdgeNumbering<'_, T>, edge: usize, pos_equal_eps: T) -> bool
where
    T: Real,
{
    let e = numbering.edge(edge);
    e.from.fuzzy_eq_eps(e.to, pos_equal_eps)
}

/// Next edge in the ring that is not degenerate (`edge` itself if all others are).
fn next_live_edge<T>(numbering: &EdgeNumbering<'_, T>, edge: usize, pos_equal_eps: T) -> usize
where
    T: Real,
{
    let ring_len = numbering.ring_edges(numbering.edge_ring(edge)).len();
    let mut next = numbering.next_edge(edge);
    for _ in 1..ring_len {
        if !is_degenerate(numbering, next, pos_equal_eps) {
            return next;
        }
        next = numbering.next_edge(next);
    }

    edge
}

/// Previous edge in the ring that is not degenerate (`edge` itself if all others are).
fn prev_live_edge<T>(numbering: &EdgeNumbering<'_, T>, edge: usize, pos_equal_eps: T) -> usize
where
    T: Real,
{
    let ring_len = numbering.ring_edges(numbering.edge_ring(edge)).len();
    let mut prev = numbering.prev_edge(edge);
    for _ in 1..ring_len {
        if !is_degenerate(numbering, prev, pos_equal_eps) {
            return prev;
        }
        prev = numbering.prev_edge(prev);
    }

    edge
}

/// Contact points keyed by the edge pair they are recorded on, de-duplicated within the epsilon.
struct ContactSet<T> {
    by_edges: BTreeMap<(usize, usize), Vec<Vector2<T>>>,
}

impl<T> ContactSet<T>
where
    T: Real,
{
    fn new() -> Self {
        Self {
            by_edges: BTreeMap::new(),
        }
    }

    fn insert(&mut self, edge_a: usize, edge_b: usize, point: Vector2<T>, pos_equal_eps: T) {
        let points = self.by_edges.entry((edge_a, edge_b)).or_default();
        if !points.iter().any(|p| p.fuzzy_eq_eps(point, pos_equal_eps)) {
            points.push(point);
        }
    }

    fn into_intersections(
        self,
        numbering: &EdgeNumbering<'_, T>,
        pos_equal_eps: T,
    ) -> Vec<SegmentIntersection<T>> {
        let mut result = Vec::new();
        for ((edge_a, edge_b), mut points) in self.by_edges {
            // order along edge A for stable output
            let edge = numbering.edge(edge_a);
            points.sort_by(|p1, p2| {
                edge.distance_along(*p1)
                    .partial_cmp(&edge.distance_along(*p2))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            for point in points {
                let relationship = classify(numbering, edge_a, edge_b, point, pos_equal_eps);
                result.push(SegmentIntersection::new(edge_a, edge_b, point, relationship));
            }
        }

        result
    }
}

/// Move a contact at the end vertex of `edge` onto the next non degenerate edge, snapping to the
/// vertex.
fn normalize_to_edge<T>(
    numbering: &EdgeNumbering<'_, T>,
    edge: usize,
    point: Vector2<T>,
    pos_equal_eps: T,
) -> (usize, Option<Vector2<T>>)
where
    T: Real,
{
    let e = numbering.edge(edge);
    if point.fuzzy_eq_eps(e.to, pos_equal_eps) {
        (next_live_edge(numbering, edge, pos_equal_eps), Some(e.to))
    } else if point.fuzzy_eq_eps(e.from, pos_equal_eps) {
        (edge, Some(e.from))
    } else {
        (edge, None)
    }
}

fn add_contact<T>(
    numbering: &EdgeNumbering<'_, T>,
    edge_a: usize,
    edge_b: usize,
    point: Vector2<T>,
    pos_equal_eps: T,
    contacts: &mut ContactSet<T>,
) where
    T: Real,
{
    let (edge_a, snap_a) = normalize_to_edge(numbering, edge_a, point, pos_equal_eps);
    let (edge_b, snap_b) = normalize_to_edge(numbering, edge_b, point, pos_equal_eps);
    if edge_a == edge_b {
        return;
    }

    let point = snap_a.or(snap_b).unwrap_or(point);
    if numbering.edge_side(edge_a) == numbering.edge_side(edge_b) && edge_b < edge_a {
        // self intersects keep the lower edge on side A
        contacts.insert(edge_b, edge_a, point, pos_equal_eps);
    } else {
        contacts.insert(edge_a, edge_b, point, pos_equal_eps);
    }
}

fn add_contacts<T>(
    numbering: &EdgeNumbering<'_, T>,
    edge_a: usize,
    edge_b: usize,
    pos_equal_eps: T,
    contacts: &mut ContactSet<T>,
) where
    T: Real,
{
    let ea = numbering.edge(edge_a);
    let eb = numbering.edge(edge_b);
    match seg_seg_intr(ea.from, ea.to, eb.from, eb.to, pos_equal_eps) {
        SegSegIntr::NoIntersect => {}
        SegSegIntr::Point { seg1_t, .. } => {
            let point = point_from_parametric(ea.from, ea.to, seg1_t);
            add_contact(numbering, edge_a, edge_b, point, pos_equal_eps, contacts);
        }
        SegSegIntr::Overlap { seg2_t0, seg2_t1 } => {
            for t in [seg2_t0, seg2_t1] {
                let point = point_from_parametric(eb.from, eb.to, t);
                add_contact(numbering, edge_a, edge_b, point, pos_equal_eps, contacts);
            }
        }
    }
}

/// Boundary path going out of the intersect point, as a unit direction plus the length of the
/// edge it runs along.
#[derive(Debug, Copy, Clone)]
struct Ray<T> {
    dir: Vector2<T>,
    length: T,
}

impl<T> Ray<T>
where
    T: Real,
{
    fn new(v: Vector2<T>) -> Self {
        let length = v.length();
        Self {
            dir: v.scale(T::one() / length),
            length,
        }
    }

    fn reversed(self) -> Self {
        Self {
            dir: -self.dir,
            length: self.length,
        }
    }

    /// Rays run along the same path (same direction within the distance epsilon over the shorter
    /// ray).
    fn coincides(&self, other: &Ray<T>, pos_equal_eps: T) -> bool {
        let tol = pos_equal_eps / num_traits::real::Real::min(self.length, other.length);
        self.dir.perp_dot(other.dir).abs() <= tol && self.dir.dot(other.dir) > T::zero()
    }
}

/// Arriving and leaving boundary directions of one polygon at an intersect point.
#[derive(Debug, Copy, Clone)]
struct Corner<T> {
    /// Direction of travel arriving at the point.
    dir_in: Vector2<T>,
    /// Path going back along the arriving edge.
    in_ray: Ray<T>,
    /// Path leaving along the edge.
    out_ray: Ray<T>,
}

impl<T> Corner<T>
where
    T: Real,
{
    fn new(
        numbering: &EdgeNumbering<'_, T>,
        edge: usize,
        at_start: bool,
        pos_equal_eps: T,
    ) -> Self {
        let out_ray = Ray::new(numbering.edge(edge).direction());
        let in_ray = if at_start {
            let prev = prev_live_edge(numbering, edge, pos_equal_eps);
            Ray::new(numbering.edge(prev).direction()).reversed()
        } else {
            out_ray.reversed()
        };

        Self {
            dir_in: -in_ray.dir,
            in_ray,
            out_ray,
        }
    }

    /// Where `ray` goes relative to the filled side of this corner: `None` if it runs along the
    /// boundary, otherwise `Some(true)` if strictly inside.
    fn side_of(&self, ray: &Ray<T>, pos_equal_eps: T) -> Option<bool> {
        if ray.coincides(&self.in_ray, pos_equal_eps) || ray.coincides(&self.out_ray, pos_equal_eps)
        {
            return None;
        }

        Some(direction_in_corner(
            self.dir_in,
            self.out_ray.dir,
            ray.dir,
            T::fuzzy_epsilon(),
        ))
    }

    /// Boundary arrives on one side of the other corner's filled region and leaves on the other.
    fn crosses(&self, other: &Corner<T>, pos_equal_eps: T) -> bool {
        match (
            other.side_of(&self.in_ray, pos_equal_eps),
            other.side_of(&self.out_ray, pos_equal_eps),
        ) {
            (Some(arrive_inside), Some(leave_inside)) => arrive_inside != leave_inside,
            _ => false,
        }
    }
}

/// Compute the relationship flags of the contact at `point` between `edge_a` and `edge_b`.
pub fn classify<T>(
    numbering: &EdgeNumbering<'_, T>,
    edge_a: usize,
    edge_b: usize,
    point: Vector2<T>,
    pos_equal_eps: T,
) -> Relationship
where
    T: Real,
{
    let seg_a = numbering.edge(edge_a);
    let seg_b = numbering.edge(edge_b);
    let at_start_a = point.fuzzy_eq_eps(seg_a.from, pos_equal_eps);
    let at_start_b = point.fuzzy_eq_eps(seg_b.from, pos_equal_eps);
    let corner_a = Corner::new(numbering, edge_a, at_start_a, pos_equal_eps);
    let corner_b = Corner::new(numbering, edge_b, at_start_b, pos_equal_eps);

    let mut r = Relationship::NONE;
    if at_start_a {
        r |= Relationship::at_start_of(Side::A);
    }
    if at_start_b {
        r |= Relationship::at_start_of(Side::B);
    }

    let dir_a = corner_a.out_ray.dir;
    let dir_b = corner_b.out_ray.dir;
    if dir_a.dot(dir_b) < T::zero() {
        r |= Relationship::OPPOSITE_DIRECTIONS;
    }

    let edges_collinear = corner_a.out_ray.coincides(&corner_b.out_ray, pos_equal_eps)
        || corner_a
            .out_ray
            .coincides(&corner_b.out_ray.reversed(), pos_equal_eps);
    if edges_collinear {
        r |= Relationship::COINCIDENT_LINES;
        let within = |outer: &PolygonEdge<T>, p: Vector2<T>| {
            let length = outer.length();
            outer
                .distance_along(p)
                .fuzzy_in_range_eps(T::zero(), length, pos_equal_eps)
        };
        if within(&seg_a, seg_b.from) && within(&seg_a, seg_b.to) {
            r |= Relationship::A_ENCOMPASSES_B;
        }
        if within(&seg_b, seg_a.from) && within(&seg_b, seg_a.to) {
            r |= Relationship::B_ENCOMPASSES_A;
        }
    }

    if corner_a.in_ray.coincides(&corner_b.in_ray, pos_equal_eps) {
        r |= Relationship::SAME_LINE_BEFORE_POINT;
    }
    if corner_a.out_ray.coincides(&corner_b.out_ray, pos_equal_eps) {
        r |= Relationship::SAME_LINE_AFTER_POINT;
    }
    if corner_a.out_ray.coincides(&corner_b.in_ray, pos_equal_eps) {
        r |= Relationship::A_ALONG_B_REVERSED;
    }
    if corner_b.out_ray.coincides(&corner_a.in_ray, pos_equal_eps) {
        r |= Relationship::B_ALONG_A_REVERSED;
    }

    if corner_b.side_of(&corner_a.out_ray, pos_equal_eps) == Some(true) {
        r |= Relationship::A_INTO_B;
    }
    if corner_a.side_of(&corner_b.out_ray, pos_equal_eps) == Some(true) {
        r |= Relationship::B_INTO_A;
    }

    if corner_a.crosses(&corner_b, pos_equal_eps) || corner_b.crosses(&corner_a, pos_equal_eps) {
        r |= Relationship::OVERLAPPING;
    }

    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::math::vec2,
        polygon::{Departure, Polygon},
    };

    fn rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Polygon<f64> {
        Polygon::from_points([
            vec2(min_x, min_y),
            vec2(max_x, min_y),
            vec2(max_x, max_y),
            vec2(min_x, max_y),
        ])
    }

    #[test]
    fn crossing_squares() {
        let a = rect(0.0, 0.0, 2.0, 2.0);
        let b = rect(1.0, 1.0, 3.0, 3.0);
        let record = find_interaction(&a, &b, 1e-5);
        assert_eq!(record.intersections.len(), 2);

        let first = &record.intersections[0];
        assert_eq!((first.edge_a, first.edge_b), (1, 4));
        assert!(first.point.fuzzy_eq(vec2(2.0, 1.0)));
        assert!(first.relationship.contains(Relationship::OVERLAPPING));
        assert_eq!(first.departure(Side::A), Departure::Inside);
        assert_eq!(first.departure(Side::B), Departure::Outside);

        let second = &record.intersections[1];
        assert_eq!((second.edge_a, second.edge_b), (2, 7));
        assert_eq!(second.departure(Side::A), Departure::Outside);
        assert_eq!(second.departure(Side::B), Departure::Inside);
    }

    #[test]
    fn shared_edge_is_recorded_at_both_ends() {
        let a = rect(0.0, 0.0, 1.0, 1.0);
        let b = rect(1.0, 0.0, 2.0, 1.0);
        let record = find_interaction(&a, &b, 1e-5);
        assert_eq!(record.intersections.len(), 2);

        let bottom = &record.intersections[0];
        assert_eq!((bottom.edge_a, bottom.edge_b), (1, 4));
        assert!(bottom.point.fuzzy_eq(vec2(1.0, 0.0)));
        assert!(bottom
            .relationship
            .contains(Relationship::BOTH_LINES_START_AT_POINT | Relationship::A_ALONG_B_REVERSED));
        assert!(!bottom.relationship.contains(Relationship::OVERLAPPING));
        assert_eq!(bottom.departure(Side::A), Departure::Against);
        assert_eq!(bottom.departure(Side::B), Departure::Outside);

        let top = &record.intersections[1];
        assert_eq!((top.edge_a, top.edge_b), (2, 7));
        assert!(top.point.fuzzy_eq(vec2(1.0, 1.0)));
        assert_eq!(top.departure(Side::A), Departure::Outside);
        assert_eq!(top.departure(Side::B), Departure::Against);
        assert_eq!(record.relationship(0, 0), PolygonRelationship::Intersection);
    }

    #[test]
    fn collinear_same_direction_run() {
        let a = rect(0.0, 0.0, 2.0, 2.0);
        let b = rect(1.0, 0.0, 3.0, 1.0);
        let record = find_interaction(&a, &b, 1e-5);
        let at = |p: Vector2<f64>| {
            record
                .intersections
                .iter()
                .find(|i| i.point.fuzzy_eq(p))
                .expect("intersect at point")
        };

        let run_start = at(vec2(1.0, 0.0));
        assert!(run_start
            .relationship
            .contains(Relationship::SAME_LINE_AFTER_POINT | Relationship::COINCIDENT_LINES));
        assert!(!run_start.relationship.contains(Relationship::A_ENCOMPASSES_B));
        assert_eq!(run_start.departure(Side::A), Departure::Along);

        let run_end = at(vec2(2.0, 0.0));
        assert!(run_end
            .relationship
            .contains(Relationship::SAME_LINE_BEFORE_POINT));
        assert_eq!(run_end.departure(Side::A), Departure::Inside);
        assert_eq!(run_end.departure(Side::B), Departure::Outside);

        let crossing = at(vec2(2.0, 1.0));
        assert!(crossing.relationship.contains(Relationship::OVERLAPPING));
    }

    #[test]
    fn corner_touch_is_glancing() {
        let a = rect(0.0, 0.0, 1.0, 1.0);
        let b = rect(1.0, 1.0, 2.0, 2.0);
        let record = find_interaction(&a, &b, 1e-5);
        assert_eq!(record.intersections.len(), 1);
        let r = record.intersections[0].relationship;
        assert!(r.is_glancing());
        assert!(r.contains(Relationship::BOTH_LINES_START_AT_POINT));
        assert_eq!(r.departure(Side::A), Departure::Outside);
        assert_eq!(r.departure(Side::B), Departure::Outside);
    }

    #[test]
    fn ring_relationships_without_intersects() {
        let hole = rect(4.0, 4.0, 6.0, 6.0).copy(false, true);
        let a = rect(0.0, 0.0, 10.0, 10.0).with_inner(hole);
        let island = rect(4.5, 4.5, 5.5, 5.5);
        let far = rect(20.0, 20.0, 21.0, 21.0);

        let record = find_interaction(&a, &island, 1e-5);
        assert!(record.intersections.is_empty());
        assert_eq!(record.relationship(0, 0), PolygonRelationship::BInsideA);
        assert_eq!(record.relationship(1, 0), PolygonRelationship::BIsInsideHoleOfA);

        let record = find_interaction(&island, &a, 1e-5);
        assert_eq!(record.relationship(0, 0), PolygonRelationship::AInsideB);
        assert_eq!(record.relationship(0, 1), PolygonRelationship::AIsInsideHoleOfB);

        let record = find_interaction(&a, &far, 1e-5);
        assert_eq!(record.relationship(0, 0), PolygonRelationship::Separated);
    }

    #[test]
    fn identical_rings_have_no_intersects() {
        let a = rect(0.0, 0.0, 1.0, 1.0);
        let mut shifted_start = a.clone();
        shifted_start.vertexes.rotate_left(2);
        let record = find_interaction(&a, &shifted_start, 1e-5);
        assert!(record.intersections.is_empty());
        assert_eq!(record.relationship(0, 0), PolygonRelationship::Equal);

        let record = find_interaction(&a, &a.copy(false, true), 1e-5);
        assert!(record.intersections.is_empty());
        assert_eq!(
            record.relationship(0, 0),
            PolygonRelationship::EqualButOpposite
        );
    }

    #[test]
    fn self_intersects() {
        let figure_eight = Polygon::from_points([
            vec2(0.0, 0.0),
            vec2(2.0, 2.0),
            vec2(2.0, 0.0),
            vec2(0.0, 2.0),
        ]);
        let record = find_self_interaction(&figure_eight, 1e-5);
        assert_eq!(record.intersections.len(), 1);
        let intr = &record.intersections[0];
        assert_eq!((intr.edge_a, intr.edge_b), (0, 2));
        assert!(intr.point.fuzzy_eq(vec2(1.0, 1.0)));
        assert!(intr.relationship.contains(Relationship::OVERLAPPING));

        // pinched at (1, 1), touches without crossing
        let pinched = Polygon::from_points([
            vec2(0.0, 0.0),
            vec2(2.0, 0.0),
            vec2(1.0, 1.0),
            vec2(2.0, 2.0),
            vec2(0.0, 2.0),
            vec2(1.0, 1.0),
        ]);
        let record = find_self_interaction(&pinched, 1e-5);
        assert_eq!(record.intersections.len(), 1);
        let intr = &record.intersections[0];
        assert_eq!((intr.edge_a, intr.edge_b), (2, 5));
        assert!(intr.relationship.is_glancing());

        assert!(find_self_interaction(&rect(0.0, 0.0, 1.0, 1.0), 1e-5)
            .intersections
            .is_empty());
    }

    #[test]
    fn identical_self_rings_are_listed() {
        let a = rect(0.0, 0.0, 2.0, 2.0);
        let p = a.clone().with_inner(a.clone()).with_inner(rect(0.5, 0.5, 1.0, 1.0));
        let record = find_self_interaction(&p, 1e-5);
        assert!(record.intersections.is_empty());
        assert_eq!(record.identical_rings, vec![(0, 1, PolygonRelationship::Equal)]);

        let p = a.clone().with_inner(a.copy(false, true));
        let record = find_self_interaction(&p, 1e-5);
        assert!(record.intersections.is_empty());
        assert_eq!(
            record.identical_rings,
            vec![(0, 1, PolygonRelationship::EqualButOpposite)]
        );

        assert!(find_interaction(&a, &a, 1e-5).identical_rings.is_empty());
    }

    #[test]
    fn zero_length_edges_are_stepped_over() {
        // figure eight with the vertex (2, 2) repeated, edge 1 has zero length
        let figure_eight = Polygon::from_points([
            vec2(0.0, 0.0),
            vec2(2.0, 2.0),
            vec2(2.0, 2.0),
            vec2(2.0, 0.0),
            vec2(0.0, 2.0),
        ]);
        let record = find_self_interaction(&figure_eight, 1e-5);
        assert_eq!(record.intersections.len(), 1);
        let intr = &record.intersections[0];
        assert_eq!((intr.edge_a, intr.edge_b), (0, 3));
        assert!(intr.relationship.contains(Relationship::OVERLAPPING));

        // b's corner touches a's repeated vertex, the contact goes on the edge after the repeat
        let a = Polygon::from_points([
            vec2(0.0, 0.0),
            vec2(2.0, 0.0),
            vec2(2.0, 0.0),
            vec2(2.0, 2.0),
            vec2(0.0, 2.0),
        ]);
        let b = Polygon::from_points([vec2(2.0, 0.0), vec2(3.0, -1.0), vec2(3.0, 1.0)]);
        let record = find_interaction(&a, &b, 1e-5);
        assert_eq!(record.intersections.len(), 1);
        let intr = &record.intersections[0];
        assert_eq!(intr.edge_a, 2);
        assert!(intr.point.fuzzy_eq(vec2(2.0, 0.0)));
        assert!(intr.relationship.is_glancing());
    }
}
