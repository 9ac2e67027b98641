//! Intersection tracing engine shared by all the polygon boolean operations.
//!
//! Loops of the result are traced by walking polygon edges from intersect to intersect, at every
//! intersect the [OperationPolicy] decides which polygon's edge to continue on. Rings that never
//! meet the other polygon are resolved as a whole from their coarse relationships. The traced loops
//! plus the resolved rings are finally grouped into polygons (see [super::pgon_grouping]).
use std::collections::BTreeMap;

use super::{
    pgon_grouping::{group_rings, split_stray_holes},
    pgon_policies::{
        DifferencePolicy, IntersectionPolicy, OperationPolicy, RingContext, RingFate,
        SelfIntersectionPolicy, StartingPoint, UnionPolicy, XorPolicy,
    },
};
use crate::{
    core::{
        math::{ccw_turn_angle, Vector2},
        traits::Real,
    },
    polygon::{
        BooleanOp, BooleanOptions, EdgeNumbering, Polygon, PolygonInteractionRecord,
        SegmentIntersection, SelfIntersectionResult, Side, Tolerance,
    },
};
use std::cmp::Ordering;

/// Per edge list of the intersects recorded on it, with the side the edge is on.
type EdgeLookup = BTreeMap<usize, Vec<(usize, Side)>>;

fn build_edge_lookup<T>(intersections: &[SegmentIntersection<T>]) -> EdgeLookup {
    let mut lookup = EdgeLookup::new();
    for (index, intr) in intersections.iter().enumerate() {
        lookup
            .entry(intr.edge_a)
            .or_default()
            .push((index, Side::A));
        lookup
            .entry(intr.edge_b)
            .or_default()
            .push((index, Side::B));
    }

    lookup
}

/// Read only state for tracing the loops of one run.
struct TraceContext<'a, 'b, T> {
    numbering: &'b EdgeNumbering<'a, T>,
    lookup: &'b EdgeLookup,
    pos_equal_eps: T,
    /// Bound on the intersect visits plus edge advances of a single loop.
    max_steps: usize,
}

#[derive(Debug, Copy, Clone)]
struct Candidate<T> {
    index: usize,
    side: Side,
    dist: T,
    turn: T,
    remaining: T,
}

impl<T> Candidate<T>
where
    T: Real,
{
    /// Ordering among candidates at the same distance: smallest counter clockwise turn onto the
    /// other edge, then the shortest remaining other edge, then record order.
    fn tie_break(&self, other: &Candidate<T>) -> Ordering {
        self.turn
            .partial_cmp(&other.turn)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                self.remaining
                    .partial_cmp(&other.remaining)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| self.index.cmp(&other.index))
    }
}

/// Find the next intersect along `edge` at or after distance `from` (`None` means the start of
/// the edge), skipping intersects already passed at the current position.
fn next_intersection<T>(
    ctx: &TraceContext<'_, '_, T>,
    intersections: &[SegmentIntersection<T>],
    edge: usize,
    from: Option<T>,
    passed_here: &[usize],
) -> Option<Candidate<T>>
where
    T: Real,
{
    let entries = ctx.lookup.get(&edge)?;
    let eps = ctx.pos_equal_eps;
    let seg = ctx.numbering.edge(edge);
    let seg_dir = seg.direction();

    let mut candidates = Vec::new();
    for &(index, side) in entries {
        let intr = &intersections[index];
        let dist = seg.distance_along(intr.point);
        let ahead = match from {
            None => dist > -eps,
            Some(f) => dist > f + eps || (dist > f - eps && !passed_here.contains(&index)),
        };

        if !ahead {
            continue;
        }

        let other = ctx.numbering.edge(intr.edge(side.other()));
        candidates.push(Candidate {
            index,
            side,
            dist,
            turn: ccw_turn_angle(seg_dir, other.direction()),
            remaining: (other.to - intr.point).length(),
        });
    }

    let min_dist = candidates
        .iter()
        .map(|c| c.dist)
        .fold(None, |acc: Option<T>, d| match acc {
            Some(m) if m <= d => Some(m),
            _ => Some(d),
        })?;

    candidates
        .into_iter()
        .filter(|c| c.dist <= min_dist + eps)
        .min_by(|c1, c2| c1.tie_break(c2))
}

/// Mark the side not taken at an intersect as consumed if the operation can never use it.
fn resolve_other_side<T, P>(
    intersections: &mut [SegmentIntersection<T>],
    index: usize,
    taken: Side,
    policy: &P,
) where
    T: Real,
    P: OperationPolicy<T> + ?Sized,
{
    let other = taken.other();
    let intr = &intersections[index];
    if !intr.visited(other) && !policy.is_valid_departure(intr, other) {
        intersections[index].set_visited(other);
    }
}

fn push_point<T>(path: &mut Vec<Vector2<T>>, point: Vector2<T>, pos_equal_eps: T)
where
    T: Real,
{
    if path
        .last()
        .is_some_and(|last| last.fuzzy_eq_eps(point, pos_equal_eps))
    {
        return;
    }

    path.push(point);
}

/// Trace one loop from `start`. Returns `None` if the loop could not be closed.
///
/// Every side departed from is marked visited, except the start side which the caller marks once
/// the loop is closed or abandoned.
fn trace_loop<T, P>(
    ctx: &TraceContext<'_, '_, T>,
    intersections: &mut [SegmentIntersection<T>],
    policy: &P,
    start: &StartingPoint,
) -> Option<Vec<Vector2<T>>>
where
    T: Real,
    P: OperationPolicy<T> + ?Sized,
{
    let eps = ctx.pos_equal_eps;
    resolve_other_side(intersections, start.index, start.side, policy);

    let start_point = intersections[start.index].point;
    let mut path = vec![start_point];
    let mut edge = intersections[start.index].edge(start.side);
    let mut from = Some(ctx.numbering.edge(edge).distance_along(start_point));
    let mut passed_here = vec![start.index];

    for _ in 0..ctx.max_steps {
        let Some(next) = next_intersection(ctx, intersections, edge, from, &passed_here) else {
            // nothing left on this edge, continue on the next edge of the ring
            push_point(&mut path, ctx.numbering.edge(edge).to, eps);
            edge = ctx.numbering.next_edge(edge);
            from = None;
            passed_here.clear();
            continue;
        };

        let intr = &intersections[next.index];
        let arriving = next.side;
        let departing = if policy.switch_at_this_intersection(intr, arriving, start.region) {
            arriving.other()
        } else {
            arriving
        };

        if policy.polygon_completed(next.index, departing, start) {
            if path.len() > 1 && path[path.len() - 1].fuzzy_eq_eps(path[0], eps) {
                path.pop();
            }
            return Some(path);
        }

        if intr.visited(departing) {
            log::warn!(
                "abandoning loop started at intersect {}: intersect {} side {:?} already consumed",
                start.index,
                next.index,
                departing
            );
            return None;
        }

        let point = intr.point;
        log::trace!(
            "intersect {} at ({:?}, {:?}): arrived on {:?}, leaving on {:?}",
            next.index,
            point.x,
            point.y,
            arriving,
            departing
        );

        intersections[next.index].set_visited(departing);
        resolve_other_side(intersections, next.index, departing, policy);
        push_point(&mut path, point, eps);

        if departing == arriving {
            passed_here.push(next.index);
            from = Some(next.dist);
        } else {
            edge = intersections[next.index].edge(departing);
            from = Some(ctx.numbering.edge(edge).distance_along(point));
            passed_here.clear();
            passed_here.push(next.index);
        }
    }

    log::warn!(
        "abandoning loop started at intersect {}: step limit of {} reached",
        start.index,
        ctx.max_steps
    );
    None
}

/// Resolve every ring with no intersects using the ring relationships.
fn resolve_untouched_rings<T, P>(
    numbering: &EdgeNumbering<'_, T>,
    interaction: &PolygonInteractionRecord<T>,
    policy: &P,
) -> Vec<Polygon<T>>
where
    T: Real,
    P: OperationPolicy<T> + ?Sized,
{
    let a_ring_count = numbering.a_ring_count();
    let b_ring_count = numbering.b_ring_count();
    let mut handled = vec![false; numbering.ring_count()];
    for intr in interaction.intersections.iter() {
        handled[numbering.edge_ring(intr.edge_a)] = true;
        handled[numbering.edge_ring(intr.edge_b)] = true;
    }

    let mut result = Vec::new();
    for ra in 0..a_ring_count {
        for rb in 0..b_ring_count {
            let rel = interaction.relationship(ra, rb);
            if !rel.is_identical() || handled[ra] || handled[a_ring_count + rb] {
                continue;
            }

            handled[ra] = true;
            handled[a_ring_count + rb] = true;
            if policy.handle_identical(rel) {
                result.push(numbering.ring(ra).copy(false, false));
            }
        }
    }

    // identical rings within one polygon
    for &(ri, rj, rel) in interaction.identical_rings.iter() {
        if handled[ri] || handled[rj] {
            continue;
        }

        handled[ri] = true;
        handled[rj] = true;
        if policy.handle_identical(rel) {
            result.push(numbering.ring(ri).copy(false, false));
        }
    }

    let a_inverted = !numbering.ring(0).is_positive();
    let b_inverted = b_ring_count > 0 && !numbering.ring(a_ring_count).is_positive();
    for ring_index in 0..numbering.ring_count() {
        if handled[ring_index] {
            continue;
        }

        let ring = numbering.ring(ring_index);
        if ring.vertex_count() < 3 {
            continue;
        }

        let context = match numbering.ring_side(ring_index) {
            Side::A => RingContext {
                side: Side::A,
                relationships: (0..b_ring_count)
                    .map(|rb| interaction.relationship(ring_index, rb))
                    .collect(),
                other_inverted: b_inverted,
            },
            Side::B => RingContext {
                side: Side::B,
                relationships: (0..a_ring_count)
                    .map(|ra| interaction.relationship(ra, ring_index - a_ring_count))
                    .collect(),
                other_inverted: a_inverted,
            },
        };

        match policy.handle_non_intersecting(&context) {
            RingFate::Keep => result.push(ring.copy(false, false)),
            RingFate::KeepInverted => result.push(ring.copy(false, true)),
            RingFate::Discard => {}
        }
    }

    result
}

/// Run the tracing engine with `policy` and return the result rings (not grouped).
///
/// `interaction` must have been built from `a` and `b` (or from `a` alone for self intersects, in
/// which case `b` is `None`). Its visited flags are cleared when the run starts and updated as
/// loops are traced, so the same record may be run again.
pub fn run<T, P>(
    a: &Polygon<T>,
    b: Option<&Polygon<T>>,
    interaction: &mut PolygonInteractionRecord<T>,
    policy: &P,
    options: &BooleanOptions<T>,
) -> Vec<Polygon<T>>
where
    T: Real,
    P: OperationPolicy<T> + ?Sized,
{
    interaction.reset_visited();
    let tolerance = Tolerance::resolve(options.tolerance, a, b);
    let numbering = EdgeNumbering::new(a, b);
    let lookup = build_edge_lookup(&interaction.intersections);
    let ctx = TraceContext {
        numbering: &numbering,
        lookup: &lookup,
        pos_equal_eps: options.pos_equal_eps,
        max_steps: 2 * interaction.intersections.len() + numbering.edge_count() + 2,
    };

    let mut result = Vec::new();
    let mut discarded = 0;
    let mut abandoned = 0;
    while let Some(start) = policy.valid_starting_intersection(&interaction.intersections) {
        let path = trace_loop(&ctx, &mut interaction.intersections, policy, &start);
        interaction.intersections[start.index].set_visited(start.side);

        let Some(path) = path else {
            abandoned += 1;
            continue;
        };

        let ring = Polygon::from_points(path);
        if ring.area().abs() < tolerance.area {
            discarded += 1;
            continue;
        }

        let ring = ring.remove_redundant(tolerance.linear).unwrap_or(ring);
        if ring.vertex_count() < 3 || ring.area().abs() < tolerance.area {
            discarded += 1;
            continue;
        }

        match policy.finish_loop(ring, start.region) {
            Some(ring) => result.push(ring),
            None => discarded += 1,
        }
    }

    let traced = result.len();
    result.extend(resolve_untouched_rings(&numbering, interaction, policy));
    log::debug!(
        "traced {} loops ({} discarded, {} abandoned), {} rings resolved without intersects",
        traced,
        discarded,
        abandoned,
        result.len() - traced
    );

    result
}

/// Union of `a` and `b` using a precomputed interaction record (see
/// [PolygonInteractionRecord::new]).
pub fn union<T>(
    a: &Polygon<T>,
    b: &Polygon<T>,
    interaction: &mut PolygonInteractionRecord<T>,
    options: &BooleanOptions<T>,
) -> Vec<Polygon<T>>
where
    T: Real,
{
    let rings = run(a, Some(b), interaction, &UnionPolicy, options);
    group_rings(rings, options.output_shape, options.pos_equal_eps)
}

/// Intersection of `a` and `b` using a precomputed interaction record (see
/// [PolygonInteractionRecord::new]).
pub fn intersection<T>(
    a: &Polygon<T>,
    b: &Polygon<T>,
    interaction: &mut PolygonInteractionRecord<T>,
    options: &BooleanOptions<T>,
) -> Vec<Polygon<T>>
where
    T: Real,
{
    let rings = run(a, Some(b), interaction, &IntersectionPolicy, options);
    group_rings(rings, options.output_shape, options.pos_equal_eps)
}

/// `a` minus `b` using a precomputed interaction record, which must be built against the inverted
/// `b` (see [PolygonInteractionRecord::for_difference]).
pub fn difference<T>(
    a: &Polygon<T>,
    b: &Polygon<T>,
    interaction: &mut PolygonInteractionRecord<T>,
    options: &BooleanOptions<T>,
) -> Vec<Polygon<T>>
where
    T: Real,
{
    let subtrahend = b.copy(true, true);
    let rings = run(a, Some(&subtrahend), interaction, &DifferencePolicy, options);
    group_rings(rings, options.output_shape, options.pos_equal_eps)
}

/// Exclusive-or of `a` and `b` using a precomputed interaction record (see
/// [PolygonInteractionRecord::new]).
pub fn xor<T>(
    a: &Polygon<T>,
    b: &Polygon<T>,
    interaction: &mut PolygonInteractionRecord<T>,
    options: &BooleanOptions<T>,
) -> Vec<Polygon<T>>
where
    T: Real,
{
    let rings = run(a, Some(b), interaction, &XorPolicy, options);
    group_rings(rings, options.output_shape, options.pos_equal_eps)
}

/// Remove self intersects from `p` using a precomputed self interaction record (see
/// [PolygonInteractionRecord::for_self_intersections]).
pub fn remove_self_intersections<T>(
    p: &Polygon<T>,
    interaction: &mut PolygonInteractionRecord<T>,
    options: &BooleanOptions<T>,
) -> SelfIntersectionResult<T>
where
    T: Real,
{
    let policy = SelfIntersectionPolicy::new(p);
    let rings = run(p, None, interaction, &policy, options);
    let (rings, stray_holes) = split_stray_holes(rings, options.pos_equal_eps);
    if !stray_holes.is_empty() {
        log::debug!("{} stray holes after removing self intersects", stray_holes.len());
    }

    SelfIntersectionResult {
        polygons: group_rings(rings, options.output_shape, options.pos_equal_eps),
        stray_holes,
    }
}

/// Perform the boolean `operation` between `a` and `b`.
pub fn polygon_boolean<T>(
    a: &Polygon<T>,
    b: &Polygon<T>,
    operation: BooleanOp,
    options: &BooleanOptions<T>,
) -> Vec<Polygon<T>>
where
    T: Real,
{
    let eps = options.pos_equal_eps;
    match operation {
        BooleanOp::Union => union(a, b, &mut PolygonInteractionRecord::new(a, b, eps), options),
        BooleanOp::Intersection => {
            intersection(a, b, &mut PolygonInteractionRecord::new(a, b, eps), options)
        }
        BooleanOp::Difference => difference(
            a,
            b,
            &mut PolygonInteractionRecord::for_difference(a, b, eps),
            options,
        ),
        BooleanOp::Xor => xor(a, b, &mut PolygonInteractionRecord::new(a, b, eps), options),
    }
}

/// Remove the self intersects of `p`.
pub fn polygon_remove_self_intersections<T>(
    p: &Polygon<T>,
    options: &BooleanOptions<T>,
) -> SelfIntersectionResult<T>
where
    T: Real,
{
    let mut interaction =
        PolygonInteractionRecord::for_self_intersections(p, options.pos_equal_eps);
    remove_self_intersections(p, &mut interaction, options)
}
