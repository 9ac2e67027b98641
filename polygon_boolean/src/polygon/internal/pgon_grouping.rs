//! Grouping result rings into polygons by containment.
use crate::{
    core::{
        math::{dist_squared, line_seg_closest_point, midpoint, Vector2},
        traits::Real,
    },
    polygon::{OutputShape, Polygon},
};
use std::cmp::Ordering;

fn point_on_boundary<T>(ring: &Polygon<T>, point: Vector2<T>, pos_equal_eps: T) -> bool
where
    T: Real,
{
    let eps_squared = pos_equal_eps * pos_equal_eps;
    ring.iter_edges()
        .any(|e| dist_squared(line_seg_closest_point(e.from, e.to, point), point) <= eps_squared)
}

/// Returns `true` if ring `inner` lies inside ring `outer`.
///
/// Rings are expected to not cross, they may touch. Containment is decided by the first vertex of
/// `inner` not on the boundary of `outer` (falling back to edge midpoints).
pub fn ring_contains_ring<T>(outer: &Polygon<T>, inner: &Polygon<T>, pos_equal_eps: T) -> bool
where
    T: Real,
{
    let (Some(oe), Some(ie)) = (outer.extents(), inner.extents()) else {
        return false;
    };

    if ie.min_x < oe.min_x - pos_equal_eps
        || ie.min_y < oe.min_y - pos_equal_eps
        || ie.max_x > oe.max_x + pos_equal_eps
        || ie.max_y > oe.max_y + pos_equal_eps
    {
        return false;
    }

    let test_point = inner
        .vertexes
        .iter()
        .copied()
        .find(|&v| !point_on_boundary(outer, v, pos_equal_eps))
        .or_else(|| {
            inner
                .iter_edges()
                .map(|e| midpoint(e.from, e.to))
                .find(|&m| !point_on_boundary(outer, m, pos_equal_eps))
        });

    match test_point {
        Some(p) => outer.winding_number(p) != 0,
        None => false,
    }
}

/// Parent (smallest enclosing ring) of every ring, `None` for top level rings.
///
/// Also returns the ring indexes sorted by descending absolute area, every parent comes before its
/// children in this order.
pub fn containment_parents<T>(
    rings: &[Polygon<T>],
    pos_equal_eps: T,
) -> (Vec<Option<usize>>, Vec<usize>)
where
    T: Real,
{
    let areas: Vec<T> = rings.iter().map(|r| r.area().abs()).collect();
    let mut order: Vec<usize> = (0..rings.len()).collect();
    order.sort_by(|&i, &j| {
        areas[j]
            .partial_cmp(&areas[i])
            .unwrap_or(Ordering::Equal)
            .then(i.cmp(&j))
    });

    let mut parents = vec![None; rings.len()];
    for (pos, &i) in order.iter().enumerate() {
        // rings placed so far are at least as large, the last one found is the smallest
        parents[i] = order[..pos]
            .iter()
            .rev()
            .copied()
            .find(|&j| ring_contains_ring(&rings[j], &rings[i], pos_equal_eps));
    }

    (parents, order)
}

/// Move every ring into the inner list of its parent where `attach(parent, child)` is true.
fn build_trees<T, F>(
    rings: Vec<Polygon<T>>,
    parents: &[Option<usize>],
    order: &[usize],
    attach: F,
) -> Vec<Polygon<T>>
where
    T: Real,
    F: Fn(usize, usize) -> bool,
{
    let mut nodes: Vec<Option<Polygon<T>>> = rings.into_iter().map(Some).collect();
    let mut orphans = Vec::new();
    // children before parents so each subtree is complete when it moves
    for &i in order.iter().rev() {
        let Some(parent) = parents[i].filter(|&p| attach(p, i)) else {
            continue;
        };

        if let Some(child) = nodes[i].take() {
            match nodes[parent].as_mut() {
                Some(p) => p.inner.push(child),
                None => orphans.push(child),
            }
        }
    }

    nodes.into_iter().flatten().chain(orphans).collect()
}

/// Group `rings` into polygons according to `shape`.
///
/// Rings must not cross each other (they may touch).
///
/// # Examples
///
/// ```
/// # use polygon_boolean::polygon;
/// # use polygon_boolean::polygon::*;
/// # use polygon_boolean::polygon::internal::pgon_grouping::group_rings;
/// let outer = polygon![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
/// let hole = polygon![(2.0, 2.0), (2.0, 8.0), (8.0, 8.0), (8.0, 2.0)];
/// let island = polygon![(4.0, 4.0), (6.0, 4.0), (6.0, 6.0), (4.0, 6.0)];
/// let rings = vec![island, outer, hole];
///
/// let trees = group_rings(rings.clone(), OutputShape::PolygonTrees, 1e-5);
/// assert_eq!(trees.len(), 1);
/// assert_eq!(trees[0].ring_count(), 3);
///
/// let with_holes = group_rings(rings, OutputShape::PolygonWithHoles, 1e-5);
/// assert_eq!(with_holes.len(), 2);
/// ```
pub fn group_rings<T>(
    rings: Vec<Polygon<T>>,
    shape: OutputShape,
    pos_equal_eps: T,
) -> Vec<Polygon<T>>
where
    T: Real,
{
    match shape {
        OutputShape::SeparateLoops => rings,
        OutputShape::PolygonTrees => {
            let (parents, order) = containment_parents(&rings, pos_equal_eps);
            build_trees(rings, &parents, &order, |_, _| true)
        }
        OutputShape::PolygonWithHoles => {
            let (parents, order) = containment_parents(&rings, pos_equal_eps);
            let positive: Vec<bool> = rings.iter().map(|r| r.is_positive()).collect();
            build_trees(rings, &parents, &order, |parent, child| {
                positive[parent] && !positive[child]
            })
        }
    }
}

/// Split off the negative rings not inside any positive ring.
///
/// Returns `(rings, stray_holes)`.
pub fn split_stray_holes<T>(
    rings: Vec<Polygon<T>>,
    pos_equal_eps: T,
) -> (Vec<Polygon<T>>, Vec<Polygon<T>>)
where
    T: Real,
{
    let (parents, _) = containment_parents(&rings, pos_equal_eps);
    let positive: Vec<bool> = rings.iter().map(|r| r.is_positive()).collect();
    let has_positive_ancestor = |mut i: usize| {
        while let Some(p) = parents[i] {
            if positive[p] {
                return true;
            }
            i = p;
        }
        false
    };

    let stray: Vec<bool> = (0..rings.len())
        .map(|i| !positive[i] && !has_positive_ancestor(i))
        .collect();

    let mut kept = Vec::new();
    let mut stray_holes = Vec::new();
    for (ring, is_stray) in rings.into_iter().zip(stray) {
        if is_stray {
            stray_holes.push(ring);
        } else {
            kept.push(ring);
        }
    }

    (kept, stray_holes)
}
