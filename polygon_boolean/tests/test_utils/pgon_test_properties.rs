use polygon_boolean::{core::traits::FuzzyEq, polygon::Polygon};
use static_aabb2d_index::AABB;

/// Fuzzy compare AABB values
pub fn aabb_fuzzy_eq_eps(a: &AABB<f64>, b: &AABB<f64>, eps: f64) -> bool {
    a.min_x.fuzzy_eq_eps(b.min_x, eps)
        && a.min_y.fuzzy_eq_eps(b.min_y, eps)
        && a.max_x.fuzzy_eq_eps(b.max_x, eps)
        && a.max_y.fuzzy_eq_eps(b.max_y, eps)
}

/// Holds a set of properties of a polygon ring for comparison in tests
#[derive(Debug, Copy, Clone)]
pub struct RingProperties {
    pub vertex_count: usize,
    pub area: f64,
    pub extents: AABB<f64>,
}

impl RingProperties {
    // property comparer epsilon
    pub const PROP_CMP_EPS: f64 = 1e-4;
    // epsilon for use of remove_redundant for consistent property compare
    pub const REMOVE_REDUNDANT_EPS: f64 = 1e-4;

    pub fn new(
        vertex_count: usize,
        area: f64,
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    ) -> Self {
        Self {
            vertex_count,
            area,
            extents: AABB::new(min_x, min_y, max_x, max_y),
        }
    }

    /// Properties of the ring only (inner polygons are ignored).
    pub fn from_ring(ring: &Polygon<f64>) -> Self {
        // remove redundant vertexes for consistent vertex counts
        let rr = ring.remove_redundant(RingProperties::REMOVE_REDUNDANT_EPS);
        let ring = rr.as_ref().unwrap_or(ring);
        Self {
            vertex_count: ring.vertex_count(),
            area: ring.area(),
            extents: ring.extents().unwrap(),
        }
    }

    pub fn fuzzy_eq_eps(&self, other: &Self, eps: f64) -> bool {
        if self.vertex_count != other.vertex_count {
            return false;
        }
        if !self.area.fuzzy_eq_eps(other.area, eps) {
            return false;
        }
        if !aabb_fuzzy_eq_eps(&self.extents, &other.extents, eps) {
            return false;
        }
        true
    }
}

/// Properties of every ring of every polygon (all nesting levels).
pub fn create_property_set<'a, I>(polygons: I) -> Vec<RingProperties>
where
    I: IntoIterator<Item = &'a Polygon<f64>>,
{
    polygons
        .into_iter()
        .flat_map(|p| p.rings())
        .map(RingProperties::from_ring)
        .collect()
}

pub fn property_sets_match(result_set: &[RingProperties], expected_set: &[RingProperties]) -> bool {
    let mut sets_match = true;
    if result_set.len() != expected_set.len() {
        sets_match = false;
    } else {
        // using simple N^2 comparisons to compare property sets (sets are always relatively small,
        // e.g. N < 10)
        for properties_expected in expected_set {
            let match_count = result_set
                .iter()
                .filter(|properties_result| {
                    properties_expected
                        .fuzzy_eq_eps(properties_result, RingProperties::PROP_CMP_EPS)
                })
                .count();

            if match_count != 1 {
                sets_match = false;
                break;
            }
        }
    }

    if !sets_match {
        eprintln!("result:\n{:?}", result_set);
        eprintln!("expected:\n{:?}", expected_set);
    }

    sets_match
}

/// Nesting depth of the deepest ring in the polygon tree (1 for a polygon with no inner
/// polygons).
pub fn tree_depth(polygon: &Polygon<f64>) -> usize {
    1 + polygon.inner.iter().map(tree_depth).max().unwrap_or(0)
}

/// Every ring at an even depth is positive and every ring at an odd depth is negative.
pub fn tree_orientation_alternates(polygon: &Polygon<f64>, depth: usize) -> bool {
    let expect_positive = depth % 2 == 0;
    polygon.is_positive() == expect_positive
        && polygon
            .inner
            .iter()
            .all(|p| tree_orientation_alternates(p, depth + 1))
}
