mod test_utils;

use polygon_boolean::{
    assert_fuzzy_eq,
    core::traits::FuzzyEq,
    polygon,
    polygon::{
        internal::pgon_boolean, BooleanOp, BooleanOptions, OutputShape, Polygon,
        PolygonInteractionRecord,
    },
    BooleanError, Operand, PolygonError,
};
use test_utils::{
    create_property_set, property_sets_match, tree_depth, tree_orientation_alternates,
    ModifiedPolygonSet, RingProperties,
};

fn separate_loops() -> BooleanOptions<f64> {
    BooleanOptions::new().with_output_shape(OutputShape::SeparateLoops)
}

fn rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Polygon<f64> {
    polygon![(min_x, min_y), (max_x, min_y), (max_x, max_y), (min_x, max_y)]
}

fn total_area(polygons: &[Polygon<f64>]) -> f64 {
    polygons.iter().map(|p| p.total_area()).sum()
}

struct BooleanCase {
    a: Polygon<f64>,
    b: Polygon<f64>,
    union: Vec<RingProperties>,
    intersection: Vec<RingProperties>,
    difference: Vec<RingProperties>,
    xor: Vec<RingProperties>,
}

/// Run every operation (as separate loops) over every start vertex of both polygons.
fn run_boolean_case(case: &BooleanCase) {
    let options = separate_loops();
    let mut check = |a: &Polygon<f64>, b: &Polygon<f64>, a_cycle: usize, b_cycle: usize| {
        for (op, expected) in [
            (BooleanOp::Union, &case.union),
            (BooleanOp::Intersection, &case.intersection),
            (BooleanOp::Difference, &case.difference),
            (BooleanOp::Xor, &case.xor),
        ] {
            let result = a.boolean_opt(b, op, &options);
            let result_properties = create_property_set(&result);
            assert!(
                property_sets_match(&result_properties, expected),
                "boolean op: {:?}, a cycled by: {}, b cycled by: {}",
                op,
                a_cycle,
                b_cycle
            );
        }
    };

    ModifiedPolygonSet::new(&case.a, true).accept_closure(&mut |a, a_state| {
        ModifiedPolygonSet::new(&case.b, true).accept_closure(&mut |b, b_state| {
            check(&a, &b, a_state.cycle_position, b_state.cycle_position);
        });
    });
}

#[test]
fn overlapping_squares() {
    run_boolean_case(&BooleanCase {
        a: rect(0.0, 0.0, 2.0, 2.0),
        b: rect(1.0, 1.0, 3.0, 3.0),
        union: vec![RingProperties::new(8, 7.0, 0.0, 0.0, 3.0, 3.0)],
        intersection: vec![RingProperties::new(4, 1.0, 1.0, 1.0, 2.0, 2.0)],
        difference: vec![RingProperties::new(6, 3.0, 0.0, 0.0, 2.0, 2.0)],
        xor: vec![
            RingProperties::new(8, 7.0, 0.0, 0.0, 3.0, 3.0),
            RingProperties::new(4, -1.0, 1.0, 1.0, 2.0, 2.0),
        ],
    });
}

#[test]
fn l_shape_and_square() {
    run_boolean_case(&BooleanCase {
        a: polygon![
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 1.0),
            (1.0, 1.0),
            (1.0, 4.0),
            (0.0, 4.0)
        ],
        b: rect(0.5, 0.5, 2.5, 2.5),
        union: vec![RingProperties::new(8, 9.25, 0.0, 0.0, 4.0, 4.0)],
        intersection: vec![RingProperties::new(6, 1.75, 0.5, 0.5, 2.5, 2.5)],
        difference: vec![RingProperties::new(10, 5.25, 0.0, 0.0, 4.0, 4.0)],
        xor: vec![
            RingProperties::new(8, 9.25, 0.0, 0.0, 4.0, 4.0),
            RingProperties::new(6, -1.75, 0.5, 0.5, 2.5, 2.5),
        ],
    });
}

#[test]
fn collinear_run_same_direction() {
    run_boolean_case(&BooleanCase {
        a: rect(0.0, 0.0, 2.0, 2.0),
        b: rect(1.0, 0.0, 3.0, 1.0),
        union: vec![RingProperties::new(6, 5.0, 0.0, 0.0, 3.0, 2.0)],
        intersection: vec![RingProperties::new(4, 1.0, 1.0, 0.0, 2.0, 1.0)],
        difference: vec![RingProperties::new(6, 3.0, 0.0, 0.0, 2.0, 2.0)],
        xor: vec![
            RingProperties::new(6, 5.0, 0.0, 0.0, 3.0, 2.0),
            RingProperties::new(4, -1.0, 1.0, 0.0, 2.0, 1.0),
        ],
    });
}

#[test]
fn inside_touching_boundary() {
    run_boolean_case(&BooleanCase {
        a: rect(0.0, 0.0, 4.0, 4.0),
        b: rect(0.0, 0.0, 2.0, 2.0),
        union: vec![RingProperties::new(4, 16.0, 0.0, 0.0, 4.0, 4.0)],
        intersection: vec![RingProperties::new(4, 4.0, 0.0, 0.0, 2.0, 2.0)],
        difference: vec![RingProperties::new(6, 12.0, 0.0, 0.0, 4.0, 4.0)],
        xor: vec![
            RingProperties::new(4, 16.0, 0.0, 0.0, 4.0, 4.0),
            RingProperties::new(4, -4.0, 0.0, 0.0, 2.0, 2.0),
        ],
    });
}

#[test]
fn shared_edge() {
    let a = rect(0.0, 0.0, 1.0, 1.0);
    let b = rect(1.0, 0.0, 2.0, 1.0);
    run_boolean_case(&BooleanCase {
        a: a.clone(),
        b,
        union: vec![RingProperties::new(4, 2.0, 0.0, 0.0, 2.0, 1.0)],
        intersection: vec![],
        difference: vec![RingProperties::from_ring(&a)],
        xor: vec![RingProperties::new(4, 2.0, 0.0, 0.0, 2.0, 1.0)],
    });
}

#[test]
fn corner_touch() {
    let a = rect(0.0, 0.0, 1.0, 1.0);
    let b = rect(1.0, 1.0, 2.0, 2.0);
    run_boolean_case(&BooleanCase {
        a: a.clone(),
        b: b.clone(),
        union: vec![RingProperties::from_ring(&a), RingProperties::from_ring(&b)],
        intersection: vec![],
        difference: vec![RingProperties::from_ring(&a)],
        xor: vec![RingProperties::from_ring(&a), RingProperties::from_ring(&b)],
    });
}

#[test]
fn disjoint() {
    let a = rect(0.0, 0.0, 1.0, 1.0);
    let b = rect(5.0, 5.0, 6.0, 6.0);
    run_boolean_case(&BooleanCase {
        a: a.clone(),
        b: b.clone(),
        union: vec![RingProperties::from_ring(&a), RingProperties::from_ring(&b)],
        intersection: vec![],
        difference: vec![RingProperties::from_ring(&a)],
        xor: vec![RingProperties::from_ring(&a), RingProperties::from_ring(&b)],
    });
}

#[test]
fn island_inside_hole() {
    let hole = rect(4.0, 4.0, 6.0, 6.0).copy(false, true);
    let a = rect(0.0, 0.0, 10.0, 10.0).with_inner(hole);
    let b = rect(4.5, 4.5, 5.5, 5.5);

    let union = a.boolean(&b, BooleanOp::Union);
    assert_eq!(union.len(), 1);
    assert_eq!(tree_depth(&union[0]), 3);
    assert!(tree_orientation_alternates(&union[0], 0));
    assert_fuzzy_eq!(total_area(&union), 97.0);

    let intersection = a.boolean(&b, BooleanOp::Intersection);
    assert!(intersection.is_empty());

    let difference = a.boolean(&b, BooleanOp::Difference);
    assert_eq!(difference.len(), 1);
    assert_eq!(tree_depth(&difference[0]), 2);
    assert_fuzzy_eq!(total_area(&difference), 96.0);

    let xor = a.boolean(&b, BooleanOp::Xor);
    assert_eq!(xor.len(), 1);
    assert_eq!(tree_depth(&xor[0]), 3);
    assert_fuzzy_eq!(total_area(&xor), 97.0);

    // islands inside holes are split off one level deep
    let options = BooleanOptions::new().with_output_shape(OutputShape::PolygonWithHoles);
    let with_holes = a.boolean_opt(&b, BooleanOp::Union, &options);
    assert_eq!(with_holes.len(), 2);
    assert!(with_holes.iter().all(|p| tree_depth(p) <= 2));
    assert_fuzzy_eq!(total_area(&with_holes), 97.0);
}

#[test]
fn xor_grouped_into_polygon_with_hole() {
    let a = rect(0.0, 0.0, 2.0, 2.0);
    let b = rect(1.0, 1.0, 3.0, 3.0);
    let xor = a.boolean(&b, BooleanOp::Xor);
    assert_eq!(xor.len(), 1);
    assert_eq!(xor[0].inner.len(), 1);
    assert!(tree_orientation_alternates(&xor[0], 0));
    assert_fuzzy_eq!(total_area(&xor), 6.0);
}

#[test]
fn identical_polygons() {
    let hole = rect(1.0, 1.0, 2.0, 2.0).copy(false, true);
    let p = rect(0.0, 0.0, 3.0, 3.0).with_inner(hole);
    let expected = create_property_set([&p]);

    for op in [BooleanOp::Union, BooleanOp::Intersection] {
        let result = p.boolean_opt(&p, op, &separate_loops());
        assert!(
            property_sets_match(&create_property_set(&result), &expected),
            "boolean op: {:?}",
            op
        );
    }

    for op in [BooleanOp::Difference, BooleanOp::Xor] {
        let result = p.boolean(&p, op);
        assert!(result.is_empty(), "boolean op: {:?}", op);
    }
}

#[test]
fn filling_a_hole_exactly() {
    let hole = rect(1.0, 1.0, 2.0, 2.0).copy(false, true);
    let a = rect(0.0, 0.0, 3.0, 3.0).with_inner(hole);
    let plug = rect(1.0, 1.0, 2.0, 2.0);

    let union = a.boolean(&plug, BooleanOp::Union);
    assert!(property_sets_match(
        &create_property_set(&union),
        &[RingProperties::new(4, 9.0, 0.0, 0.0, 3.0, 3.0)]
    ));

    assert!(a.boolean(&plug, BooleanOp::Intersection).is_empty());
}

#[test]
fn area_identities() {
    let pairs = [
        (rect(0.0, 0.0, 2.0, 2.0), rect(1.0, 1.0, 3.0, 3.0)),
        (
            polygon![
                (0.0, 0.0),
                (4.0, 0.0),
                (4.0, 1.0),
                (1.0, 1.0),
                (1.0, 4.0),
                (0.0, 4.0)
            ],
            rect(0.5, 0.5, 2.5, 2.5),
        ),
        (rect(0.0, 0.0, 4.0, 4.0), rect(0.0, 0.0, 2.0, 2.0)),
    ];

    for (a, b) in pairs.iter() {
        let union = total_area(&a.boolean(b, BooleanOp::Union));
        let intersection = total_area(&a.boolean(b, BooleanOp::Intersection));
        let difference = total_area(&a.boolean(b, BooleanOp::Difference));
        let xor = total_area(&a.boolean(b, BooleanOp::Xor));

        assert_fuzzy_eq!(union, intersection + xor, 1e-6);
        assert_fuzzy_eq!(difference, a.total_area() - intersection, 1e-6);
        assert_fuzzy_eq!(union, a.total_area() + b.total_area() - intersection, 1e-6);
    }
}

#[test]
fn idempotence() {
    let a = polygon![
        (0.0, 0.0),
        (4.0, 0.0),
        (4.0, 1.0),
        (1.0, 1.0),
        (1.0, 4.0),
        (0.0, 4.0)
    ];

    for op in [BooleanOp::Union, BooleanOp::Intersection] {
        let result = a.boolean(&a, op);
        assert_eq!(result.len(), 1, "boolean op: {:?}", op);
        assert!(property_sets_match(
            &create_property_set(&result),
            &create_property_set([&a])
        ));
    }
}

#[test]
fn visited_flags_are_consistent_after_run() {
    let a = polygon![
        (0.0, 0.0),
        (4.0, 0.0),
        (4.0, 1.0),
        (1.0, 1.0),
        (1.0, 4.0),
        (0.0, 4.0)
    ];
    let b = rect(0.5, 0.5, 2.5, 2.5);
    let options = BooleanOptions::new();

    let mut record = PolygonInteractionRecord::new(&a, &b, options.pos_equal_eps);
    pgon_boolean::union(&a, &b, &mut record, &options);
    assert!(record.intersections.iter().all(|i| i.visited_a == i.visited_b));

    let mut record = PolygonInteractionRecord::new(&a, &b, options.pos_equal_eps);
    pgon_boolean::intersection(&a, &b, &mut record, &options);
    assert!(record.intersections.iter().all(|i| i.visited_a == i.visited_b));

    let mut record = PolygonInteractionRecord::for_difference(&a, &b, options.pos_equal_eps);
    let difference = pgon_boolean::difference(&a, &b, &mut record, &options);
    assert!(record.intersections.iter().all(|i| i.visited_a == i.visited_b));
    assert_fuzzy_eq!(total_area(&difference), 5.25);

    // flags left by the previous run are cleared when a run starts
    let again = pgon_boolean::difference(&a, &b, &mut record, &options);
    assert_fuzzy_eq!(total_area(&again), 5.25);
}

#[test]
fn record_reused_across_runs() {
    let a = rect(0.0, 0.0, 2.0, 2.0);
    let b = rect(1.0, 1.0, 3.0, 3.0);
    let options = BooleanOptions::new();
    let mut record = PolygonInteractionRecord::new(&a, &b, options.pos_equal_eps);

    let first = pgon_boolean::union(&a, &b, &mut record, &options);
    let second = pgon_boolean::union(&a, &b, &mut record, &options);
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_fuzzy_eq!(total_area(&second), 7.0);

    // same record serves a different operation
    let intersection = pgon_boolean::intersection(&a, &b, &mut record, &options);
    assert_eq!(intersection.len(), 1);
    assert_fuzzy_eq!(total_area(&intersection), 1.0);
}

#[test]
fn repeated_vertex_in_operand() {
    let a = polygon![(0.0, 0.0), (2.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)];
    let b = rect(1.0, 1.0, 3.0, 3.0);

    let union = a.boolean(&b, BooleanOp::Union);
    assert_eq!(union.len(), 1);
    assert_fuzzy_eq!(total_area(&union), 7.0);

    let intersection = a.boolean(&b, BooleanOp::Intersection);
    assert_eq!(intersection.len(), 1);
    assert_fuzzy_eq!(total_area(&intersection), 1.0);
}

#[test]
fn explicit_tolerance_discards_slivers() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    // overlaps a by a 0.001 wide strip
    let b = rect(9.999, 0.0, 20.0, 10.0);

    let result = a.boolean(&b, BooleanOp::Intersection);
    assert_eq!(result.len(), 1);
    assert_fuzzy_eq!(result[0].area(), 0.01, 1e-6);

    let mut options = BooleanOptions::new();
    options.tolerance = Some(0.5);
    let result = a.boolean_opt(&b, BooleanOp::Intersection, &options);
    assert!(result.is_empty());
}

#[test]
fn try_boolean_validates_input() {
    let valid = rect(0.0, 0.0, 1.0, 1.0);
    let two_vertexes = polygon![(0.0, 0.0), (1.0, 0.0)];
    let flat = polygon![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)];
    let options = BooleanOptions::new();

    assert_eq!(
        valid.try_boolean(&two_vertexes, BooleanOp::Union, &options),
        Err(BooleanError::InvalidPolygon {
            operand: Operand::B,
            source: PolygonError::TooFewVertexes { ring: 0, count: 2 }
        })
    );
    assert_eq!(
        flat.try_boolean(&valid, BooleanOp::Union, &options),
        Err(BooleanError::InvalidPolygon {
            operand: Operand::A,
            source: PolygonError::ZeroArea { ring: 0 }
        })
    );

    let nan = polygon![(0.0, 0.0), (f64::NAN, 0.0), (1.0, 1.0)];
    assert!(matches!(
        valid.try_boolean(&nan, BooleanOp::Xor, &options),
        Err(BooleanError::InvalidPolygon {
            operand: Operand::B,
            source: PolygonError::NonFiniteVertex { ring: 0, vertex: 1 }
        })
    ));

    let mut bad_tolerance = BooleanOptions::new();
    bad_tolerance.tolerance = Some(-1.0);
    assert_eq!(
        valid.try_boolean(&valid, BooleanOp::Union, &bad_tolerance),
        Err(BooleanError::InvalidTolerance)
    );

    let result = valid
        .try_boolean(&rect(0.5, 0.5, 1.5, 1.5), BooleanOp::Intersection, &options)
        .unwrap();
    assert_fuzzy_eq!(total_area(&result), 0.25);
}
