//! Property-based tests for geometry invariants using the `proptest` crate.

use proptest::prelude::*;

use motor_geometry::{
    coordinates_to_arc, orientation, Arc, Coordinate, Entity, EntityList, Line, Orientation,
    Transform2,
};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_coordinate() -> impl Strategy<Value = Coordinate> {
    (-1000.0f64..1000.0, -1000.0f64..1000.0).prop_map(|(x, y)| Coordinate::new(x, y))
}

fn arb_centre() -> impl Strategy<Value = Coordinate> {
    (-100.0f64..100.0, -100.0f64..100.0).prop_map(|(x, y)| Coordinate::new(x, y))
}

fn arb_radius() -> impl Strategy<Value = f64> {
    1.0f64..100.0
}

/// Start angle and two strictly positive angular steps (degrees).
fn arb_steps() -> impl Strategy<Value = (f64, f64, f64)> {
    (0.0f64..360.0, 5.0f64..150.0, 5.0f64..150.0)
}

fn arb_angle() -> impl Strategy<Value = f64> {
    -360.0f64..360.0
}

const TOL: f64 = 1e-6;

fn on_circle(centre: Coordinate, r: f64, theta: f64) -> Coordinate {
    centre + Coordinate::from_polar(r, theta)
}

// ---------------------------------------------------------------------------
// 1. Three points on a circle recover its centre and radius
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn three_points_recover_circle(
        centre in arb_centre(),
        r in arb_radius(),
        (a0, d1, d2) in arb_steps(),
    ) {
        let p1 = on_circle(centre, r, a0);
        let p2 = on_circle(centre, r, a0 + d1);
        let p3 = on_circle(centre, r, a0 + d1 + d2);

        let arc = coordinates_to_arc(&p1, &p2, &p3);
        prop_assert!(arc.is_some(), "no arc through points on a circle");
        let arc = arc.unwrap();
        prop_assert!(arc.centre.distance_to(&centre) < TOL,
            "centre {:?} != {:?}", arc.centre, centre);
        prop_assert!((arc.radius - r).abs() < TOL,
            "radius {} != {}", arc.radius, r);
        prop_assert_eq!(arc.start, p1);
        prop_assert_eq!(arc.end, p3);
        prop_assert!(arc.contains_angle(&p2));
    }
}

// ---------------------------------------------------------------------------
// 2. Reversing the triple flips the radius sign
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn reversed_triple_is_clockwise(
        centre in arb_centre(),
        r in arb_radius(),
        (a0, d1, d2) in arb_steps(),
    ) {
        let p1 = on_circle(centre, r, a0);
        let p2 = on_circle(centre, r, a0 + d1);
        let p3 = on_circle(centre, r, a0 + d1 + d2);

        let arc = coordinates_to_arc(&p3, &p2, &p1).unwrap();
        prop_assert!(arc.radius < 0.0);
        prop_assert!((arc.radius + r).abs() < TOL);
        prop_assert!(arc.contains_angle(&p2));
    }
}

// ---------------------------------------------------------------------------
// 3. Orientation is antisymmetric under reversal
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn orientation_antisymmetric(
        a in arb_coordinate(),
        b in arb_coordinate(),
        c in arb_coordinate(),
    ) {
        let forward = orientation(&a, &b, &c);
        let backward = orientation(&c, &b, &a);
        let expected = match forward {
            Orientation::Clockwise => Orientation::CounterClockwise,
            Orientation::CounterClockwise => Orientation::Clockwise,
            Orientation::Collinear => Orientation::Collinear,
        };
        prop_assert_eq!(backward, expected);
    }
}

// ---------------------------------------------------------------------------
// 4. Collinear triples never produce an arc
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn collinear_triples_have_no_arc(
        a in arb_coordinate(),
        b in arb_coordinate(),
        t in -2.0f64..3.0,
    ) {
        let c = a.lerp(&b, t);
        // The lerp may round off the line; only exact-line cases are asserted.
        if orientation(&a, &b, &c) == Orientation::Collinear {
            prop_assert!(coordinates_to_arc(&a, &b, &c).is_none());
        }
        prop_assert!(coordinates_to_arc(&a, &a, &b).is_none());
    }
}

// ---------------------------------------------------------------------------
// 5. Rotation preserves distances, mirroring twice is the identity
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn rotation_preserves_distance(
        a in arb_coordinate(),
        b in arb_coordinate(),
        pivot in arb_centre(),
        angle in arb_angle(),
    ) {
        let t = Transform2::rotation_about(pivot, angle);
        let before = a.distance_to(&b);
        let after = t.apply(a).distance_to(&t.apply(b));
        prop_assert!((before - after).abs() < TOL);
    }

    #[test]
    fn double_mirror_is_identity(
        p in arb_coordinate(),
        axis_start in arb_centre(),
        axis_angle in arb_angle(),
    ) {
        let axis = Line::new(axis_start, axis_start + Coordinate::from_polar(10.0, axis_angle));
        let back = p.mirror(&axis).mirror(&axis);
        prop_assert!(back.distance_to(&p) < TOL, "{:?} -> {:?}", p, back);
    }
}

// ---------------------------------------------------------------------------
// 6. Transforms keep closed boundaries closed and arc midpoints on the arc
// ---------------------------------------------------------------------------

fn sector(r: f64, sweep: f64) -> EntityList {
    let tip = Coordinate::from_polar(r, sweep);
    let mut list = EntityList::new();
    list.push(Line::new(Coordinate::ORIGIN, Coordinate::new(r, 0.0)));
    list.push(Arc::new(Coordinate::new(r, 0.0), tip, Coordinate::ORIGIN, r));
    list.push(Line::new(tip, Coordinate::ORIGIN));
    list
}

proptest! {
    #[test]
    fn transformed_sector_stays_closed(
        r in arb_radius(),
        sweep in 5.0f64..180.0,
        pivot in arb_centre(),
        angle in arb_angle(),
        axis_angle in arb_angle(),
    ) {
        let original = sector(r, sweep);
        let axis = Line::new(pivot, pivot + Coordinate::from_polar(1.0, axis_angle));
        let t = Transform2::rotation_about(pivot, angle).then(&Transform2::mirror(&axis));
        let moved = original.transformed(&t);

        prop_assert!(moved.is_closed(TOL));
        prop_assert!((moved.total_length() - original.total_length()).abs() < TOL);

        if let (Entity::Arc(before), Entity::Arc(after)) = (original[1], moved[1]) {
            prop_assert!(after.radius < 0.0);
            let expected = t.apply(before.midpoint());
            prop_assert!(after.midpoint().distance_to(&expected) < TOL);
        } else {
            prop_assert!(false, "second entity should be an arc");
        }
    }
}
