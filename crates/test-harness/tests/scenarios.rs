//! End-to-end fitting scenarios on generated point clouds.

use curve_fitting::{fit_entities, FitSettings, LineDeviation};
use motor_geometry::Coordinate;
use test_harness::assertions::*;
use test_harness::helpers::*;

fn c(x: f64, y: f64) -> Coordinate {
    Coordinate::new(x, y)
}

// ── Single Entity Scenarios ─────────────────────────────────────────────

#[test]
fn quarter_circle_fits_one_arc() {
    let pts = arc_points(c(3.0, -2.0), 10.0, 0.0, 90.0, 5.0);
    assert_eq!(pts.len(), 19);
    let settings = FitSettings::default();
    let outcome = fit_entities(&pts, &settings).unwrap();

    assert_entity_counts(&outcome, 0, 1, "quarter circle").unwrap();
    assert_arc_matches(&outcome, 0, c(3.0, -2.0), 10.0, 1e-6, "quarter circle").unwrap();
    assert_fit_valid(&pts, &outcome, &settings, "quarter circle").unwrap();
}

#[test]
fn clockwise_quarter_circle_has_negative_radius() {
    let pts = arc_points(c(0.0, 0.0), 10.0, 90.0, 0.0, -5.0);
    let settings = FitSettings::default();
    let outcome = fit_entities(&pts, &settings).unwrap();

    assert_entity_counts(&outcome, 0, 1, "cw quarter").unwrap();
    assert_arc_matches(&outcome, 0, c(0.0, 0.0), -10.0, 1e-6, "cw quarter").unwrap();
    assert_covers(&pts, &outcome, "cw quarter").unwrap();
}

#[test]
fn straight_run_fits_one_line() {
    let pts = collinear_points(c(-5.0, 2.0), c(15.0, 7.0), 30);
    let settings = FitSettings::default();
    let outcome = fit_entities(&pts, &settings).unwrap();

    assert_entity_counts(&outcome, 1, 0, "straight run").unwrap();
    assert_fit_valid(&pts, &outcome, &settings, "straight run").unwrap();
}

#[test]
fn zigzag_inside_tolerance_stays_one_line() {
    let pts = with_zigzag(&collinear_points(c(0.0, 0.0), c(20.0, 0.0), 21), 0.004);
    let settings = FitSettings::default();
    let outcome = fit_entities(&pts, &settings).unwrap();

    assert_entity_counts(&outcome, 1, 0, "zigzag").unwrap();
    assert_within_tolerance(&outcome, &settings, "zigzag").unwrap();
}

// ── Compound Profiles ───────────────────────────────────────────────────

#[test]
fn l_shape_fits_two_lines() {
    let pts = polyline_points(&[c(0.0, 0.0), c(10.0, 0.0), c(10.0, 10.0)], 5);
    assert_eq!(pts.len(), 11);
    let settings = FitSettings::default();
    let outcome = fit_entities(&pts, &settings).unwrap();

    assert_entity_counts(&outcome, 2, 0, "L shape").unwrap();
    assert_eq!(outcome.entities[0].entity.end(), c(10.0, 0.0));
    assert_fit_valid(&pts, &outcome, &settings, "L shape").unwrap();
}

#[test]
fn line_then_tangent_arc() {
    let mut pts = collinear_points(c(-10.0, 0.0), c(0.0, 0.0), 11);
    pts.extend(arc_points(c(0.0, 10.0), 10.0, -90.0, 0.0, 5.0).into_iter().skip(1));
    let settings = FitSettings::default();
    let outcome = fit_entities(&pts, &settings).unwrap();

    assert_entity_counts(&outcome, 1, 1, "slot profile").unwrap();
    assert_eq!(outcome.entities[0].span, 0..11);
    assert_arc_matches(&outcome, 1, c(0.0, 10.0), 10.0, 1e-6, "slot profile").unwrap();
    assert_fit_valid(&pts, &outcome, &settings, "slot profile").unwrap();
}

#[test]
fn closed_square_outline() {
    let corners = [
        c(0.0, 0.0),
        c(4.0, 0.0),
        c(4.0, 4.0),
        c(0.0, 4.0),
        c(0.0, 0.0),
    ];
    let pts = polyline_points(&corners, 4);
    let settings = FitSettings::default();
    let outcome = fit_entities(&pts, &settings).unwrap();

    assert_entity_counts(&outcome, 4, 0, "square").unwrap();
    assert!(outcome.entity_list().is_closed(1e-12));
    assert_fit_valid(&pts, &outcome, &settings, "square").unwrap();
}

#[test]
fn repeated_points_do_not_break_fit() {
    let mut pts = Vec::new();
    for p in arc_points(c(0.0, 0.0), 5.0, 0.0, 60.0, 10.0) {
        pts.push(p);
        pts.push(p);
    }
    let settings = FitSettings::default();
    let outcome = fit_entities(&pts, &settings).unwrap();

    assert_eq!(outcome.points.len(), 7);
    assert_entity_counts(&outcome, 0, 1, "doubled samples").unwrap();
    assert_fit_valid(&pts, &outcome, &settings, "doubled samples").unwrap();
}

// ── Settings Variations ─────────────────────────────────────────────────

#[test]
fn vertical_deviation_mode_fits_flat_profile() {
    let pts = polyline_points(&[c(0.0, 0.0), c(10.0, 1.0), c(20.0, 0.0)], 10);
    let settings = FitSettings::default().with_line_deviation(LineDeviation::Vertical);
    let outcome = fit_entities(&pts, &settings).unwrap();

    assert_entity_counts(&outcome, 2, 0, "vertical mode").unwrap();
    assert_fit_valid(&pts, &outcome, &settings, "vertical mode").unwrap();
}

#[test]
fn shallow_search_depth_splits_arc() {
    let pts = arc_points(c(0.0, 0.0), 10.0, 0.0, 90.0, 5.0);
    let settings = FitSettings::default().with_max_search_depth(7);
    let outcome = fit_entities(&pts, &settings).unwrap();

    // 18 segments, at most 6 per entity.
    assert_entity_counts(&outcome, 0, 3, "depth 7").unwrap();
    assert_fit_valid(&pts, &outcome, &settings, "depth 7").unwrap();
}
