//! Deviation measures for candidate entities against the points they cover.

use motor_geometry::{Arc, Coordinate, Line};

use crate::config::LineDeviation;

/// Distance of `point` from `line` under the given measure.
///
/// A zero-length line measures the distance to its start point in either mode.
pub fn line_deviation(line: &Line, point: &Coordinate, mode: LineDeviation) -> f64 {
    if line.direction().is_none() {
        return point.distance_to(&line.start);
    }
    match mode {
        LineDeviation::Perpendicular => line.distance_to_point(point),
        LineDeviation::Vertical => line.vertical_deviation(point),
    }
}

/// Distance of `point` from `arc`.
///
/// Points within the arc's sweep measure radially; others measure to the
/// nearer endpoint.
pub fn arc_deviation(arc: &Arc, point: &Coordinate) -> f64 {
    if arc.contains_angle(point) {
        arc.radial_deviation(point)
    } else {
        point
            .distance_to(&arc.start)
            .min(point.distance_to(&arc.end))
    }
}

pub fn max_line_deviation(line: &Line, points: &[Coordinate], mode: LineDeviation) -> f64 {
    points
        .iter()
        .map(|p| line_deviation(line, p, mode))
        .fold(0.0, f64::max)
}

pub fn max_arc_deviation(arc: &Arc, points: &[Coordinate]) -> f64 {
    points
        .iter()
        .map(|p| arc_deviation(arc, p))
        .fold(0.0, f64::max)
}

/// True when every point lies within `tolerance` of `line`.
pub fn check_line_error(
    line: &Line,
    points: &[Coordinate],
    tolerance: f64,
    mode: LineDeviation,
) -> bool {
    points
        .iter()
        .all(|p| line_deviation(line, p, mode) <= tolerance)
}

/// True when every point lies within `tolerance` of `arc`.
pub fn check_arc_error(arc: &Arc, points: &[Coordinate], tolerance: f64) -> bool {
    points.iter().all(|p| arc_deviation(arc, p) <= tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use motor_geometry::coordinates_to_arc;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn test_line_within_tolerance() {
        let line = Line::new(c(0.0, 0.0), c(10.0, 0.0));
        let pts = [c(0.0, 0.0), c(5.0, 0.005), c(10.0, 0.0)];
        assert!(check_line_error(&line, &pts, 0.01, LineDeviation::Perpendicular));
        assert!(!check_line_error(&line, &pts, 0.001, LineDeviation::Perpendicular));
        assert_abs_diff_eq!(
            max_line_deviation(&line, &pts, LineDeviation::Perpendicular),
            0.005,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_steep_line_modes_disagree() {
        // Slope 10: a point 0.001 off in x is ~0.01 off vertically.
        let line = Line::new(c(0.0, 0.0), c(1.0, 10.0));
        let pts = [c(0.501, 5.0)];
        assert!(check_line_error(&line, &pts, 0.002, LineDeviation::Perpendicular));
        assert!(!check_line_error(&line, &pts, 0.002, LineDeviation::Vertical));
    }

    #[test]
    fn test_vertical_line_in_vertical_mode() {
        let line = Line::new(c(3.0, 0.0), c(3.0, 10.0));
        let pts = [c(3.004, 5.0)];
        assert!(check_line_error(&line, &pts, 0.005, LineDeviation::Vertical));
        assert_abs_diff_eq!(
            max_line_deviation(&line, &pts, LineDeviation::Vertical),
            0.004,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_zero_length_line() {
        let line = Line::new(c(1.0, 1.0), c(1.0, 1.0));
        let pts = [c(1.0, 1.0), c(1.0, 1.5)];
        assert_abs_diff_eq!(
            max_line_deviation(&line, &pts, LineDeviation::Vertical),
            0.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_arc_radial_deviation() {
        let arc = coordinates_to_arc(&c(10.0, 0.0), &c(0.0, 10.0), &c(-10.0, 0.0)).unwrap();
        let pts = [c(10.0, 0.0), c(7.075, 7.075), c(-10.0, 0.0)];
        // |(7.075, 7.075)| = 10.0056
        assert!(check_arc_error(&arc, &pts, 0.01));
        assert!(!check_arc_error(&arc, &pts, 0.005));
    }

    #[test]
    fn test_point_outside_sweep_measures_to_endpoint() {
        let arc = coordinates_to_arc(&c(10.0, 0.0), &c(0.0, 10.0), &c(-10.0, 0.0)).unwrap();
        // On the circle but outside the upper half: radial deviation is 0,
        // distance to the nearer endpoint is not.
        let below = c(0.0, -10.0);
        assert_abs_diff_eq!(arc_deviation(&arc, &below), 200f64.sqrt(), epsilon = 1e-9);
        assert!(!check_arc_error(&arc, &[below], 0.01));
    }

    #[test]
    fn test_empty_points_pass() {
        let line = Line::new(c(0.0, 0.0), c(1.0, 0.0));
        assert!(check_line_error(&line, &[], 0.0, LineDeviation::Perpendicular));
        assert_eq!(max_line_deviation(&line, &[], LineDeviation::Perpendicular), 0.0);
    }
}
