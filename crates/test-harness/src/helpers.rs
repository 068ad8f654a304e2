//! Helper functions: error type, point-cloud generators, point math.

use curve_fitting::FitError;
use motor_geometry::{Coordinate, GeometryError};

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("oracle failure ({oracle}): {detail}")]
    OracleFailure { oracle: String, detail: String },

    #[error("fit error: {0}")]
    Fit(#[from] FitError),

    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),
}

// ── Point-Cloud Generators ──────────────────────────────────────────────────

/// Sample a circular arc about `centre` from `start_deg` to `end_deg`
/// (inclusive) every `step_deg` degrees. A negative step walks clockwise.
pub fn arc_points(
    centre: Coordinate,
    radius: f64,
    start_deg: f64,
    end_deg: f64,
    step_deg: f64,
) -> Vec<Coordinate> {
    let steps = ((end_deg - start_deg) / step_deg).round().max(0.0) as usize;
    (0..=steps)
        .map(|i| centre + Coordinate::from_polar(radius, start_deg + i as f64 * step_deg))
        .collect()
}

/// Sample the polyline through `vertices`, placing `per_segment` evenly
/// spaced points on each edge. Vertices appear exactly once.
pub fn polyline_points(vertices: &[Coordinate], per_segment: usize) -> Vec<Coordinate> {
    let per_segment = per_segment.max(1);
    let mut pts = Vec::new();
    for w in vertices.windows(2) {
        for i in 0..per_segment {
            pts.push(w[0].lerp(&w[1], i as f64 / per_segment as f64));
        }
    }
    if let Some(last) = vertices.last() {
        pts.push(*last);
    }
    pts
}

/// `count` evenly spaced points from `start` to `end`.
pub fn collinear_points(start: Coordinate, end: Coordinate, count: usize) -> Vec<Coordinate> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => (0..count)
            .map(|i| start.lerp(&end, i as f64 / (count - 1) as f64))
            .collect(),
    }
}

/// Push interior points alternately left and right of the local direction
/// by `amplitude`. Endpoints are left untouched. Deterministic, so failing
/// cases reproduce.
pub fn with_zigzag(points: &[Coordinate], amplitude: f64) -> Vec<Coordinate> {
    let n = points.len();
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if i == 0 || i + 1 == n {
                return *p;
            }
            let d = points[i + 1] - points[i - 1];
            let len = d.length();
            if len == 0.0 {
                return *p;
            }
            let normal = Coordinate::new(-d.y / len, d.x / len);
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            *p + normal * (amplitude * sign)
        })
        .collect()
}

// ── Point Math ──────────────────────────────────────────────────────────────

/// Axis-aligned bounds `(min, max)` of a point set, `None` when empty.
pub fn bounding_box(points: &[Coordinate]) -> Option<(Coordinate, Coordinate)> {
    let first = points.first()?;
    Some(points.iter().fold((*first, *first), |(lo, hi), p| {
        (
            Coordinate::new(lo.x.min(p.x), lo.y.min(p.y)),
            Coordinate::new(hi.x.max(p.x), hi.y.max(p.y)),
        )
    }))
}
