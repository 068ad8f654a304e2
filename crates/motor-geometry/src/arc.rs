use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::error::GeometryError;
use crate::orientation::{orientation, Orientation};
use crate::transform::Transform2;

/// Slack on angular containment tests, in degrees.
const ANGLE_EPS: f64 = 1e-9;

/// Relative threshold below which a chord component counts as zero.
const AXIS_EPS: f64 = 1e-12;

/// A circular arc from `start` to `end` about `centre`.
///
/// The sign of `radius` carries the sweep direction: positive runs
/// counter-clockwise from `start` to `end`, negative runs clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub start: Coordinate,
    pub end: Coordinate,
    pub centre: Coordinate,
    pub radius: f64,
}

impl Arc {
    pub fn new(start: Coordinate, end: Coordinate, centre: Coordinate, radius: f64) -> Self {
        Self {
            start,
            end,
            centre,
            radius,
        }
    }

    /// Minor arc between `start` and `end` with the given signed radius.
    ///
    /// The centre is placed left of the chord for a positive radius and right
    /// of it for a negative one, so the sweep never exceeds 180 degrees.
    pub fn from_radius(start: Coordinate, end: Coordinate, radius: f64) -> Result<Self, GeometryError> {
        if !start.is_finite() || !end.is_finite() || !radius.is_finite() {
            return Err(GeometryError::NonFinite { what: "arc" });
        }
        let chord = start.distance_to(&end);
        if chord < 1e-15 {
            return Err(GeometryError::DegenerateArc {
                reason: "zero-length chord".into(),
            });
        }
        let r = radius.abs();
        let half = chord / 2.0;
        if half > r * (1.0 + AXIS_EPS) {
            return Err(GeometryError::DegenerateArc {
                reason: format!("chord {chord} exceeds diameter {}", 2.0 * r),
            });
        }
        let h = (r * r - half * half).max(0.0).sqrt();
        let u = (end - start) / chord;
        let left = Coordinate::new(-u.y, u.x);
        let mid = start.midpoint(&end);
        let centre = if radius >= 0.0 { mid + left * h } else { mid - left * h };
        Ok(Self::new(start, end, centre, radius))
    }

    /// Arc through three points, see [`coordinates_to_arc`].
    pub fn from_coordinates(c1: &Coordinate, c2: &Coordinate, c3: &Coordinate) -> Option<Self> {
        coordinates_to_arc(c1, c2, c3)
    }

    pub fn abs_radius(&self) -> f64 {
        self.radius.abs()
    }

    pub fn is_clockwise(&self) -> bool {
        self.radius < 0.0
    }

    /// Polar angle of `start` about the centre, degrees in (-180, 180].
    pub fn start_angle(&self) -> f64 {
        (self.start - self.centre).to_polar().1
    }

    pub fn end_angle(&self) -> f64 {
        (self.end - self.centre).to_polar().1
    }

    /// Angle swept from start to end in the arc's direction, in (0, 360].
    ///
    /// Coincident endpoints describe a full circle.
    pub fn sweep_angle(&self) -> f64 {
        let delta = if self.is_clockwise() {
            self.start_angle() - self.end_angle()
        } else {
            self.end_angle() - self.start_angle()
        };
        let sweep = delta.rem_euclid(360.0);
        if sweep == 0.0 {
            360.0
        } else {
            sweep
        }
    }

    pub fn length(&self) -> f64 {
        self.abs_radius() * self.sweep_angle().to_radians()
    }

    /// Point halfway along the arc.
    pub fn midpoint(&self) -> Coordinate {
        let half = self.sweep_angle() / 2.0;
        let theta = if self.is_clockwise() {
            self.start_angle() - half
        } else {
            self.start_angle() + half
        };
        self.centre + Coordinate::from_polar(self.abs_radius(), theta)
    }

    /// True when the polar angle of `point` about the centre lies in the sweep.
    pub fn contains_angle(&self, point: &Coordinate) -> bool {
        let theta = (*point - self.centre).to_polar().1;
        let offset = if self.is_clockwise() {
            self.start_angle() - theta
        } else {
            theta - self.start_angle()
        }
        .rem_euclid(360.0);
        offset <= self.sweep_angle() + ANGLE_EPS || offset >= 360.0 - ANGLE_EPS
    }

    /// `| |point - centre| - |radius| |`
    pub fn radial_deviation(&self, point: &Coordinate) -> f64 {
        (point.distance_to(&self.centre) - self.abs_radius()).abs()
    }

    /// The same geometric arc traversed from `end` to `start`.
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
            centre: self.centre,
            radius: -self.radius,
        }
    }

    /// Chord or radius within `tolerance`.
    pub fn is_degenerate(&self, tolerance: f64) -> bool {
        self.abs_radius() <= tolerance || self.start.distance_to(&self.end) <= tolerance
    }

    /// Apply `transform`; reflections flip the winding and so the radius sign.
    pub fn transformed(&self, transform: &Transform2) -> Self {
        let radius = if transform.is_reflection() {
            -self.radius
        } else {
            self.radius
        };
        Self {
            start: transform.apply(self.start),
            end: transform.apply(self.end),
            centre: transform.apply(self.centre),
            radius,
        }
    }
}

// ── Three-point solver ──────────────────────────────────────────────────

/// Perpendicular bisector of a chord.
#[derive(Debug, Clone, Copy)]
enum Bisector {
    /// Bisector of a horizontal chord: the line `x = const`.
    Vertical { x: f64 },
    /// Bisector of a vertical chord: the line `y = const`.
    Horizontal { y: f64 },
    Sloped { mid: Coordinate, slope: f64 },
}

impl Bisector {
    fn of(p: &Coordinate, q: &Coordinate) -> Option<Self> {
        let dx = q.x - p.x;
        let dy = q.y - p.y;
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        let mid = p.midpoint(q);
        if dy.abs() <= AXIS_EPS * dx.abs() {
            Some(Self::Vertical { x: mid.x })
        } else if dx.abs() <= AXIS_EPS * dy.abs() {
            Some(Self::Horizontal { y: mid.y })
        } else {
            Some(Self::Sloped {
                mid,
                slope: -dx / dy,
            })
        }
    }

    fn intersect(&self, other: &Self) -> Option<Coordinate> {
        use Bisector::*;
        match (*self, *other) {
            (Vertical { x }, Horizontal { y }) | (Horizontal { y }, Vertical { x }) => {
                Some(Coordinate::new(x, y))
            }
            (Vertical { x }, Sloped { mid, slope }) | (Sloped { mid, slope }, Vertical { x }) => {
                Some(Coordinate::new(x, mid.y + slope * (x - mid.x)))
            }
            (Horizontal { y }, Sloped { mid, slope }) | (Sloped { mid, slope }, Horizontal { y }) => {
                Some(Coordinate::new(mid.x + (y - mid.y) / slope, y))
            }
            (Sloped { mid: a, slope: sa }, Sloped { mid: b, slope: sb }) => {
                if (sa - sb).abs() <= AXIS_EPS * sa.abs().max(sb.abs()) {
                    return None;
                }
                let x = (sa * a.x - sb * b.x + b.y - a.y) / (sa - sb);
                // Evaluate y on the flatter bisector; the steep one amplifies error in x.
                let (m, s) = if sa.abs() <= sb.abs() { (a, sa) } else { (b, sb) };
                Some(Coordinate::new(x, m.y + s * (x - m.x)))
            }
            (Vertical { .. }, Vertical { .. }) | (Horizontal { .. }, Horizontal { .. }) => None,
        }
    }
}

/// Circumscribed arc from `c1` to `c3` passing through `c2`.
///
/// Returns `None` when the points are collinear, repeated, or non-finite.
/// The radius is negative when the path `c1 -> c2 -> c3` turns clockwise.
pub fn coordinates_to_arc(c1: &Coordinate, c2: &Coordinate, c3: &Coordinate) -> Option<Arc> {
    if !(c1.is_finite() && c2.is_finite() && c3.is_finite()) {
        return None;
    }
    let turn = orientation(c1, c2, c3);
    if turn == Orientation::Collinear {
        return None;
    }
    let centre = Bisector::of(c1, c2)?.intersect(&Bisector::of(c2, c3)?)?;
    if !centre.is_finite() {
        return None;
    }
    let r = centre.distance_to(c1);
    let radius = if turn == Orientation::Clockwise { -r } else { r };
    Some(Arc::new(*c1, *c3, centre, radius))
}
