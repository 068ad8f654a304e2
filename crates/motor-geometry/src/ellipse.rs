//! Elliptic arcs approximated by tangent-continuous circular arcs.
//!
//! The approximation is built on a canonical ellipse centred at the origin
//! with its axes on the coordinate axes. One quadrant is sampled at points
//! spaced by curvature, fitted with circular arcs, mirrored into the other
//! three quadrants, and clipped to the span between the requested endpoints.
//! The result is then rotated and translated into place.

use tracing::{debug, warn};

use crate::arc::{coordinates_to_arc, Arc};
use crate::coordinate::Coordinate;
use crate::entity::{Entity, EntityList};
use crate::error::GeometryError;
use crate::line::Line;
use crate::transform::Transform2;
use crate::{Tolerance, GEOM_TOLERANCE};

/// Sweeps within this many degrees of a half turn still run counter-clockwise.
const HALF_TURN_EPS: f64 = 1e-6;

/// Arcs shorter than this (mm) usually mean the curvature is too extreme.
const SHORT_ARC_WARNING: f64 = 0.1;

fn invalid(reason: impl Into<String>) -> GeometryError {
    GeometryError::InvalidEllipse {
        reason: reason.into(),
    }
}

/// Builder for an elliptic arc from `start` to `end`.
///
/// Two relative points that are not mirror images across an ellipse axis
/// determine the ellipse on their own. Mirrored points need either an
/// eccentricity or a depth, the distance the arc bulges beyond the
/// start/end midpoint. A negative depth bulges to the other side.
#[derive(Debug, Clone)]
pub struct EllipseBuilder {
    start: Coordinate,
    end: Coordinate,
    arcs_per_quadrant: Option<usize>,
    depth: Option<f64>,
    eccentricity: Option<f64>,
    angle: Option<f64>,
    centre: Option<Coordinate>,
    tolerance: Tolerance,
}

/// Semi-axes of the canonical ellipse.
#[derive(Debug, Clone, Copy)]
struct SemiAxes {
    a: f64,
    b: f64,
    eccentricity: f64,
}

impl EllipseBuilder {
    pub fn new(start: Coordinate, end: Coordinate) -> Self {
        Self {
            start,
            end,
            arcs_per_quadrant: None,
            depth: None,
            eccentricity: None,
            angle: None,
            centre: None,
            tolerance: Tolerance::default(),
        }
    }

    /// Arcs used per quadrant of the full ellipse. At least 2.
    pub fn arcs_per_quadrant(mut self, n: usize) -> Self {
        self.arcs_per_quadrant = Some(n);
        self
    }

    pub fn depth(mut self, depth: f64) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn eccentricity(mut self, eccentricity: f64) -> Self {
        self.eccentricity = Some(eccentricity);
        self
    }

    /// Angle of the ellipse's relative x axis, in degrees.
    pub fn angle(mut self, angle: f64) -> Self {
        self.angle = Some(angle);
        self
    }

    pub fn centre(mut self, centre: Coordinate) -> Self {
        self.centre = Some(centre);
        self
    }

    /// Coincidence tolerance used to detect mirrored and repeated endpoints.
    pub fn tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    fn validate(&self) -> Result<(), GeometryError> {
        let optional = [self.depth, self.eccentricity, self.angle];
        if !self.start.is_finite()
            || !self.end.is_finite()
            || optional.iter().flatten().any(|v| !v.is_finite())
            || self.centre.is_some_and(|c| !c.is_finite())
        {
            return Err(GeometryError::NonFinite { what: "ellipse" });
        }
        if self.tolerance.points_coincident(&self.start, &self.end) {
            return Err(invalid("start and end coincide"));
        }
        if let Some(e) = self.eccentricity {
            if !(0.0..1.0).contains(&e) {
                return Err(invalid(format!("eccentricity {e} outside [0, 1)")));
            }
        }
        if let Some(n) = self.arcs_per_quadrant {
            if n < 2 {
                return Err(invalid(format!("{n} arcs per quadrant, need at least 2")));
            }
        }
        Ok(())
    }

    /// Approximate the elliptic arc. Entities run from `start` to `end`.
    pub fn build(&self) -> Result<EntityList, GeometryError> {
        self.validate()?;

        let midpoint = self.start.midpoint(&self.end);
        let centre = self.centre.unwrap_or(midpoint);
        let mut angle = self
            .angle
            .unwrap_or_else(|| Line::new(self.start, midpoint).angle() - 90.0);

        let mut rel_start = (self.start - centre).rotate(Coordinate::ORIGIN, -angle);
        let mut rel_end = (self.end - centre).rotate(Coordinate::ORIGIN, -angle);
        let tol = self.tolerance;
        if tol.is_zero_length(rel_start.length()) || tol.is_zero_length(rel_end.length()) {
            return Err(invalid("endpoint coincides with the centre"));
        }

        let mut eccentricity = self.eccentricity;
        let mut mirror = false;
        if let (Some(depth), None) = (self.depth, self.eccentricity) {
            if is_reflection(&rel_start, &rel_end, &tol) {
                mirror = depth < 0.0;
                let threshold = centre.distance_to(&self.start);
                let axis = depth.abs() + centre.distance_to(&midpoint);
                let axis2 = axis * axis;
                let e = if tol.is_zero_length(axis - threshold) {
                    0.0
                } else if axis > threshold {
                    let (sx2, sy2) = (rel_start.x.powi(2), rel_start.y.powi(2));
                    ((axis2 - sx2 - sy2) / (axis2 - sx2)).sqrt()
                } else {
                    // Shallower than a circular arc: swap the roles of the axes.
                    angle += 90.0;
                    rel_start = rel_start.rotate(Coordinate::ORIGIN, -90.0);
                    rel_end = rel_end.rotate(Coordinate::ORIGIN, -90.0);
                    let (sx2, sy2) = (rel_start.x.powi(2), rel_start.y.powi(2));
                    (1.0 - (axis2 - sy2) / sx2).sqrt()
                };
                eccentricity = Some(e);
            }
        }

        let axes = if is_reflection(&rel_start, &rel_end, &tol) {
            let e = eccentricity
                .ok_or_else(|| invalid("mirrored endpoints need an eccentricity or a depth"))?;
            semi_axes_from_eccentricity(&rel_start, e)?
        } else {
            semi_axes_from_points(&rel_start, &rel_end)?
        };

        let circular = axes.eccentricity < 1e-9;
        let relative = if circular {
            vec![circular_arc(rel_start, rel_end)]
        } else {
            let n = self
                .arcs_per_quadrant
                .unwrap_or_else(|| default_arcs_per_quadrant(axes.eccentricity));
            let quadrant = quadrant_arcs(&quadrant_points(axes.a, axes.b, n))?;
            let arcs = spanning_arcs(&whole_ellipse(&quadrant), rel_start, rel_end)?;
            debug!(
                a = axes.a,
                b = axes.b,
                eccentricity = axes.eccentricity,
                per_quadrant = n,
                arcs = arcs.len(),
                "ellipse approximated"
            );
            arcs
        };

        let min_length = relative.iter().map(Arc::length).fold(f64::INFINITY, f64::min);
        if min_length < SHORT_ARC_WARNING {
            warn!(min_length, "ellipse arc very short, curvature may be too extreme");
        }

        let to_absolute =
            Transform2::rotation(angle).then(&Transform2::translation(centre.x, centre.y));
        let mut arcs: Vec<Arc> = relative.iter().map(|a| a.transformed(&to_absolute)).collect();

        if circular {
            snap_exact(&mut arcs, self.start, self.end);
        } else {
            if let Some(first) = arcs.first_mut() {
                *first = Arc::from_radius(self.start, first.end, first.radius)?;
            }
            if let Some(last) = arcs.last_mut() {
                *last = Arc::from_radius(last.start, self.end, last.radius)?;
            }
        }

        if mirror {
            let reflect = Transform2::mirror(&Line::new(self.start, self.end));
            arcs = arcs.iter().map(|a| a.transformed(&reflect)).collect();
            snap_exact(&mut arcs, self.start, self.end);
        }

        Ok(arcs.into_iter().map(Entity::Arc).collect())
    }
}

fn snap_exact(arcs: &mut [Arc], start: Coordinate, end: Coordinate) {
    if let Some(first) = arcs.first_mut() {
        first.start = start;
    }
    if let Some(last) = arcs.last_mut() {
        last.end = end;
    }
}

/// Relative endpoints mirror each other across the x axis, the y axis, or the origin.
fn is_reflection(s: &Coordinate, e: &Coordinate, tol: &Tolerance) -> bool {
    tol.points_coincident(&Coordinate::new(-s.x, s.y), e)
        || tol.points_coincident(&Coordinate::new(s.x, -s.y), e)
        || tol.points_coincident(&-*s, e)
}

fn semi_axes_from_eccentricity(s: &Coordinate, e: f64) -> Result<SemiAxes, GeometryError> {
    let one_minus = 1.0 - e * e;
    let a = ((one_minus * s.x * s.x + s.y * s.y) / one_minus).sqrt();
    let b = (a * a * one_minus).sqrt();
    if !(a.is_finite() && b.is_finite()) || a <= 0.0 || b <= 0.0 {
        return Err(invalid(format!("eccentricity {e} gives no ellipse")));
    }
    Ok(SemiAxes {
        a,
        b,
        eccentricity: e,
    })
}

/// The unique axis-aligned origin-centred ellipse through two non-mirrored points.
fn semi_axes_from_points(s: &Coordinate, e: &Coordinate) -> Result<SemiAxes, GeometryError> {
    let a = ((s.x.powi(2) * e.y.powi(2) - e.x.powi(2) * s.y.powi(2))
        / ((s.y + e.y) * (e.y - s.y)))
        .sqrt();
    let b = a * ((e.y.powi(2) - s.y.powi(2)) / (s.x.powi(2) - e.x.powi(2))).sqrt();
    if !(a.is_finite() && b.is_finite()) || a <= 0.0 || b <= 0.0 {
        return Err(invalid("points do not lie on a common ellipse"));
    }
    let (minor, major) = (a.min(b), a.max(b));
    Ok(SemiAxes {
        a,
        b,
        eccentricity: (1.0 - minor * minor / (major * major)).sqrt(),
    })
}

fn default_arcs_per_quadrant(eccentricity: f64) -> usize {
    let n = (3.0 * (1.0 / (1.0 - eccentricity)).ln()).floor();
    if n.is_finite() && n > 2.0 {
        n as usize
    } else {
        2
    }
}

/// Arc about the origin, counter-clockwise unless that would exceed a half turn.
fn circular_arc(s: Coordinate, e: Coordinate) -> Arc {
    let r = s.length();
    let ccw = Arc::new(s, e, Coordinate::ORIGIN, r);
    if ccw.sweep_angle() > 180.0 + HALF_TURN_EPS {
        Arc::new(s, e, Coordinate::ORIGIN, -r)
    } else {
        ccw
    }
}

/// Points on the first quadrant from `(a, 0)` to `(0, b)`, with curvature
/// varying linearly between them.
fn quadrant_points(a: f64, b: f64, n: usize) -> Vec<Coordinate> {
    let (a2, b2) = (a * a, b * b);
    let k0 = a / b2;
    let kn = b / a2;
    (0..=n)
        .map(|i| {
            if i == 0 {
                return Coordinate::new(a, 0.0);
            }
            if i == n {
                return Coordinate::new(0.0, b);
            }
            let t = i as f64 / n as f64;
            let k = (1.0 - t) * k0 + t * kn;
            let l = (a * b / k).powf(2.0 / 3.0);
            Coordinate::new(
                a * ((l - a2) / (b2 - a2)).abs().sqrt(),
                b * ((l - b2) / (a2 - b2)).abs().sqrt(),
            )
        })
        .collect()
}

/// Counter-clockwise arcs joining successive quadrant points. Each arc's
/// radius comes from the circle through its neighbouring points, mirrored
/// across the axis at either end of the quadrant.
fn quadrant_arcs(points: &[Coordinate]) -> Result<Vec<Arc>, GeometryError> {
    let n = points.len() - 1;
    let radius_through = |p: &Coordinate, q: &Coordinate, r: &Coordinate| {
        coordinates_to_arc(p, q, r)
            .map(|arc| arc.abs_radius())
            .ok_or_else(|| invalid("collinear quadrant points"))
    };

    let mut arcs = Vec::with_capacity(n);
    let p1 = points[1];
    let r0 = radius_through(&Coordinate::new(p1.x, -p1.y), &points[0], &p1)?;
    arcs.push(Arc::from_radius(points[0], p1, r0)?);
    for i in 1..n - 1 {
        let r = radius_through(&points[i - 1], &points[i], &points[i + 1])?;
        arcs.push(Arc::from_radius(points[i], points[i + 1], r)?);
    }
    let q = points[n - 1];
    let rn = radius_through(&q, &points[n], &Coordinate::new(-q.x, q.y))?;
    arcs.push(Arc::from_radius(q, points[n], rn)?);
    Ok(arcs)
}

/// Mirror the first quadrant into a closed, counter-clockwise ellipse.
fn whole_ellipse(quadrant: &[Arc]) -> Vec<Arc> {
    let n = quadrant.len();
    let mirror_y = Transform2::mirror(&Line::new(Coordinate::ORIGIN, Coordinate::new(0.0, 1.0)));
    let mirror_x = Transform2::mirror(&Line::new(Coordinate::ORIGIN, Coordinate::new(1.0, 0.0)));

    let mut whole = vec![Arc::new(Coordinate::ORIGIN, Coordinate::ORIGIN, Coordinate::ORIGIN, 0.0); 4 * n];
    for (i, arc) in quadrant.iter().enumerate() {
        whole[i] = *arc;
        let second = arc.transformed(&mirror_y).reversed();
        whole[2 * n - 1 - i] = second;
        whole[2 * n + i] = second.transformed(&mirror_x).reversed();
        whole[4 * n - 1 - i] = arc.transformed(&mirror_x).reversed();
    }
    whole
}

fn polar_angle(p: &Coordinate) -> f64 {
    p.to_polar().1.rem_euclid(360.0)
}

/// Point where the ray from the origin through `p` meets the arc's circle,
/// taking the root nearest `p`.
fn ray_hit(arc: &Arc, p: &Coordinate) -> Coordinate {
    let d = p.length();
    let u = *p / d;
    let uc = u.dot(&arc.centre);
    let disc = (uc * uc - arc.centre.dot(&arc.centre) + arc.radius * arc.radius)
        .max(0.0)
        .sqrt();
    let (t1, t2) = (uc - disc, uc + disc);
    let t = if (t1 - d).abs() <= (t2 - d).abs() { t1 } else { t2 };
    u * t
}

/// Clip the closed ellipse to the shorter span from `rel_start` to `rel_end`.
fn spanning_arcs(
    whole: &[Arc],
    rel_start: Coordinate,
    rel_end: Coordinate,
) -> Result<Vec<Arc>, GeometryError> {
    let m = whole.len();
    let s = polar_angle(&rel_start);
    let e = polar_angle(&rel_end);
    let ccw = (e - s).rem_euclid(360.0);
    let rev = ccw > 180.0 + HALF_TURN_EPS;
    let (from_pt, to_pt, from, span) = if rev {
        (rel_end, rel_start, e, 360.0 - ccw)
    } else {
        (rel_start, rel_end, s, ccw)
    };
    if span <= HALF_TURN_EPS {
        return Err(invalid("start and end lie at the same polar angle"));
    }

    let mut bounds: Vec<f64> = whole.iter().map(|a| polar_angle(&a.start)).collect();
    bounds.push(360.0);
    let first = bounds[..m].iter().rposition(|&b| b <= from).unwrap_or(0);

    let target = from + span;
    let mut arcs = Vec::new();
    for k in first..first + m + 1 {
        let idx = k % m;
        let upper = bounds[idx + 1] + 360.0 * (k / m) as f64;
        arcs.push(whole[idx]);
        if target <= upper {
            break;
        }
    }

    if let Some(a) = arcs.first_mut() {
        *a = Arc::new(ray_hit(a, &from_pt), a.end, a.centre, a.radius);
    }
    if let Some(a) = arcs.last_mut() {
        *a = Arc::new(a.start, ray_hit(a, &to_pt), a.centre, a.radius);
    }
    // Endpoints falling on an arc boundary leave slivers behind.
    let sliver = |a: &Arc| a.start.distance_to(&a.end) < GEOM_TOLERANCE;
    if arcs.len() > 1 && sliver(&arcs[0]) {
        arcs.remove(0);
    }
    if arcs.len() > 1 && arcs.last().is_some_and(sliver) {
        arcs.pop();
    }

    if rev {
        arcs.reverse();
        for a in &mut arcs {
            *a = a.reversed();
        }
    }
    Ok(arcs)
}
