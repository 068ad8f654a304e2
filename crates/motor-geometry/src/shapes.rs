//! Parametric shapes placed in polar coordinates (mm, degrees).
//!
//! Each builder returns a closed [`Region`] whose entities run in boundary
//! order.

use tracing::warn;

use crate::arc::Arc;
use crate::coordinate::{rt_to_xy, Coordinate};
use crate::error::GeometryError;
use crate::line::Line;
use crate::region::Region;
use crate::Tolerance;

/// Upper angular boundary of the duplicated motor sector.
const DUPLICATION_ANGLE: f64 = 45.0;

fn ensure_finite(values: &[f64], what: &'static str) -> Result<(), GeometryError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(GeometryError::NonFinite { what })
    }
}

/// Vertices A, B, C, D of a square of side `width` centred at polar `(r, theta)`.
fn square_corners(width: f64, r: f64, theta: f64) -> [Coordinate; 4] {
    let o = Coordinate::from_polar(r, theta);
    let hyp = 2f64.sqrt() * (width / 2.0);
    let (sin, cos) = (theta + 45.0).to_radians().sin_cos();
    let opp = hyp * sin;
    let adj = hyp * cos;
    [
        Coordinate::new(o.x - opp, o.y + adj),
        Coordinate::new(o.x + adj, o.y + opp),
        Coordinate::new(o.x + opp, o.y - adj),
        Coordinate::new(o.x - adj, o.y - opp),
    ]
}

/// A square of side `width` centred at polar `(r, theta)`.
///
/// A square crossing the 0 degree or the 45 degree sector boundary is rotated
/// about the origin until it lies back inside the sector.
pub fn square(width: f64, r: f64, theta: f64) -> Result<Region, GeometryError> {
    ensure_finite(&[width, r, theta], "square")?;
    let [a, b, c, d] = square_corners(width, r, theta);

    let mut shift: f64 = 0.0;
    for p in [d, c] {
        let th = p.to_polar().1;
        if th < 0.0 && th.abs() > shift {
            shift = th.abs();
        }
    }
    for p in [a, b] {
        let over = p.to_polar().1 - DUPLICATION_ANGLE;
        if over > 0.0 && over > shift.abs() {
            shift = -over;
        }
    }

    let [a, b, c, d] = if !Tolerance::default().is_zero_angle(shift) {
        warn!(shift, "square crosses sector boundary, rotated");
        square_corners(width, r, theta + shift)
    } else {
        [a, b, c, d]
    };

    let mut region = Region::new("Square");
    region.add_entity(Line::new(a, d));
    region.add_entity(Line::new(d, c));
    region.add_entity(Line::new(c, b));
    region.add_entity(Line::new(b, a));
    Ok(region)
}

/// An equilateral triangle of the given `height`, centroid at polar `(r, theta)`.
pub fn eq_triangle_h(height: f64, r: f64, theta: f64) -> Result<Region, GeometryError> {
    ensure_finite(&[height, r, theta], "triangle")?;
    let (xo, yo) = rt_to_xy(r, theta);
    let h_a = 2.0 * height / 3.0;

    let (s30p, c30p) = (30.0 + theta).to_radians().sin_cos();
    let (s0, c0) = theta.to_radians().sin_cos();
    let (s30m, c30m) = (30.0 - theta).to_radians().sin_cos();

    let a = Coordinate::new(xo - h_a * s30p, yo + h_a * c30p);
    let b = Coordinate::new(xo + h_a * c0, yo + h_a * s0);
    let c = Coordinate::new(xo - h_a * s30m, yo - h_a * c30m);

    let mut region = Region::new("Triangle");
    region.add_entity(Line::new(a, c));
    region.add_entity(Line::new(c, b));
    region.add_entity(Line::new(b, a));
    Ok(region)
}

/// An equilateral triangle of side `width`, centroid at polar `(r, theta)`.
pub fn eq_triangle_w(width: f64, r: f64, theta: f64) -> Result<Region, GeometryError> {
    eq_triangle_h(3f64.sqrt() * width / 2.0, r, theta)
}

/// A V-shaped notch cut into a rotor or stator surface of `radius`.
///
/// The notch spans `sweep` degrees about `centre_angle` and reaches `depth`
/// below the surface. The boundary closes along the surface arc.
pub fn triangular_notch(
    radius: f64,
    sweep: f64,
    centre_angle: f64,
    depth: f64,
) -> Result<Region, GeometryError> {
    ensure_finite(&[radius, sweep, centre_angle, depth], "notch")?;
    let p1 = Coordinate::from_polar(radius, centre_angle - sweep / 2.0);
    let p2 = Coordinate::from_polar(radius - depth, centre_angle);
    let p3 = Coordinate::from_polar(radius, centre_angle + sweep / 2.0);

    let mut region = Region::new("Notch");
    region.add_entity(Line::new(p3, p2));
    region.add_entity(Line::new(p2, p1));
    region.add_entity(Arc::new(p1, p3, Coordinate::ORIGIN, radius));
    Ok(region)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::xy_to_rt;
    use crate::entity::Entity;
    use approx::assert_abs_diff_eq;

    /// Polar angle of the vertex centroid.
    fn centroid_angle(region: &Region) -> f64 {
        let pts: Vec<Coordinate> = region.entities.iter().map(|e| e.start()).collect();
        let sum = pts.iter().fold(Coordinate::ORIGIN, |acc, p| acc + *p);
        let mean = sum / pts.len() as f64;
        xy_to_rt(mean.x, mean.y).1
    }

    #[test]
    fn test_square_inside_sector() {
        let sq = square(1.0, 10.0, 22.5).unwrap();
        assert_eq!(sq.entities.len(), 4);
        assert!(sq.is_closed(1e-9));
        for e in sq.entities.iter() {
            assert_abs_diff_eq!(e.length(), 1.0, epsilon = 1e-9);
        }
        assert_abs_diff_eq!(centroid_angle(&sq), 22.5, epsilon = 1e-9);
    }

    #[test]
    fn test_square_shifted_off_lower_boundary() {
        let sq = square(2.0, 10.0, 0.0).unwrap();
        assert!(sq.is_closed(1e-9));
        // Corner D at (9, -1) drove the shift.
        let expected = 1f64.atan2(9.0).to_degrees();
        assert_abs_diff_eq!(centroid_angle(&sq), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_square_shifted_off_upper_boundary() {
        let sq = square(2.0, 10.0, 45.0).unwrap();
        assert!(centroid_angle(&sq) < 45.0);
    }

    #[test]
    fn test_triangle_sides() {
        let tri = eq_triangle_w(3.0, 20.0, 10.0).unwrap();
        assert!(tri.is_closed(1e-9));
        for e in tri.entities.iter() {
            assert_abs_diff_eq!(e.length(), 3.0, epsilon = 1e-9);
        }
        assert_abs_diff_eq!(centroid_angle(&tri), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_triangular_notch() {
        let notch = triangular_notch(50.0, 10.0, 20.0, 2.0).unwrap();
        assert!(notch.is_closed(1e-9));
        assert_eq!(notch.entities.line_count(), 2);
        match notch.entities[2] {
            Entity::Arc(a) => {
                assert_eq!(a.radius, 50.0);
                assert_abs_diff_eq!(a.sweep_angle(), 10.0, epsilon = 1e-9);
            }
            Entity::Line(_) => panic!("expected surface arc"),
        }
        let tip = notch.entities[0].end();
        assert_abs_diff_eq!(tip.length(), 48.0, epsilon = 1e-9);
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(
            square(f64::NAN, 1.0, 0.0),
            Err(GeometryError::NonFinite { what: "square" })
        ));
    }
}
