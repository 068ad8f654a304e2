use nalgebra::{Matrix3, Point2, Vector2};

use crate::coordinate::Coordinate;
use crate::line::Line;

/// A rigid 2D transform (rotation, translation, reflection) in homogeneous form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2 {
    m: Matrix3<f64>,
}

impl Default for Transform2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2 {
    pub fn identity() -> Self {
        Self {
            m: Matrix3::identity(),
        }
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            m: Matrix3::new_translation(&Vector2::new(dx, dy)),
        }
    }

    /// Rotation about the origin by `angle` degrees.
    pub fn rotation(angle: f64) -> Self {
        Self {
            m: Matrix3::new_rotation(angle.to_radians()),
        }
    }

    /// Rotation about `centre` by `angle` degrees.
    pub fn rotation_about(centre: Coordinate, angle: f64) -> Self {
        Self::translation(-centre.x, -centre.y)
            .then(&Self::rotation(angle))
            .then(&Self::translation(centre.x, centre.y))
    }

    /// Reflection across the infinite line through `axis`.
    ///
    /// A zero-length axis has no direction and yields the identity.
    pub fn mirror(axis: &Line) -> Self {
        let Some(d) = axis.direction() else {
            return Self::identity();
        };
        #[rustfmt::skip]
        let reflect = Matrix3::new(
            2.0 * d.x * d.x - 1.0, 2.0 * d.x * d.y,       0.0,
            2.0 * d.x * d.y,       2.0 * d.y * d.y - 1.0, 0.0,
            0.0,                   0.0,                   1.0,
        );
        Self::translation(-axis.start.x, -axis.start.y)
            .then(&Self { m: reflect })
            .then(&Self::translation(axis.start.x, axis.start.y))
    }

    /// Compose: apply `self` first, then `next`.
    pub fn then(&self, next: &Self) -> Self {
        Self { m: next.m * self.m }
    }

    pub fn apply(&self, c: Coordinate) -> Coordinate {
        let p = self.m.transform_point(&Point2::new(c.x, c.y));
        Coordinate::new(p.x, p.y)
    }

    /// True when the transform flips handedness, which reverses arc winding.
    pub fn is_reflection(&self) -> bool {
        let det = self.m[(0, 0)] * self.m[(1, 1)] - self.m[(0, 1)] * self.m[(1, 0)];
        det < 0.0
    }
}
