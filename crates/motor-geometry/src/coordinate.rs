use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::line::Line;
use crate::transform::Transform2;

/// Convert cartesian coordinates to polar `(radius, theta)` with theta in degrees.
pub fn xy_to_rt(x: f64, y: f64) -> (f64, f64) {
    (x.hypot(y), y.atan2(x).to_degrees())
}

/// Convert polar coordinates (theta in degrees) to cartesian `(x, y)`.
pub fn rt_to_xy(radius: f64, theta: f64) -> (f64, f64) {
    let (s, c) = theta.to_radians().sin_cos();
    (radius * c, radius * s)
}

/// A point in the cross-section plane (mm).
///
/// Equality is exact. Callers that need a tolerance use [`Coordinate::is_close`]
/// or the `approx` traits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Build a coordinate from a radius and an angle in degrees.
    pub fn from_polar(radius: f64, theta: f64) -> Self {
        let (x, y) = rt_to_xy(radius, theta);
        Self { x, y }
    }

    /// Polar form `(radius, theta)`, theta in degrees within (-180, 180].
    pub fn to_polar(&self) -> (f64, f64) {
        xy_to_rt(self.x, self.y)
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Distance from the origin.
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn midpoint(&self, other: &Self) -> Self {
        Self {
            x: (self.x + other.x) * 0.5,
            y: (self.y + other.y) * 0.5,
        }
    }

    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            x: self.x + t * (other.x - self.x),
            y: self.y + t * (other.y - self.y),
        }
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product.
    pub fn cross(&self, other: &Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn is_close(&self, other: &Self, tolerance: f64) -> bool {
        self.distance_to(other) <= tolerance
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Rotate about `centre` by `angle` degrees (counter-clockwise positive).
    pub fn rotate(&self, centre: Coordinate, angle: f64) -> Self {
        Transform2::rotation_about(centre, angle).apply(*self)
    }

    /// Reflect across the infinite line through `line`.
    pub fn mirror(&self, line: &Line) -> Self {
        Transform2::mirror(line).apply(*self)
    }
}

impl Add for Coordinate {
    type Output = Coordinate;
    fn add(self, rhs: Self) -> Self::Output {
        Coordinate::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coordinate {
    type Output = Coordinate;
    fn sub(self, rhs: Self) -> Self::Output {
        Coordinate::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Coordinate {
    type Output = Coordinate;
    fn mul(self, rhs: f64) -> Self::Output {
        Coordinate::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Coordinate {
    type Output = Coordinate;
    fn div(self, rhs: f64) -> Self::Output {
        Coordinate::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Coordinate {
    type Output = Coordinate;
    fn neg(self) -> Self::Output {
        Coordinate::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl AbsDiffEq for Coordinate {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}
