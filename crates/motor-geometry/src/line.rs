use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::transform::Transform2;

/// A directed straight segment from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Coordinate,
    pub end: Coordinate,
}

impl Line {
    pub fn new(start: Coordinate, end: Coordinate) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Slope `dy/dx`. `None` for vertical lines, including zero-length ones.
    pub fn gradient(&self) -> Option<f64> {
        let dx = self.end.x - self.start.x;
        if dx == 0.0 {
            None
        } else {
            Some((self.end.y - self.start.y) / dx)
        }
    }

    /// Y intercept of the infinite line. `None` for vertical lines.
    pub fn intercept(&self) -> Option<f64> {
        self.gradient().map(|m| self.start.y - m * self.start.x)
    }

    pub fn midpoint(&self) -> Coordinate {
        self.start.midpoint(&self.end)
    }

    /// Direction angle in degrees, measured from the positive x axis.
    pub fn angle(&self) -> f64 {
        (self.end.y - self.start.y)
            .atan2(self.end.x - self.start.x)
            .to_degrees()
    }

    /// Unit direction vector, or `None` for a zero-length line.
    pub fn direction(&self) -> Option<Coordinate> {
        let len = self.length();
        if len < 1e-15 {
            None
        } else {
            Some((self.end - self.start) / len)
        }
    }

    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    /// The point `distance` along the line from `start`.
    pub fn coordinate_at_distance(&self, distance: f64) -> Coordinate {
        match self.direction() {
            Some(u) => self.start + u * distance,
            None => self.start,
        }
    }

    /// Perpendicular distance from `point` to the infinite line.
    ///
    /// A zero-length line degrades to the distance from its start point.
    pub fn distance_to_point(&self, point: &Coordinate) -> f64 {
        match self.direction() {
            Some(u) => (*point - self.start).cross(&u).abs(),
            None => point.distance_to(&self.start),
        }
    }

    /// Legacy deviation `|y - (m·x + c)|` measured along the y axis.
    ///
    /// Only approximates the perpendicular distance, and worsens as the line
    /// steepens. Vertical lines are measured along the x axis instead.
    pub fn vertical_deviation(&self, point: &Coordinate) -> f64 {
        match (self.gradient(), self.intercept()) {
            (Some(m), Some(c)) => (point.y - (m * point.x + c)).abs(),
            _ => (point.x - self.start.x).abs(),
        }
    }

    /// Intersection of the two infinite lines, `None` when parallel.
    pub fn intersection(&self, other: &Line) -> Option<Coordinate> {
        let d1 = self.end - self.start;
        let d2 = other.end - other.start;
        let denom = d1.cross(&d2);
        if denom.abs() <= 1e-12 * d1.length() * d2.length() {
            return None;
        }
        let t = (other.start - self.start).cross(&d2) / denom;
        Some(self.start + d1 * t)
    }

    pub fn is_degenerate(&self, tolerance: f64) -> bool {
        self.length() <= tolerance
    }

    pub fn transformed(&self, transform: &Transform2) -> Self {
        Self {
            start: transform.apply(self.start),
            end: transform.apply(self.end),
        }
    }
}
