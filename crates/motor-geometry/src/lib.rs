//! Planar geometry for adaptive-template motor cross-sections.
//!
//! Regions of a motor cross-section are bounded by ordered lists of straight
//! lines and circular arcs. This crate provides those primitives, the
//! transforms applied to them, and a few shape builders used by templates.
//!
//! Arcs carry a signed radius: positive sweeps counter-clockwise from start
//! to end, negative sweeps clockwise. Every operation here preserves that
//! convention.

pub mod arc;
pub mod coordinate;
pub mod ellipse;
pub mod entity;
pub mod error;
pub mod line;
pub mod orientation;
pub mod region;
pub mod shapes;
pub mod transform;

pub use arc::{coordinates_to_arc, Arc};
pub use coordinate::{rt_to_xy, xy_to_rt, Coordinate};
pub use ellipse::EllipseBuilder;
pub use entity::{Entity, EntityList};
pub use error::GeometryError;
pub use line::Line;
pub use orientation::{orientation, Orientation};
pub use region::Region;
pub use transform::Transform2;

/// Distance below which two coordinates are treated as coincident (mm).
pub const GEOM_TOLERANCE: f64 = 1e-6;

/// Tolerance configuration for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Points closer than this are considered coincident (mm).
    pub coincidence: f64,
    /// Angles smaller than this (degrees) are considered zero.
    pub angular: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            coincidence: GEOM_TOLERANCE,
            angular: 1e-9,
        }
    }
}

impl Tolerance {
    pub fn points_coincident(&self, a: &Coordinate, b: &Coordinate) -> bool {
        a.distance_to(b) <= self.coincidence
    }

    pub fn is_zero_length(&self, length: f64) -> bool {
        length.abs() <= self.coincidence
    }

    pub fn is_zero_angle(&self, angle: f64) -> bool {
        angle.abs() <= self.angular
    }
}
