use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

/// Turning direction of an ordered triple of points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Turning direction of the path `c1 -> c2 -> c3`.
///
/// The test is scale-relative: the triple is collinear when the cross term is
/// within `1e-12 · |c1c2| · |c2c3|`. Repeated points are always collinear.
pub fn orientation(c1: &Coordinate, c2: &Coordinate, c3: &Coordinate) -> Orientation {
    let val = (c2.y - c1.y) * (c3.x - c2.x) - (c2.x - c1.x) * (c3.y - c2.y);
    let scale = c1.distance_to(c2) * c2.distance_to(c3);
    if val.abs() <= 1e-12 * scale {
        Orientation::Collinear
    } else if val > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}
