//! Fitting of lines and arcs to ordered point clouds.
//!
//! Geometry imported as dense point lists (DXF polylines, sampled curves) is
//! reduced to a short, connected [`EntityList`](motor_geometry::EntityList)
//! of lines and arcs that stays within a configurable tolerance of every
//! input point.

pub mod config;
pub mod error;
pub mod segment;
pub mod tolerance;

pub use config::{FitSettings, LineDeviation};
pub use error::FitError;
pub use motor_geometry::{coordinates_to_arc, orientation, Orientation};
pub use segment::{fit_entities, return_entity_list, FitOutcome, FittedEntity};
pub use tolerance::{
    arc_deviation, check_arc_error, check_line_error, line_deviation, max_arc_deviation,
    max_line_deviation,
};
