use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::coordinate::Coordinate;
use crate::entity::{Entity, EntityList};
use crate::error::GeometryError;
use crate::line::Line;
use crate::transform::Transform2;

/// A named boundary, as exchanged with the host application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    #[serde(default)]
    pub entities: EntityList,
}

impl Region {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entities: EntityList::new(),
        }
    }

    pub fn with_entities(name: impl Into<String>, entities: EntityList) -> Self {
        Self {
            name: name.into(),
            entities,
        }
    }

    pub fn add_entity(&mut self, entity: impl Into<Entity>) {
        self.entities.push(entity);
    }

    pub fn is_closed(&self, tolerance: f64) -> bool {
        self.entities.is_closed(tolerance)
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.apply(&Transform2::translation(dx, dy));
    }

    /// Rotate about `centre` by `angle` degrees.
    pub fn rotate(&mut self, centre: Coordinate, angle: f64) {
        self.apply(&Transform2::rotation_about(centre, angle));
    }

    /// Reflect across `axis`. Arc radii change sign.
    pub fn mirror(&mut self, axis: &Line) {
        self.apply(&Transform2::mirror(axis));
    }

    fn apply(&mut self, transform: &Transform2) {
        self.entities = self.entities.transformed(transform);
    }

    pub fn to_json(&self) -> Result<String, GeometryError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value, GeometryError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, GeometryError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GeometryError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), GeometryError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
