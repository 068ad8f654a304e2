use serde::{Deserialize, Serialize};
use std::ops::Deref;

use crate::arc::Arc;
use crate::coordinate::Coordinate;
use crate::line::Line;
use crate::transform::Transform2;

/// A boundary piece of a region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entity {
    Line(Line),
    Arc(Arc),
}

impl Entity {
    pub fn start(&self) -> Coordinate {
        match self {
            Entity::Line(l) => l.start,
            Entity::Arc(a) => a.start,
        }
    }

    pub fn end(&self) -> Coordinate {
        match self {
            Entity::Line(l) => l.end,
            Entity::Arc(a) => a.end,
        }
    }

    pub fn length(&self) -> f64 {
        match self {
            Entity::Line(l) => l.length(),
            Entity::Arc(a) => a.length(),
        }
    }

    pub fn midpoint(&self) -> Coordinate {
        match self {
            Entity::Line(l) => l.midpoint(),
            Entity::Arc(a) => a.midpoint(),
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            Entity::Line(l) => Entity::Line(l.reversed()),
            Entity::Arc(a) => Entity::Arc(a.reversed()),
        }
    }

    pub fn transformed(&self, transform: &Transform2) -> Self {
        match self {
            Entity::Line(l) => Entity::Line(l.transformed(transform)),
            Entity::Arc(a) => Entity::Arc(a.transformed(transform)),
        }
    }

    pub fn is_degenerate(&self, tolerance: f64) -> bool {
        match self {
            Entity::Line(l) => l.is_degenerate(tolerance),
            Entity::Arc(a) => a.is_degenerate(tolerance),
        }
    }

    pub fn is_arc(&self) -> bool {
        matches!(self, Entity::Arc(_))
    }
}

impl From<Line> for Entity {
    fn from(line: Line) -> Self {
        Entity::Line(line)
    }
}

impl From<Arc> for Entity {
    fn from(arc: Arc) -> Self {
        Entity::Arc(arc)
    }
}

/// An ordered boundary, usually connected end to start.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityList(Vec<Entity>);

impl EntityList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, entity: impl Into<Entity>) {
        self.0.push(entity.into());
    }

    pub fn into_vec(self) -> Vec<Entity> {
        self.0
    }

    /// Every entity ends within `tolerance` of where the next one starts.
    pub fn is_connected(&self, tolerance: f64) -> bool {
        self.0
            .windows(2)
            .all(|w| w[0].end().is_close(&w[1].start(), tolerance))
    }

    /// Connected, and the last entity returns to the first start.
    pub fn is_closed(&self, tolerance: f64) -> bool {
        match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) => {
                self.is_connected(tolerance) && last.end().is_close(&first.start(), tolerance)
            }
            _ => false,
        }
    }

    pub fn total_length(&self) -> f64 {
        self.0.iter().map(Entity::length).sum()
    }

    /// Reverse traversal: entity order and each entity's direction.
    pub fn reverse(&mut self) {
        self.0.reverse();
        for e in &mut self.0 {
            *e = e.reversed();
        }
    }

    pub fn transformed(&self, transform: &Transform2) -> Self {
        self.0.iter().map(|e| e.transformed(transform)).collect()
    }

    pub fn line_count(&self) -> usize {
        self.0.iter().filter(|e| !e.is_arc()).count()
    }

    pub fn arc_count(&self) -> usize {
        self.0.iter().filter(|e| e.is_arc()).count()
    }

    /// Vertices in traversal order: each start, then the final end.
    pub fn points(&self) -> Vec<Coordinate> {
        let mut pts: Vec<Coordinate> = self.0.iter().map(Entity::start).collect();
        if let Some(last) = self.0.last() {
            pts.push(last.end());
        }
        pts
    }
}

impl Deref for EntityList {
    type Target = [Entity];

    fn deref(&self) -> &[Entity] {
        &self.0
    }
}

impl From<Vec<Entity>> for EntityList {
    fn from(entities: Vec<Entity>) -> Self {
        Self(entities)
    }
}

impl FromIterator<Entity> for EntityList {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for EntityList {
    type Item = Entity;
    type IntoIter = std::vec::IntoIter<Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a EntityList {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
