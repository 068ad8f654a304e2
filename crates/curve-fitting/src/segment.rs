//! Greedy segmentation of an ordered point list into lines and arcs.
//!
//! Starting from the first point, the fitter grows a candidate line and,
//! independently, a candidate arc as far as each stays within tolerance.
//! The longer one is emitted (lines win ties), the next entity starts at its
//! end point, and the walk repeats until fewer than three points remain.

use std::ops::Range;

use motor_geometry::{coordinates_to_arc, Arc, Coordinate, Entity, EntityList, Line};
use tracing::{debug, info, instrument, trace};

use crate::config::FitSettings;
use crate::error::FitError;
use crate::tolerance::{check_arc_error, check_line_error};

/// An emitted entity and the input points it was fitted to.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedEntity {
    pub entity: Entity,
    /// Indices into [`FitOutcome::points`], end exclusive. Consecutive spans
    /// share their boundary point.
    pub span: Range<usize>,
}

/// Result of a fit: the cleaned input and the entities covering it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FitOutcome {
    /// Input points with consecutive duplicates collapsed.
    pub points: Vec<Coordinate>,
    pub entities: Vec<FittedEntity>,
}

impl FitOutcome {
    pub fn entity_list(&self) -> EntityList {
        self.entities.iter().map(|f| f.entity).collect()
    }

    pub fn into_entity_list(self) -> EntityList {
        self.entities.into_iter().map(|f| f.entity).collect()
    }

    /// The points `fitted` was checked against.
    pub fn points_for(&self, fitted: &FittedEntity) -> &[Coordinate] {
        &self.points[fitted.span.clone()]
    }

    pub fn line_count(&self) -> usize {
        self.entities.iter().filter(|f| !f.entity.is_arc()).count()
    }

    pub fn arc_count(&self) -> usize {
        self.entities.iter().filter(|f| f.entity.is_arc()).count()
    }
}

/// Index of the middle sample for a span of `k` segments: `k / 2` rounded
/// half to even.
fn mid_index(k: usize) -> usize {
    let half = k / 2;
    if k % 2 == 0 || half % 2 == 0 {
        half
    } else {
        half + 1
    }
}

/// Longest line from `pts[0]` within tolerance, in segments. Never less than 1.
fn scan_line(pts: &[Coordinate], limit: usize, settings: &FitSettings) -> usize {
    let mut accepted = 1;
    for k in 2..=limit {
        let candidate = Line::new(pts[0], pts[k]);
        if !check_line_error(
            &candidate,
            &pts[..=k],
            settings.line_tolerance,
            settings.line_deviation,
        ) {
            trace!(k, "line scan stopped: tolerance exceeded");
            break;
        }
        accepted = k;
    }
    accepted
}

/// Longest arc from `pts[0]` within tolerance, with its segment count.
fn scan_arc(pts: &[Coordinate], limit: usize, settings: &FitSettings) -> Option<(usize, Arc)> {
    let mut accepted = None;
    for k in 2..=limit {
        let Some(candidate) = coordinates_to_arc(&pts[0], &pts[mid_index(k)], &pts[k]) else {
            trace!(k, "arc scan stopped: degenerate triple");
            break;
        };
        if !check_arc_error(&candidate, &pts[..=k], settings.arc_tolerance) {
            trace!(k, "arc scan stopped: tolerance exceeded");
            break;
        }
        accepted = Some((k, candidate));
    }
    accepted
}

fn ensure_finite(coordinates: &[Coordinate]) -> Result<(), FitError> {
    match coordinates.iter().position(|c| !c.is_finite()) {
        Some(index) => {
            let c = coordinates[index];
            Err(FitError::NonFiniteCoordinate {
                index,
                x: c.x,
                y: c.y,
            })
        }
        None => Ok(()),
    }
}

/// Fit lines and arcs to an ordered list of coordinates.
///
/// Entities are connected end to start, the first starts at the first input
/// point and the last ends at the last one. Every entity lies within its
/// tolerance of each point in its span. Clockwise arcs carry a negative
/// radius so they still run in input order.
#[instrument(skip_all, fields(points = coordinates.len()))]
pub fn fit_entities(
    coordinates: &[Coordinate],
    settings: &FitSettings,
) -> Result<FitOutcome, FitError> {
    settings.validate()?;
    ensure_finite(coordinates)?;

    let mut points = coordinates.to_vec();
    points.dedup();
    if points.len() < coordinates.len() {
        debug!(
            removed = coordinates.len() - points.len(),
            "collapsed repeated coordinates"
        );
    }

    let mut entities = Vec::new();
    let mut current = 0;
    while points.len() - current > 2 {
        let remaining = &points[current..];
        let limit = (remaining.len() - 1).min(settings.max_search_depth - 1);

        let line_len = scan_line(remaining, limit, settings);
        let arc = scan_arc(remaining, limit, settings);
        let arc_len = arc.map_or(0, |(k, _)| k);

        let (entity, consumed) = match arc {
            Some((k, arc)) if k > line_len => (Entity::Arc(arc), k),
            _ => (
                Entity::Line(Line::new(remaining[0], remaining[line_len])),
                line_len,
            ),
        };
        let kind = if entity.is_arc() { "arc" } else { "line" };
        debug!(
            kind,
            start = current,
            consumed,
            line_len,
            arc_len,
            "entity fitted"
        );
        entities.push(FittedEntity {
            entity,
            span: current..current + consumed + 1,
        });
        current += consumed;
    }

    if points.len() - current == 2 {
        entities.push(FittedEntity {
            entity: Entity::Line(Line::new(points[current], points[current + 1])),
            span: current..current + 2,
        });
    }

    let outcome = FitOutcome { points, entities };
    info!(
        lines = outcome.line_count(),
        arcs = outcome.arc_count(),
        "fit complete"
    );
    Ok(outcome)
}

/// Fit lines and arcs with the given tolerances and default search depth.
pub fn return_entity_list(
    coordinates: &[Coordinate],
    line_tolerance: f64,
    arc_tolerance: f64,
) -> Result<EntityList, FitError> {
    let settings = FitSettings::new(line_tolerance, arc_tolerance);
    Ok(fit_entities(coordinates, &settings)?.into_entity_list())
}
