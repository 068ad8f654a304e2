//! Structured text reports of a fit.
//!
//! Reports are plain text so a failing scenario can print the whole fit in
//! one readable block.

use std::fmt;

use curve_fitting::{fit_entities, FitOutcome, FitSettings};
use motor_geometry::{Coordinate, Entity};

use crate::helpers::HarnessError;
use crate::oracle::{self, OracleVerdict};

/// A complete fit report with all sections.
pub struct FitReport {
    pub input_points: usize,
    pub distinct_points: usize,
    pub settings: FitSettings,
    pub entries: Vec<EntityEntry>,
    pub oracle_results: Vec<OracleVerdict>,
}

/// A single fitted entity's report entry.
pub struct EntityEntry {
    pub index: usize,
    pub kind: &'static str,
    pub span: (usize, usize),
    pub detail: String,
    pub length: f64,
}

impl FitReport {
    /// Fit `input` with `settings` and report on the result.
    pub fn run(input: &[Coordinate], settings: &FitSettings) -> Result<Self, HarnessError> {
        let outcome = fit_entities(input, settings)?;
        Ok(Self::from_outcome(input, &outcome, settings))
    }

    pub fn from_outcome(input: &[Coordinate], outcome: &FitOutcome, settings: &FitSettings) -> Self {
        let entries = outcome
            .entities
            .iter()
            .enumerate()
            .map(|(index, f)| {
                let (kind, detail) = match &f.entity {
                    Entity::Line(l) => (
                        "Line",
                        format!(
                            "({:.3}, {:.3}) -> ({:.3}, {:.3})",
                            l.start.x, l.start.y, l.end.x, l.end.y
                        ),
                    ),
                    Entity::Arc(a) => (
                        "Arc",
                        format!(
                            "centre ({:.3}, {:.3}) r={:.3} sweep={:.1}",
                            a.centre.x,
                            a.centre.y,
                            a.radius,
                            a.sweep_angle()
                        ),
                    ),
                };
                EntityEntry {
                    index,
                    kind,
                    span: (f.span.start, f.span.end),
                    detail,
                    length: f.entity.length(),
                }
            })
            .collect();

        Self {
            input_points: input.len(),
            distinct_points: outcome.points.len(),
            settings: settings.clone(),
            entries,
            oracle_results: oracle::run_all_fit_checks(input, outcome, settings),
        }
    }

    pub fn all_passed(&self) -> bool {
        self.oracle_results.iter().all(|v| v.passed)
    }

    /// Format the report as text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Curve Fit Report ===\n\n");

        out.push_str(&format!(
            "Input: {} points ({} distinct), line tol {}, arc tol {}, depth {}\n",
            self.input_points,
            self.distinct_points,
            self.settings.line_tolerance,
            self.settings.arc_tolerance,
            self.settings.max_search_depth,
        ));

        let arcs = self.entries.iter().filter(|e| e.kind == "Arc").count();
        out.push_str(&format!(
            "\nEntities ({} total, {} lines, {} arcs):\n",
            self.entries.len(),
            self.entries.len() - arcs,
            arcs,
        ));
        for e in &self.entries {
            out.push_str(&format!(
                "  [{}] {} points {}..{} len={:.3}\n      {}\n",
                e.index, e.kind, e.span.0, e.span.1, e.length, e.detail,
            ));
        }

        if !self.oracle_results.is_empty() {
            out.push_str(&format!(
                "\nOracle Results ({} checks):\n",
                self.oracle_results.len()
            ));
            for v in &self.oracle_results {
                let status = if v.passed { "PASS" } else { "FAIL" };
                out.push_str(&format!("  [{}] {}: {}\n", status, v.oracle_name, v.detail));
            }
        }

        out
    }
}

impl fmt::Display for FitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}
