//! Verification oracles: pure functions returning pass/fail verdicts.
//!
//! Each oracle returns an `OracleVerdict` with diagnostic detail, not panics.
//! This lets a test collect all failures of a fit in one pass.

use curve_fitting::{max_arc_deviation, max_line_deviation, FitOutcome, FitSettings};
use motor_geometry::{Coordinate, Entity};

/// The result of a single oracle check.
#[derive(Debug, Clone)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
    pub value: Option<f64>,
}

impl OracleVerdict {
    fn pass(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: None,
        }
    }

    fn pass_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: Some(value),
        }
    }

    fn fail(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: None,
        }
    }

    fn fail_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: Some(value),
        }
    }
}

// ── Structural Oracles ──────────────────────────────────────────────────────

/// Every entity starts exactly where the previous one ended.
pub fn check_connectivity(outcome: &FitOutcome) -> OracleVerdict {
    let gaps: Vec<String> = outcome
        .entities
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[0].entity.end() != w[1].entity.start())
        .map(|(i, w)| {
            format!(
                "{}->{}: {:?} != {:?}",
                i,
                i + 1,
                w[0].entity.end(),
                w[1].entity.start()
            )
        })
        .collect();

    if gaps.is_empty() {
        OracleVerdict::pass(
            "connectivity",
            format!("{} entities connected", outcome.entities.len()),
        )
    } else {
        OracleVerdict::fail(
            "connectivity",
            format!("{} gaps: {}", gaps.len(), gaps.join("; ")),
        )
    }
}

/// The fit starts at the first input point and ends at the last one.
pub fn check_coverage(input: &[Coordinate], outcome: &FitOutcome) -> OracleVerdict {
    let distinct = outcome.points.len();
    let (Some(first), Some(last)) = (outcome.entities.first(), outcome.entities.last()) else {
        return if distinct < 2 {
            OracleVerdict::pass("coverage", format!("{} distinct points, nothing to cover", distinct))
        } else {
            OracleVerdict::fail("coverage", format!("{} distinct points but no entities", distinct))
        };
    };

    let (Some(p0), Some(pn)) = (input.first(), input.last()) else {
        return OracleVerdict::fail("coverage", "entities fitted to empty input".to_string());
    };
    let start = first.entity.start();
    let end = last.entity.end();
    if start == *p0 && end == *pn {
        OracleVerdict::pass("coverage", format!("{:?} -> {:?}", start, end))
    } else {
        OracleVerdict::fail(
            "coverage",
            format!(
                "expected {:?} -> {:?}, got {:?} -> {:?}",
                p0, pn, start, end
            ),
        )
    }
}

/// Spans tile the cleaned input: each starts where the previous ended.
pub fn check_span_tiling(outcome: &FitOutcome) -> OracleVerdict {
    let mut expected_start = 0;
    for (i, f) in outcome.entities.iter().enumerate() {
        if f.span.start != expected_start || f.span.len() < 2 {
            return OracleVerdict::fail(
                "span_tiling",
                format!(
                    "entity {} span {:?}, expected to start at {}",
                    i, f.span, expected_start
                ),
            );
        }
        expected_start = f.span.end - 1;
    }
    OracleVerdict::pass(
        "span_tiling",
        format!("{} spans, last point index {}", outcome.entities.len(), expected_start),
    )
}

// ── Tolerance Oracles ───────────────────────────────────────────────────────

/// Every entity lies within its tolerance of each point in its span.
///
/// The reported value is the worst deviation seen across all entities.
pub fn check_span_tolerance(outcome: &FitOutcome, settings: &FitSettings) -> OracleVerdict {
    let mut worst: f64 = 0.0;
    let mut violations = Vec::new();
    for (i, f) in outcome.entities.iter().enumerate() {
        let pts = outcome.points_for(f);
        let (deviation, tolerance) = match &f.entity {
            Entity::Line(l) => (
                max_line_deviation(l, pts, settings.line_deviation),
                settings.line_tolerance,
            ),
            Entity::Arc(a) => (max_arc_deviation(a, pts), settings.arc_tolerance),
        };
        worst = worst.max(deviation);
        // Two-point lines are exact by construction up to rounding.
        if deviation > tolerance && !(pts.len() == 2 && deviation < 1e-9) {
            violations.push(format!(
                "entity {} ({:?}): {:.6} > {}",
                i, f.span, deviation, tolerance
            ));
        }
    }

    if violations.is_empty() {
        OracleVerdict::pass_val(
            "span_tolerance",
            format!("max deviation {:.6}", worst),
            worst,
        )
    } else {
        OracleVerdict::fail_val("span_tolerance", violations.join("; "), worst)
    }
}

/// No emitted entity collapses to (nearly) zero length.
pub fn check_no_degenerate_entities(outcome: &FitOutcome) -> OracleVerdict {
    let degenerate: Vec<usize> = outcome
        .entities
        .iter()
        .enumerate()
        .filter(|(_, f)| f.entity.is_degenerate(1e-12))
        .map(|(i, _)| i)
        .collect();

    if degenerate.is_empty() {
        OracleVerdict::pass("no_degenerate_entities", "all entities have length".to_string())
    } else {
        OracleVerdict::fail(
            "no_degenerate_entities",
            format!("degenerate entities at {:?}", degenerate),
        )
    }
}

// ── Composite ───────────────────────────────────────────────────────────────

/// Run every fit oracle.
pub fn run_all_fit_checks(
    input: &[Coordinate],
    outcome: &FitOutcome,
    settings: &FitSettings,
) -> Vec<OracleVerdict> {
    vec![
        check_connectivity(outcome),
        check_coverage(input, outcome),
        check_span_tiling(outcome),
        check_span_tolerance(outcome, settings),
        check_no_degenerate_entities(outcome),
    ]
}
