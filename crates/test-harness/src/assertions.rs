//! Rich assertion helpers with diagnostic output.
//!
//! Every failure includes the context string, expected vs actual, and the
//! offending entity so a failing scenario can be read without a debugger.

use curve_fitting::{FitOutcome, FitSettings};
use motor_geometry::{Coordinate, Entity};

use crate::helpers::HarnessError;
use crate::oracle::{self, OracleVerdict};

fn verdict_to_result(verdict: OracleVerdict, ctx: &str) -> Result<(), HarnessError> {
    if verdict.passed {
        Ok(())
    } else {
        Err(HarnessError::OracleFailure {
            oracle: verdict.oracle_name,
            detail: format!("[{}] {}", ctx, verdict.detail),
        })
    }
}

/// Assert consecutive entities share end and start points exactly.
pub fn assert_connected(outcome: &FitOutcome, ctx: &str) -> Result<(), HarnessError> {
    verdict_to_result(oracle::check_connectivity(outcome), ctx)
}

/// Assert the fit runs from the first input point to the last.
pub fn assert_covers(
    input: &[Coordinate],
    outcome: &FitOutcome,
    ctx: &str,
) -> Result<(), HarnessError> {
    verdict_to_result(oracle::check_coverage(input, outcome), ctx)
}

/// Assert every entity stays within tolerance of the points it was fitted to.
pub fn assert_within_tolerance(
    outcome: &FitOutcome,
    settings: &FitSettings,
    ctx: &str,
) -> Result<(), HarnessError> {
    verdict_to_result(oracle::check_span_tolerance(outcome, settings), ctx)
}

/// Assert exact line and arc counts.
pub fn assert_entity_counts(
    outcome: &FitOutcome,
    expected_lines: usize,
    expected_arcs: usize,
    ctx: &str,
) -> Result<(), HarnessError> {
    let lines = outcome.line_count();
    let arcs = outcome.arc_count();
    if lines == expected_lines && arcs == expected_arcs {
        Ok(())
    } else {
        let kinds: Vec<&str> = outcome
            .entities
            .iter()
            .map(|f| if f.entity.is_arc() { "arc" } else { "line" })
            .collect();
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected {} lines + {} arcs, got {} lines + {} arcs [{}]",
                ctx,
                expected_lines,
                expected_arcs,
                lines,
                arcs,
                kinds.join(", "),
            ),
        })
    }
}

/// Assert entity `index` is an arc with the given centre and signed radius.
pub fn assert_arc_matches(
    outcome: &FitOutcome,
    index: usize,
    centre: Coordinate,
    radius: f64,
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let entity = outcome.entities.get(index).map(|f| f.entity);
    match entity {
        Some(Entity::Arc(arc)) => {
            let centre_err = arc.centre.distance_to(&centre);
            let radius_err = (arc.radius - radius).abs();
            if centre_err <= tol && radius_err <= tol {
                Ok(())
            } else {
                Err(HarnessError::AssertionFailed {
                    detail: format!(
                        "[{}] arc {}: expected centre {:?} r={}, got centre {:?} r={} (tol={})",
                        ctx, index, centre, radius, arc.centre, arc.radius, tol,
                    ),
                })
            }
        }
        other => Err(HarnessError::AssertionFailed {
            detail: format!("[{}] entity {}: expected arc, got {:?}", ctx, index, other),
        }),
    }
}

/// Run every fit oracle and fail with all failing verdicts listed.
pub fn assert_fit_valid(
    input: &[Coordinate],
    outcome: &FitOutcome,
    settings: &FitSettings,
    ctx: &str,
) -> Result<(), HarnessError> {
    let failures: Vec<String> = oracle::run_all_fit_checks(input, outcome, settings)
        .into_iter()
        .filter(|v| !v.passed)
        .map(|v| format!("{}: {}", v.oracle_name, v.detail))
        .collect();

    if failures.is_empty() {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!("[{}] {}", ctx, failures.join(" | ")),
        })
    }
}
