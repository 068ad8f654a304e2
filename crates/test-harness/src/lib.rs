//! Test harness for curve-fitting scenarios.
//!
//! Provides point-cloud generators, verification oracles, and readable
//! reports so that fitting regressions fail with enough detail to diagnose
//! from the test log alone.
//!
//! # Key Components
//!
//! - [`helpers`]: Error type, point-cloud generators, point math
//! - [`oracle`]: Verification functions returning pass/fail verdicts
//! - [`assertions`]: Rich assertion helpers with diagnostics
//! - [`report`]: Structured text fit descriptions

pub mod assertions;
pub mod helpers;
pub mod oracle;
pub mod report;

pub use helpers::HarnessError;
pub use oracle::OracleVerdict;
pub use report::FitReport;
