use thiserror::Error;

/// Errors raised by the point-cloud fitter.
///
/// Degenerate arc candidates are not errors; the fitter treats them as a
/// stop condition for the arc scan.
#[derive(Debug, Error)]
pub enum FitError {
    #[error("coordinate {index} is not finite: ({x}, {y})")]
    NonFiniteCoordinate { index: usize, x: f64, y: f64 },

    #[error("invalid {name}: {value} (must be finite and non-negative)")]
    InvalidTolerance { name: &'static str, value: f64 },

    #[error("invalid fit settings: {reason}")]
    InvalidSettings { reason: String },

    #[error("failed to parse fit settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("failed to read fit settings: {0}")]
    Io(#[from] std::io::Error),
}
