use thiserror::Error;

/// Errors raised while constructing or exchanging geometry.
///
/// Degenerate three-point arcs are not errors: [`crate::coordinates_to_arc`]
/// reports them as `None`, since collinear triples are routine input.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("non-finite value in {what}")]
    NonFinite { what: &'static str },

    #[error("degenerate arc: {reason}")]
    DegenerateArc { reason: String },

    #[error("invalid ellipse: {reason}")]
    InvalidEllipse { reason: String },

    #[error("region JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
