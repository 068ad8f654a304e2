use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::FitError;

/// How a point's distance from a candidate line is measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineDeviation {
    /// Shortest distance to the infinite line through the candidate.
    #[default]
    Perpendicular,
    /// `|y - (m·x + c)|`, with vertical candidates measured along x.
    /// Matches geometry fitted by older tooling; overstates deviation on
    /// steep lines.
    Vertical,
}

/// Configuration for fitting lines and arcs to an ordered point list.
///
/// All fields have defaults, so a partial JSON document such as
/// `{"arc_tolerance": 0.005}` is a valid settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitSettings {
    /// Maximum distance of any covered point from a fitted line (mm).
    pub line_tolerance: f64,
    /// Maximum distance of any covered point from a fitted arc (mm).
    pub arc_tolerance: f64,
    /// Maximum number of input points a single entity may cover.
    pub max_search_depth: usize,
    pub line_deviation: LineDeviation,
}

impl Default for FitSettings {
    fn default() -> Self {
        Self {
            line_tolerance: 0.01,
            arc_tolerance: 0.01,
            max_search_depth: 100,
            line_deviation: LineDeviation::Perpendicular,
        }
    }
}

impl FitSettings {
    pub fn new(line_tolerance: f64, arc_tolerance: f64) -> Self {
        Self {
            line_tolerance,
            arc_tolerance,
            ..Self::default()
        }
    }

    pub fn with_max_search_depth(mut self, depth: usize) -> Self {
        self.max_search_depth = depth;
        self
    }

    pub fn with_line_deviation(mut self, mode: LineDeviation) -> Self {
        self.line_deviation = mode;
        self
    }

    /// Parse and validate settings from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, FitError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FitError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), FitError> {
        for (name, value) in [
            ("line_tolerance", self.line_tolerance),
            ("arc_tolerance", self.arc_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(FitError::InvalidTolerance { name, value });
            }
        }
        if self.max_search_depth < 2 {
            return Err(FitError::InvalidSettings {
                reason: format!(
                    "max_search_depth {} too small, an entity spans at least 2 points",
                    self.max_search_depth
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = FitSettings::default();
        assert_eq!(s.line_tolerance, 0.01);
        assert_eq!(s.arc_tolerance, 0.01);
        assert_eq!(s.max_search_depth, 100);
        assert_eq!(s.line_deviation, LineDeviation::Perpendicular);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = FitSettings::from_json_str(r#"{"arc_tolerance": 0.005, "line_deviation": "vertical"}"#)
            .unwrap();
        assert_eq!(s.arc_tolerance, 0.005);
        assert_eq!(s.line_tolerance, 0.01);
        assert_eq!(s.line_deviation, LineDeviation::Vertical);
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let err = FitSettings::from_json_str(r#"{"line_tolerance": -1.0}"#).unwrap_err();
        assert!(matches!(
            err,
            FitError::InvalidTolerance {
                name: "line_tolerance",
                ..
            }
        ));
    }

    #[test]
    fn test_non_finite_tolerance_rejected() {
        let s = FitSettings::new(0.01, f64::NAN);
        assert!(matches!(
            s.validate(),
            Err(FitError::InvalidTolerance {
                name: "arc_tolerance",
                ..
            })
        ));
    }

    #[test]
    fn test_search_depth_too_small() {
        let s = FitSettings::default().with_max_search_depth(1);
        assert!(matches!(s.validate(), Err(FitError::InvalidSettings { .. })));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            FitSettings::from_json_str("{ not json"),
            Err(FitError::Settings(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            FitSettings::from_path("/nonexistent/fit.json"),
            Err(FitError::Io(_))
        ));
    }
}
