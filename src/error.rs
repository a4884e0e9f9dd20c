//! Error types for flight path planning.

use thiserror::Error;

/// Failure of a single planning call.
///
/// Every variant is terminal: the planner never returns a partial path.
/// Retrying with identical inputs yields the same error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// Drone or configuration value outside its accepted range, or in-range
    /// values whose combination exceeds a planner limit (reference latitude
    /// beyond the projection, more than `MAX_SCAN_LINES` scan lines)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Polygon has too few distinct points, zero area, or collinear vertices
    #[error("Degenerate polygon: {0}")]
    DegeneratePolygon(String),

    /// Valid inputs that produce no coverage at all
    #[error("Empty flight path: {0}")]
    EmptyPath(String),

    /// Malformed coordinates or interchange data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PlanError {
    fn from(err: serde_json::Error) -> Self {
        PlanError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
