//! Distance metric for similarity ranking
//!
//! Scores are distances: lower = more similar. Results are always reported
//! in ascending distance order.

use serde::{Deserialize, Serialize};

/// Distance metric used by every index of a database
///
/// Note: The actual distance calculation lives in the engine crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Euclidean (L2) distance: sqrt(sum((a - b)^2))
    /// Range: [0, inf), 0 = identical
    #[default]
    Euclidean,

    /// Cosine distance: 1 - dot(a,b) / (||a|| * ||b||)
    /// Range: [0, 2], 0 = same direction
    /// Zero-norm vectors are treated as orthogonal to everything (distance 1).
    Cosine,
}

impl DistanceMetric {
    /// Human-readable name for display and config files
    pub fn name(&self) -> &'static str {
        match self {
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::Cosine => "cosine",
        }
    }

    /// Parse from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "euclidean" | "l2" => Some(DistanceMetric::Euclidean),
            "cosine" => Some(DistanceMetric::Cosine),
            _ => None,
        }
    }
}
