//! Distance functions for similarity ranking.
//!
//! All scores are distances: lower = more similar. Accumulation is done in
//! `f64` so ranking is stable across embeddings of a few thousand components.
//! No implicit normalization of vectors.

use tenantdb_core::DistanceMetric;

/// Compute the distance between two equal-length vectors
pub fn compute_distance(a: &[f32], b: &[f32], metric: DistanceMetric) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "Dimension mismatch in distance computation");

    match metric {
        DistanceMetric::Euclidean => euclidean_distance(a, b),
        DistanceMetric::Cosine => cosine_distance(a, b),
    }
}

/// Euclidean distance (L2 distance)
fn euclidean_distance(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = f64::from(*x) - f64::from(*y);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Cosine distance: 1 - dot(a,b) / (||a|| * ||b||)
///
/// Range: [0, 2]. A zero-norm vector has similarity 0 with everything.
fn cosine_distance(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        1.0
    } else {
        // Clamp rounding noise so identical vectors report exactly 0
        (1.0 - dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 2.0)
    }
}
