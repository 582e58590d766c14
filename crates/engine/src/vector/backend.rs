//! Similarity index backend trait
//!
//! Defines the interface for swappable index implementations.
//! BruteForceIndex (exact O(n·D) scan) is the only backend today.

use std::sync::Arc;

use tenantdb_core::{DistanceMetric, Error, QueryHit, Result};

use crate::vector::brute_force::BruteForceIndex;
use crate::vector::set::VectorSet;

/// A built, immutable nearest-neighbor structure over a VectorSet prefix
///
/// Backends are built off to the side and published whole; nothing mutates
/// an index after `build` returns. Results are ordered by
/// (distance asc, insertion position asc).
pub trait IndexBackend: Send + Sync {
    /// k nearest entries as (distance, insertion position)
    ///
    /// `k` is clamped to `len()`. `k == 0` yields an empty result.
    ///
    /// # Errors
    /// `DimensionMismatch` if the query length differs from `dimension()`.
    fn search(&self, query: &[f32], k: usize) -> Result<Vec<(f64, usize)>>;

    /// Value at an insertion position
    fn value(&self, position: usize) -> Option<&str>;

    /// Number of indexed entries
    fn len(&self) -> usize;

    /// Check if empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Embedding dimension, if the source set had one
    fn dimension(&self) -> Option<usize>;

    /// Distance metric
    fn metric(&self) -> DistanceMetric;

    /// VectorSet generation this index was built from
    fn generation(&self) -> u64;

    /// k nearest entries resolved to their values
    fn query(&self, query: &[f32], k: usize) -> Result<Vec<QueryHit>> {
        self.search(query, k)?
            .into_iter()
            .map(|(distance, position)| {
                let value = self.value(position).ok_or_else(|| {
                    Error::Corruption(format!("index lost value at position {}", position))
                })?;
                Ok(QueryHit {
                    distance,
                    value: value.to_string(),
                })
            })
            .collect()
    }
}

/// Factory for creating index backends
///
/// This abstraction allows adding approximate backends without changing
/// company or registry code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexBackendFactory {
    /// Exact brute-force scan
    #[default]
    BruteForce,
}

impl IndexBackendFactory {
    /// Build a backend over the first `entries` entries of `set`, reporting
    /// `generation`
    pub fn build(
        &self,
        set: &VectorSet,
        entries: usize,
        generation: u64,
        metric: DistanceMetric,
    ) -> Arc<dyn IndexBackend> {
        match self {
            IndexBackendFactory::BruteForce => {
                Arc::new(BruteForceIndex::build(set, entries, generation, metric))
            }
        }
    }
}
