//! Brute-Force Similarity Index
//!
//! Exact O(n·D) scan over a private copy of the source VectorSet.
//! Sufficient for the tens-to-low-thousands of entries a company holds.
//!
//! Search contract:
//! 1. Score every entry in insertion order (single-threaded)
//! 2. Partially select the k best by (distance asc, position asc)
//! 3. Sort the selected prefix by the same key

use std::cmp::Ordering;

use tenantdb_core::{DistanceMetric, Error, Result};

use crate::vector::backend::IndexBackend;
use crate::vector::distance::compute_distance;
use crate::vector::set::VectorSet;

/// Brute-force similarity index
///
/// Holds its own copy of the embeddings and values, so appends to the
/// source set after `build` are invisible to it.
pub struct BruteForceIndex {
    /// Contiguous copy of the indexed embeddings
    data: Vec<f32>,
    /// Values, parallel to `data`
    values: Vec<String>,
    dimension: Option<usize>,
    metric: DistanceMetric,
    generation: u64,
}

impl BruteForceIndex {
    /// Build over the first `entries` entries of `set` (clamped to its length)
    ///
    /// `generation` is the set generation the prefix corresponds to. A full
    /// build passes `set.generation()`; a restore passes the generation the
    /// index had when the snapshot was taken.
    pub fn build(
        set: &VectorSet,
        entries: usize,
        generation: u64,
        metric: DistanceMetric,
    ) -> Self {
        let (data, values) = set.raw_prefix(entries);
        BruteForceIndex {
            data: data.to_vec(),
            values: values.to_vec(),
            dimension: set.dimension(),
            metric,
            generation,
        }
    }

    fn rank(a: &(f64, usize), b: &(f64, usize)) -> Ordering {
        a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1))
    }
}

impl IndexBackend for BruteForceIndex {
    fn search(&self, query: &[f32], k: usize) -> Result<Vec<(f64, usize)>> {
        if query.iter().any(|x| !x.is_finite()) {
            return Err(Error::invalid_input("embedding components must be finite"));
        }
        let Some(dimension) = self.dimension else {
            // Nothing was ever appended: no dimension to check against
            return Ok(Vec::new());
        };
        if query.len() != dimension {
            return Err(Error::DimensionMismatch {
                expected: dimension,
                got: query.len(),
            });
        }

        let k = k.min(self.values.len());
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(f64, usize)> = self
            .data
            .chunks_exact(dimension)
            .enumerate()
            .map(|(position, embedding)| {
                (compute_distance(query, embedding, self.metric), position)
            })
            .collect();

        // Positions are unique, so (distance, position) is a total order and
        // selection followed by sorting the prefix yields the exact top-k.
        if k < scored.len() {
            scored.select_nth_unstable_by(k - 1, Self::rank);
            scored.truncate(k);
        }
        scored.sort_by(Self::rank);
        Ok(scored)
    }

    fn value(&self, position: usize) -> Option<&str> {
        self.values.get(position).map(String::as_str)
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    fn metric(&self) -> DistanceMetric {
        self.metric
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}
