//! VectorSet - append-only embedding/value storage
//!
//! Embeddings are stored in one contiguous `Vec<f32>` for cache-friendly
//! distance computation. Entry `i` occupies `data[i * dim..(i + 1) * dim]`
//! and pairs with `values[i]`. Position is insertion order and is the
//! tie-break key for ranking.
//!
//! # Invariants
//!
//! - `data.len() == values.len() * dimension`
//! - Append is the only mutator; entries are never removed or reordered
//! - A failed append leaves the set untouched
//! - `generation` increases on every append that adds entries

use tenantdb_core::{Embedding, Error, Result};

/// Per-company append-only collection of (embedding, value) pairs
#[derive(Debug, Clone, Default)]
pub struct VectorSet {
    /// Established dimension. Fixed by configuration or by the first append.
    dimension: Option<usize>,

    /// Contiguous embedding storage
    /// Layout: [e0_dim0, e0_dim1, ..., e0_dimN, e1_dim0, ...]
    data: Vec<f32>,

    /// Values, parallel to embeddings
    values: Vec<String>,

    /// Bumped on every non-empty append
    generation: u64,
}

impl VectorSet {
    /// Create an empty set whose dimension is fixed by the first append
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set that only accepts `dimension`-long embeddings
    pub fn with_dimension(dimension: usize) -> Self {
        VectorSet {
            dimension: Some(dimension),
            ..Self::default()
        }
    }

    /// Rebuild a set from persisted parts (for snapshot restore)
    ///
    /// # Errors
    /// Returns `Corruption` if the parts are inconsistent.
    pub fn from_parts(
        dimension: Option<usize>,
        data: Vec<f32>,
        values: Vec<String>,
        generation: u64,
    ) -> Result<Self> {
        let expected = values.len() * dimension.unwrap_or(0);
        if data.len() != expected || (dimension.is_none() && !values.is_empty()) {
            return Err(Error::Corruption(format!(
                "vector set holds {} floats for {} values of dimension {:?}",
                data.len(),
                values.len(),
                dimension
            )));
        }
        Ok(VectorSet {
            dimension,
            data,
            values,
            generation,
        })
    }

    /// Append embedding/value pairs in order
    ///
    /// The first append fixes the dimension if none was configured.
    ///
    /// # Errors
    /// - `LengthMismatch` if the sequences differ in length
    /// - `DimensionMismatch` if any embedding has the wrong length
    /// - `InvalidInput` for zero-length embeddings or non-finite components
    pub fn append(&mut self, embeddings: Vec<Embedding>, values: Vec<String>) -> Result<()> {
        if embeddings.len() != values.len() {
            return Err(Error::LengthMismatch {
                embeddings: embeddings.len(),
                values: values.len(),
            });
        }
        let Some(first) = embeddings.first() else {
            return Ok(());
        };

        // Validate everything before touching storage
        let dimension = self.dimension.unwrap_or(first.len());
        if dimension == 0 {
            return Err(Error::invalid_input("embedding must not be empty"));
        }
        for embedding in &embeddings {
            if embedding.len() != dimension {
                return Err(Error::DimensionMismatch {
                    expected: dimension,
                    got: embedding.len(),
                });
            }
            if embedding.iter().any(|x| !x.is_finite()) {
                return Err(Error::invalid_input(
                    "embedding components must be finite",
                ));
            }
        }

        self.dimension = Some(dimension);
        self.data.reserve(embeddings.len() * dimension);
        for embedding in &embeddings {
            self.data.extend_from_slice(embedding);
        }
        self.values.extend(values);
        self.generation += 1;
        Ok(())
    }

    /// Established dimension, if any
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Append counter
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Embedding at `position`
    pub fn embedding(&self, position: usize) -> Option<&[f32]> {
        let dim = self.dimension?;
        self.data.get(position * dim..(position + 1) * dim)
    }

    /// Value at `position`
    pub fn value(&self, position: usize) -> Option<&str> {
        self.values.get(position).map(String::as_str)
    }

    /// Raw embedding storage covering the first `entries` entries
    ///
    /// `entries` is clamped to `len()`.
    pub fn raw_prefix(&self, entries: usize) -> (&[f32], &[String]) {
        let n = entries.min(self.len());
        let dim = self.dimension.unwrap_or(0);
        (&self.data[..n * dim], &self.values[..n])
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&[f32], &str)> {
        let dim = self.dimension.unwrap_or(1).max(1);
        self.data
            .chunks_exact(dim)
            .zip(self.values.iter().map(String::as_str))
    }
}
