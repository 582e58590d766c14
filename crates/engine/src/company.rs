//! Company - one tenant's vectors and its published index
//!
//! # Locking
//!
//! - `vectors` is held exclusively by append and shared by build, so a build
//!   always sees a whole number of appends.
//! - `index` is held only long enough to swap or clone an `Arc`. A build
//!   constructs the new backend off to the side and publishes it whole, so a
//!   concurrent query observes either the old index or the new one.

use std::sync::Arc;

use parking_lot::RwLock;
use tenantdb_core::{
    CompanyId, CompanyInfo, DistanceMetric, Embedding, Error, Principal, QueryHit, Result,
    Timestamp,
};
use tracing::{debug, info};

use crate::vector::{IndexBackend, IndexBackendFactory, VectorSet};

/// A registered tenant
pub struct Company {
    id: CompanyId,
    owner: Principal,
    description: String,
    created_at: Timestamp,
    vectors: RwLock<VectorSet>,
    index: RwLock<Option<Arc<dyn IndexBackend>>>,
}

impl Company {
    /// Create a company with an empty VectorSet and no index
    pub fn new(
        id: CompanyId,
        owner: Principal,
        description: String,
        dimension: Option<usize>,
    ) -> Self {
        let vectors = match dimension {
            Some(d) => VectorSet::with_dimension(d),
            None => VectorSet::new(),
        };
        Self::from_parts(id, owner, description, Timestamp::now(), vectors)
    }

    /// Assemble a company from restored parts, without an index
    pub fn from_parts(
        id: CompanyId,
        owner: Principal,
        description: String,
        created_at: Timestamp,
        vectors: VectorSet,
    ) -> Self {
        Company {
            id,
            owner,
            description,
            created_at,
            vectors: RwLock::new(vectors),
            index: RwLock::new(None),
        }
    }

    /// Company id
    pub fn id(&self) -> CompanyId {
        self.id
    }

    /// Registering principal
    pub fn owner(&self) -> &Principal {
        &self.owner
    }

    /// Description given at registration
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Registration time
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Append embedding/value pairs to the VectorSet
    pub fn append(&self, embeddings: Vec<Embedding>, values: Vec<String>) -> Result<()> {
        let count = embeddings.len();
        let mut vectors = self.vectors.write();
        vectors.append(embeddings, values)?;
        debug!(
            target: "tenantdb::registry",
            company = %self.id,
            appended = count,
            entries = vectors.len(),
            "Appended entries"
        );
        Ok(())
    }

    /// Build an index over every current entry and publish it
    pub fn build_index(&self, factory: IndexBackendFactory, metric: DistanceMetric) {
        let vectors = self.vectors.read();
        self.build_prefix(&vectors, vectors.len(), vectors.generation(), factory, metric);
    }

    /// Build an index over the first `entries` entries and publish it
    ///
    /// `generation` is the set generation at which those entries were the
    /// whole set; the published index reports it.
    pub fn build_index_over(
        &self,
        entries: usize,
        generation: u64,
        factory: IndexBackendFactory,
        metric: DistanceMetric,
    ) {
        let vectors = self.vectors.read();
        self.build_prefix(&vectors, entries, generation, factory, metric);
    }

    fn build_prefix(
        &self,
        vectors: &VectorSet,
        entries: usize,
        generation: u64,
        factory: IndexBackendFactory,
        metric: DistanceMetric,
    ) {
        let built = factory.build(vectors, entries, generation, metric);
        info!(
            target: "tenantdb::index",
            company = %self.id,
            entries = built.len(),
            generation = built.generation(),
            metric = metric.name(),
            "Index built"
        );
        *self.index.write() = Some(built);
    }

    /// The live index, if one was ever built
    pub fn index(&self) -> Option<Arc<dyn IndexBackend>> {
        self.index.read().clone()
    }

    /// k nearest entries of the live index
    ///
    /// # Errors
    /// - `IndexNotBuilt` if no build has happened
    /// - `DimensionMismatch` if the query has the wrong length
    pub fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<QueryHit>> {
        let index = self.index().ok_or(Error::IndexNotBuilt { id: self.id })?;
        let hits = index.query(embedding, k)?;
        debug!(
            target: "tenantdb::index",
            company = %self.id,
            k,
            hits = hits.len(),
            "Query served"
        );
        Ok(hits)
    }

    /// Read access to the VectorSet (for snapshots)
    pub fn with_vectors<R>(&self, f: impl FnOnce(&VectorSet) -> R) -> R {
        f(&self.vectors.read())
    }

    /// Diagnostic description
    pub fn info(&self) -> CompanyInfo {
        let (entries, dimension, generation) = {
            let vectors = self.vectors.read();
            (vectors.len(), vectors.dimension(), vectors.generation())
        };
        let index = self.index();
        CompanyInfo {
            id: self.id,
            owner: self.owner.clone(),
            description: self.description.clone(),
            created_at: self.created_at,
            entries,
            dimension,
            generation,
            indexed_entries: index.as_ref().map(|index| index.len()),
            index_generation: index.as_ref().map(|index| index.generation()),
        }
    }
}
