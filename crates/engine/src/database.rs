//! Database - authorization-enforcing facade over the engine
//!
//! Every operation takes the authenticated caller and evaluates the access
//! predicates fresh against current state.
//!
//! # Lock ordering
//!
//! `acl` → registry → company vectors → company index. Company operations
//! hold the `acl` read guard for their whole duration, so a revocation is
//! ordered strictly before or after each privileged operation.
//!
//! The `acl` lock is writer-fair: an ACL mutation queued behind a running
//! `build_index` blocks new readers, so operations on every other company
//! stall until that build finishes and the mutation has applied.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tenantdb_core::{
    AccessControlView, CompanyId, CompanyInfo, DistanceMetric, Embedding, Error, Principal,
    QueryHit, Result, Timestamp,
};
use tracing::{info, warn};

use crate::access::AccessControl;
use crate::company::Company;
use crate::config::{EngineConfig, QueryAccess};
use crate::registry::CompanyRegistry;
use crate::snapshot::{CompanyRecord, EngineSnapshot, SnapshotInfo};
use crate::state::StateSnapshot;
use crate::vector::{IndexBackendFactory, VectorSet};

/// The multi-tenant vector store
pub struct Database {
    config: EngineConfig,
    factory: IndexBackendFactory,
    acl: RwLock<AccessControl>,
    states: StateSnapshot,
    registry: CompanyRegistry,
}

impl Database {
    /// Fresh database with default configuration
    pub fn new(owner: Principal) -> Self {
        Self::assemble(
            AccessControl::new(owner),
            CompanyRegistry::new(None),
            EngineConfig::default(),
        )
    }

    /// Fresh database with explicit configuration
    ///
    /// `config.owner` is ignored; `owner` wins.
    pub fn with_config(owner: Principal, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let mut acl = AccessControl::new(owner);
        if !config.acl_enabled {
            let owner = acl.owner().clone();
            acl.set_acl_enabled(&owner, false)?;
        }
        let registry = CompanyRegistry::new(config.dimension);
        Ok(Self::assemble(acl, registry, config))
    }

    /// Open from configuration
    ///
    /// Restores from `snapshot_path` when that file exists, otherwise starts
    /// fresh.
    ///
    /// # Errors
    /// `InvalidInput` if `owner` is unset; snapshot errors on restore.
    pub fn open(config: EngineConfig) -> Result<Self> {
        let owner = config
            .owner
            .clone()
            .ok_or_else(|| Error::invalid_input("owner must be set in tenantdb.toml"))?;
        match config.snapshot_path.clone() {
            Some(path) if path.exists() => Self::restore(&path, config),
            _ => Self::with_config(owner, config),
        }
    }

    /// Open from a `tenantdb.toml` file
    pub fn open_config_file(path: &Path) -> Result<Self> {
        Self::open(EngineConfig::from_file(path)?)
    }

    fn assemble(acl: AccessControl, registry: CompanyRegistry, config: EngineConfig) -> Self {
        info!(
            target: "tenantdb::acl",
            owner = %acl.owner(),
            acl_enabled = acl.acl_enabled(),
            "Database initialized"
        );
        Database {
            states: StateSnapshot::new(acl.view()),
            acl: RwLock::new(acl),
            registry,
            factory: IndexBackendFactory::default(),
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Distance metric of every index
    pub fn metric(&self) -> DistanceMetric {
        self.config.metric
    }

    // ========================================================================
    // Company operations
    // ========================================================================

    /// Register a company owned by `caller`
    ///
    /// # Errors
    /// `NotAuthorized` unless `can_register(caller)`.
    pub fn register(&self, caller: &Principal, description: impl Into<String>) -> Result<CompanyId> {
        let acl = self.acl.read();
        if !acl.can_register(caller) {
            warn!(target: "tenantdb::acl", caller = %caller, "Registration rejected");
            return Err(Error::NotAuthorized);
        }
        Ok(self.registry.register(caller.clone(), description.into()))
    }

    /// Append embedding/value pairs to a company
    pub fn append_keys_values(
        &self,
        caller: &Principal,
        company_id: CompanyId,
        embeddings: Vec<Embedding>,
        values: Vec<String>,
    ) -> Result<()> {
        let acl = self.acl.read();
        let company = self.privileged_company(&acl, caller, company_id)?;
        company.append(embeddings, values)
    }

    /// Rebuild a company's index over its current entries
    ///
    /// Runs the whole scan under the `acl` read guard; see the module docs
    /// for how that interacts with queued ACL mutations.
    pub fn build_index(&self, caller: &Principal, company_id: CompanyId) -> Result<()> {
        let acl = self.acl.read();
        let company = self.privileged_company(&acl, caller, company_id)?;
        company.build_index(self.factory, self.config.metric);
        Ok(())
    }

    /// k nearest neighbors with distances, ascending
    pub fn query(
        &self,
        caller: &Principal,
        company_id: CompanyId,
        embedding: &[f32],
        k: usize,
    ) -> Result<Vec<QueryHit>> {
        let acl = self.acl.read();
        let company = self.readable_company(&acl, caller, company_id)?;
        company.query(embedding, k)
    }

    /// k nearest neighbor values, without distances
    pub fn get_similar(
        &self,
        caller: &Principal,
        company_id: CompanyId,
        embedding: &[f32],
        k: usize,
    ) -> Result<Vec<String>> {
        Ok(self
            .query(caller, company_id, embedding, k)?
            .into_iter()
            .map(|hit| hit.value)
            .collect())
    }

    /// Diagnostic description of a company. Same rule as `query`.
    pub fn company_info(&self, caller: &Principal, company_id: CompanyId) -> Result<CompanyInfo> {
        let acl = self.acl.read();
        let company = self.readable_company(&acl, caller, company_id)?;
        Ok(company.info())
    }

    /// Number of registered companies
    pub fn company_count(&self) -> usize {
        self.registry.len()
    }

    fn privileged_company(
        &self,
        acl: &AccessControl,
        caller: &Principal,
        company_id: CompanyId,
    ) -> Result<std::sync::Arc<Company>> {
        let company = self.registry.get(company_id)?;
        if !acl.is_privileged_for(caller, company.owner()) {
            warn!(
                target: "tenantdb::acl",
                caller = %caller,
                company = %company_id,
                "Company access rejected"
            );
            return Err(Error::NotAuthorized);
        }
        Ok(company)
    }

    fn readable_company(
        &self,
        acl: &AccessControl,
        caller: &Principal,
        company_id: CompanyId,
    ) -> Result<std::sync::Arc<Company>> {
        match self.config.query_access {
            QueryAccess::Privileged => self.privileged_company(acl, caller, company_id),
            QueryAccess::Public => self.registry.get(company_id),
        }
    }

    // ========================================================================
    // Access-control operations
    // ========================================================================

    /// Add a manager. Owner only.
    pub fn add_manager(&self, caller: &Principal, principal: Principal) -> Result<bool> {
        self.mutate_acl(caller, "add_manager", |acl| acl.add_manager(caller, principal))
    }

    /// Add an accesser. Managers only.
    pub fn add_accesser(&self, caller: &Principal, principal: Principal) -> Result<bool> {
        self.mutate_acl(caller, "add_accesser", |acl| acl.add_accesser(caller, principal))
    }

    /// Remove an accesser. Managers only.
    pub fn remove_accesser(&self, caller: &Principal, principal: &Principal) -> Result<bool> {
        self.mutate_acl(caller, "remove_accesser", |acl| {
            acl.remove_accesser(caller, principal)
        })
    }

    /// Toggle registration gating. Owner only.
    pub fn set_acl_enabled(&self, caller: &Principal, enabled: bool) -> Result<bool> {
        self.mutate_acl(caller, "set_acl_enabled", |acl| {
            acl.set_acl_enabled(caller, enabled)
        })
    }

    fn mutate_acl(
        &self,
        caller: &Principal,
        operation: &'static str,
        f: impl FnOnce(&mut AccessControl) -> Result<bool>,
    ) -> Result<bool> {
        let mut acl = self.acl.write();
        match f(&mut *acl) {
            Ok(changed) => {
                if changed {
                    self.states.publish(acl.view());
                    info!(
                        target: "tenantdb::acl",
                        caller = %caller,
                        operation,
                        version = acl.version(),
                        "Access control updated"
                    );
                }
                Ok(changed)
            }
            Err(e) => {
                warn!(
                    target: "tenantdb::acl",
                    caller = %caller,
                    operation,
                    error = %e,
                    "Access control mutation rejected"
                );
                Err(e)
            }
        }
    }

    /// Published access-control snapshots. Public.
    pub fn states(&self) -> Vec<AccessControlView> {
        self.states.states()
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Capture the full engine state
    ///
    /// Holds the `acl` write guard so no mutation interleaves with capture.
    pub fn snapshot(&self) -> EngineSnapshot {
        let acl = self.acl.write();
        let companies = self
            .registry
            .companies()
            .iter()
            .map(|company| {
                let index = company.index();
                let indexed_entries = index.as_ref().map(|index| index.len());
                let index_generation = index.as_ref().map(|index| index.generation());
                company.with_vectors(|vectors| {
                    let (data, values) = vectors.raw_prefix(vectors.len());
                    CompanyRecord {
                        id: company.id(),
                        owner: company.owner().clone(),
                        description: company.description().to_string(),
                        created_at: company.created_at(),
                        dimension: vectors.dimension(),
                        data: data.to_vec(),
                        values: values.to_vec(),
                        generation: vectors.generation(),
                        indexed_entries,
                        index_generation,
                    }
                })
            })
            .collect();

        EngineSnapshot {
            taken_at: Timestamp::now(),
            acl: acl.view(),
            metric: self.config.metric,
            next_company_id: self.registry.next_id(),
            companies,
        }
    }

    /// Write a durable snapshot to `path`
    pub fn save_snapshot(&self, path: &Path) -> Result<SnapshotInfo> {
        self.snapshot().write_atomic(path)
    }

    /// Write a durable snapshot to the configured `snapshot_path`
    ///
    /// Returns `None` when no path is configured.
    pub fn checkpoint(&self) -> Result<Option<SnapshotInfo>> {
        match &self.config.snapshot_path {
            Some(path) => self.save_snapshot(path).map(Some),
            None => Ok(None),
        }
    }

    /// Rebuild a database from a snapshot file
    ///
    /// Each company's index is rebuilt over exactly the entries it covered
    /// when the snapshot was taken, and reports the generation it had then.
    ///
    /// # Errors
    /// - `Corruption` if the file fails verification
    /// - `InvalidInput` if the configured owner, metric or dimension
    ///   contradicts the snapshot
    pub fn restore(path: &Path, config: EngineConfig) -> Result<Self> {
        let snapshot = EngineSnapshot::read(path)?;
        Self::from_snapshot(snapshot, config)
    }

    /// Rebuild a database from an in-memory snapshot
    pub fn from_snapshot(snapshot: EngineSnapshot, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        if let Some(owner) = &config.owner {
            if *owner != snapshot.acl.owner {
                return Err(Error::invalid_input(format!(
                    "snapshot owner {} does not match configured owner {}",
                    snapshot.acl.owner, owner
                )));
            }
        }
        if snapshot.metric != config.metric {
            return Err(Error::invalid_input(format!(
                "snapshot metric {} does not match configured metric {}",
                snapshot.metric.name(),
                config.metric.name()
            )));
        }

        let factory = IndexBackendFactory::default();
        let mut companies = Vec::with_capacity(snapshot.companies.len());
        for record in snapshot.companies {
            if let (Some(want), Some(have)) = (config.dimension, record.dimension) {
                if want != have {
                    return Err(Error::invalid_input(format!(
                        "company {} has dimension {}, configuration requires {}",
                        record.id, have, want
                    )));
                }
            }
            let index_generation = restored_index_generation(&record)?;
            let dimension = record.dimension.or(config.dimension);
            let vectors =
                VectorSet::from_parts(dimension, record.data, record.values, record.generation)?;
            let company = Company::from_parts(
                record.id,
                record.owner,
                record.description,
                record.created_at,
                vectors,
            );
            if let (Some(entries), Some(generation)) = (record.indexed_entries, index_generation) {
                company.build_index_over(entries, generation, factory, config.metric);
            }
            companies.push(company);
        }

        let registry =
            CompanyRegistry::from_parts(companies, snapshot.next_company_id, config.dimension)?;
        let acl = AccessControl::from_view(snapshot.acl);
        Ok(Self::assemble(acl, registry, config))
    }

    /// Configured snapshot location
    pub fn snapshot_path(&self) -> Option<&PathBuf> {
        self.config.snapshot_path.as_ref()
    }
}

/// Generation to report for a restored index
///
/// A record without one is accepted only when its index covered every entry,
/// in which case the set generation is exact.
fn restored_index_generation(record: &CompanyRecord) -> Result<Option<u64>> {
    let Some(entries) = record.indexed_entries else {
        return Ok(None);
    };
    if entries > record.values.len() {
        return Err(Error::Corruption(format!(
            "company {} index covers {} of {} entries",
            record.id,
            entries,
            record.values.len()
        )));
    }
    match record.index_generation {
        Some(generation) if generation > record.generation => Err(Error::Corruption(format!(
            "company {} index generation {} is ahead of set generation {}",
            record.id, generation, record.generation
        ))),
        Some(generation) => Ok(Some(generation)),
        None if entries == record.values.len() => Ok(Some(record.generation)),
        None => Err(Error::Corruption(format!(
            "company {} has a partial index without a generation",
            record.id
        ))),
    }
}
