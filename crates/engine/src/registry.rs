//! CompanyRegistry - arena of companies keyed by dense id
//!
//! The registry exclusively owns every Company; each Company exclusively
//! owns its VectorSet and index. Handles given out are `Arc<Company>`, so a
//! long build on one company never holds the registry lock.
//!
//! Ids come from a registry-wide counter and are never reused.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tenantdb_core::{CompanyId, Error, Principal, Result};
use tracing::info;

use crate::company::Company;

struct RegistryInner {
    companies: BTreeMap<CompanyId, Arc<Company>>,
    next_id: CompanyId,
}

/// Registry of all companies
pub struct CompanyRegistry {
    inner: RwLock<RegistryInner>,
    /// Dimension imposed on every new company, if configured
    dimension: Option<usize>,
}

impl CompanyRegistry {
    /// Empty registry; the first id handed out is 0
    pub fn new(dimension: Option<usize>) -> Self {
        CompanyRegistry {
            inner: RwLock::new(RegistryInner {
                companies: BTreeMap::new(),
                next_id: CompanyId::new(0),
            }),
            dimension,
        }
    }

    /// Rebuild from restored companies and counter
    ///
    /// # Errors
    /// Returns `Corruption` if any company id is at or past `next_id`.
    pub fn from_parts(
        companies: Vec<Company>,
        next_id: CompanyId,
        dimension: Option<usize>,
    ) -> Result<Self> {
        let mut map = BTreeMap::new();
        for company in companies {
            if company.id() >= next_id {
                return Err(Error::Corruption(format!(
                    "company {} is not below id counter {}",
                    company.id(),
                    next_id
                )));
            }
            map.insert(company.id(), Arc::new(company));
        }
        Ok(CompanyRegistry {
            inner: RwLock::new(RegistryInner {
                companies: map,
                next_id,
            }),
            dimension,
        })
    }

    /// Allocate the next id and create an empty company owned by `owner`
    ///
    /// Authorization is the caller's job.
    pub fn register(&self, owner: Principal, description: String) -> CompanyId {
        let mut inner = self.inner.write();
        let id = inner.next_id;
        inner.next_id = id.next();
        info!(
            target: "tenantdb::registry",
            company = %id,
            owner = %owner,
            "Company registered"
        );
        let company = Company::new(id, owner, description, self.dimension);
        inner.companies.insert(id, Arc::new(company));
        id
    }

    /// Handle to a company
    ///
    /// # Errors
    /// `UnknownCompany` if `id` was never registered.
    pub fn get(&self, id: CompanyId) -> Result<Arc<Company>> {
        self.inner
            .read()
            .companies
            .get(&id)
            .cloned()
            .ok_or(Error::UnknownCompany { id })
    }

    /// Number of registered companies
    pub fn len(&self) -> usize {
        self.inner.read().companies.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Id the next registration will receive
    pub fn next_id(&self) -> CompanyId {
        self.inner.read().next_id
    }

    /// Every company, ascending by id
    pub fn companies(&self) -> Vec<Arc<Company>> {
        self.inner.read().companies.values().cloned().collect()
    }

    /// Configured dimension, if any
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }
}
