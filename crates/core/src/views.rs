//! Read-only views handed out for audit, diagnostics and query results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::timestamp::Timestamp;
use crate::types::{CompanyId, Principal};

/// Snapshot of the access-control hierarchy
///
/// `version` increases by one on every effective mutation, so two views with
/// the same version describe the same state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControlView {
    /// Top-level administrator, fixed at initialization
    pub owner: Principal,
    /// Principals with cross-tenant administrative rights
    pub managers: BTreeSet<Principal>,
    /// Principals allowed to register a company while ACL is enabled
    pub accessers: BTreeSet<Principal>,
    /// Whether registration is gated
    pub acl_enabled: bool,
    /// Mutation counter
    pub version: u64,
}

/// Diagnostic description of one company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    /// Company id
    pub id: CompanyId,
    /// Registering principal
    pub owner: Principal,
    /// Description given at registration
    pub description: String,
    /// Registration time
    pub created_at: Timestamp,
    /// Entries appended so far
    pub entries: usize,
    /// Established embedding dimension, if configured or fixed by an append
    pub dimension: Option<usize>,
    /// Appends that added entries so far
    pub generation: u64,
    /// Entries covered by the live index; `None` if never built
    pub indexed_entries: Option<usize>,
    /// Append count the live index was built at; `None` if never built
    pub index_generation: Option<u64>,
}

impl CompanyInfo {
    /// Whether entries were appended after the last build
    pub fn is_index_stale(&self) -> bool {
        matches!(self.indexed_entries, Some(n) if n < self.entries)
    }
}

/// One nearest-neighbor result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryHit {
    /// Distance to the query (lower = closer)
    pub distance: f64,
    /// Value paired with the matched embedding
    pub value: String,
}
