//! Command enum defining all TenantDB operations.
//!
//! Commands are the "instruction set" of TenantDB. Every operation a caller
//! can perform is a variant of this enum. The caller itself is not part of
//! the command: the host authenticates it and passes it to
//! [`Executor::execute`](crate::Executor::execute) alongside.

use serde::{Deserialize, Serialize};
use tenantdb_core::{CompanyId, Embedding, Principal};

/// A command is a self-contained, serializable operation.
///
/// # Command Categories
///
/// | Category | Count | Description |
/// |----------|-------|-------------|
/// | Company | 6 | Registration, storage, index and query |
/// | Access | 5 | Owner/manager/accesser hierarchy |
/// | Database | 2 | Health and counters |
///
/// # Example
///
/// ```ignore
/// use tenantdb_executor::Command;
///
/// let cmd = Command::Query {
///     company: CompanyId::new(0),
///     embedding: vec![0.1, 0.2],
///     k: 5,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    // ==================== Company (6) ====================
    /// Register a company owned by the caller.
    /// Returns: `Output::CompanyId`
    Register {
        /// Free-form description, stored verbatim
        description: String,
    },

    /// Append embedding/value pairs.
    /// Returns: `Output::Unit`
    AppendKeysValues {
        /// Target company
        company: CompanyId,
        /// Embeddings, parallel to `values`
        embeddings: Vec<Embedding>,
        /// Values, parallel to `embeddings`
        values: Vec<String>,
    },

    /// Rebuild the company's index over its current entries.
    /// Returns: `Output::Unit`
    BuildIndex {
        /// Target company
        company: CompanyId,
    },

    /// k nearest neighbors with distances.
    /// Returns: `Output::Hits`
    Query {
        /// Target company
        company: CompanyId,
        /// Query embedding
        embedding: Embedding,
        /// Maximum number of results
        k: u32,
    },

    /// k nearest neighbor values.
    /// Returns: `Output::Values`
    GetSimilar {
        /// Target company
        company: CompanyId,
        /// Query embedding
        embedding: Embedding,
        /// Maximum number of results
        k: u32,
    },

    /// Diagnostic description of a company.
    /// Returns: `Output::CompanyInfo`
    CompanyInfo {
        /// Target company
        company: CompanyId,
    },

    // ==================== Access (5) ====================
    /// Add a manager. Owner only.
    /// Returns: `Output::Bool` (whether the set changed)
    AddManager {
        /// Principal to promote
        principal: Principal,
    },

    /// Add an accesser. Managers only.
    /// Returns: `Output::Bool`
    AddAccesser {
        /// Principal to admit
        principal: Principal,
    },

    /// Remove an accesser. Managers only.
    /// Returns: `Output::Bool`
    RemoveAccesser {
        /// Principal to remove
        principal: Principal,
    },

    /// Toggle registration gating. Owner only.
    /// Returns: `Output::Bool`
    SetAclEnabled {
        /// New setting
        enabled: bool,
    },

    /// Published access-control snapshots.
    /// Returns: `Output::States`
    States,

    // ==================== Database (2) ====================
    /// Health check.
    /// Returns: `Output::Pong`
    Ping,

    /// Number of registered companies.
    /// Returns: `Output::Uint`
    CompanyCount,
}

impl Command {
    /// Name of the command, for logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::Register { .. } => "Register",
            Command::AppendKeysValues { .. } => "AppendKeysValues",
            Command::BuildIndex { .. } => "BuildIndex",
            Command::Query { .. } => "Query",
            Command::GetSimilar { .. } => "GetSimilar",
            Command::CompanyInfo { .. } => "CompanyInfo",
            Command::AddManager { .. } => "AddManager",
            Command::AddAccesser { .. } => "AddAccesser",
            Command::RemoveAccesser { .. } => "RemoveAccesser",
            Command::SetAclEnabled { .. } => "SetAclEnabled",
            Command::States => "States",
            Command::Ping => "Ping",
            Command::CompanyCount => "CompanyCount",
        }
    }

    /// Whether the command mutates state
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Command::Register { .. }
                | Command::AppendKeysValues { .. }
                | Command::BuildIndex { .. }
                | Command::AddManager { .. }
                | Command::AddAccesser { .. }
                | Command::RemoveAccesser { .. }
                | Command::SetAclEnabled { .. }
        )
    }
}
