//! Output enum for command execution results.
//!
//! Every command produces exactly one output type. This mapping is
//! deterministic: the same command always produces the same output variant
//! (though the values may differ based on database state).

use serde::{Deserialize, Serialize};
use tenantdb_core::{AccessControlView, CompanyId, CompanyInfo, QueryHit};

/// Successful command execution results.
///
/// Each [`Command`](crate::Command) variant maps to exactly one `Output`
/// variant, documented on the command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    // ==================== Primitive Results ====================
    /// No return value (append, build)
    Unit,

    /// Boolean result (ACL mutators: whether anything changed)
    Bool(bool),

    /// Unsigned integer result (counters)
    Uint(u64),

    /// Newly registered company
    CompanyId(CompanyId),

    // ==================== Queries ====================
    /// Nearest neighbors with distances, ascending
    Hits(Vec<QueryHit>),

    /// Nearest neighbor values, ascending by distance
    Values(Vec<String>),

    /// Company diagnostics
    CompanyInfo(CompanyInfo),

    // ==================== Access ====================
    /// Published access-control snapshots
    States(Vec<AccessControlView>),

    // ==================== Database ====================
    /// Ping response
    Pong {
        /// Crate version
        version: String,
    },
}
