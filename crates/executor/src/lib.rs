//! # TenantDB Executor
//!
//! The public API for TenantDB - a multi-tenant vector-similarity store.
//!
//! This is the only crate users need to import. It provides:
//! - [`Session`] - typed methods bound to one authenticated caller
//! - [`Command`]/[`Output`] - serializable command interface (for hosts)
//! - [`Database`] - the engine, re-exported for opening and persistence
//!
//! ## Quick Start
//!
//! ```text
//! use tenantdb_executor::{Database, Principal, Session};
//!
//! let db = Arc::new(Database::new(owner.clone()));
//! Session::new(db.clone(), owner).add_manager(manager.clone())?;
//!
//! let session = Session::new(db, manager);
//! let id = session.register("acme")?;
//! session.append_keys_values(id, vec![vec![1.0, 0.0]], vec!["a".into()])?;
//! session.build_index(id)?;
//! assert_eq!(session.get_similar(id, vec![1.0, 0.0], 1)?, vec!["a"]);
//! ```
//!
//! ## Access Model
//!
//! | Role | May |
//! |------|-----|
//! | **Owner** | add managers, toggle ACL, register |
//! | **Manager** | add/remove accessers, register, operate on any company |
//! | **Accesser** | register |
//! | **Company owner** | operate on its own companies |

#![warn(missing_docs)]

mod command;
mod convert;
mod error;
mod executor;
mod output;
mod session;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything users need is re-exported here
// =============================================================================

pub use command::Command;
pub use error::Error;
pub use executor::Executor;
pub use output::Output;
pub use session::Session;

// Re-export core types so users don't need tenantdb-core directly
pub use tenantdb_core::{
    AccessControlView, CompanyId, CompanyInfo, DistanceMetric, Embedding, Principal, QueryHit,
    Timestamp,
};

// Re-export engine types so users don't need tenantdb-engine directly
pub use tenantdb_engine::{Database, EngineConfig, QueryAccess, SnapshotInfo};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
