//! TenantDB - multi-tenant vector-similarity store
//!
//! Companies register, store embeddings paired with opaque string values,
//! build a nearest-neighbor index and query it. A layered access-control
//! hierarchy (owner → managers → accessers) decides who may do what.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use tenantdb::{Database, Principal, Session};
//!
//! let owner = Principal::from_bytes(b"owner".to_vec());
//! let db = Arc::new(Database::new(owner.clone()));
//!
//! let session = Session::new(db, owner);
//! let id = session.register("acme")?;
//! session.append_keys_values(id, vec![vec![1.0, 0.0]], vec!["a".into()])?;
//! session.build_index(id)?;
//! let values = session.get_similar(id, vec![1.0, 0.0], 1)?;
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Executor`] which provides a command-based
//! API. The [`Session`] struct binds one caller and offers typed methods.
//!
//! Engine internals (registry, indexes, access control) are not exposed
//! beyond what the executor re-exports.

// Re-export the public API from tenantdb-executor
pub use tenantdb_executor::*;
