//! Engine for TenantDB
//!
//! Per-company vector storage and similarity indexes, gated by a layered
//! owner → managers → accessers access-control policy.
//!
//! # Architecture
//!
//! - [`Database`]: facade; authorizes every call against [`AccessControl`]
//! - [`CompanyRegistry`]: arena of [`Company`] records keyed by dense id
//! - [`VectorSet`]: append-only embedding/value storage
//! - [`IndexBackend`]: built, immutable nearest-neighbor structure,
//!   published copy-on-build
//! - [`StateSnapshot`]: live access-control view for audit
//! - [`EngineSnapshot`]: durable on-disk state for restart and upgrade

#![warn(missing_docs)]

pub mod access;
pub mod company;
pub mod config;
pub mod database;
pub mod registry;
pub mod snapshot;
pub mod state;
pub mod vector;

pub use access::AccessControl;
pub use company::Company;
pub use config::{EngineConfig, QueryAccess, CONFIG_FILE_NAME};
pub use database::Database;
pub use registry::CompanyRegistry;
pub use snapshot::{
    CompanyRecord, EngineSnapshot, SnapshotInfo, SNAPSHOT_FORMAT_VERSION, SNAPSHOT_MAGIC,
};
pub use state::StateSnapshot;
pub use vector::{BruteForceIndex, IndexBackend, IndexBackendFactory, VectorSet};
