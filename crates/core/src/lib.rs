//! Core types for TenantDB
//!
//! This crate defines the foundational types used throughout the system:
//! - Principal: Opaque authenticated caller identity
//! - CompanyId: Dense tenant identifier assigned at registration
//! - Timestamp: Microsecond wall-clock time
//! - DistanceMetric: Ranking metric used by similarity indexes
//! - AccessControlView / CompanyInfo: Read-only diagnostic views
//! - Error: Error type hierarchy
//!
//! Nothing here locks or performs I/O. Engine state lives in `tenantdb-engine`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod metric;
pub mod timestamp;
pub mod types;
pub mod views;

pub use error::{Error, Result};
pub use metric::DistanceMetric;
pub use timestamp::Timestamp;
pub use types::{CompanyId, Embedding, Principal, PrincipalParseError};
pub use views::{AccessControlView, CompanyInfo, QueryHit};
