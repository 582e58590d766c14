//! Error types for TenantDB
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! The display strings of the authorization variants are stable: external
//! callers pattern-match on them.

use crate::types::CompanyId;
use std::io;
use thiserror::Error;

/// Result type alias for TenantDB operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for TenantDB
#[derive(Debug, Error)]
pub enum Error {
    // ==================== Authorization ====================
    /// Caller is neither the company owner nor a manager
    #[error("caller not owner of company or not manager")]
    NotAuthorized,

    /// Operation requires the access-control owner
    #[error("Not owner")]
    NotOwner,

    /// Operation requires a manager
    #[error("Not manager")]
    NotManager,

    // ==================== Not Found ====================
    /// No company with this id was ever registered
    #[error("unknown company: {id}")]
    UnknownCompany {
        /// Requested company id
        id: CompanyId,
    },

    /// The company has no index yet
    #[error("index not built for company {id}")]
    IndexNotBuilt {
        /// Company whose index was queried
        id: CompanyId,
    },

    // ==================== Validation ====================
    /// Embedding and value sequences differ in length
    #[error("keys length is not equal to values: {embeddings} embeddings, {values} values")]
    LengthMismatch {
        /// Number of embeddings supplied
        embeddings: usize,
        /// Number of values supplied
        values: usize,
    },

    /// Embedding dimension differs from the established dimension
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Established dimension
        expected: usize,
        /// Dimension of the offending embedding
        got: usize,
    },

    /// Invalid input that no other variant describes
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong
        reason: String,
    },

    // ==================== System ====================
    /// I/O error (snapshot and config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Persisted data failed an integrity check
    #[error("data corruption: {0}")]
    Corruption(String),
}

impl Error {
    /// Create an `InvalidInput` error
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Error::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Whether this error is a privilege failure of any kind
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Error::NotAuthorized | Error::NotOwner | Error::NotManager
        )
    }

    /// Whether this error rejects malformed arguments
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::LengthMismatch { .. }
                | Error::DimensionMismatch { .. }
                | Error::InvalidInput { .. }
        )
    }

    /// Whether the call aborts rather than returning a soft result.
    ///
    /// Access-control mutators signal privilege failures this way; every
    /// other error is an ordinary `Err` value.
    pub fn is_hard_failure(&self) -> bool {
        matches!(self, Error::NotOwner | Error::NotManager)
    }
}
