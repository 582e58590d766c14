//! Error types for command execution.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: Each variant has typed fields for error details
//! - **Serializable**: Can be converted to/from JSON
//! - **Lossless**: Display strings match the engine's, so callers matching
//!   on `"Not owner"` or `"Not manager"` keep working across the boundary

use serde::{Deserialize, Serialize};

/// Command execution errors.
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Authorization | `NotAuthorized`, `NotOwner`, `NotManager` | Caller lacks privilege |
/// | Not Found | `UnknownCompany`, `IndexNotBuilt` | Entity doesn't exist |
/// | Validation | `LengthMismatch`, `DimensionMismatch`, `InvalidInput` | Bad input |
/// | System | `Io`, `Serialization`, `Corruption` | Infrastructure errors |
///
/// # Example
///
/// ```ignore
/// match executor.execute(&caller, cmd) {
///     Ok(output) => { /* handle success */ }
///     Err(e) if e.is_hard_failure() => panic!("{}", e),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
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
    /// Company was never registered
    #[error("unknown company: {company}")]
    UnknownCompany {
        /// Requested company id
        company: u64,
    },

    /// Company has no index yet
    #[error("index not built for company {company}")]
    IndexNotBuilt {
        /// Company whose index was queried
        company: u64,
    },

    // ==================== Validation ====================
    /// Embedding and value sequences differ in length
    #[error("keys length is not equal to values: {embeddings} embeddings, {values} values")]
    LengthMismatch {
        /// Number of embeddings supplied
        embeddings: u64,
        /// Number of values supplied
        values: u64,
    },

    /// Embedding dimension mismatch
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Established dimension
        expected: u64,
        /// Offending dimension
        got: u64,
    },

    /// Invalid input
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong
        reason: String,
    },

    // ==================== System ====================
    /// I/O error
    #[error("I/O error: {reason}")]
    Io {
        /// Underlying error text
        reason: String,
    },

    /// Serialization error
    #[error("serialization error: {reason}")]
    Serialization {
        /// Underlying error text
        reason: String,
    },

    /// Persisted data failed an integrity check
    #[error("data corruption: {reason}")]
    Corruption {
        /// Underlying error text
        reason: String,
    },
}

impl Error {
    /// Whether the call aborts rather than returning a soft result.
    ///
    /// True for the owner/manager checks of the access-control mutators.
    pub fn is_hard_failure(&self) -> bool {
        matches!(self, Error::NotOwner | Error::NotManager)
    }

    /// Whether this error is a privilege failure of any kind
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Error::NotAuthorized | Error::NotOwner | Error::NotManager
        )
    }
}
