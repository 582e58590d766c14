//! Error conversion from engine error types.

use crate::Error;
use tenantdb_core::Error as CoreError;

impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotAuthorized => Error::NotAuthorized,
            CoreError::NotOwner => Error::NotOwner,
            CoreError::NotManager => Error::NotManager,

            CoreError::UnknownCompany { id } => Error::UnknownCompany {
                company: id.as_u64(),
            },
            CoreError::IndexNotBuilt { id } => Error::IndexNotBuilt {
                company: id.as_u64(),
            },

            CoreError::LengthMismatch { embeddings, values } => Error::LengthMismatch {
                embeddings: embeddings as u64,
                values: values as u64,
            },
            CoreError::DimensionMismatch { expected, got } => Error::DimensionMismatch {
                expected: expected as u64,
                got: got as u64,
            },
            CoreError::InvalidInput { reason } => Error::InvalidInput { reason },

            CoreError::Io(e) => Error::Io {
                reason: e.to_string(),
            },
            CoreError::Serialization(reason) => Error::Serialization { reason },
            CoreError::Corruption(reason) => Error::Corruption { reason },
        }
    }
}

/// Convert an engine `Result` into an executor `Result`.
pub(crate) fn convert_result<T>(r: tenantdb_core::Result<T>) -> crate::Result<T> {
    r.map_err(Error::from)
}
