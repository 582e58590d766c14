//! Identity types for TenantDB
//!
//! This module defines the foundational identifiers:
//! - Principal: Opaque caller identity supplied by the authentication layer
//! - CompanyId: Tenant identifier, dense and never reused
//! - Embedding: Fixed-dimension float vector used as a search key

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Embedding vector. All embeddings within one company share a dimension.
pub type Embedding = Vec<f32>;

/// Authenticated caller identity
///
/// A Principal is an opaque byte string compared by equality only. The core
/// never generates principals; the authentication collaborator hands them in.
/// Displayed and serialized as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Principal(Vec<u8>);

impl Principal {
    /// Byte form of the anonymous caller (an unauthenticated request)
    pub const ANONYMOUS_BYTES: &'static [u8] = &[0x04];

    /// Create a principal from raw bytes
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// The identity carried by unauthenticated calls
    pub fn anonymous() -> Self {
        Self(Self::ANONYMOUS_BYTES.to_vec())
    }

    /// Whether this is the anonymous identity
    pub fn is_anonymous(&self) -> bool {
        self.0 == Self::ANONYMOUS_BYTES
    }

    /// Raw bytes of this principal
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hex rendering
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Parse a principal from its hex rendering
    ///
    /// # Errors
    /// Returns an error on odd length, non-hex digits, or empty input.
    pub fn from_hex(s: &str) -> Result<Self, PrincipalParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PrincipalParseError::Empty);
        }
        if s.len() % 2 != 0 {
            return Err(PrincipalParseError::OddLength(s.len()));
        }
        if let Some(offset) = s.bytes().position(|b| !b.is_ascii_hexdigit()) {
            return Err(PrincipalParseError::InvalidDigit(offset));
        }
        let bytes = s
            .as_bytes()
            .chunks(2)
            .map(|pair| (hex_nibble(pair[0]) << 4) | hex_nibble(pair[1]))
            .collect();
        Ok(Self(bytes))
    }
}

fn hex_nibble(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}

/// Principal hex parse failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrincipalParseError {
    /// Empty string
    #[error("principal is empty")]
    Empty,
    /// Hex string with an odd number of digits
    #[error("principal hex has odd length {0}")]
    OddLength(usize),
    /// Non-hex digit at the given offset
    #[error("invalid hex digit at offset {0}")]
    InvalidDigit(usize),
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Principal {
    type Err = PrincipalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Principal::from_hex(s)
    }
}

impl Serialize for Principal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Principal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Principal::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Tenant identifier
///
/// Assigned from a registry-wide monotonic counter starting at 0.
/// Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(u64);

impl CompanyId {
    /// Wrap a raw id
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw id value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// The id allocated after this one
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u64> for CompanyId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
