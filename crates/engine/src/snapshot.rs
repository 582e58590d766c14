//! Durable engine snapshot
//!
//! Captures everything needed to survive a restart or upgrade of the host
//! process: the access-control hierarchy, the company id counter, and every
//! company's vectors. Indexes are derived data; only the metric, the number
//! of entries each live index covered and the generation it was built at are
//! stored, and restore rebuilds over exactly that prefix.
//!
//! ## File layout
//!
//! ```text
//! +------------------+
//! | Magic (8)        |  "TDBSNAP\0"
//! | Format (4, LE)   |
//! | Body len (8, LE) |
//! | Body             |  MessagePack EngineSnapshot
//! | CRC32 (4, LE)    |  over everything above
//! +------------------+
//! ```
//!
//! Writes are atomic: temp file, fsync, rename.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tenantdb_core::{
    AccessControlView, CompanyId, DistanceMetric, Error, Principal, Result, Timestamp,
};
use tracing::{debug, info, warn};

/// Snapshot magic bytes
pub const SNAPSHOT_MAGIC: &[u8; 8] = b"TDBSNAP\0";

/// Current snapshot format
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

const HEADER_LEN: usize = 8 + 4 + 8;
const CRC_LEN: usize = 4;

/// Persisted state of one company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Company id
    pub id: CompanyId,
    /// Registering principal
    pub owner: Principal,
    /// Description given at registration
    pub description: String,
    /// Registration time
    pub created_at: Timestamp,
    /// Established dimension
    pub dimension: Option<usize>,
    /// Contiguous embeddings
    pub data: Vec<f32>,
    /// Values, parallel to embeddings
    pub values: Vec<String>,
    /// VectorSet append counter
    pub generation: u64,
    /// Entries covered by the live index; `None` if never built
    pub indexed_entries: Option<usize>,
    /// Generation the live index was built at; `None` if never built
    #[serde(default)]
    pub index_generation: Option<u64>,
}

/// Persisted engine state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// When the snapshot was taken
    pub taken_at: Timestamp,
    /// Access-control hierarchy
    pub acl: AccessControlView,
    /// Metric every index was built with
    pub metric: DistanceMetric,
    /// Next company id to allocate
    pub next_company_id: CompanyId,
    /// Companies ascending by id
    pub companies: Vec<CompanyRecord>,
}

/// Information about a written snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotInfo {
    /// Final path
    pub path: PathBuf,
    /// When the snapshot was taken
    pub taken_at: Timestamp,
    /// File size in bytes
    pub size_bytes: u64,
    /// Companies captured
    pub companies: usize,
}

impl EngineSnapshot {
    /// Encode to the on-disk byte layout
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let body = rmp_serde::to_vec_named(self)
            .map_err(|e| Error::Serialization(format!("snapshot encode failed: {}", e)))?;

        let mut bytes = Vec::with_capacity(HEADER_LEN + body.len() + CRC_LEN);
        bytes.extend_from_slice(SNAPSHOT_MAGIC);
        bytes.extend_from_slice(&SNAPSHOT_FORMAT_VERSION.to_le_bytes());
        bytes.extend_from_slice(&(body.len() as u64).to_le_bytes());
        bytes.extend_from_slice(&body);
        let checksum = crc32fast::hash(&bytes);
        bytes.extend_from_slice(&checksum.to_le_bytes());
        Ok(bytes)
    }

    /// Decode and verify the on-disk byte layout
    ///
    /// # Errors
    /// `Corruption` on bad magic, unknown format, length or checksum mismatch.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN + CRC_LEN {
            return Err(Error::Corruption(format!(
                "snapshot too short: {} bytes",
                bytes.len()
            )));
        }
        if &bytes[..8] != SNAPSHOT_MAGIC {
            return Err(Error::Corruption("bad snapshot magic".into()));
        }

        let (payload, crc_bytes) = bytes.split_at(bytes.len() - CRC_LEN);
        let stored = u32::from_le_bytes([crc_bytes[0], crc_bytes[1], crc_bytes[2], crc_bytes[3]]);
        let computed = crc32fast::hash(payload);
        if stored != computed {
            return Err(Error::Corruption(format!(
                "snapshot checksum mismatch: stored {:08x}, computed {:08x}",
                stored, computed
            )));
        }

        let format = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
        if format != SNAPSHOT_FORMAT_VERSION {
            return Err(Error::Corruption(format!(
                "unsupported snapshot format {}",
                format
            )));
        }

        let mut len_bytes = [0u8; 8];
        len_bytes.copy_from_slice(&bytes[12..20]);
        let body_len = u64::from_le_bytes(len_bytes) as usize;
        let body = &payload[HEADER_LEN..];
        if body.len() != body_len {
            return Err(Error::Corruption(format!(
                "snapshot body length {} does not match header {}",
                body.len(),
                body_len
            )));
        }

        rmp_serde::from_slice(body)
            .map_err(|e| Error::Corruption(format!("snapshot decode failed: {}", e)))
    }

    /// Write atomically to `path`
    ///
    /// Uses temp file + rename. If any step fails, the temp file is removed
    /// and any previous snapshot at `path` is left intact.
    pub fn write_atomic(&self, path: &Path) -> Result<SnapshotInfo> {
        let bytes = self.to_bytes()?;
        let temp_path = path.with_extension("snap.tmp");

        debug!(
            target: "tenantdb::snapshot",
            final_path = %path.display(),
            temp_path = %temp_path.display(),
            "Starting atomic snapshot write"
        );

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let written = File::create(&temp_path)
            .and_then(|mut file| {
                file.write_all(&bytes)?;
                file.sync_all()
            })
            .and_then(|()| std::fs::rename(&temp_path, path));

        if let Err(e) = written {
            warn!(
                target: "tenantdb::snapshot",
                temp_path = %temp_path.display(),
                error = %e,
                "Snapshot write failed, cleaning up temp file"
            );
            let _ = std::fs::remove_file(&temp_path);
            return Err(Error::Io(e));
        }

        info!(
            target: "tenantdb::snapshot",
            path = %path.display(),
            companies = self.companies.len(),
            size_bytes = bytes.len(),
            "Snapshot written"
        );

        Ok(SnapshotInfo {
            path: path.to_path_buf(),
            taken_at: self.taken_at,
            size_bytes: bytes.len() as u64,
            companies: self.companies.len(),
        })
    }

    /// Read and verify a snapshot file
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let snapshot = Self::from_bytes(&bytes)?;
        info!(
            target: "tenantdb::snapshot",
            path = %path.display(),
            companies = snapshot.companies.len(),
            "Snapshot loaded"
        );
        Ok(snapshot)
    }
}
