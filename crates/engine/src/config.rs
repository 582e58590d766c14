//! Engine configuration via `tenantdb.toml`
//!
//! Every key has a default except `owner`, which `Database::open` requires.
//! To change settings, edit the file and restart.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tenantdb_core::{DistanceMetric, Error, Principal, Result};

/// Config file name
pub const CONFIG_FILE_NAME: &str = "tenantdb.toml";

/// Who may query a company's index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryAccess {
    /// Company owner or a manager, same as append and build
    #[default]
    Privileged,
    /// Any caller, including anonymous ones
    Public,
}

/// Engine configuration loaded from `tenantdb.toml`.
///
/// # Example
///
/// ```toml
/// owner = "2a7f01"
/// dimension = 768
/// metric = "euclidean"
/// acl_enabled = true
/// query_access = "privileged"
/// snapshot_path = "/var/lib/tenantdb/state.snap"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Access-control owner (hex principal)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Principal>,
    /// Embedding dimension imposed on every company. Unset: the first append
    /// of each company fixes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<usize>,
    /// Distance metric for every index
    #[serde(default)]
    pub metric: DistanceMetric,
    /// Initial registration gating
    #[serde(default = "default_acl_enabled")]
    pub acl_enabled: bool,
    /// Query authorization rule
    #[serde(default)]
    pub query_access: QueryAccess,
    /// Durable snapshot location used by `checkpoint` and `open`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,
}

fn default_acl_enabled() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            owner: None,
            dimension: None,
            metric: DistanceMetric::default(),
            acl_enabled: default_acl_enabled(),
            query_access: QueryAccess::default(),
            snapshot_path: None,
        }
    }
}

impl EngineConfig {
    /// Check values serde cannot
    ///
    /// # Errors
    /// `InvalidInput` if `dimension` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.dimension == Some(0) {
            return Err(Error::invalid_input(
                "Invalid dimension 0 in tenantdb.toml (must be > 0)",
            ));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# TenantDB engine configuration
#
# Access-control owner, as a hex principal. Required.
# owner = "2a7f01"

# Embedding dimension enforced for every company (default: unset, meaning
# the first append of each company fixes its dimension).
# dimension = 768

# Distance metric: "euclidean" (default) or "cosine"
metric = "euclidean"

# Gate registration on the owner/manager/accesser lists (default: true)
acl_enabled = true

# Who may query: "privileged" (company owner or manager, default) or "public"
query_access = "privileged"

# Durable snapshot file (default: unset, no persistence)
# snapshot_path = "tenantdb.snap"
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&content).map_err(|e| {
            Error::invalid_input(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Serialization(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
