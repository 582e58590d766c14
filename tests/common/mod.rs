//! Shared test utilities for the integration test suite.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a test's main.rs.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Once};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

pub use tenantdb::{
    CompanyId, Database, DistanceMetric, EngineConfig, Error, Principal, QueryAccess, Session,
};

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Route engine logs to the test writer. Set `RUST_LOG` to see them.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

static COUNTER: AtomicU64 = AtomicU64::new(0);

// ============================================================================
// Principals
// ============================================================================

/// Principal from a readable name
pub fn p(name: &str) -> Principal {
    Principal::from_bytes(name.as_bytes().to_vec())
}

/// The access-control owner every `TestDb` starts with
pub fn owner() -> Principal {
    p("owner")
}

// ============================================================================
// TestDb - database wrapper with a scratch directory
// ============================================================================

/// Test database wrapper with a temp dir for snapshots.
pub struct TestDb {
    pub db: Arc<Database>,
    pub dir: TempDir,
}

impl TestDb {
    /// Fresh database owned by `owner()` with default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Fresh database owned by `owner()`.
    pub fn with_config(config: EngineConfig) -> Self {
        init_tracing();
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db = Database::with_config(owner(), config).expect("Failed to create test database");
        TestDb {
            db: Arc::new(db),
            dir,
        }
    }

    /// Fresh database with manager `"m"` and accesser `"u"` installed.
    pub fn with_roles() -> Self {
        let test_db = Self::new();
        test_db.db.add_manager(&owner(), p("m")).unwrap();
        test_db.db.add_accesser(&p("m"), p("u")).unwrap();
        test_db
    }

    /// Session bound to `caller`.
    pub fn session(&self, caller: Principal) -> Session {
        Session::new(Arc::clone(&self.db), caller)
    }

    /// Snapshot file inside the scratch dir.
    pub fn snapshot_path(&self) -> PathBuf {
        self.dir.path().join("state.snap")
    }

    /// Config pointing at this database's snapshot file.
    pub fn persistent_config(&self) -> EngineConfig {
        EngineConfig {
            owner: Some(owner()),
            snapshot_path: Some(self.snapshot_path()),
            ..EngineConfig::default()
        }
    }
}

// ============================================================================
// Vectors
// ============================================================================

/// Deterministic vector in [-1, 1) for a seed.
pub fn seeded_vector(dimension: usize, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..dimension).map(|_| rng.gen_range(-1.0f32..1.0)).collect()
}

/// Fresh vector, distinct from every previous call in this process.
pub fn random_vector(dimension: usize) -> Vec<f32> {
    let seed = COUNTER.fetch_add(1, Ordering::SeqCst);
    seeded_vector(dimension, seed)
}

/// `count` vectors with matching `"v{i}"` values.
pub fn batch(dimension: usize, count: usize) -> (Vec<Vec<f32>>, Vec<String>) {
    let embeddings = (0..count).map(|_| random_vector(dimension)).collect();
    let values = (0..count).map(|i| format!("v{}", i)).collect();
    (embeddings, values)
}

/// Exact Euclidean distance in f64.
pub fn euclidean(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = *x as f64 - *y as f64;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}
