//! Test modules for the executor crate.


use std::sync::Arc;

use tenantdb_core::Principal;
use tenantdb_engine::Database;

use crate::Executor;

/// Principal from a readable name
pub(crate) fn p(name: &str) -> Principal {
    Principal::from_bytes(name.as_bytes().to_vec())
}

/// Executor over a fresh database owned by `"owner"`, with manager `"m"`
/// and accesser `"u"` already installed.
pub(crate) fn setup() -> Executor {
    let db = Arc::new(Database::new(p("owner")));
    db.add_manager(&p("owner"), p("m")).unwrap();
    db.add_accesser(&p("m"), p("u")).unwrap();
    Executor::new(db)
}
