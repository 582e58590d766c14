//! Published access-control snapshot for audit and diagnostics.
//!
//! Exactly one live view is kept. Writers replace it while still holding the
//! access-control write lock; readers clone an `Arc` and never wait on a
//! mutation in progress.

use std::sync::Arc;

use parking_lot::RwLock;
use tenantdb_core::AccessControlView;

/// Holder of the live AccessControlView
pub struct StateSnapshot {
    live: RwLock<Arc<AccessControlView>>,
}

impl StateSnapshot {
    /// Start with `view` as the live snapshot
    pub fn new(view: AccessControlView) -> Self {
        StateSnapshot {
            live: RwLock::new(Arc::new(view)),
        }
    }

    /// Replace the live snapshot
    pub fn publish(&self, view: AccessControlView) {
        *self.live.write() = Arc::new(view);
    }

    /// The live snapshot
    pub fn current(&self) -> Arc<AccessControlView> {
        self.live.read().clone()
    }

    /// All retained snapshots. Always exactly one.
    pub fn states(&self) -> Vec<AccessControlView> {
        vec![(*self.current()).clone()]
    }
}
