//! Owner → managers → accessers capability hierarchy
//!
//! Plain sets plus pure predicates, evaluated fresh on every call. Nothing
//! caches a derived permission, so a revocation takes effect on the very
//! next call.
//!
//! | Role | Granted by | Rights |
//! |------|-----------|--------|
//! | owner | initialization | add managers, toggle ACL, register |
//! | manager | owner | add/remove accessers, register, act on any company |
//! | accesser | manager | register (while ACL is enabled) |
//! | company owner | registration | act on its own company |

use std::collections::BTreeSet;

use tenantdb_core::{AccessControlView, Error, Principal, Result};

/// Access-control state
///
/// Mutators return `Ok(changed)`; privilege failures are the typed
/// `NotOwner`/`NotManager` errors.
#[derive(Debug, Clone)]
pub struct AccessControl {
    owner: Principal,
    managers: BTreeSet<Principal>,
    accessers: BTreeSet<Principal>,
    acl_enabled: bool,
    /// Effective-mutation counter
    version: u64,
}

impl AccessControl {
    /// Fresh hierarchy: no managers, no accessers, ACL enabled
    pub fn new(owner: Principal) -> Self {
        AccessControl {
            owner,
            managers: BTreeSet::new(),
            accessers: BTreeSet::new(),
            acl_enabled: true,
            version: 0,
        }
    }

    /// Rebuild from a persisted view
    pub fn from_view(view: AccessControlView) -> Self {
        AccessControl {
            owner: view.owner,
            managers: view.managers,
            accessers: view.accessers,
            acl_enabled: view.acl_enabled,
            version: view.version,
        }
    }

    // ========================================================================
    // Predicates
    // ========================================================================

    /// Whether `caller` is the owner
    pub fn is_owner(&self, caller: &Principal) -> bool {
        *caller == self.owner
    }

    /// Whether `caller` is a manager
    pub fn is_manager(&self, caller: &Principal) -> bool {
        self.managers.contains(caller)
    }

    /// Whether `caller` is an accesser
    pub fn is_accesser(&self, caller: &Principal) -> bool {
        self.accessers.contains(caller)
    }

    /// Whether `caller` may register a company
    pub fn can_register(&self, caller: &Principal) -> bool {
        !self.acl_enabled
            || self.is_owner(caller)
            || self.is_manager(caller)
            || self.is_accesser(caller)
    }

    /// Whether `caller` may act on a company owned by `company_owner`
    ///
    /// Managers act across tenants. Accesser status plays no part here.
    pub fn is_privileged_for(&self, caller: &Principal, company_owner: &Principal) -> bool {
        caller == company_owner || self.is_manager(caller)
    }

    /// Whether registration is gated
    pub fn acl_enabled(&self) -> bool {
        self.acl_enabled
    }

    /// The owner principal
    pub fn owner(&self) -> &Principal {
        &self.owner
    }

    /// Mutation counter
    pub fn version(&self) -> u64 {
        self.version
    }

    // ========================================================================
    // Mutators
    // ========================================================================

    /// Add a manager. Owner only.
    pub fn add_manager(&mut self, caller: &Principal, principal: Principal) -> Result<bool> {
        if !self.is_owner(caller) {
            return Err(Error::NotOwner);
        }
        let changed = self.managers.insert(principal);
        Ok(self.bump_if(changed))
    }

    /// Add an accesser. Managers only; the owner must also be a manager.
    pub fn add_accesser(&mut self, caller: &Principal, principal: Principal) -> Result<bool> {
        if !self.is_manager(caller) {
            return Err(Error::NotManager);
        }
        let changed = self.accessers.insert(principal);
        Ok(self.bump_if(changed))
    }

    /// Remove an accesser. Managers only.
    pub fn remove_accesser(&mut self, caller: &Principal, principal: &Principal) -> Result<bool> {
        if !self.is_manager(caller) {
            return Err(Error::NotManager);
        }
        let changed = self.accessers.remove(principal);
        Ok(self.bump_if(changed))
    }

    /// Enable or disable registration gating. Owner only.
    pub fn set_acl_enabled(&mut self, caller: &Principal, enabled: bool) -> Result<bool> {
        if !self.is_owner(caller) {
            return Err(Error::NotOwner);
        }
        let changed = self.acl_enabled != enabled;
        self.acl_enabled = enabled;
        Ok(self.bump_if(changed))
    }

    fn bump_if(&mut self, changed: bool) -> bool {
        if changed {
            self.version += 1;
        }
        changed
    }

    /// Read-only view of the current state
    pub fn view(&self) -> AccessControlView {
        AccessControlView {
            owner: self.owner.clone(),
            managers: self.managers.clone(),
            accessers: self.accessers.clone(),
            acl_enabled: self.acl_enabled,
            version: self.version,
        }
    }
}
