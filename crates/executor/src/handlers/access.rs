//! Access-control command handlers.

use std::sync::Arc;

use tenantdb_core::Principal;
use tenantdb_engine::Database;

use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle AddManager command.
pub fn add_manager(db: &Arc<Database>, caller: &Principal, principal: Principal) -> Result<Output> {
    convert_result(db.add_manager(caller, principal)).map(Output::Bool)
}

/// Handle AddAccesser command.
pub fn add_accesser(
    db: &Arc<Database>,
    caller: &Principal,
    principal: Principal,
) -> Result<Output> {
    convert_result(db.add_accesser(caller, principal)).map(Output::Bool)
}

/// Handle RemoveAccesser command.
pub fn remove_accesser(
    db: &Arc<Database>,
    caller: &Principal,
    principal: Principal,
) -> Result<Output> {
    convert_result(db.remove_accesser(caller, &principal)).map(Output::Bool)
}

/// Handle SetAclEnabled command.
pub fn set_acl_enabled(db: &Arc<Database>, caller: &Principal, enabled: bool) -> Result<Output> {
    convert_result(db.set_acl_enabled(caller, enabled)).map(Output::Bool)
}

/// Handle States command.
pub fn states(db: &Arc<Database>) -> Result<Output> {
    Ok(Output::States(db.states()))
}
