//! The Executor - single entry point to TenantDB's engine.
//!
//! The Executor is a stateless dispatcher that routes commands to the
//! appropriate handler and converts results to outputs.

use std::sync::Arc;

use tenantdb_core::Principal;
use tenantdb_engine::Database;
use tracing::{debug, warn};

use crate::handlers::{access, company};
use crate::{Command, Output, Result};

/// The command executor - single entry point to TenantDB's engine.
///
/// The Executor is **stateless**: it holds a reference to the database but
/// maintains no state of its own. The caller is supplied with every command,
/// already authenticated by the host.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and can be shared across threads.
///
/// # Example
///
/// ```ignore
/// use tenantdb_executor::{Command, Executor};
///
/// let executor = Executor::new(db);
/// let id = executor.execute(&caller, Command::Register { description: "acme".into() })?;
/// ```
pub struct Executor {
    db: Arc<Database>,
}

impl Executor {
    /// Create a new executor wrapping a database.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// The wrapped database.
    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }

    /// Execute a single command on behalf of `caller`.
    pub fn execute(&self, caller: &Principal, cmd: Command) -> Result<Output> {
        let name = cmd.name();
        debug!(
            target: "tenantdb::executor",
            command = name,
            write = cmd.is_write(),
            caller = %caller,
            "Executing"
        );

        let result = match cmd {
            // Database commands
            Command::Ping => Ok(Output::Pong {
                version: env!("CARGO_PKG_VERSION").to_string(),
            }),
            Command::CompanyCount => company::company_count(&self.db),

            // Company commands
            Command::Register { description } => company::register(&self.db, caller, description),
            Command::AppendKeysValues {
                company,
                embeddings,
                values,
            } => company::append_keys_values(&self.db, caller, company, embeddings, values),
            Command::BuildIndex { company } => company::build_index(&self.db, caller, company),
            Command::Query {
                company,
                embedding,
                k,
            } => company::query(&self.db, caller, company, embedding, k),
            Command::GetSimilar {
                company,
                embedding,
                k,
            } => company::get_similar(&self.db, caller, company, embedding, k),
            Command::CompanyInfo { company } => company::company_info(&self.db, caller, company),

            // Access commands
            Command::AddManager { principal } => access::add_manager(&self.db, caller, principal),
            Command::AddAccesser { principal } => {
                access::add_accesser(&self.db, caller, principal)
            }
            Command::RemoveAccesser { principal } => {
                access::remove_accesser(&self.db, caller, principal)
            }
            Command::SetAclEnabled { enabled } => {
                access::set_acl_enabled(&self.db, caller, enabled)
            }
            Command::States => access::states(&self.db),
        };

        if let Err(e) = &result {
            if e.is_hard_failure() {
                warn!(
                    target: "tenantdb::executor",
                    command = name,
                    caller = %caller,
                    error = %e,
                    "Command aborted"
                );
            } else {
                debug!(target: "tenantdb::executor", command = name, error = %e, "Command failed");
            }
        }
        result
    }

    /// Execute commands in order, collecting every result.
    ///
    /// A failed command does not stop the batch.
    pub fn execute_many(&self, caller: &Principal, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter()
            .map(|cmd| self.execute(caller, cmd))
            .collect()
    }
}
