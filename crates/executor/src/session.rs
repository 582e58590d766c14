//! Caller-bound session.
//!
//! The [`Session`] wraps an [`Executor`] together with one authenticated
//! principal and offers a typed method per command.
//!
//! # Usage
//!
//! ```ignore
//! use tenantdb_executor::Session;
//!
//! let session = Session::new(db.clone(), caller);
//! let id = session.register("acme")?;
//! session.append_keys_values(id, vec![vec![1.0, 0.0]], vec!["a".into()])?;
//! session.build_index(id)?;
//! let values = session.get_similar(id, vec![1.0, 0.0], 1)?;
//! ```

use std::sync::Arc;

use tenantdb_core::{AccessControlView, CompanyId, CompanyInfo, Embedding, Principal, QueryHit};
use tenantdb_engine::Database;

use crate::{Command, Error, Executor, Output, Result};

/// Executor bound to one caller.
pub struct Session {
    executor: Executor,
    caller: Principal,
}

impl Session {
    /// Create a new session for `caller`.
    pub fn new(db: Arc<Database>, caller: Principal) -> Self {
        Self {
            executor: Executor::new(db),
            caller,
        }
    }

    /// The bound caller.
    pub fn caller(&self) -> &Principal {
        &self.caller
    }

    /// Execute a raw command as the bound caller.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        self.executor.execute(&self.caller, cmd)
    }

    /// Register a company owned by the bound caller.
    pub fn register(&self, description: impl Into<String>) -> Result<CompanyId> {
        match self.execute(Command::Register {
            description: description.into(),
        })? {
            Output::CompanyId(id) => Ok(id),
            other => Err(unexpected("Register", &other)),
        }
    }

    /// Append embedding/value pairs.
    pub fn append_keys_values(
        &self,
        company: CompanyId,
        embeddings: Vec<Embedding>,
        values: Vec<String>,
    ) -> Result<()> {
        match self.execute(Command::AppendKeysValues {
            company,
            embeddings,
            values,
        })? {
            Output::Unit => Ok(()),
            other => Err(unexpected("AppendKeysValues", &other)),
        }
    }

    /// Rebuild a company's index.
    pub fn build_index(&self, company: CompanyId) -> Result<()> {
        match self.execute(Command::BuildIndex { company })? {
            Output::Unit => Ok(()),
            other => Err(unexpected("BuildIndex", &other)),
        }
    }

    /// Nearest neighbors with distances.
    pub fn query(&self, company: CompanyId, embedding: Embedding, k: u32) -> Result<Vec<QueryHit>> {
        match self.execute(Command::Query {
            company,
            embedding,
            k,
        })? {
            Output::Hits(hits) => Ok(hits),
            other => Err(unexpected("Query", &other)),
        }
    }

    /// Nearest neighbor values.
    pub fn get_similar(
        &self,
        company: CompanyId,
        embedding: Embedding,
        k: u32,
    ) -> Result<Vec<String>> {
        match self.execute(Command::GetSimilar {
            company,
            embedding,
            k,
        })? {
            Output::Values(values) => Ok(values),
            other => Err(unexpected("GetSimilar", &other)),
        }
    }

    /// Company diagnostics.
    pub fn company_info(&self, company: CompanyId) -> Result<CompanyInfo> {
        match self.execute(Command::CompanyInfo { company })? {
            Output::CompanyInfo(info) => Ok(info),
            other => Err(unexpected("CompanyInfo", &other)),
        }
    }

    /// Add a manager.
    pub fn add_manager(&self, principal: Principal) -> Result<bool> {
        expect_bool("AddManager", self.execute(Command::AddManager { principal })?)
    }

    /// Add an accesser.
    pub fn add_accesser(&self, principal: Principal) -> Result<bool> {
        expect_bool("AddAccesser", self.execute(Command::AddAccesser { principal })?)
    }

    /// Remove an accesser.
    pub fn remove_accesser(&self, principal: Principal) -> Result<bool> {
        expect_bool(
            "RemoveAccesser",
            self.execute(Command::RemoveAccesser { principal })?,
        )
    }

    /// Toggle registration gating.
    pub fn set_acl_enabled(&self, enabled: bool) -> Result<bool> {
        expect_bool("SetAclEnabled", self.execute(Command::SetAclEnabled { enabled })?)
    }

    /// Published access-control snapshots.
    pub fn states(&self) -> Result<Vec<AccessControlView>> {
        match self.execute(Command::States)? {
            Output::States(states) => Ok(states),
            other => Err(unexpected("States", &other)),
        }
    }
}

fn expect_bool(command: &str, output: Output) -> Result<bool> {
    match output {
        Output::Bool(changed) => Ok(changed),
        other => Err(unexpected(command, &other)),
    }
}

fn unexpected(command: &str, output: &Output) -> Error {
    Error::InvalidInput {
        reason: format!("unexpected output for {}: {:?}", command, output),
    }
}
