//! Company command handlers.
//!
//! Thin dispatch into `Database`; authorization happens there.

use std::sync::Arc;

use tenantdb_core::{CompanyId, Embedding, Principal};
use tenantdb_engine::Database;

use crate::convert::convert_result;
use crate::{Output, Result};

/// `u32` from the wire to `usize`, saturating on narrow targets
fn to_k(k: u32) -> usize {
    usize::try_from(k).unwrap_or(usize::MAX)
}

/// Handle Register command.
pub fn register(db: &Arc<Database>, caller: &Principal, description: String) -> Result<Output> {
    let id = convert_result(db.register(caller, description))?;
    Ok(Output::CompanyId(id))
}

/// Handle AppendKeysValues command.
pub fn append_keys_values(
    db: &Arc<Database>,
    caller: &Principal,
    company: CompanyId,
    embeddings: Vec<Embedding>,
    values: Vec<String>,
) -> Result<Output> {
    convert_result(db.append_keys_values(caller, company, embeddings, values))?;
    Ok(Output::Unit)
}

/// Handle BuildIndex command.
pub fn build_index(db: &Arc<Database>, caller: &Principal, company: CompanyId) -> Result<Output> {
    convert_result(db.build_index(caller, company))?;
    Ok(Output::Unit)
}

/// Handle Query command.
pub fn query(
    db: &Arc<Database>,
    caller: &Principal,
    company: CompanyId,
    embedding: Embedding,
    k: u32,
) -> Result<Output> {
    let hits = convert_result(db.query(caller, company, &embedding, to_k(k)))?;
    Ok(Output::Hits(hits))
}

/// Handle GetSimilar command.
pub fn get_similar(
    db: &Arc<Database>,
    caller: &Principal,
    company: CompanyId,
    embedding: Embedding,
    k: u32,
) -> Result<Output> {
    let values = convert_result(db.get_similar(caller, company, &embedding, to_k(k)))?;
    Ok(Output::Values(values))
}

/// Handle CompanyInfo command.
pub fn company_info(db: &Arc<Database>, caller: &Principal, company: CompanyId) -> Result<Output> {
    let info = convert_result(db.company_info(caller, company))?;
    Ok(Output::CompanyInfo(info))
}

/// Handle CompanyCount command.
pub fn company_count(db: &Arc<Database>) -> Result<Output> {
    Ok(Output::Uint(db.company_count() as u64))
}
