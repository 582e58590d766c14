//! Engine integration tests, driven through the public `tenantdb` API.

#[path = "../common/mod.rs"]
mod common;

mod access_control;
mod isolation;
mod query;
