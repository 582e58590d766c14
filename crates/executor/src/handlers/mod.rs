//! Command handlers organized by category.
//!
//! | Module | Commands | Engine surface |
//! |--------|----------|----------------|
//! | `company` | 6 | Registry, VectorSet, index |
//! | `access` | 5 | AccessControl, StateSnapshot |

pub mod access;
pub mod company;
