//! Vector storage and similarity search
//!
//! - **VectorSet**: Append-only embedding/value storage with a fixed dimension
//! - **IndexBackend**: Trait for built, immutable nearest-neighbor structures
//! - **BruteForceIndex**: Exact O(n·D) backend
//! - **IndexBackendFactory**: Backend selection

pub mod backend;
pub mod brute_force;
pub mod distance;
pub mod set;

pub use backend::{IndexBackend, IndexBackendFactory};
pub use brute_force::BruteForceIndex;
pub use distance::compute_distance;
pub use set::VectorSet;
