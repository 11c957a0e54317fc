//! Reference condition repository: backing stores, snapshots and the TTL cache.

pub mod error;
#[allow(clippy::module_inception)]
pub mod repository;
pub mod snapshot;
pub mod store;

#[cfg(test)]
mod tests;

pub use error::{StoreError, StoreResult};
pub use repository::{ConditionRepository, RepositoryConfig};
pub use snapshot::{ConditionSnapshot, SnapshotSource};
#[cfg(any(test, feature = "mock"))]
pub use store::MockConditionStore;
pub use store::{ConditionStore, JsonFileStore, StaticStore};
