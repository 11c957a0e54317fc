//! Backing stores for reference conditions.
//!
//! `JsonFileStore` reads a JSON array from disk. `StaticStore` serves an
//! in-memory list. `MockConditionStore` scripts failures and delays for tests.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::warn;

use super::error::{StoreError, StoreResult};
use crate::condition::{ConditionRecord, default_conditions};

/// Source of truth for reference conditions. May be slow or unavailable.
#[async_trait]
pub trait ConditionStore: Send + Sync {
    /// Returns every record the store holds.
    async fn fetch_all(&self) -> StoreResult<Vec<ConditionRecord>>;

    /// Short label for logs.
    fn describe(&self) -> String;
}

/// Reads `[ConditionRecord, ...]` from a JSON file.
///
/// Entries that do not deserialize as a record (wrong field types) are skipped
/// individually; only an unreadable file or a non-array document fails the read.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ConditionStore for JsonFileStore {
    async fn fetch_all(&self) -> StoreResult<Vec<ConditionRecord>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })?;

        let entries: Vec<serde_json::Value> =
            serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;

        let mut records = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<ConditionRecord>(entry) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        index,
                        error = %e,
                        "Skipping undecodable condition record"
                    );
                }
            }
        }
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}

/// In-memory store over a fixed record list.
#[derive(Debug, Clone, Default)]
pub struct StaticStore {
    records: Vec<ConditionRecord>,
}

impl StaticStore {
    pub fn new(records: Vec<ConditionRecord>) -> Self {
        Self { records }
    }

    /// Store serving the built-in reference conditions.
    pub fn builtin() -> Self {
        Self::new(default_conditions().iter().map(ConditionRecord::from).collect())
    }
}

#[async_trait]
impl ConditionStore for StaticStore {
    async fn fetch_all(&self) -> StoreResult<Vec<ConditionRecord>> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("static:{}", self.records.len())
    }
}

#[cfg(any(test, feature = "mock"))]
pub use mock::MockConditionStore;

#[cfg(any(test, feature = "mock"))]
mod mock {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use super::ConditionStore;
    use crate::condition::ConditionRecord;
    use crate::repository::error::{StoreError, StoreResult};

    /// Scriptable store: fails the first N calls, optionally sleeps, counts calls.
    #[derive(Clone, Default)]
    pub struct MockConditionStore {
        records: Arc<Mutex<Vec<ConditionRecord>>>,
        failures_remaining: Arc<AtomicUsize>,
        delay: Option<Duration>,
        calls: Arc<AtomicUsize>,
    }

    impl MockConditionStore {
        pub fn new(records: Vec<ConditionRecord>) -> Self {
            Self {
                records: Arc::new(Mutex::new(records)),
                ..Default::default()
            }
        }

        /// Fails the next `n` calls with [`StoreError::Unavailable`].
        pub fn failing(self, n: usize) -> Self {
            self.failures_remaining.store(n, Ordering::SeqCst);
            self
        }

        /// Sleeps before every response.
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn set_records(&self, records: Vec<ConditionRecord>) {
            *self.records.lock() = records;
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ConditionStore for MockConditionStore {
        async fn fetch_all(&self) -> StoreResult<Vec<ConditionRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            let failed = self
                .failures_remaining
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if failed {
                return Err(StoreError::Unavailable("mock failure".to_string()));
            }

            Ok(self.records.lock().clone())
        }

        fn describe(&self) -> String {
            "mock".to_string()
        }
    }
}
