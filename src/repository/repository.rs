use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::error::StoreError;
use super::snapshot::{ConditionSnapshot, SnapshotSource};
use super::store::ConditionStore;
use crate::condition::{ConditionRecord, MedicalCondition, default_conditions};
use crate::constants::{DEFAULT_CACHE_TTL_SECS, DEFAULT_STORE_TIMEOUT_MS, STORE_READ_ATTEMPTS};

/// Cache lifetime and store-read bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    /// Snapshot lifetime before the next access revalidates. Default: 1 hour.
    pub ttl: Duration,
    /// Per-attempt deadline on the store read. Default: 2 s.
    pub store_timeout: Duration,
    /// Store reads before falling back to built-in data. Default: 2 (one retry).
    pub read_attempts: usize,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            store_timeout: Duration::from_millis(DEFAULT_STORE_TIMEOUT_MS),
            read_attempts: STORE_READ_ATTEMPTS,
        }
    }
}

/// Owns the reference condition set and its cache lifecycle.
///
/// Reads are served from an immutable [`ConditionSnapshot`]. When the snapshot
/// expires, one caller reloads while concurrent callers keep getting the stale
/// snapshot; only the very first load (no snapshot yet) makes callers wait.
pub struct ConditionRepository {
    store: Arc<dyn ConditionStore>,
    config: RepositoryConfig,
    current: RwLock<Option<Arc<ConditionSnapshot>>>,
    load_lock: Mutex<()>,
    next_epoch: AtomicU64,
    invalidated_through: AtomicU64,
}

impl std::fmt::Debug for ConditionRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConditionRepository")
            .field("store", &self.store.describe())
            .field("config", &self.config)
            .field("epoch", &self.current().map(|s| s.epoch()))
            .finish()
    }
}

impl ConditionRepository {
    pub fn new(store: Arc<dyn ConditionStore>, config: RepositoryConfig) -> Self {
        Self {
            store,
            config,
            current: RwLock::new(None),
            load_lock: Mutex::new(()),
            next_epoch: AtomicU64::new(1),
            invalidated_through: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// Current snapshot without triggering a load.
    pub fn current(&self) -> Option<Arc<ConditionSnapshot>> {
        self.current.read().clone()
    }

    /// Loads eagerly if nothing is cached yet.
    pub async fn init(&self) -> Arc<ConditionSnapshot> {
        self.get_all().await
    }

    /// Marks the current epoch stale; the next access reloads.
    pub fn invalidate(&self) {
        if let Some(snapshot) = self.current() {
            self.invalidated_through
                .fetch_max(snapshot.epoch(), Ordering::AcqRel);
            debug!(epoch = snapshot.epoch(), "Condition cache invalidated");
        }
    }

    /// All conditions, loading at most once per cache epoch.
    pub async fn get_all(&self) -> Arc<ConditionSnapshot> {
        if let Some(snapshot) = self.current() {
            if !self.is_expired(&snapshot) {
                return snapshot;
            }

            // Stale: whoever wins the lock revalidates, everyone else keeps reading.
            let Ok(_guard) = self.load_lock.try_lock() else {
                debug!(epoch = snapshot.epoch(), "Serving stale conditions during reload");
                return snapshot;
            };
            if let Some(fresh) = self.fresh_snapshot() {
                return fresh;
            }
            return self.load_locked().await;
        }

        let _guard = self.load_lock.lock().await;
        if let Some(fresh) = self.fresh_snapshot() {
            return fresh;
        }
        self.load_locked().await
    }

    /// Case-insensitive lookup; `None` means no knowledge of that condition.
    pub async fn get_by_name(&self, name: &str) -> Option<MedicalCondition> {
        self.get_all().await.get(name).cloned()
    }

    /// Forces a store read now and swaps in the result.
    pub async fn load(&self) -> Arc<ConditionSnapshot> {
        let _guard = self.load_lock.lock().await;
        self.load_locked().await
    }

    #[cfg(test)]
    pub(crate) async fn load_lock_for_test(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.load_lock.lock().await
    }

    fn is_expired(&self, snapshot: &ConditionSnapshot) -> bool {
        snapshot.age() >= self.config.ttl
            || snapshot.epoch() <= self.invalidated_through.load(Ordering::Acquire)
    }

    fn fresh_snapshot(&self) -> Option<Arc<ConditionSnapshot>> {
        self.current().filter(|s| !self.is_expired(s))
    }

    #[instrument(skip(self), fields(store = %self.store.describe()))]
    async fn load_locked(&self) -> Arc<ConditionSnapshot> {
        let (conditions, source) = match self.fetch_with_retry().await {
            Some(records) => {
                let conditions = Self::convert(records);
                if conditions.is_empty() {
                    warn!("Store returned no usable conditions");
                    self.fallback_conditions()
                } else {
                    (conditions, SnapshotSource::Store)
                }
            }
            None => self.fallback_conditions(),
        };

        let epoch = self.next_epoch.fetch_add(1, Ordering::AcqRel);
        let snapshot = Arc::new(ConditionSnapshot::new(conditions, source, epoch));
        *self.current.write() = Some(Arc::clone(&snapshot));

        info!(
            epoch,
            source = snapshot.source().as_str(),
            conditions = snapshot.len(),
            digest = %snapshot.digest_hex(),
            "Condition snapshot loaded"
        );
        snapshot
    }

    /// Last store-backed conditions if any were loaded, built-in defaults otherwise.
    fn fallback_conditions(&self) -> (Vec<MedicalCondition>, SnapshotSource) {
        match self.current() {
            Some(previous)
                if matches!(
                    previous.source(),
                    SnapshotSource::Store | SnapshotSource::Retained
                ) =>
            {
                warn!(
                    epoch = previous.epoch(),
                    "Keeping previous store conditions until the next revalidation"
                );
                (previous.conditions().to_vec(), SnapshotSource::Retained)
            }
            _ => {
                warn!("Using built-in default conditions");
                (default_conditions(), SnapshotSource::Fallback)
            }
        }
    }

    /// `None` when every attempt failed or the store is empty.
    async fn fetch_with_retry(&self) -> Option<Vec<ConditionRecord>> {
        let attempts = self.config.read_attempts.max(1);
        for attempt in 1..=attempts {
            let result =
                match tokio::time::timeout(self.config.store_timeout, self.store.fetch_all()).await {
                    Ok(result) => result,
                    Err(_) => Err(StoreError::Timeout(self.config.store_timeout)),
                };

            match result {
                Ok(records) if records.is_empty() => {
                    warn!("Condition store is empty");
                    return None;
                }
                Ok(records) => return Some(records),
                Err(e) => {
                    warn!(attempt, attempts, error = %e, "Condition store read failed");
                }
            }
        }
        warn!("Condition store unavailable");
        None
    }

    fn convert(records: Vec<ConditionRecord>) -> Vec<MedicalCondition> {
        records
            .into_iter()
            .filter_map(|record| match MedicalCondition::try_from(record) {
                Ok(condition) => Some(condition),
                Err(e) => {
                    warn!(condition = %e.condition_name(), error = %e, "Skipping malformed condition");
                    None
                }
            })
            .collect()
    }
}
