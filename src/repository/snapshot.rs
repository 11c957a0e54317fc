use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::condition::MedicalCondition;
use crate::hashing::{hash_conditions, to_hex};

/// Where a snapshot's conditions came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotSource {
    Store,
    /// Previous store data kept because a revalidation read failed.
    Retained,
    Fallback,
}

impl SnapshotSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotSource::Store => "store",
            SnapshotSource::Retained => "retained",
            SnapshotSource::Fallback => "fallback",
        }
    }
}

/// Immutable view of the reference conditions for one cache epoch.
///
/// Built whole and swapped in behind an `Arc`, so readers never observe a
/// partially-populated set.
#[derive(Debug)]
pub struct ConditionSnapshot {
    conditions: Vec<MedicalCondition>,
    index: HashMap<String, usize>,
    source: SnapshotSource,
    epoch: u64,
    digest: [u8; 32],
    loaded_at: Instant,
    loaded_at_utc: DateTime<Utc>,
}

impl ConditionSnapshot {
    /// Builds a snapshot, keeping the first condition for each case-insensitive name.
    pub fn new(conditions: Vec<MedicalCondition>, source: SnapshotSource, epoch: u64) -> Self {
        let mut unique = Vec::with_capacity(conditions.len());
        let mut index = HashMap::with_capacity(conditions.len());

        for condition in conditions {
            let key = condition.key();
            if index.contains_key(&key) {
                warn!(condition = %condition.name, "Duplicate condition name, keeping first");
                continue;
            }
            index.insert(key, unique.len());
            unique.push(condition);
        }

        let digest = hash_conditions(&unique);

        Self {
            conditions: unique,
            index,
            source,
            epoch,
            digest,
            loaded_at: Instant::now(),
            loaded_at_utc: Utc::now(),
        }
    }

    /// Conditions in repository iteration order.
    #[inline]
    pub fn conditions(&self) -> &[MedicalCondition] {
        &self.conditions
    }

    /// Case-insensitive lookup by name.
    pub fn get(&self, name: &str) -> Option<&MedicalCondition> {
        self.index
            .get(&name.trim().to_lowercase())
            .and_then(|&i| self.conditions.get(i))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    #[inline]
    pub fn source(&self) -> SnapshotSource {
        self.source
    }

    #[inline]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    #[inline]
    pub fn digest(&self) -> &[u8; 32] {
        &self.digest
    }

    pub fn digest_hex(&self) -> String {
        to_hex(&self.digest)
    }

    #[inline]
    pub fn age(&self) -> Duration {
        self.loaded_at.elapsed()
    }

    #[inline]
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at_utc
    }
}
