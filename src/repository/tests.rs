use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tempfile::NamedTempFile;

use super::*;
use crate::condition::{ConditionRecord, default_conditions};

fn record(name: &str, symptoms: &[&str]) -> ConditionRecord {
    ConditionRecord {
        name: Some(name.to_string()),
        description: Some(format!("{} description", name)),
        symptoms: Some(symptoms.iter().map(|s| s.to_string()).collect()),
        urgency: Some("low".to_string()),
        ..Default::default()
    }
}

fn fast_config() -> RepositoryConfig {
    RepositoryConfig {
        ttl: Duration::from_secs(3600),
        store_timeout: Duration::from_millis(200),
        read_attempts: 2,
    }
}

fn repo_with(store: MockConditionStore, config: RepositoryConfig) -> ConditionRepository {
    ConditionRepository::new(Arc::new(store), config)
}

#[tokio::test]
async fn test_loads_from_store_once_per_epoch() {
    let store = MockConditionStore::new(vec![record("Flu", &["fever"]), record("Cold", &["cough"])]);
    let repo = repo_with(store.clone(), fast_config());

    let first = repo.get_all().await;
    let second = repo.get_all().await;

    assert_eq!(store.calls(), 1);
    assert_eq!(first.epoch(), second.epoch());
    assert_eq!(first.source(), SnapshotSource::Store);
    assert_eq!(first.len(), 2);
}

#[tokio::test]
async fn test_get_by_name_is_case_insensitive() {
    let store = MockConditionStore::new(vec![record("Common Cold", &["cough"])]);
    let repo = repo_with(store, fast_config());

    let found = repo.get_by_name("  common COLD").await.expect("should find");
    assert_eq!(found.name, "Common Cold");
    assert!(repo.get_by_name("Plague").await.is_none());
}

#[tokio::test]
async fn test_unavailable_store_falls_back_after_one_retry() {
    let store = MockConditionStore::new(vec![record("Flu", &["fever"])]).failing(5);
    let repo = repo_with(store.clone(), fast_config());

    let snapshot = repo.get_all().await;

    assert_eq!(store.calls(), 2);
    assert_eq!(snapshot.source(), SnapshotSource::Fallback);
    assert_eq!(snapshot.len(), default_conditions().len());
}

#[tokio::test]
async fn test_single_failure_recovers_on_retry() {
    let store = MockConditionStore::new(vec![record("Flu", &["fever"])]).failing(1);
    let repo = repo_with(store.clone(), fast_config());

    let snapshot = repo.get_all().await;

    assert_eq!(store.calls(), 2);
    assert_eq!(snapshot.source(), SnapshotSource::Store);
    assert!(snapshot.get("flu").is_some());
}

#[tokio::test]
async fn test_empty_store_falls_back_without_retry() {
    let store = MockConditionStore::new(vec![]);
    let repo = repo_with(store.clone(), fast_config());

    let snapshot = repo.get_all().await;

    assert_eq!(store.calls(), 1);
    assert_eq!(snapshot.source(), SnapshotSource::Fallback);
    assert!(!snapshot.is_empty());
}

#[tokio::test]
async fn test_slow_store_times_out_to_fallback() {
    let store = MockConditionStore::new(vec![record("Flu", &["fever"])])
        .with_delay(Duration::from_millis(500));
    let config = RepositoryConfig {
        store_timeout: Duration::from_millis(20),
        ..fast_config()
    };
    let repo = repo_with(store.clone(), config);

    let snapshot = repo.get_all().await;

    assert_eq!(snapshot.source(), SnapshotSource::Fallback);
    assert_eq!(store.calls(), 2);
}

#[tokio::test]
async fn test_malformed_records_skipped() {
    let bad_name = ConditionRecord {
        symptoms: Some(vec!["cough".to_string()]),
        ..Default::default()
    };
    let mut bad_urgency = record("Odd", &["fever"]);
    bad_urgency.urgency = Some("whenever".to_string());
    let store = MockConditionStore::new(vec![bad_name, record("Flu", &["fever"]), bad_urgency]);
    let repo = repo_with(store, fast_config());

    let snapshot = repo.get_all().await;

    assert_eq!(snapshot.source(), SnapshotSource::Store);
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.conditions()[0].name, "Flu");
}

#[tokio::test]
async fn test_failed_revalidation_keeps_store_conditions() {
    let store = MockConditionStore::new(vec![record("Flu", &["fever"]), record("Cold", &["cough"])]);
    let repo = repo_with(store.clone(), fast_config());

    let first = repo.get_all().await;
    assert_eq!(first.source(), SnapshotSource::Store);

    store.clone().failing(2);
    repo.invalidate();
    let retained = repo.get_all().await;

    assert_eq!(store.calls(), 3);
    assert_eq!(retained.source(), SnapshotSource::Retained);
    assert!(retained.epoch() > first.epoch());
    assert_eq!(retained.conditions(), first.conditions());
    assert!(repo.get_by_name("flu").await.is_some());

    store.set_records(vec![record("Measles", &["rash"])]);
    repo.invalidate();
    let recovered = repo.get_all().await;
    assert_eq!(recovered.source(), SnapshotSource::Store);
    assert_eq!(recovered.conditions()[0].name, "Measles");
}

#[tokio::test]
async fn test_empty_store_after_good_load_keeps_store_conditions() {
    let store = MockConditionStore::new(vec![record("Flu", &["fever"])]);
    let repo = repo_with(store.clone(), fast_config());
    repo.get_all().await;

    store.set_records(vec![]);
    repo.invalidate();
    let snapshot = repo.get_all().await;

    assert_eq!(snapshot.source(), SnapshotSource::Retained);
    assert_eq!(snapshot.conditions()[0].name, "Flu");
}

#[tokio::test]
async fn test_all_malformed_records_fall_back() {
    let store = MockConditionStore::new(vec![record("Nothing", &[])]);
    let repo = repo_with(store, fast_config());

    assert_eq!(repo.get_all().await.source(), SnapshotSource::Fallback);
}

#[tokio::test]
async fn test_duplicate_names_keep_first() {
    let store = MockConditionStore::new(vec![
        record("Flu", &["fever"]),
        record("FLU", &["cough"]),
    ]);
    let repo = repo_with(store, fast_config());

    let snapshot = repo.get_all().await;
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.get("flu").unwrap().symptoms, vec!["fever"]);
}

#[tokio::test]
async fn test_expired_snapshot_reloads() {
    let store = MockConditionStore::new(vec![record("Flu", &["fever"])]);
    let config = RepositoryConfig {
        ttl: Duration::ZERO,
        ..fast_config()
    };
    let repo = repo_with(store.clone(), config);

    let first = repo.get_all().await;
    store.set_records(vec![record("Measles", &["rash"])]);
    let second = repo.get_all().await;

    assert_eq!(store.calls(), 2);
    assert!(second.epoch() > first.epoch());
    assert!(second.get("measles").is_some());
    assert!(first.get("flu").is_some(), "old snapshot stays intact");
}

#[tokio::test]
async fn test_invalidate_triggers_reload_on_next_access() {
    let store = MockConditionStore::new(vec![record("Flu", &["fever"])]);
    let repo = repo_with(store.clone(), fast_config());

    let first = repo.init().await;
    repo.invalidate();
    let second = repo.get_all().await;
    let third = repo.get_all().await;

    assert_eq!(store.calls(), 2);
    assert_ne!(first.epoch(), second.epoch());
    assert_eq!(second.epoch(), third.epoch());
}

#[tokio::test]
async fn test_load_forces_reload() {
    let store = MockConditionStore::new(vec![record("Flu", &["fever"])]);
    let repo = repo_with(store.clone(), fast_config());

    repo.get_all().await;
    let reloaded = repo.load().await;

    assert_eq!(store.calls(), 2);
    assert_eq!(repo.current().unwrap().epoch(), reloaded.epoch());
}

#[tokio::test]
async fn test_concurrent_first_access_loads_once() {
    let store = MockConditionStore::new(vec![record("Flu", &["fever"])])
        .with_delay(Duration::from_millis(30));
    let repo = Arc::new(repo_with(store.clone(), fast_config()));

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move { repo.get_all().await.epoch() })
        })
        .collect();
    let epochs: Vec<u64> = futures::future::join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.expect("task panicked"))
        .collect();

    assert_eq!(store.calls(), 1);
    assert!(epochs.iter().all(|&e| e == epochs[0]));
}

#[tokio::test]
async fn test_stale_snapshot_served_while_reloading() {
    let store = MockConditionStore::new(vec![record("Flu", &["fever"])]);
    let repo = Arc::new(repo_with(store.clone(), fast_config()));
    let first = repo.get_all().await;

    store.set_records(vec![record("Measles", &["rash"])]);
    repo.invalidate();

    // Hold the load lock to simulate an in-flight reload.
    let guard = repo.load_lock_for_test().await;
    let during = repo.get_all().await;
    drop(guard);
    let after = repo.get_all().await;

    assert_eq!(during.epoch(), first.epoch());
    assert!(after.epoch() > first.epoch());
    assert!(after.get("measles").is_some());
}

#[tokio::test]
async fn test_json_file_store_reads_records() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"name": "Flu", "symptoms": ["fever", "chills"], "urgency": "medium"}},
            {{"name": "Broken", "symptoms": "not-a-list"}},
            {{"name": "Rash", "visualCues": ["red spots"]}}
        ]"#
    )
    .unwrap();
    file.flush().unwrap();

    let store = JsonFileStore::new(file.path());
    let records = store.fetch_all().await.unwrap();
    assert_eq!(records.len(), 2);
    assert!(store.describe().starts_with("json:"));

    let repo = ConditionRepository::new(Arc::new(store), fast_config());
    let snapshot = repo.get_all().await;
    assert_eq!(snapshot.source(), SnapshotSource::Store);
    assert_eq!(snapshot.len(), 2);
}

#[tokio::test]
async fn test_json_file_store_missing_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("missing.json"));

    assert!(matches!(store.fetch_all().await, Err(StoreError::Io { .. })));

    let repo = ConditionRepository::new(Arc::new(store), fast_config());
    assert_eq!(repo.get_all().await.source(), SnapshotSource::Fallback);
}

#[tokio::test]
async fn test_json_file_store_rejects_non_array() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"name": "Flu"}}"#).unwrap();
    file.flush().unwrap();

    let store = JsonFileStore::new(file.path());
    assert!(matches!(store.fetch_all().await, Err(StoreError::Parse { .. })));
}

#[tokio::test]
async fn test_builtin_static_store_matches_defaults() {
    let repo = ConditionRepository::new(Arc::new(StaticStore::builtin()), fast_config());
    let snapshot = repo.get_all().await;

    assert_eq!(snapshot.source(), SnapshotSource::Store);
    assert_eq!(snapshot.conditions(), default_conditions().as_slice());
}

#[test]
fn test_snapshot_digest_tracks_content() {
    let a = ConditionSnapshot::new(default_conditions(), SnapshotSource::Fallback, 1);
    let b = ConditionSnapshot::new(default_conditions(), SnapshotSource::Store, 2);
    assert_eq!(a.digest(), b.digest());

    let mut fewer = default_conditions();
    fewer.pop();
    let c = ConditionSnapshot::new(fewer, SnapshotSource::Store, 3);
    assert_ne!(a.digest(), c.digest());
    assert_eq!(a.digest_hex().len(), 64);
}
