//! Shared-handle initialization semantics for the vector index.

use std::collections::HashMap;
use std::sync::Arc;

use warraq::{IndexEntry, IndexSnapshot, PipelineConfig, PipelineError, VectorIndex};

fn snapshot() -> IndexSnapshot {
    IndexSnapshot {
        dimensions: 4,
        entries: vec![IndexEntry {
            id: "a".to_string(),
            text: "a passage".to_string(),
            embedding: vec![1.0, 0.0, 0.0, 0.0],
            metadata: HashMap::new(),
        }],
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn shared_handle_initializes_once_and_failed_init_is_not_cached() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("persistent_db.json");

    let config = PipelineConfig::builder()
        .api_key("test-key")
        .index_path(&path)
        .build()
        .unwrap();

    // Snapshot absent: first access fails and must not poison the handle.
    let err = match VectorIndex::shared(&config).await {
        Ok(_) => panic!("expected missing snapshot to fail"),
        Err(e) => e,
    };
    assert!(matches!(err, PipelineError::IndexUnavailable(_)), "got {err:?}");

    std::fs::write(&path, serde_json::to_vec(&snapshot()).unwrap()).unwrap();

    // Concurrent first accesses race to initialize; both must observe the
    // same handle.
    let (a, b) = tokio::join!(VectorIndex::shared(&config), VectorIndex::shared(&config));
    let a = a.unwrap();
    let b = b.unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.len(), 1);

    // Later accesses keep returning the initialized handle.
    let c = VectorIndex::shared(&config).await.unwrap();
    assert!(Arc::ptr_eq(&a, &c));

    // Teardown is explicit but has nothing to release.
    VectorIndex::shutdown();
}

#[tokio::test]
async fn open_reports_unavailable_for_missing_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::builder()
        .api_key("test-key")
        .index_path(dir.path().join("nowhere.json"))
        .build()
        .unwrap();

    let err = match VectorIndex::open(&config).await {
        Ok(_) => panic!("expected missing snapshot to fail"),
        Err(e) => e,
    };
    assert!(matches!(err, PipelineError::IndexUnavailable(_)));
}
