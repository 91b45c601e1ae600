//! Search ordering, determinism, and snapshot loading for the persisted
//! vector store.

use std::collections::HashMap;
use std::io::Write;

use proptest::prelude::*;

use warraq::{IndexEntry, IndexSnapshot, PipelineError, SnapshotVectorStore, VectorStore};

const DIM: usize = 16;

fn entry(id: &str, text: &str, embedding: Vec<f32>) -> IndexEntry {
    IndexEntry { id: id.to_string(), text: text.to_string(), embedding, metadata: HashMap::new() }
}

fn store_of(entries: Vec<IndexEntry>) -> SnapshotVectorStore {
    SnapshotVectorStore::from_snapshot(IndexSnapshot { dimensions: DIM, entries })
}

/// Generate a non-zero L2-normalized embedding of the given dimension.
fn arb_normalized_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map(
        "non-zero embedding",
        |mut v| {
            let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm < 1e-8 {
                return None;
            }
            for val in &mut v {
                *val /= norm;
            }
            Some(v)
        },
    )
}

/// Generate an index entry with a normalized embedding.
fn arb_entry(dim: usize) -> impl Strategy<Value = IndexEntry> {
    ("[a-z]{3,8}", "[a-z ]{5,30}", arb_normalized_embedding(dim))
        .prop_map(|(id, text, embedding)| entry(&id, &text, embedding))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any set of stored entries, search returns at most `top_k` results,
    /// ordered by descending cosine similarity, with ranks 0..len.
    #[test]
    fn results_ordered_descending_and_bounded_by_top_k(
        entries in proptest::collection::vec(arb_entry(DIM), 1..20),
        query in arb_normalized_embedding(DIM),
        top_k in 1usize..25,
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();

        // Deduplicate by id; two entries sharing an id would still both be
        // stored (the snapshot is whatever the ingestion job wrote), but
        // unique ids keep the tie-break assertions simple.
        let mut deduped: HashMap<String, IndexEntry> = HashMap::new();
        for e in &entries {
            deduped.entry(e.id.clone()).or_insert_with(|| e.clone());
        }
        let unique: Vec<IndexEntry> = deduped.into_values().collect();
        let stored = unique.len();

        let store = store_of(unique);
        let results = rt.block_on(store.search(&query, top_k)).unwrap();

        prop_assert!(results.len() <= top_k);
        prop_assert!(results.len() <= stored);
        if stored >= top_k {
            prop_assert_eq!(results.len(), top_k);
        }

        for window in results.windows(2) {
            prop_assert!(
                window[0].score >= window[1].score,
                "results not in descending order: {} < {}",
                window[0].score,
                window[1].score,
            );
        }

        for (i, result) in results.iter().enumerate() {
            prop_assert_eq!(result.rank, i);
        }
    }
}

#[tokio::test]
async fn repeated_searches_return_identical_results() {
    // All entries share one embedding, so every score ties; ordering must
    // still be stable across calls.
    let shared = vec![1.0f32; DIM];
    let entries: Vec<IndexEntry> = (0..10)
        .map(|i| entry(&format!("e{i}"), &format!("text {i}"), shared.clone()))
        .collect();
    let store = store_of(entries);

    let query = vec![0.5f32; DIM];
    let first = store.search(&query, 4).await.unwrap();
    for _ in 0..5 {
        let again = store.search(&query, 4).await.unwrap();
        let texts: Vec<&str> = again.iter().map(|d| d.text.as_str()).collect();
        let expected: Vec<&str> = first.iter().map(|d| d.text.as_str()).collect();
        assert_eq!(texts, expected, "tie-broken order must be deterministic");
    }
}

#[tokio::test]
async fn empty_store_returns_no_results() {
    let store = store_of(Vec::new());
    let results = store.search(&vec![1.0f32; DIM], 25).await.unwrap();
    assert!(results.is_empty());
    assert!(store.is_empty());
}

#[tokio::test]
async fn dimension_mismatch_is_a_store_error() {
    let store = store_of(vec![entry("a", "text", vec![1.0; DIM])]);
    let err = store.search(&[1.0, 2.0], 5).await.unwrap_err();
    assert!(matches!(err, PipelineError::Store { .. }), "got {err:?}");
}

#[tokio::test]
async fn open_missing_snapshot_reports_index_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("persistent_db.json");

    let err = SnapshotVectorStore::open(&path).await.unwrap_err();
    assert!(matches!(err, PipelineError::IndexUnavailable(_)), "got {err:?}");
}

#[tokio::test]
async fn open_corrupt_snapshot_reports_index_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("persistent_db.json");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(b"not json at all").unwrap();

    let err = SnapshotVectorStore::open(&path).await.unwrap_err();
    assert!(matches!(err, PipelineError::IndexUnavailable(_)), "got {err:?}");
}

#[tokio::test]
async fn open_round_trips_the_ingestion_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("persistent_db.json");

    let snapshot = IndexSnapshot {
        dimensions: DIM,
        entries: vec![
            entry("a", "the first passage", vec![1.0; DIM]),
            entry("b", "the second passage", vec![-1.0; DIM]),
        ],
    };
    std::fs::write(&path, serde_json::to_vec(&snapshot).unwrap()).unwrap();

    let store = SnapshotVectorStore::open(&path).await.unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.dimensions(), DIM);

    let results = store.search(&vec![1.0f32; DIM], 2).await.unwrap();
    assert_eq!(results[0].text, "the first passage");
    assert_eq!(results[1].text, "the second passage");
    assert!(results[0].score > results[1].score);
}
