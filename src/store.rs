//! Read-only vector store over the persisted corpus snapshot.
//!
//! The ingestion collaborator writes the corpus as a single JSON snapshot
//! (dimensions plus embedded entries). [`SnapshotVectorStore`] loads it once
//! and serves cosine-similarity searches; there is no write or invalidation
//! path.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::document::{IndexEntry, RetrievedDocument};
use crate::error::{PipelineError, Result};

/// A read-only storage backend with vector similarity search.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Search for the `top_k` entries most similar to the given embedding.
    ///
    /// Returns results ordered by descending similarity score, nearest
    /// first. The result list holds at most `top_k` documents and is shorter
    /// only when the store holds fewer entries.
    async fn search(&self, embedding: &[f32], top_k: usize) -> Result<Vec<RetrievedDocument>>;

    /// Number of entries held by the store.
    fn len(&self) -> usize;

    /// Whether the store holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Embedding dimensionality of the stored entries.
    fn dimensions(&self) -> usize;
}

/// On-disk form of the persisted index, as written by the ingestion job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexSnapshot {
    /// Embedding dimensionality shared by every entry.
    pub dimensions: usize,
    /// The embedded corpus passages.
    pub entries: Vec<IndexEntry>,
}

/// A [`VectorStore`] backed by a persisted [`IndexSnapshot`].
///
/// The snapshot is loaded fully into memory at open time and never mutated
/// afterwards, so concurrent searches need no locking.
#[derive(Debug)]
pub struct SnapshotVectorStore {
    entries: Vec<IndexEntry>,
    dimensions: usize,
}

impl SnapshotVectorStore {
    /// Open the snapshot at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::IndexUnavailable`] if the file is absent,
    /// unreadable, or not a valid snapshot. Retrieval must not be attempted
    /// in that case.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PipelineError::IndexUnavailable(format!(
                "no index snapshot at '{}'; run the ingestion job first",
                path.display()
            )));
        }

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            PipelineError::IndexUnavailable(format!(
                "failed to read index snapshot '{}': {e}",
                path.display()
            ))
        })?;

        let snapshot: IndexSnapshot = serde_json::from_slice(&bytes).map_err(|e| {
            PipelineError::IndexUnavailable(format!(
                "index snapshot '{}' is not valid: {e}",
                path.display()
            ))
        })?;

        info!(
            path = %path.display(),
            entry_count = snapshot.entries.len(),
            dimensions = snapshot.dimensions,
            "loaded index snapshot"
        );

        Ok(Self::from_snapshot(snapshot))
    }

    /// Build a store directly from an in-memory snapshot.
    pub fn from_snapshot(snapshot: IndexSnapshot) -> Self {
        Self { entries: snapshot.entries, dimensions: snapshot.dimensions }
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorStore for SnapshotVectorStore {
    async fn search(&self, embedding: &[f32], top_k: usize) -> Result<Vec<RetrievedDocument>> {
        if embedding.len() != self.dimensions {
            return Err(PipelineError::Store {
                backend: "Snapshot".to_string(),
                message: format!(
                    "query embedding has {} dimensions, index has {}",
                    embedding.len(),
                    self.dimensions
                ),
            });
        }

        let mut scored: Vec<(f32, &IndexEntry)> = self
            .entries
            .iter()
            .map(|entry| (cosine_similarity(&entry.embedding, embedding), entry))
            .collect();

        // Descending score; ties broken by entry id so repeated searches
        // over the same snapshot are deterministic.
        scored.sort_by(|(sa, ea), (sb, eb)| {
            sb.partial_cmp(sa).unwrap_or(std::cmp::Ordering::Equal).then_with(|| ea.id.cmp(&eb.id))
        });
        scored.truncate(top_k);

        Ok(scored
            .into_iter()
            .enumerate()
            .map(|(rank, (score, entry))| RetrievedDocument {
                text: entry.text.clone(),
                score,
                rank,
            })
            .collect())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
