//! Query-side handle over the embedding provider and the persisted store.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{error, info};

use crate::config::PipelineConfig;
use crate::document::RetrievedDocument;
use crate::embedding::{EmbeddingProvider, GeminiEmbeddingProvider};
use crate::error::Result;
use crate::store::{SnapshotVectorStore, VectorStore};

static SHARED_INDEX: OnceCell<Arc<VectorIndex>> = OnceCell::const_new();

/// Embeds a query string and returns the `k` nearest corpus passages.
///
/// `VectorIndex` composes an [`EmbeddingProvider`] with a read-only
/// [`VectorStore`]. It performs no writes; every session in the process can
/// share one handle without locking.
pub struct VectorIndex {
    provider: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
}

impl VectorIndex {
    /// Compose an index from explicit parts.
    pub fn new(provider: Arc<dyn EmbeddingProvider>, store: Arc<dyn VectorStore>) -> Self {
        Self { provider, store }
    }

    /// Open the index described by `config`: a Gemini embedding provider
    /// over the snapshot at `config.index_path`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::IndexUnavailable`](crate::PipelineError::IndexUnavailable)
    /// if the snapshot is absent or invalid.
    pub async fn open(config: &PipelineConfig) -> Result<Self> {
        let store = SnapshotVectorStore::open(&config.index_path).await?;
        let provider = GeminiEmbeddingProvider::new(&config.api_key)?
            .with_model(&config.embedding_model)
            .with_dimensions(store.dimensions());
        Ok(Self::new(Arc::new(provider), Arc::new(store)))
    }

    /// Return the process-wide shared index, opening it on first access.
    ///
    /// Initialization runs at most once even under concurrent first
    /// accesses; a failed initialization is not cached, so a later call can
    /// succeed once the snapshot exists.
    pub async fn shared(config: &PipelineConfig) -> Result<Arc<Self>> {
        SHARED_INDEX
            .get_or_try_init(|| async {
                let index = Self::open(config).await?;
                Ok(Arc::new(index))
            })
            .await
            .cloned()
    }

    /// Teardown hook for symmetry with [`shared`](Self::shared).
    ///
    /// The snapshot is read-only and the handle owns no external resources,
    /// so there is nothing to release.
    pub fn shutdown() {}

    /// Return the `k` nearest passages to `query`, nearest first.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<RetrievedDocument>> {
        let embedding = self.provider.embed(query).await.map_err(|e| {
            error!(error = %e, "query embedding failed");
            e
        })?;

        let results = self.store.search(&embedding, k).await.map_err(|e| {
            error!(error = %e, "similarity search failed");
            e
        })?;

        info!(result_count = results.len(), k, "similarity search completed");
        Ok(results)
    }

    /// Number of passages held by the underlying store.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the underlying store holds no passages.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
