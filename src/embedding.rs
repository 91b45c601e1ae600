//! Embedding provider trait and the Gemini embedding API client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{PipelineError, Result};

/// The default Gemini API base URL.
pub(crate) const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// The default dimensionality for `embedding-001`.
const DEFAULT_DIMENSIONS: usize = 768;

/// A provider that generates a vector embedding for query text.
///
/// Corpus-side embedding happens in the out-of-process ingestion job; the
/// pipeline only ever embeds single query strings.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Return the dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;
}

/// An [`EmbeddingProvider`] backed by the Gemini embedding API.
///
/// Uses `reqwest` to call the `models/{model}:embedContent` endpoint
/// directly.
///
/// # Example
///
/// ```rust,ignore
/// use warraq::GeminiEmbeddingProvider;
///
/// let provider = GeminiEmbeddingProvider::new("your-api-key")?;
/// let embedding = provider.embed("ownership in Rust").await?;
/// ```
pub struct GeminiEmbeddingProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    dimensions: usize,
}

impl GeminiEmbeddingProvider {
    /// Create a new provider with the given API key and the default
    /// `embedding-001` model.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(PipelineError::Embedding {
                provider: "Gemini".into(),
                message: "API key must not be empty".into(),
            });
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model: crate::config::DEFAULT_EMBEDDING_MODEL.into(),
            base_url: GEMINI_API_BASE.into(),
            dimensions: DEFAULT_DIMENSIONS,
        })
    }

    /// Set the embedding model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL (test servers, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the expected output dimensionality.
    pub fn with_dimensions(mut self, dims: usize) -> Self {
        self.dimensions = dims;
        self
    }
}

// ── Gemini API request/response types ──────────────────────────────

#[derive(Serialize)]
struct EmbedContentRequest<'a> {
    content: Content<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: EmbeddingValues,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

#[derive(Deserialize)]
pub(crate) struct ErrorResponse {
    pub(crate) error: ErrorDetail,
}

#[derive(Deserialize)]
pub(crate) struct ErrorDetail {
    pub(crate) message: String,
}

// ── EmbeddingProvider implementation ───────────────────────────────

#[async_trait]
impl EmbeddingProvider for GeminiEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(provider = "Gemini", text_len = text.len(), model = %self.model, "embedding query");

        let url = format!("{}/models/{}:embedContent", self.base_url, self.model);
        let request_body =
            EmbedContentRequest { content: Content { parts: vec![Part { text }] } };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "Gemini", error = %e, "embedding request failed");
                PipelineError::Embedding {
                    provider: "Gemini".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            error!(provider = "Gemini", %status, "embedding API error");
            return Err(PipelineError::Embedding {
                provider: "Gemini".into(),
                message: format!("API returned {status}: {detail}"),
            });
        }

        let embed_response: EmbedContentResponse = response.json().await.map_err(|e| {
            error!(provider = "Gemini", error = %e, "failed to parse embedding response");
            PipelineError::Embedding {
                provider: "Gemini".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        Ok(embed_response.embedding.values)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
