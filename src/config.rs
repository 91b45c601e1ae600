//! Configuration for the writing pipeline.

use std::path::PathBuf;

use crate::error::{PipelineError, Result};

/// Default generation model.
pub const DEFAULT_GENERATION_MODEL: &str = "gemini-1.5-flash";

/// Default embedding model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "embedding-001";

/// Default location of the persisted index snapshot.
pub const DEFAULT_INDEX_PATH: &str = "persistent_db.json";

/// Environment variable holding the Gemini API key.
const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Environment variable overriding the index snapshot path.
const INDEX_PATH_VAR: &str = "WARRAQ_INDEX_PATH";

/// Configuration parameters for the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// API key for the generation and embedding service.
    pub api_key: String,
    /// Path to the persisted index snapshot produced by the ingestion job.
    pub index_path: PathBuf,
    /// Model identifier used for generation calls.
    pub generation_model: String,
    /// Model identifier used for query embedding.
    pub embedding_model: String,
}

impl PipelineConfig {
    /// Create a new builder for constructing a [`PipelineConfig`].
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Load configuration from the process environment.
    ///
    /// Requires `GEMINI_API_KEY`; honors `WARRAQ_INDEX_PATH` as an override
    /// of the default snapshot location.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] if the API key is absent. This is a
    /// fatal startup condition; the pipeline never becomes reachable without
    /// a credential.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_VAR).map_err(|_| {
            PipelineError::Config(format!("{API_KEY_VAR} environment variable not set"))
        })?;

        let mut builder = Self::builder().api_key(api_key);
        if let Ok(path) = std::env::var(INDEX_PATH_VAR) {
            builder = builder.index_path(path);
        }
        builder.build()
    }
}

/// Builder for constructing a validated [`PipelineConfig`].
#[derive(Debug, Clone, Default)]
pub struct PipelineConfigBuilder {
    api_key: Option<String>,
    index_path: Option<PathBuf>,
    generation_model: Option<String>,
    embedding_model: Option<String>,
}

impl PipelineConfigBuilder {
    /// Set the API key for the generation and embedding service.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the path to the persisted index snapshot.
    pub fn index_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.index_path = Some(path.into());
        self
    }

    /// Set the generation model identifier.
    pub fn generation_model(mut self, model: impl Into<String>) -> Self {
        self.generation_model = Some(model.into());
        self
    }

    /// Set the embedding model identifier.
    pub fn embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = Some(model.into());
        self
    }

    /// Build the [`PipelineConfig`], validating required fields.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] if the API key is missing or empty.
    pub fn build(self) -> Result<PipelineConfig> {
        let api_key = self
            .api_key
            .ok_or_else(|| PipelineError::Config("api_key is required".to_string()))?;
        if api_key.is_empty() {
            return Err(PipelineError::Config("api_key must not be empty".to_string()));
        }

        Ok(PipelineConfig {
            api_key,
            index_path: self.index_path.unwrap_or_else(|| PathBuf::from(DEFAULT_INDEX_PATH)),
            generation_model: self
                .generation_model
                .unwrap_or_else(|| DEFAULT_GENERATION_MODEL.to_string()),
            embedding_model: self
                .embedding_model
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
        })
    }
}
