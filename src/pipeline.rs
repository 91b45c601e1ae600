//! Pipeline orchestrator: validate → retrieve → assemble → compose →
//! generate → store.
//!
//! # Example
//!
//! ```rust,ignore
//! use warraq::{Pipeline, PipelineConfig, QueryRequest, SessionContext, TaskType};
//!
//! let config = PipelineConfig::from_env()?;
//! let pipeline = Pipeline::from_config(&config).await?;
//!
//! let mut session = SessionContext::new();
//! let request = QueryRequest::new(TaskType::Summary, "Summarize chapter 5");
//! let result = pipeline.run(&request, &mut session).await?;
//! println!("{}", result.text);
//! ```

use std::sync::Arc;

use tracing::{error, info};

use crate::config::PipelineConfig;
use crate::context::ContextAssembler;
use crate::document::QueryRequest;
use crate::error::{PipelineError, Result};
use crate::generation::{GeminiGenerationClient, GenerationClient};
use crate::index::VectorIndex;
use crate::prompt::PromptComposer;
use crate::session::{GenerationResult, SessionContext};

/// The retrieval-augmented writing pipeline.
///
/// Stages execute strictly sequentially; a failure at any stage aborts the
/// run and leaves the session untouched. Construct one via
/// [`Pipeline::builder()`] or [`Pipeline::from_config()`].
pub struct Pipeline {
    index: Arc<VectorIndex>,
    assembler: ContextAssembler,
    generator: Arc<dyn GenerationClient>,
}

impl Pipeline {
    /// Create a new [`PipelineBuilder`].
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Build a pipeline from configuration: the process-wide shared
    /// [`VectorIndex`] plus a Gemini generation client.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::IndexUnavailable`] if the index snapshot is
    /// absent, or [`PipelineError::Generation`] if the client cannot be
    /// constructed.
    pub async fn from_config(config: &PipelineConfig) -> Result<Self> {
        let index = VectorIndex::shared(config).await?;
        let generator =
            GeminiGenerationClient::new(&config.api_key)?.with_model(&config.generation_model);

        Ok(Self {
            index,
            assembler: ContextAssembler::new(),
            generator: Arc::new(generator),
        })
    }

    /// Run one request through the pipeline.
    ///
    /// On success the result is stored into `session` (overwriting any
    /// previous result) and returned. On any failure the session keeps its
    /// pre-call state.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::InvalidRequest`] for empty requirements, raised
    ///   before any retrieval or generation call;
    /// - [`PipelineError::Embedding`] / [`PipelineError::Store`] from the
    ///   retrieval stage;
    /// - [`PipelineError::Generation`] from the generation service.
    pub async fn run(
        &self,
        request: &QueryRequest,
        session: &mut SessionContext,
    ) -> Result<GenerationResult> {
        if request.requirements.trim().is_empty() {
            return Err(PipelineError::InvalidRequest(
                "requirements must not be empty".to_string(),
            ));
        }

        let task = request.task;
        let documents = self.index.search(&request.requirements, task.top_k()).await?;

        let context = self.assembler.join(&documents);
        let prompt = PromptComposer::compose(task, &request.requirements, &context);

        let text =
            self.generator.generate(&prompt, task.temperature()).await.map_err(|e| {
                error!(model = self.generator.model(), error = %e, "generation stage failed");
                e
            })?;

        let result = GenerationResult { text, task };
        session.store(result.clone());

        info!(
            task = ?task,
            retrieved = documents.len(),
            result_len = result.text.len(),
            "pipeline run completed"
        );
        Ok(result)
    }
}

/// Builder for constructing a [`Pipeline`].
///
/// `index` and `generator` are required; the assembler defaults to the
/// double line-break separator.
#[derive(Default)]
pub struct PipelineBuilder {
    index: Option<Arc<VectorIndex>>,
    assembler: Option<ContextAssembler>,
    generator: Option<Arc<dyn GenerationClient>>,
}

impl PipelineBuilder {
    /// Set the vector index handle.
    pub fn index(mut self, index: Arc<VectorIndex>) -> Self {
        self.index = Some(index);
        self
    }

    /// Set the context assembler.
    pub fn assembler(mut self, assembler: ContextAssembler) -> Self {
        self.assembler = Some(assembler);
        self
    }

    /// Set the generation client.
    pub fn generator(mut self, generator: Arc<dyn GenerationClient>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Build the [`Pipeline`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] if `index` or `generator` is
    /// missing.
    pub fn build(self) -> Result<Pipeline> {
        let index =
            self.index.ok_or_else(|| PipelineError::Config("index is required".to_string()))?;
        let generator = self
            .generator
            .ok_or_else(|| PipelineError::Config("generator is required".to_string()))?;

        Ok(Pipeline {
            index,
            assembler: self.assembler.unwrap_or_default(),
            generator,
        })
    }
}
