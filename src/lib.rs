//! Retrieval-augmented generation for grounded academic writing.
//!
//! `warraq` answers requests like "write a paper on X" or "summarize
//! chapter Y" by retrieving the semantically nearest passages from a
//! precomputed, read-only embedding snapshot of a personal document corpus
//! and feeding them to a generative model under a strict anti-plagiarism
//! instruction set.
//!
//! The pipeline runs five stages strictly in order:
//!
//! 1. [`VectorIndex`] — embed the query and return the `k` nearest passages
//!    (k = 25 for full papers, 15 for summaries);
//! 2. [`ContextAssembler`] — join the passages into one context block;
//! 3. [`PromptComposer`] — frame the task, interpolate the user requirements
//!    and the context verbatim, and append the fixed constraint block;
//! 4. [`GenerationClient`] — call the model with the task's sampling
//!    temperature (0.5 for full papers, 0.2 for summaries);
//! 5. [`SessionContext`] — store the result for re-display and export.
//!
//! The index snapshot is produced by a separate ingestion job and never
//! mutated here; if it is absent the pipeline reports the knowledge base as
//! unavailable and makes no generation call.
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
//! let request = QueryRequest::new(TaskType::FullPaper, "Write a 5-page paper on ...");
//! let result = pipeline.run(&request, &mut session).await?;
//!
//! let artifact = session.export().unwrap();
//! assert_eq!(artifact.file_name, "MyResearchPaper.txt");
//! ```

pub mod config;
pub mod context;
pub mod document;
pub mod embedding;
pub mod error;
pub mod generation;
pub mod index;
pub mod pipeline;
pub mod prompt;
pub mod session;
pub mod store;

pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use context::ContextAssembler;
pub use document::{IndexEntry, QueryRequest, RetrievedDocument, TaskType};
pub use embedding::{EmbeddingProvider, GeminiEmbeddingProvider};
pub use error::{PipelineError, Result};
pub use generation::{GeminiGenerationClient, GenerationClient};
pub use index::VectorIndex;
pub use pipeline::{Pipeline, PipelineBuilder};
pub use prompt::{PromptComposer, STRICT_INSTRUCTIONS};
pub use session::{ExportArtifact, GenerationResult, SessionContext};
pub use store::{IndexSnapshot, SnapshotVectorStore, VectorStore};
