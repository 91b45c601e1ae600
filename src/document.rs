//! Data types for index entries, retrieved passages, and user requests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A corpus passage as persisted by the ingestion job.
///
/// Entries are written once by the out-of-process indexing collaborator and
/// are read-only from the pipeline's perspective.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexEntry {
    /// Unique identifier for the passage.
    pub id: String,
    /// The text content of the passage.
    pub text: String,
    /// The vector embedding for this passage's text.
    pub embedding: Vec<f32>,
    /// Key-value metadata attached by the ingestion job.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// A passage returned by similarity search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedDocument {
    /// The text content of the passage.
    pub text: String,
    /// The similarity score (higher is more relevant).
    pub score: f32,
    /// Ordinal position in the result list (0 = nearest).
    pub rank: usize,
}

/// The two writing tasks the pipeline supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskType {
    /// Generate a complete multi-section academic paper.
    FullPaper,
    /// Produce a bullet-point summary of the requested topic.
    Summary,
}

impl TaskType {
    /// Number of passages retrieved for this task.
    pub fn top_k(self) -> usize {
        match self {
            TaskType::FullPaper => 25,
            TaskType::Summary => 15,
        }
    }

    /// Sampling temperature for the generation call.
    ///
    /// Summarization uses a lower temperature to favor fidelity over
    /// creativity.
    pub fn temperature(self) -> f32 {
        match self {
            TaskType::FullPaper => 0.5,
            TaskType::Summary => 0.2,
        }
    }
}

/// A single user request, created per interaction and discarded after the
/// pipeline run completes.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    /// Which writing task to perform.
    pub task: TaskType,
    /// The raw user-supplied requirements or topic text.
    pub requirements: String,
}

impl QueryRequest {
    /// Create a new request. Validation happens at the pipeline gate, not here.
    pub fn new(task: TaskType, requirements: impl Into<String>) -> Self {
        Self { task, requirements: requirements.into() }
    }
}
