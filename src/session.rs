//! Session-scoped result cache and the export view over it.
//!
//! A [`SessionContext`] belongs to exactly one user session and is passed
//! into each pipeline run by `&mut`, which makes the exclusive-ownership
//! invariant explicit. It is never shared across sessions and holds only
//! the most recent successful result.

use serde::{Deserialize, Serialize};

use crate::document::TaskType;

/// Fixed file name of the exported artifact.
pub const EXPORT_FILE_NAME: &str = "MyResearchPaper.txt";

/// MIME type of the exported artifact.
pub const EXPORT_MIME_TYPE: &str = "text/plain";

/// The output of one successful pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationResult {
    /// The generated text.
    pub text: String,
    /// The task that produced it.
    pub task: TaskType,
}

/// A downloadable view over a stored result.
///
/// Purely a read view; producing one does not mutate the session.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    /// Suggested download file name.
    pub file_name: &'static str,
    /// MIME type of the payload.
    pub mime_type: &'static str,
    /// The generated text.
    pub data: String,
}

/// Holds the most recent successful result for one user session.
#[derive(Debug, Default)]
pub struct SessionContext {
    last_result: Option<GenerationResult>,
}

impl SessionContext {
    /// Create an empty session context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any previous result unconditionally.
    pub fn store(&mut self, result: GenerationResult) {
        self.last_result = Some(result);
    }

    /// The most recent successful result, if any run has completed.
    pub fn last(&self) -> Option<&GenerationResult> {
        self.last_result.as_ref()
    }

    /// Expose the stored text as a downloadable plain-text artifact.
    ///
    /// Returns `None` until a run has succeeded in this session.
    pub fn export(&self) -> Option<ExportArtifact> {
        self.last_result.as_ref().map(|result| ExportArtifact {
            file_name: EXPORT_FILE_NAME,
            mime_type: EXPORT_MIME_TYPE,
            data: result.text.clone(),
        })
    }
}
