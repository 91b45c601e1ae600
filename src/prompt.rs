//! Prompt composition with the fixed anti-plagiarism constraint block.
//!
//! Every prompt carries the same five hard rules regardless of task; only
//! the role framing and the requested output shape differ between full-paper
//! generation and summarization.

use crate::document::TaskType;

/// The non-negotiable rules appended to every composed prompt.
///
/// Exposed so callers and tests can verify prompt completeness without
/// duplicating the wording.
pub const STRICT_INSTRUCTIONS: [&str; 5] = [
    "Produce a complete, coherent academic piece that satisfies the stated requirements exactly.",
    "Use exclusively the information in the reference material above; do not introduce outside knowledge.",
    "Rewrite every fact in your own academic voice. Copying any sentence verbatim from the reference material is strictly forbidden (no direct quotes).",
    "The final wording must be 100% original phrasing.",
    "Never mention \"the source\" or \"the retrieved information\"; state facts with direct authority.",
];

/// Builds the task-specific instruction prompt.
///
/// Pure string composition: the user requirements and the assembled context
/// are interpolated verbatim, never summarized or truncated.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptComposer;

impl PromptComposer {
    /// Compose the full prompt for one pipeline run.
    ///
    /// Output order: role framing, verbatim `requirements`, verbatim
    /// `context` (which may be empty), then [`STRICT_INSTRUCTIONS`].
    pub fn compose(task: TaskType, requirements: &str, context: &str) -> String {
        let (role, request) = match task {
            TaskType::FullPaper => (
                "You are a professor and an expert academic writer.",
                "Write a complete, multi-section academic paper that fulfils the requirements below.",
            ),
            TaskType::Summary => (
                "You are an expert at summarizing complex academic material.",
                "Produce a comprehensive summary of the topic below as bullet points covering the main ideas, precise, direct, and easy to follow.",
            ),
        };

        let mut prompt = String::new();
        prompt.push_str(role);
        prompt.push('\n');
        prompt.push_str(request);
        prompt.push_str("\n\n[User requirements]:\n");
        prompt.push_str(requirements);
        prompt.push_str("\n\n[Retrieved reference material]:\n");
        prompt.push_str(context);
        prompt.push_str("\n\nStrict instructions:\n");
        for (i, rule) in STRICT_INSTRUCTIONS.iter().enumerate() {
            prompt.push_str(&format!("{}. {rule}\n", i + 1));
        }
        prompt
    }
}
