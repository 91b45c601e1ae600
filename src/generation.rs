//! Generation client trait and the Gemini `generateContent` REST client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::{ErrorResponse, GEMINI_API_BASE};
use crate::error::{PipelineError, Result};

/// A client that submits a composed prompt to a generative model.
///
/// There is deliberately no retry and no crate-enforced timeout around
/// `generate`; callers that need either should wrap the trait.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// The model identifier this client targets.
    fn model(&self) -> &str;

    /// Submit a prompt and return the raw generated text.
    ///
    /// # Errors
    ///
    /// Any transport, quota, authentication, or malformed-response condition
    /// surfaces as [`PipelineError::Generation`] carrying the underlying
    /// cause.
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String>;
}

/// A [`GenerationClient`] backed by the Gemini `generateContent` API.
///
/// # Example
///
/// ```rust,ignore
/// use warraq::GeminiGenerationClient;
///
/// let client = GeminiGenerationClient::new("your-api-key")?;
/// let text = client.generate("Write a haiku about ownership.", 0.5).await?;
/// ```
pub struct GeminiGenerationClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiGenerationClient {
    /// Create a new client with the given API key and the default
    /// `gemini-1.5-flash` model.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(PipelineError::Generation {
                provider: "Gemini".into(),
                message: "API key must not be empty".into(),
            });
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model: crate::config::DEFAULT_GENERATION_MODEL.into(),
            base_url: GEMINI_API_BASE.into(),
        })
    }

    /// Set the generation model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL (test servers, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

// ── Gemini API request/response types ──────────────────────────────

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

// ── GenerationClient implementation ────────────────────────────────

#[async_trait]
impl GenerationClient for GeminiGenerationClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String> {
        debug!(
            provider = "Gemini",
            model = %self.model,
            temperature,
            prompt_len = prompt.len(),
            "submitting generation request"
        );

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let request_body = GenerateContentRequest {
            contents: vec![RequestContent { parts: vec![RequestPart { text: prompt }] }],
            generation_config: GenerationConfig { temperature },
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "Gemini", error = %e, "generation request failed");
                PipelineError::Generation {
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

            error!(provider = "Gemini", %status, "generation API error");
            return Err(PipelineError::Generation {
                provider: "Gemini".into(),
                message: format!("API returned {status}: {detail}"),
            });
        }

        let generate_response: GenerateContentResponse = response.json().await.map_err(|e| {
            error!(provider = "Gemini", error = %e, "failed to parse generation response");
            PipelineError::Generation {
                provider: "Gemini".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        let Some(candidate) = generate_response.candidates.into_iter().next() else {
            return Err(PipelineError::Generation {
                provider: "Gemini".into(),
                message: "response contained no candidates".into(),
            });
        };

        let text: String =
            candidate.content.parts.into_iter().map(|p| p.text).collect::<Vec<_>>().join("");
        if text.is_empty() {
            return Err(PipelineError::Generation {
                provider: "Gemini".into(),
                message: "response candidate contained no text".into(),
            });
        }

        Ok(text)
    }
}
