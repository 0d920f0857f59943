//! Ollama embedding provider and generator over the Ollama HTTP API.
//!
//! This module is only available when the `ollama` feature is enabled.
//! The default embedding model is `all-minilm` (384 dimensions), the
//! reference configuration for this crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::generation::Generator;

/// The default Ollama server URL.
const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// The default embedding model.
const DEFAULT_EMBED_MODEL: &str = "all-minilm";

/// The output dimensionality of `all-minilm`.
const DEFAULT_EMBED_DIMENSIONS: usize = 384;

/// The default chat model for answer generation.
const DEFAULT_CHAT_MODEL: &str = "llama3.1:8b";

/// Resolve the server URL from `OLLAMA_BASE_URL`, falling back to localhost.
fn base_url_from_env() -> String {
    std::env::var("OLLAMA_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

/// Read the body of a failed response, preferring Ollama's `error` field.
async fn error_detail(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let detail =
        serde_json::from_str::<ErrorResponse>(&body).map(|e| e.error).unwrap_or(body);
    format!("API returned {status}: {detail}")
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

// ── Embedding provider ─────────────────────────────────────────────

/// An [`EmbeddingProvider`] backed by a local or remote Ollama server.
///
/// Uses `reqwest` to call the `/api/embed` endpoint, which embeds a whole
/// batch in one request.
///
/// # Configuration
///
/// - `model` – defaults to `all-minilm` (384 dimensions).
/// - `base_url` – from the constructor or the `OLLAMA_BASE_URL` environment
///   variable, defaulting to `http://localhost:11434`.
///
/// # Example
///
/// ```rust,ignore
/// use ragkit::ollama::OllamaEmbeddingProvider;
///
/// let provider = OllamaEmbeddingProvider::new();
/// let embedding = provider.embed("hello world").await?;
/// assert_eq!(embedding.len(), 384);
/// ```
pub struct OllamaEmbeddingProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimensions: usize,
}

impl OllamaEmbeddingProvider {
    /// Create a new provider using `OLLAMA_BASE_URL` or the default URL,
    /// with the default `all-minilm` model.
    pub fn new() -> Self {
        Self::with_base_url(base_url_from_env())
    }

    /// Create a new provider for the given server URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            model: DEFAULT_EMBED_MODEL.into(),
            dimensions: DEFAULT_EMBED_DIMENSIONS,
        }
    }

    /// Set the embedding model and its output dimensionality
    /// (e.g. `nomic-embed-text`, 768).
    pub fn with_model(mut self, model: impl Into<String>, dimensions: usize) -> Self {
        self.model = model.into();
        self.dimensions = dimensions;
        self
    }
}

impl Default for OllamaEmbeddingProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(provider = "Ollama", text_len = text.len(), "embedding single text");

        let results = self.embed_batch(&[text]).await?;
        results.into_iter().next().ok_or_else(|| RagError::EmbeddingError {
            provider: "Ollama".into(),
            message: "API returned empty response".into(),
        })
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(
            provider = "Ollama",
            batch_size = texts.len(),
            model = %self.model,
            "embedding batch"
        );

        let request_body = EmbedRequest { model: &self.model, input: texts.to_vec() };

        let response = self
            .client
            .post(format!("{}/api/embed", self.base_url))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "Ollama", error = %e, "request failed");
                RagError::EmbeddingError {
                    provider: "Ollama".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let message = error_detail(response).await;
            error!(provider = "Ollama", %message, "API error");
            return Err(RagError::EmbeddingError { provider: "Ollama".into(), message });
        }

        let embed_response: EmbedResponse = response.json().await.map_err(|e| {
            error!(provider = "Ollama", error = %e, "failed to parse response");
            RagError::EmbeddingError {
                provider: "Ollama".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        Ok(embed_response.embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

// ── Generator ──────────────────────────────────────────────────────

/// A [`Generator`] backed by the Ollama `/api/chat` endpoint.
///
/// Sends the assembled prompt as a single user message with streaming
/// disabled and returns the model's reply. Transport and API failures are
/// reported as [`RagError::GenerationError`], never folded into the answer
/// text.
///
/// # Example
///
/// ```rust,ignore
/// use ragkit::ollama::OllamaGenerator;
///
/// let generator = OllamaGenerator::new();
/// let answer = generator.generate(&prompt).await?;
/// ```
pub struct OllamaGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaGenerator {
    /// Create a new generator using `OLLAMA_BASE_URL` or the default URL,
    /// with the default `llama3.1:8b` model.
    pub fn new() -> Self {
        Self::with_base_url(base_url_from_env())
    }

    /// Create a new generator for the given server URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            model: DEFAULT_CHAT_MODEL.into(),
        }
    }

    /// Set the chat model (e.g. `llama3.2`, `mistral`).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl Default for OllamaGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[async_trait]
impl Generator for OllamaGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(provider = "Ollama", model = %self.model, prompt_len = prompt.len(), "generating");

        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "Ollama", error = %e, "request failed");
                RagError::GenerationError {
                    provider: "Ollama".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let message = error_detail(response).await;
            error!(provider = "Ollama", %message, "API error");
            return Err(RagError::GenerationError { provider: "Ollama".into(), message });
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            error!(provider = "Ollama", error = %e, "failed to parse response");
            RagError::GenerationError {
                provider: "Ollama".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        Ok(chat_response.message.content)
    }
}
