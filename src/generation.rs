//! Generator trait for producing answers from grounded prompts.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::document::SearchResult;
use crate::error::Result;

/// A generative model that turns an assembled prompt into answer text.
///
/// Failures are reported as
/// [`RagError::GenerationError`](crate::RagError::GenerationError), never as
/// error text masquerading as an answer — callers distinguish success from
/// failure by type, not by inspecting the returned string.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate answer text for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// A generated answer together with the retrieved chunks that grounded it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundedAnswer {
    /// The generated answer text.
    pub text: String,
    /// The retrieved chunks the prompt was assembled from, in prompt order.
    pub sources: Vec<SearchResult>,
}
