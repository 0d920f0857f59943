//! RAG pipeline orchestrator.
//!
//! The [`RagPipeline`] coordinates the full ingest-and-answer workflow by
//! composing an [`EmbeddingProvider`], a [`VectorStore`], a [`Chunker`],
//! and an optional [`Generator`].
//!
//! # Example
//!
//! ```rust,ignore
//! use ragkit::{FixedSizeChunker, InMemoryVectorStore, RagConfig, RagPipeline};
//!
//! let pipeline = RagPipeline::builder()
//!     .config(RagConfig::default())
//!     .embedding_provider(Arc::new(my_embedder))
//!     .vector_store(Arc::new(InMemoryVectorStore::new()))
//!     .chunker(Arc::new(FixedSizeChunker::new(500, 50)?))
//!     .build()?;
//!
//! pipeline.ensure_collection().await?;
//! let indexed = pipeline.ingest(&document).await?;
//! let results = pipeline.query("search query").await?;
//! ```

use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use crate::chunking::Chunker;
use crate::config::RagConfig;
use crate::document::{Chunk, Document, SearchResult};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::generation::{Generator, GroundedAnswer};
use crate::prompt::assemble_prompt;
use crate::vectorstore::{Metric, VectorStore};

/// The RAG pipeline orchestrator.
///
/// Coordinates document ingestion (chunk → embed → store) and retrieval
/// (embed → search), plus end-to-end grounded answering when a generator is
/// configured. Each pipeline targets the single collection named in its
/// [`RagConfig`]; construct one via [`RagPipeline::builder()`].
///
/// Pipelines are stateless between calls: any number of ingestions and
/// queries may run concurrently against the same collection.
pub struct RagPipeline {
    config: RagConfig,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStore>,
    chunker: Arc<dyn Chunker>,
    generator: Option<Arc<dyn Generator>>,
}

impl RagPipeline {
    /// Create a new [`RagPipelineBuilder`].
    pub fn builder() -> RagPipelineBuilder {
        RagPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Return a reference to the embedding provider.
    pub fn embedding_provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.embedding_provider
    }

    /// Return a reference to the vector store.
    pub fn vector_store(&self) -> &Arc<dyn VectorStore> {
        &self.vector_store
    }

    /// Create the configured collection in the vector store if absent.
    ///
    /// The collection is created with cosine similarity and the
    /// dimensionality reported by the configured [`EmbeddingProvider`].
    /// Concurrent callers rely on the store's idempotent-create semantics;
    /// the pipeline adds no locking of its own.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::CollectionConflict`] if the collection already
    /// exists with different dimensions or metric.
    pub async fn ensure_collection(&self) -> Result<()> {
        let dimensions = self.embedding_provider.dimensions();
        self.vector_store
            .ensure_collection(&self.config.collection, dimensions, Metric::Cosine)
            .await
            .inspect_err(|e| {
                error!(collection = %self.config.collection, error = %e, "failed to ensure collection");
            })
    }

    /// Ingest a single document: chunk → embed → store.
    ///
    /// Returns the number of chunks indexed. An empty document indexes
    /// nothing and returns `Ok(0)`. Every chunk gets a freshly minted UUID —
    /// a caller-supplied document id is carried on the stored chunks as
    /// `document_id` but is never reused at chunk granularity, so
    /// re-ingesting a document adds new points rather than replacing old
    /// ones.
    ///
    /// Embedding happens in one batch call and storage in one upsert call;
    /// if either fails the whole document is aborted and nothing is indexed.
    ///
    /// # Errors
    ///
    /// Propagates [`RagError::EmbeddingError`] and store errors unchanged.
    pub async fn ingest(&self, document: &Document) -> Result<usize> {
        let windows = self.chunker.chunk(&document.text);
        if windows.is_empty() {
            info!(document_id = ?document.id, chunk_count = 0, "ingested document (empty)");
            return Ok(0);
        }

        let texts: Vec<&str> = windows.iter().map(|w| w.text.as_str()).collect();
        let embeddings = self.embedding_provider.embed_batch(&texts).await.inspect_err(|e| {
            error!(document_id = ?document.id, error = %e, "embedding failed during ingestion");
        })?;

        if embeddings.len() != windows.len() {
            return Err(RagError::PipelineError(format!(
                "embedding provider returned {} vectors for {} chunks",
                embeddings.len(),
                windows.len()
            )));
        }

        let chunks: Vec<Chunk> = windows
            .into_iter()
            .zip(embeddings)
            .map(|(window, embedding)| Chunk {
                id: Uuid::new_v4().to_string(),
                text: window.text,
                start: window.start,
                end: window.end,
                embedding,
                document_id: document.id.clone(),
                metadata: document.metadata.clone(),
            })
            .collect();

        self.vector_store.upsert(&self.config.collection, &chunks).await.inspect_err(|e| {
            error!(document_id = ?document.id, error = %e, "upsert failed during ingestion");
        })?;

        let chunk_count = chunks.len();
        info!(document_id = ?document.id, chunk_count, "ingested document");
        Ok(chunk_count)
    }

    /// Ingest multiple documents through the chunk → embed → store workflow.
    ///
    /// Returns the total number of chunks indexed across all documents.
    ///
    /// # Errors
    ///
    /// Fails on the first document that fails; documents ingested before it
    /// remain indexed.
    pub async fn ingest_batch(&self, documents: &[Document]) -> Result<usize> {
        let mut total = 0;
        for document in documents {
            total += self.ingest(document).await?;
        }
        Ok(total)
    }

    /// Retrieve the `top_k` most relevant chunks for a query.
    ///
    /// Embeds the query, searches the collection, and returns the store's
    /// results unmodified, preserving the store-assigned ordering. A `top_k`
    /// of zero returns an empty list without invoking the store.
    ///
    /// # Errors
    ///
    /// Propagates [`RagError::EmbeddingError`] and store errors unchanged,
    /// including [`RagError::CollectionNotFound`] for a collection that was
    /// never created.
    pub async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>> {
        if top_k == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedding_provider.embed(query).await.inspect_err(|e| {
            error!(error = %e, "embedding failed during query");
        })?;

        let results = self
            .vector_store
            .search(&self.config.collection, &query_embedding, top_k)
            .await
            .inspect_err(|e| {
                error!(collection = %self.config.collection, error = %e, "vector store search failed");
            })?;

        info!(collection = %self.config.collection, result_count = results.len(), "query completed");
        Ok(results)
    }

    /// Retrieve using the configured `top_k`.
    pub async fn query(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.retrieve(query, self.config.top_k).await
    }

    /// Answer a question end to end: retrieve → assemble prompt → generate.
    ///
    /// Returns the generated text together with the retrieved chunks that
    /// grounded it. With no relevant chunks the generator still runs, on a
    /// prompt with an empty documents section; deciding how to answer
    /// without grounding is the model's concern.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if no generator was configured on
    /// the builder, and propagates retrieval and
    /// [`RagError::GenerationError`] failures unchanged.
    pub async fn answer(&self, question: &str) -> Result<GroundedAnswer> {
        let Some(generator) = &self.generator else {
            return Err(RagError::ConfigError(
                "no generator configured: set one on the pipeline builder to use answer()"
                    .to_string(),
            ));
        };

        let sources = self.query(question).await?;
        let texts: Vec<&str> = sources.iter().map(|r| r.text.as_str()).collect();
        let prompt = assemble_prompt(question, &texts);

        let text = generator.generate(&prompt).await.inspect_err(|e| {
            error!(error = %e, "generation failed");
        })?;

        info!(source_count = sources.len(), "answer generated");
        Ok(GroundedAnswer { text, sources })
    }
}

/// Builder for constructing a [`RagPipeline`].
///
/// All fields except `generator` are required. Call
/// [`build()`](RagPipelineBuilder::build) to validate and produce the
/// pipeline.
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = RagPipeline::builder()
///     .config(RagConfig::default())
///     .embedding_provider(Arc::new(embedder))
///     .vector_store(Arc::new(store))
///     .chunker(Arc::new(chunker))
///     .generator(Arc::new(generator))  // optional
///     .build()?;
/// ```
#[derive(Default)]
pub struct RagPipelineBuilder {
    config: Option<RagConfig>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    vector_store: Option<Arc<dyn VectorStore>>,
    chunker: Option<Arc<dyn Chunker>>,
    generator: Option<Arc<dyn Generator>>,
}

impl RagPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the vector store backend.
    pub fn vector_store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.vector_store = Some(store);
        self
    }

    /// Set the document chunker.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Set an optional generator for end-to-end grounded answering.
    pub fn generator(mut self, generator: Arc<dyn Generator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Build the [`RagPipeline`], validating that all required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if any required field is missing.
    pub fn build(self) -> Result<RagPipeline> {
        let config =
            self.config.ok_or_else(|| RagError::ConfigError("config is required".to_string()))?;
        let embedding_provider = self
            .embedding_provider
            .ok_or_else(|| RagError::ConfigError("embedding_provider is required".to_string()))?;
        let vector_store = self
            .vector_store
            .ok_or_else(|| RagError::ConfigError("vector_store is required".to_string()))?;
        let chunker =
            self.chunker.ok_or_else(|| RagError::ConfigError("chunker is required".to_string()))?;

        Ok(RagPipeline {
            config,
            embedding_provider,
            vector_store,
            chunker,
            generator: self.generator,
        })
    }
}
