//! Vector store trait for storing and searching vector embeddings.

use std::fmt;

use async_trait::async_trait;

use crate::document::{Chunk, SearchResult};
use crate::error::Result;

/// Similarity metric for a collection, fixed at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Cosine similarity (the deployment default).
    Cosine,
    /// Dot product.
    Dot,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Cosine => f.write_str("cosine"),
            Metric::Dot => f.write_str("dot"),
        }
    }
}

/// A storage backend for vector embeddings with similarity search.
///
/// Implementations manage named collections of [`Chunk`]s. A collection's
/// dimensions and metric are fixed when it is first created; every vector
/// stored in or queried against it must have that dimension.
///
/// # Example
///
/// ```rust,ignore
/// use ragkit::{InMemoryVectorStore, Metric, VectorStore};
///
/// let store = InMemoryVectorStore::new();
/// store.ensure_collection("docs", 384, Metric::Cosine).await?;
/// store.upsert("docs", &chunks).await?;
/// let results = store.search("docs", &query_embedding, 5).await?;
/// ```
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Create a named collection if it does not already exist.
    ///
    /// Idempotent: calling this for an existing collection with the same
    /// dimensions and metric is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::CollectionConflict`](crate::RagError::CollectionConflict)
    /// if the collection exists with different dimensions or metric.
    async fn ensure_collection(&self, name: &str, dimensions: usize, metric: Metric)
    -> Result<()>;

    /// Insert or replace chunks by id. Chunks must have embeddings set.
    ///
    /// An empty slice is a no-op. Visibility is atomic per chunk: a reader
    /// never observes a chunk with a vector but no text. Atomicity across
    /// the whole batch is not guaranteed.
    async fn upsert(&self, collection: &str, chunks: &[Chunk]) -> Result<()>;

    /// Search for the `top_k` most similar chunks to the given embedding.
    ///
    /// Returns at most `top_k` results ordered by descending similarity
    /// score under the collection's metric; fewer if the collection holds
    /// fewer chunks, and none for an empty collection. Tie ordering is
    /// deterministic but backend-defined (the in-memory store uses
    /// insertion order).
    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchResult>>;
}
