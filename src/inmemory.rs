//! In-memory vector store.
//!
//! This module provides [`InMemoryVectorStore`], a zero-dependency vector
//! store backed by a `HashMap` protected by a `tokio::sync::RwLock`. It is
//! suitable for development, testing, and small-scale use cases, and serves
//! as the deterministic stand-in for exercising the pipeline without a
//! running vector database.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::document::{Chunk, SearchResult};
use crate::error::{RagError, Result};
use crate::vectorstore::{Metric, VectorStore};

const BACKEND: &str = "in-memory";

/// One named collection: fixed dimensions and metric, chunks by id, and the
/// id insertion order used for deterministic tie-breaking.
struct Collection {
    dimensions: usize,
    metric: Metric,
    chunks: HashMap<String, Chunk>,
    order: Vec<String>,
}

/// An in-memory [`VectorStore`] scoring with the collection's metric.
///
/// Search results with equal scores are returned in insertion order. All
/// operations are async-safe via `tokio::sync::RwLock`.
///
/// # Example
///
/// ```rust,ignore
/// use ragkit::{InMemoryVectorStore, Metric, VectorStore};
///
/// let store = InMemoryVectorStore::new();
/// store.ensure_collection("docs", 384, Metric::Cosine).await?;
/// ```
#[derive(Default)]
pub struct InMemoryVectorStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl InMemoryVectorStore {
    /// Create a new empty in-memory vector store.
    pub fn new() -> Self {
        Self::default()
    }

    fn dimension_error(expected: usize, got: usize) -> RagError {
        RagError::VectorStoreError {
            backend: BACKEND.to_string(),
            message: format!("embedding dimension {got} does not match collection dimension {expected}"),
        }
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn score(metric: Metric, a: &[f32], b: &[f32]) -> f32 {
    match metric {
        Metric::Cosine => cosine_similarity(a, b),
        Metric::Dot => dot_product(a, b),
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn ensure_collection(
        &self,
        name: &str,
        dimensions: usize,
        metric: Metric,
    ) -> Result<()> {
        let mut collections = self.collections.write().await;
        if let Some(existing) = collections.get(name) {
            if existing.dimensions != dimensions || existing.metric != metric {
                return Err(RagError::CollectionConflict {
                    collection: name.to_string(),
                    message: format!(
                        "exists with dimensions {} and metric {}, requested dimensions {} and metric {}",
                        existing.dimensions, existing.metric, dimensions, metric
                    ),
                });
            }
            debug!(collection = name, "collection already exists, skipping creation");
            return Ok(());
        }

        collections.insert(
            name.to_string(),
            Collection { dimensions, metric, chunks: HashMap::new(), order: Vec::new() },
        );
        debug!(collection = name, dimensions, %metric, "created collection");
        Ok(())
    }

    async fn upsert(&self, collection: &str, chunks: &[Chunk]) -> Result<()> {
        if chunks.is_empty() {
            return Ok(());
        }

        let mut collections = self.collections.write().await;
        let store = collections.get_mut(collection).ok_or_else(|| {
            RagError::CollectionNotFound { collection: collection.to_string() }
        })?;

        for chunk in chunks {
            if chunk.embedding.len() != store.dimensions {
                return Err(Self::dimension_error(store.dimensions, chunk.embedding.len()));
            }
            if !store.chunks.contains_key(&chunk.id) {
                store.order.push(chunk.id.clone());
            }
            store.chunks.insert(chunk.id.clone(), chunk.clone());
        }
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchResult>> {
        let collections = self.collections.read().await;
        let store = collections.get(collection).ok_or_else(|| {
            RagError::CollectionNotFound { collection: collection.to_string() }
        })?;

        if embedding.len() != store.dimensions {
            return Err(Self::dimension_error(store.dimensions, embedding.len()));
        }

        // Iterate in insertion order; the stable sort below then breaks
        // score ties by insertion order.
        let mut scored: Vec<SearchResult> = store
            .order
            .iter()
            .filter_map(|id| store.chunks.get(id))
            .map(|chunk| SearchResult {
                id: chunk.id.clone(),
                score: score(store.metric, &chunk.embedding, embedding),
                text: chunk.text.clone(),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);
        Ok(scored)
    }
}
