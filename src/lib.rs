//! Retrieval-augmented generation pipeline for Rust.
//!
//! `ragkit` turns raw text into retrievable, embedded chunks and turns
//! queries into ranked, grounded context for a generative model. The crate
//! owns the orchestration contract — deterministic chunking, the
//! embedding/vector-store boundaries, similarity retrieval, and prompt
//! assembly — while the embedding model, vector store engine, and generator
//! stay behind capability traits with swappable backends.
//!
//! # Components
//!
//! - [`FixedSizeChunker`] — overlapping fixed-size windows by character count
//! - [`EmbeddingProvider`] — text → fixed-dimension vector (single and batch)
//! - [`VectorStore`] — named collections of embedded chunks with top-k search
//! - [`RagPipeline`] — ingest (chunk → embed → upsert), retrieve, and answer
//! - [`assemble_prompt`] — deterministic grounded-prompt template
//! - [`Generator`] — assembled prompt → answer text
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ragkit::{Document, FixedSizeChunker, InMemoryVectorStore, RagConfig, RagPipeline};
//!
//! let pipeline = RagPipeline::builder()
//!     .config(RagConfig::default())
//!     .embedding_provider(Arc::new(embedder))
//!     .vector_store(Arc::new(InMemoryVectorStore::new()))
//!     .chunker(Arc::new(FixedSizeChunker::new(500, 50)?))
//!     .build()?;
//!
//! pipeline.ensure_collection().await?;
//! pipeline.ingest(&Document::new("Qdrant is a vector database.")).await?;
//! let results = pipeline.query("What is Qdrant?").await?;
//! ```
//!
//! # Backends
//!
//! [`InMemoryVectorStore`] is always available and doubles as the
//! deterministic test stand-in. Remote backends are feature-gated:
//! `qdrant` (vector store), `ollama` and `openai` (embeddings and
//! generation).

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod generation;
pub mod inmemory;
pub mod pipeline;
pub mod prompt;
pub mod vectorstore;

#[cfg(feature = "ollama")]
pub mod ollama;
#[cfg(feature = "openai")]
pub mod openai;
#[cfg(feature = "qdrant")]
pub mod qdrant;

pub use chunking::{Chunker, FixedSizeChunker, TextWindow};
pub use config::{RagConfig, RagConfigBuilder};
pub use document::{Chunk, Document, SearchResult};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use generation::{Generator, GroundedAnswer};
pub use inmemory::InMemoryVectorStore;
pub use pipeline::{RagPipeline, RagPipelineBuilder};
pub use prompt::assemble_prompt;
pub use vectorstore::{Metric, VectorStore};
