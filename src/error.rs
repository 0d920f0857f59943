//! Error types for the `ragkit` crate.

use thiserror::Error;

/// Errors that can occur in RAG operations.
///
/// Pipeline methods propagate capability errors unchanged, so callers can
/// match on the variant to distinguish a model failure from a store failure
/// rather than inspecting message strings.
#[derive(Debug, Error)]
pub enum RagError {
    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    EmbeddingError {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred during answer generation.
    #[error("Generation error ({provider}): {message}")]
    GenerationError {
        /// The generator that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A collection already exists with different dimensions or metric.
    #[error("Collection '{collection}' conflict: {message}")]
    CollectionConflict {
        /// The collection name.
        collection: String,
        /// A description of the mismatch.
        message: String,
    },

    /// An operation referenced a collection that does not exist.
    #[error("Collection '{collection}' not found")]
    CollectionNotFound {
        /// The collection name.
        collection: String,
    },

    /// An error occurred in the vector store backend.
    #[error("Vector store error ({backend}): {message}")]
    VectorStoreError {
        /// The vector store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// An invariant violation in the pipeline orchestration.
    #[error("Pipeline error: {0}")]
    PipelineError(String),
}

/// A convenience result type for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
