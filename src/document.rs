//! Data types for documents, chunks, and search results.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// A source document containing text content and metadata.
///
/// Documents are ephemeral: they exist only for the duration of ingestion.
/// The caller-supplied `id` is carried through to the stored chunks as
/// `document_id`; it is never used as a chunk id (chunk ids are minted fresh
/// by the pipeline on every ingestion).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Optional caller-supplied identifier for the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The text content of the document.
    pub text: String,
    /// Key-value metadata associated with the document.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Document {
    /// Create a new document from raw text, with no id and no metadata.
    pub fn new(text: impl Into<String>) -> Self {
        Self { id: None, text: text.into(), metadata: HashMap::new() }
    }

    /// Set the caller-supplied document id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a metadata key-value pair.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Read a plain-text (UTF-8) file into a document.
    ///
    /// The file path is recorded in the `source` metadata field. Structured
    /// formats (PDF, HTML) are not handled here; extract their text upstream
    /// and pass it to [`Document::new`].
    pub fn from_text_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Ok(Self::new(text).with_metadata("source", path.display().to_string()))
    }
}

/// A segment of a [`Document`] with its vector embedding, as persisted in
/// the vector store.
///
/// `start..end` is the byte range of the chunk in the source text (always on
/// `char` boundaries). Chunks are immutable once upserted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Unique identifier for the chunk (a UUID, minted by the pipeline).
    pub id: String,
    /// The text content of the chunk.
    pub text: String,
    /// Byte offset of the chunk's start in the source text.
    pub start: usize,
    /// Byte offset one past the chunk's end in the source text.
    pub end: usize,
    /// The vector embedding for this chunk's text.
    pub embedding: Vec<f32>,
    /// The id of the source [`Document`], when the caller supplied one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    /// Key-value metadata inherited from the source document.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// A retrieved chunk paired with a relevance score.
///
/// Results carry the chunk text so callers can build a grounded prompt
/// without a second store lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    /// The id of the retrieved chunk.
    pub id: String,
    /// The similarity score under the collection's metric (higher is more relevant).
    pub score: f32,
    /// The text of the retrieved chunk.
    pub text: String,
}
