//! Core data types for the embedpack ingestion pipeline.
//!
//! This module defines the data structures that flow through a
//! run: chunks cut from source documents, the embedding records
//! built from them, and the consolidated manifest that becomes
//! the output artifact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single token-window chunk cut from a document body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk text (tokens rejoined by single spaces)
    pub text: String,

    /// Source file path, relative to the ingestion root
    pub file: String,

    /// Zero-based sequential chunk number within the file
    pub chunk_index: usize,

    /// Number of tokens in this chunk
    pub token_count: usize,
}

impl Chunk {
    /// Composite identifier: `<file>#<chunk_index>`
    pub fn id(&self) -> String {
        format!("{}#{}", self.file, self.chunk_index)
    }
}

/// One embedded chunk, the unit of the output artifact.
///
/// Created only when the embedding call for a chunk succeeds;
/// chunks whose embedding fails are omitted entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    /// Composite identifier: `<file>#<chunk_index>`
    pub id: String,

    /// Source file path, relative to the ingestion root
    pub file: String,

    /// Zero-based chunk number within the file
    pub chunk_index: usize,

    /// Chunk text that was embedded
    pub text: String,

    /// Front-matter metadata of the owning document
    pub metadata: Map<String, Value>,

    /// Embedding vector returned by the service
    pub embedding: Vec<f32>,
}

impl EmbeddingRecord {
    /// Build a record from a chunk, its document metadata, and
    /// the vector returned by the embedding service.
    pub fn new(chunk: &Chunk, metadata: Map<String, Value>, embedding: Vec<f32>) -> Self {
        Self {
            id: chunk.id(),
            file: chunk.file.clone(),
            chunk_index: chunk.chunk_index,
            text: chunk.text.clone(),
            metadata,
            embedding,
        }
    }
}

/// The consolidated output artifact of one ingestion run.
///
/// Serialized as a single JSON object and written to the
/// artifact store after the full pass completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingManifest {
    /// Embedding model identifier used for every record
    pub model: String,

    /// Generation timestamp (ISO 8601)
    pub generated_at: DateTime<Utc>,

    /// Number of records in `items`
    pub chunk_count: usize,

    /// Records in document-enumeration order, then ascending
    /// chunk index within each document
    pub items: Vec<EmbeddingRecord>,
}

impl EmbeddingManifest {
    /// Assemble the manifest from the accumulated records.
    pub fn new(model: impl Into<String>, items: Vec<EmbeddingRecord>) -> Self {
        Self {
            model: model.into(),
            generated_at: Utc::now(),
            chunk_count: items.len(),
            items,
        }
    }
}

/// Statistics from an ingestion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestStats {
    /// Number of documents processed
    pub files_processed: usize,

    /// Chunks successfully embedded
    pub chunks_embedded: usize,

    /// Chunks skipped because their embedding call failed
    pub chunks_failed: usize,

    /// Run duration in milliseconds
    pub duration_ms: u64,
}

/// A source document read from the ingestion root
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Path relative to the ingestion root, with `/` separators
    pub path: String,

    /// Raw file contents (front matter still attached)
    pub raw: String,
}
