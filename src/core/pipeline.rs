//! Ingestion pipeline orchestration.
//!
//! Coordinates the end-to-end ingestion pass:
//! 1. Walk the source tree and read documents
//! 2. Split front matter from each document body
//! 3. Chunk the body into overlapping token windows
//! 4. Embed each chunk, skipping chunks whose embedding fails
//! 5. Assemble the consolidated manifest
//!
//! Failure isolation is at chunk granularity: an embedding
//! failure loses exactly one chunk and never aborts the run.
//! Discovery failures, by contrast, abort the run before any
//! artifact is produced.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::core::chunker::Chunker;
use crate::core::config::Config;
use crate::core::embedder::Embedder;
use crate::core::error::{IngestError, Result};
use crate::core::frontmatter;
use crate::core::types::{EmbeddingManifest, EmbeddingRecord, IngestStats, SourceDocument};
use crate::core::walker::SourceWalker;

/// Result of one ingestion pass
pub enum IngestOutcome {
    /// No documents matched under the source root; nothing was
    /// embedded and no artifact should be written
    NoDocuments,

    /// A populated run
    Completed {
        manifest: EmbeddingManifest,
        stats: IngestStats,
    },
}

/// Orchestrates the ingestion pipeline
pub struct IngestionPipeline {
    walker: SourceWalker,
    chunker: Chunker,
    embedder: Arc<dyn Embedder>,
    model: String,
}

impl IngestionPipeline {
    /// Create a pipeline from configuration and an embedding
    /// client.
    pub fn new(config: &Config, embedder: Arc<dyn Embedder>) -> Result<Self> {
        let walker = SourceWalker::new(
            config.chunking.include_patterns.clone(),
            config.chunking.exclude_patterns.clone(),
            config.chunking.max_file_size_mb,
        )?;
        let chunker = Chunker::new(config.chunking.max_tokens, config.chunking.overlap_tokens)?;

        Ok(Self {
            walker,
            chunker,
            embedder,
            model: config.embedding.model.clone(),
        })
    }

    /// Enumerate and read every matching document under `root`.
    ///
    /// Paths in the result are relative to `root`. Any
    /// enumeration or read failure is fatal: an artifact built
    /// from a partially read tree would silently drop documents.
    pub fn collect_documents(&self, root: &Path) -> Result<Vec<SourceDocument>> {
        let files = self.walker.collect_files(root)?;
        tracing::info!("Found {} documents under {:?}", files.len(), root);

        let mut documents = Vec::with_capacity(files.len());
        for file_path in files {
            let raw = fs::read_to_string(&file_path).map_err(|e| {
                IngestError::Discovery(format!("Failed to read {file_path:?}: {e}"))
            })?;

            let relative = file_path
                .strip_prefix(root)
                .unwrap_or(&file_path)
                .to_string_lossy()
                .into_owned();

            documents.push(SourceDocument {
                path: relative,
                raw,
            });
        }

        Ok(documents)
    }

    /// Run the embedding pass over already-collected documents.
    ///
    /// Records appear in document order, then ascending chunk
    /// index, regardless of how many chunks failed. Each failed
    /// chunk is logged with its document path and index, counted,
    /// and permanently omitted.
    pub async fn run(
        &self,
        documents: &[SourceDocument],
    ) -> Result<(EmbeddingManifest, IngestStats)> {
        let start = Instant::now();

        let mut records = Vec::new();
        let mut chunks_failed = 0;

        for document in documents {
            let (metadata, body) = frontmatter::extract(&document.raw);
            let chunks = self.chunker.chunk_text(body, &document.path);
            tracing::info!("{} => {} chunks", document.path, chunks.len());

            for chunk in &chunks {
                match self.embedder.embed(&chunk.text).await {
                    Ok(embedding) => {
                        records.push(EmbeddingRecord::new(chunk, metadata.clone(), embedding));
                    }
                    Err(e) => {
                        tracing::error!(
                            "Embedding failed for {} chunk {}: {}",
                            document.path,
                            chunk.chunk_index,
                            e
                        );
                        chunks_failed += 1;
                        // This chunk is lost; the run continues
                    }
                }
            }
        }

        let stats = IngestStats {
            files_processed: documents.len(),
            chunks_embedded: records.len(),
            chunks_failed,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        tracing::info!(
            "Ingestion pass complete: {} files, {} chunks embedded, {} skipped in {}ms",
            stats.files_processed,
            stats.chunks_embedded,
            stats.chunks_failed,
            stats.duration_ms
        );

        Ok((EmbeddingManifest::new(self.model.clone(), records), stats))
    }

    /// Full pass over a source root.
    ///
    /// A root with no matching documents is a distinct outcome,
    /// not an error: callers treat it as a no-op.
    pub async fn ingest(&self, root: &Path) -> Result<IngestOutcome> {
        let documents = self.collect_documents(root)?;

        if documents.is_empty() {
            return Ok(IngestOutcome::NoDocuments);
        }

        let (manifest, stats) = self.run(&documents).await?;
        Ok(IngestOutcome::Completed { manifest, stats })
    }
}
