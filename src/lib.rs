//! embedpack - RAG ingestion CLI
//!
//! Ingests a directory of text documents, splits each into
//! overlapping token-bounded chunks, embeds every chunk via an
//! external embedding service, and uploads one consolidated
//! embeddings artifact to object storage.
//!
//! # Architecture
//!
//! The codebase is organized into two modules:
//!
//! - **core**: Domain logic (interface-agnostic)
//!   - config, error, types
//!   - chunker (token windows), frontmatter, walker
//!   - embedder, params, store (external collaborators)
//!   - pipeline (orchestration and failure isolation)
//!
//! - **cli**: Command-line adapter (depends on core)
//!
//! # Key Behaviors
//!
//! - Token-window chunking with configurable overlap
//! - Partial-failure tolerance at chunk granularity: a failed
//!   embedding call skips one chunk, never the run
//! - Deterministic record ordering (document order, then chunk
//!   index)
//! - Single consolidated JSON artifact, written only after the
//!   full pass completes

// Core domain logic (interface-agnostic)
pub mod core;

// CLI adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use self::core::config::Config;
pub use self::core::error::{IngestError, Result};
pub use self::core::pipeline::{IngestOutcome, IngestionPipeline};
pub use self::core::types::*;
