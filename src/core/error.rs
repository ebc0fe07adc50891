//! Error types and error handling for the embedpack ingestion CLI.
//!
//! One enum covers the whole run. The split that matters is
//! fatal vs. recoverable: everything here aborts the run except
//! `Embedding`, which the pipeline absorbs per chunk.

use thiserror::Error;

/// Result type alias for embedpack operations
pub type Result<T> = std::result::Result<T, IngestError>;

/// Main error type for the ingestion pipeline
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Discovery error: {0}")]
    Discovery(String),

    #[error("Invalid chunk configuration: {0}")]
    InvalidChunkConfig(String),

    #[error("Embedding service error: {0}")]
    Embedding(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl IngestError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check whether this error aborts the whole run.
    ///
    /// Embedding failures are local to one chunk; the pipeline
    /// logs and skips them. Everything else is fatal.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, IngestError::Embedding(_))
    }

    /// Check if this is a configuration defect (bad input from
    /// the operator rather than a runtime failure)
    pub fn is_config_defect(&self) -> bool {
        matches!(
            self,
            IngestError::Config(_) | IngestError::InvalidChunkConfig(_)
        )
    }
}
