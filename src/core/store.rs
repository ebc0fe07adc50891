//! Artifact storage.
//!
//! The consolidated manifest is written as one object to a
//! storage backend behind the `object_store` abstraction: Amazon
//! S3 in production, a local directory for development runs, and
//! an in-memory store for tests. The store is invoked exactly
//! once per populated run, after the full pass completes; there
//! are no partial or streaming writes.

use std::sync::Arc;

use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::{path::Path as ObjPath, ObjectStore, PutPayload};

use crate::core::error::{IngestError, Result};

/// Shared handle to any storage backend
pub type DynStore = Arc<dyn ObjectStore>;

/// Where the artifact lands
#[derive(Debug, Clone)]
pub enum Destination {
    /// An S3 bucket, addressed by name
    S3 { bucket: String },

    /// A local directory (mainly for development runs)
    Local { dir: std::path::PathBuf },
}

impl Destination {
    /// Human-readable location for log and summary lines.
    pub fn describe(&self) -> String {
        match self {
            Destination::S3 { bucket } => format!("s3://{bucket}"),
            Destination::Local { dir } => dir.display().to_string(),
        }
    }
}

/// Artifact sink over an object-store backend
#[derive(Clone)]
pub struct ArtifactStore {
    store: DynStore,
    location: String,
}

impl ArtifactStore {
    /// Create a store for the given destination.
    ///
    /// The S3 backend picks credentials and region up from the
    /// environment; the local backend creates its directory if
    /// missing.
    pub fn new(destination: &Destination) -> Result<Self> {
        let store: DynStore = match destination {
            Destination::S3 { bucket } => {
                let s3 = AmazonS3Builder::from_env()
                    .with_bucket_name(bucket.clone())
                    .build()
                    .map_err(|e| {
                        IngestError::Storage(format!("failed to open bucket '{bucket}': {e}"))
                    })?;
                Arc::new(s3)
            }
            Destination::Local { dir } => {
                std::fs::create_dir_all(dir)?;
                let fs = LocalFileSystem::new_with_prefix(dir).map_err(|e| {
                    IngestError::Storage(format!(
                        "failed to open local destination {:?}: {e}",
                        dir
                    ))
                })?;
                Arc::new(fs)
            }
        };

        Ok(Self {
            store,
            location: destination.describe(),
        })
    }

    /// Create a store over an injected backend (tests).
    pub fn with_backend(store: DynStore, location: impl Into<String>) -> Self {
        Self {
            store,
            location: location.into(),
        }
    }

    /// Create an in-memory store (tests).
    pub fn in_memory() -> Self {
        Self::with_backend(Arc::new(InMemory::new()), "memory://")
    }

    /// Human-readable destination this store writes to.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Write the artifact bytes at `key`, overwriting any
    /// previous artifact.
    pub async fn put(&self, key: &str, data: Bytes) -> Result<()> {
        let path = ObjPath::from(key);
        self.store
            .put(&path, PutPayload::from_bytes(data))
            .await
            .map(|_| ())
            .map_err(|e| {
                IngestError::Storage(format!(
                    "failed to store artifact at {}/{key}: {e}",
                    self.location
                ))
            })
    }

    /// Read back the artifact bytes at `key` (tests and
    /// verification tooling).
    pub async fn get(&self, key: &str) -> Result<Bytes> {
        let path = ObjPath::from(key);
        let result = self
            .store
            .get(&path)
            .await
            .map_err(|e| IngestError::Storage(format!("failed to read {key}: {e}")))?;
        result
            .bytes()
            .await
            .map_err(|e| IngestError::Storage(format!("failed to read {key}: {e}")))
    }
}
