//! Configuration management for the embedpack ingestion CLI.
//!
//! Configuration is layered: command-line flags override
//! environment variables, which override the TOML file, which
//! overrides built-in defaults. Resolution happens once, before
//! the pipeline starts; nothing reads ambient configuration
//! mid-run. The destination bucket has one extra layer: when not
//! given explicitly it is resolved from the remote parameter
//! store.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{IngestError, Result};
use crate::core::params::ParameterClient;
use crate::core::store::Destination;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Chunking configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChunkingConfig {
    /// Maximum tokens per chunk (whitespace tokens, not model tokens)
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Token overlap between consecutive chunks
    #[serde(default = "default_overlap_tokens")]
    pub overlap_tokens: usize,

    /// File patterns to ingest (glob syntax)
    #[serde(default = "default_include_patterns")]
    pub include_patterns: Vec<String>,

    /// File patterns to exclude (glob syntax)
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Maximum file size in MB (skip larger files)
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: usize,
}

/// Embedding service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmbeddingConfig {
    /// Embedding model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Service region, used to derive default endpoints
    #[serde(default = "default_region")]
    pub region: String,

    /// Explicit runtime endpoint override
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// Output artifact configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Destination bucket; resolved remotely when absent
    #[serde(default)]
    pub bucket: Option<String>,

    /// Object key of the consolidated artifact
    #[serde(default = "default_output_key")]
    pub key: String,

    /// Remote parameter path holding the bucket name
    #[serde(default = "default_bucket_param")]
    pub bucket_param: String,

    /// Local directory destination instead of a bucket
    #[serde(default)]
    pub local_dir: Option<PathBuf>,
}

// Default value functions
fn default_max_tokens() -> usize {
    800
}

fn default_overlap_tokens() -> usize {
    80
}

fn default_include_patterns() -> Vec<String> {
    vec!["*.md".to_string()]
}

fn default_max_file_size() -> usize {
    10
}

fn default_model() -> String {
    "amazon.titan-embed-text-v2:0".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_output_key() -> String {
    "embeddings/embeddings.json".to_string()
}

fn default_bucket_param() -> String {
    "/embedpack/prod/rag/bucket-name".to_string()
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            overlap_tokens: default_overlap_tokens(),
            include_patterns: default_include_patterns(),
            exclude_patterns: Vec::new(),
            max_file_size_mb: default_max_file_size(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            region: default_region(),
            endpoint: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            bucket: None,
            key: default_output_key(),
            bucket_param: default_bucket_param(),
            local_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| IngestError::Config(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// The file is `EMBEDPACK_CONFIG` when set, otherwise
    /// `./embedpack.toml` when present, otherwise defaults.
    pub fn load() -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("EMBEDPACK_CONFIG") {
            Self::from_file(config_path)?
        } else if Path::new("embedpack.toml").exists() {
            Self::from_file("embedpack.toml")?
        } else {
            Self::default()
        };

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(max_tokens) = env::var("EMBEDPACK_MAX_CHUNK_TOKENS") {
            if let Ok(n) = max_tokens.parse() {
                self.chunking.max_tokens = n;
            }
        }
        if let Ok(overlap) = env::var("EMBEDPACK_CHUNK_OVERLAP_TOKENS") {
            if let Ok(n) = overlap.parse() {
                self.chunking.overlap_tokens = n;
            }
        }
        if let Ok(max_size) = env::var("EMBEDPACK_MAX_FILE_SIZE_MB") {
            if let Ok(n) = max_size.parse() {
                self.chunking.max_file_size_mb = n;
            }
        }

        if let Ok(model) = env::var("EMBEDPACK_MODEL") {
            self.embedding.model = model;
        }
        if let Ok(region) = env::var("AWS_REGION") {
            self.embedding.region = region;
        }

        if let Ok(bucket) = env::var("EMBEDPACK_BUCKET") {
            self.output.bucket = Some(bucket);
        }
        if let Ok(key) = env::var("EMBEDPACK_OUTPUT_KEY") {
            self.output.key = key;
        }
        if let Ok(param) = env::var("EMBEDPACK_BUCKET_PARAM") {
            self.output.bucket_param = param;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.chunking.max_tokens == 0 {
            return Err(IngestError::InvalidChunkConfig(
                "max_tokens must be non-zero".to_string(),
            ));
        }

        if self.chunking.overlap_tokens >= self.chunking.max_tokens {
            return Err(IngestError::InvalidChunkConfig(
                "overlap_tokens must be less than max_tokens".to_string(),
            ));
        }

        if self.chunking.max_file_size_mb == 0 {
            return Err(IngestError::Config(
                "Max file size must be non-zero".to_string(),
            ));
        }

        if self.output.key.trim().is_empty() {
            return Err(IngestError::Config(
                "Output key must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Runtime endpoint for the embedding service.
    pub fn embedding_endpoint(&self) -> String {
        self.embedding
            .endpoint
            .clone()
            .unwrap_or_else(|| {
                crate::core::embedder::TitanEmbedder::endpoint_for_region(&self.embedding.region)
            })
    }

    /// Resolve where the artifact goes, applying the precedence
    /// explicit argument > configured local directory > configured
    /// bucket > remote parameter.
    ///
    /// Called once, before the pipeline starts.
    pub async fn resolve_destination(&self, explicit_bucket: Option<&str>) -> Result<Destination> {
        if let Some(bucket) = explicit_bucket {
            return Ok(Destination::S3 {
                bucket: bucket.to_string(),
            });
        }

        if let Some(dir) = &self.output.local_dir {
            return Ok(Destination::Local { dir: dir.clone() });
        }

        if let Some(bucket) = &self.output.bucket {
            return Ok(Destination::S3 {
                bucket: bucket.clone(),
            });
        }

        let endpoint = ParameterClient::endpoint_for_region(&self.embedding.region);
        let client = ParameterClient::new(&endpoint)?;
        let bucket = client.get_parameter(&self.output.bucket_param).await?;
        tracing::info!(
            "Resolved destination bucket '{}' from parameter {}",
            bucket,
            self.output.bucket_param
        );

        Ok(Destination::S3 { bucket })
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Max chunk tokens: {}", self.chunking.max_tokens);
        tracing::info!("  Overlap tokens: {}", self.chunking.overlap_tokens);
        tracing::info!("  Max file size: {} MB", self.chunking.max_file_size_mb);
        tracing::info!("  Include patterns: {:?}", self.chunking.include_patterns);
        tracing::info!("  Exclude patterns: {:?}", self.chunking.exclude_patterns);
        tracing::info!("  Model: {}", self.embedding.model);
        tracing::info!("  Region: {}", self.embedding.region);
        tracing::info!("  Output key: {}", self.output.key);
    }
}
