//! CLI adapter for embedpack
//!
//! A single-command interface: point it at a source directory,
//! optionally name the destination bucket, and it runs one full
//! ingestion pass.
//!
//! ```text
//! embedpack --source ./docs --bucket my-rag-bucket
//! embedpack --source ./docs            # bucket resolved remotely
//! ```

pub mod output;

use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::config::Config;
use crate::core::embedder::TitanEmbedder;
use crate::core::pipeline::{IngestOutcome, IngestionPipeline};
use crate::core::store::ArtifactStore;
use output::{colors, format_duration, print_warning};

/// Environment variable holding the embedding service bearer token
const API_KEY_ENV: &str = "AWS_BEARER_TOKEN_BEDROCK";

/// embedpack - RAG ingestion CLI
///
/// Chunks the text documents under a source directory, embeds
/// every chunk, and uploads one consolidated embeddings JSON
/// artifact to object storage.
#[derive(Parser, Debug)]
#[command(name = "embedpack")]
#[command(version)]
#[command(about = "Chunk, embed, and ship a document tree as one embeddings artifact", long_about = None)]
pub struct Cli {
    /// Source directory of documents to ingest
    #[arg(long, value_name = "DIR")]
    pub source: PathBuf,

    /// Destination bucket (resolved from the remote parameter
    /// store when omitted)
    #[arg(long, value_name = "NAME")]
    pub bucket: Option<String>,

    /// Embedding model identifier
    #[arg(long, value_name = "MODEL_ID")]
    pub model: Option<String>,

    /// Maximum tokens per chunk
    #[arg(long, value_name = "N")]
    pub max_tokens: Option<usize>,

    /// Token overlap between consecutive chunks
    #[arg(long, value_name = "N")]
    pub overlap_tokens: Option<usize>,

    /// Object key of the output artifact
    #[arg(long, value_name = "KEY")]
    pub output_key: Option<String>,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress progress output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Output format for the run summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output for scripting
    Json,
}

/// Run summary emitted after a populated run
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub source: String,
    pub destination: String,
    pub key: String,
    pub model: String,
    pub files_processed: usize,
    pub chunks_embedded: usize,
    pub chunks_failed: usize,
    pub duration_secs: f64,
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Validate source directory
    let source = cli.source.canonicalize().map_err(|e| {
        format!(
            "Source directory '{}' is not accessible: {}. \
             Pass an existing directory with --source.",
            cli.source.display(),
            e
        )
    })?;

    if !source.is_dir() {
        return Err(format!(
            "Source path '{}' is not a directory.",
            source.display()
        )
        .into());
    }

    // Load configuration and apply command-line overrides
    let mut config = Config::load()?;
    if let Some(model) = cli.model {
        config.embedding.model = model;
    }
    if let Some(max_tokens) = cli.max_tokens {
        config.chunking.max_tokens = max_tokens;
    }
    if let Some(overlap_tokens) = cli.overlap_tokens {
        config.chunking.overlap_tokens = overlap_tokens;
    }
    if let Some(key) = cli.output_key {
        config.output.key = key;
    }
    config.validate()?;
    config.log_config();

    // Resolve the destination and open the store up front, so a
    // misconfigured destination fails before any embedding call
    let destination = config.resolve_destination(cli.bucket.as_deref()).await?;
    let store = ArtifactStore::new(&destination)?;

    let api_key = std::env::var(API_KEY_ENV).ok();
    let embedder = TitanEmbedder::new(
        &config.embedding_endpoint(),
        &config.embedding.model,
        api_key.as_deref(),
    )?;

    let pipeline = IngestionPipeline::new(&config, Arc::new(embedder))?;

    if !cli.quiet && cli.format == OutputFormat::Human {
        eprintln!(
            "Ingesting {} into {}...",
            colors::file_path(&source.display().to_string()),
            colors::file_path(store.location())
        );
    }

    // Run the pass
    let outcome = pipeline.ingest(&source).await?;

    let (manifest, stats) = match outcome {
        IngestOutcome::NoDocuments => {
            print_warning(&format!(
                "No matching documents found under {}. No artifact produced.",
                source.display()
            ));
            return Ok(());
        }
        IngestOutcome::Completed { manifest, stats } => (manifest, stats),
    };

    // Persist the consolidated artifact
    let body = serde_json::to_vec(&manifest)?;
    store.put(&config.output.key, body.into()).await?;

    let response = IngestResponse {
        source: source.to_string_lossy().into_owned(),
        destination: store.location().to_string(),
        key: config.output.key.clone(),
        model: manifest.model.clone(),
        files_processed: stats.files_processed,
        chunks_embedded: stats.chunks_embedded,
        chunks_failed: stats.chunks_failed,
        duration_secs: stats.duration_ms as f64 / 1000.0,
    };

    match cli.format {
        OutputFormat::Human => {
            println!(
                "{} {} files ({} chunks, {} skipped) in {}",
                colors::success("Ingested"),
                colors::number(&response.files_processed.to_string()),
                colors::number(&response.chunks_embedded.to_string()),
                colors::number(&response.chunks_failed.to_string()),
                colors::number(&format_duration(response.duration_secs))
            );
            println!(
                "Uploaded embeddings artifact: {}",
                colors::file_path(&format!("{}/{}", response.destination, response.key))
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
