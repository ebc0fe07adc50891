//! embedpack CLI entry point
//!
//! Runs one ingestion pass: chunk the documents under a source
//! directory, embed every chunk, and upload the consolidated
//! embeddings artifact.
//!
//! # Examples
//!
//! ```bash
//! # Ingest a docs tree into an explicit bucket
//! embedpack --source ./docs --bucket my-rag-bucket
//!
//! # Resolve the bucket from the remote parameter store
//! embedpack --source ./docs
//! ```

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use embedpack::cli::{self, Cli};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "embedpack=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = cli::run(cli).await {
        cli::output::print_error(&e.to_string());
        std::process::exit(1);
    }
}
