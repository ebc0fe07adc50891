// End-to-end tests: source tree -> pipeline -> stored artifact

use std::sync::Arc;

use embedpack::core::pipeline::IngestOutcome;
use embedpack::core::store::ArtifactStore;
use embedpack::core::types::EmbeddingManifest;

use crate::common::{test_pipeline_with_windows, CountingEmbedder, DocTree, FixedEmbedder};

const ARTIFACT_KEY: &str = "embeddings/embeddings.json";

#[tokio::test]
async fn test_full_pass_produces_parseable_artifact() {
    let tree = DocTree::small();
    let pipeline = test_pipeline_with_windows(Arc::new(FixedEmbedder), 800, 80);
    let store = ArtifactStore::in_memory();

    let outcome = pipeline.ingest(tree.path()).await.unwrap();
    let IngestOutcome::Completed { manifest, stats } = outcome else {
        panic!("expected a populated run");
    };

    let body = serde_json::to_vec(&manifest).unwrap();
    store.put(ARTIFACT_KEY, body.into()).await.unwrap();

    // The stored bytes round-trip into the manifest shape
    let stored = store.get(ARTIFACT_KEY).await.unwrap();
    let parsed: EmbeddingManifest = serde_json::from_slice(&stored).unwrap();

    assert_eq!(parsed.chunk_count, parsed.items.len());
    assert_eq!(parsed.chunk_count, stats.chunks_embedded);
    assert_eq!(parsed.model, "amazon.titan-embed-text-v2:0");
    // Three markdown files, one chunk each at the default window
    assert_eq!(stats.files_processed, 3);
}

#[tokio::test]
async fn test_artifact_field_shape() {
    let tree = DocTree::with_files(&[(
        "guide.md",
        "---\ntitle: Guide\nversion: 2\n---\nbody tokens for the only chunk",
    )]);
    let pipeline = test_pipeline_with_windows(Arc::new(FixedEmbedder), 800, 80);

    let outcome = pipeline.ingest(tree.path()).await.unwrap();
    let IngestOutcome::Completed { manifest, .. } = outcome else {
        panic!("expected a populated run");
    };

    let json: serde_json::Value = serde_json::to_value(&manifest).unwrap();

    assert!(json["generated_at"].is_string());
    assert_eq!(json["chunk_count"], 1);
    let item = &json["items"][0];
    assert_eq!(item["id"], "guide.md#0");
    assert_eq!(item["file"], "guide.md");
    assert_eq!(item["chunk_index"], 0);
    assert_eq!(item["text"], "body tokens for the only chunk");
    assert_eq!(item["metadata"]["title"], "Guide");
    assert_eq!(item["metadata"]["version"], 2);
    assert_eq!(item["embedding"], serde_json::json!([1.0, 0.0]));
}

#[tokio::test]
async fn test_empty_tree_produces_no_artifact_and_no_calls() {
    let tree = DocTree::with_files(&[("notes.txt", "wrong extension")]);
    let embedder = Arc::new(CountingEmbedder::default());
    let pipeline = test_pipeline_with_windows(embedder.clone(), 800, 80);
    let store = ArtifactStore::in_memory();

    let outcome = pipeline.ingest(tree.path()).await.unwrap();

    assert!(matches!(outcome, IngestOutcome::NoDocuments));
    assert_eq!(embedder.calls(), 0);
    // Nothing was written
    assert!(store.get(ARTIFACT_KEY).await.is_err());
}

#[tokio::test]
async fn test_records_follow_sorted_document_order() {
    let tree = DocTree::with_files(&[
        ("b.md", "second doc body"),
        ("a.md", "first doc body"),
        ("nested/c.md", "third doc body"),
    ]);
    let pipeline = test_pipeline_with_windows(Arc::new(FixedEmbedder), 800, 80);

    let outcome = pipeline.ingest(tree.path()).await.unwrap();
    let IngestOutcome::Completed { manifest, .. } = outcome else {
        panic!("expected a populated run");
    };

    let files: Vec<&str> = manifest.items.iter().map(|r| r.file.as_str()).collect();
    assert_eq!(files, vec!["a.md", "b.md", "nested/c.md"]);
}
