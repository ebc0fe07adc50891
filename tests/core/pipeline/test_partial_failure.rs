// Integration tests for chunk-level failure isolation

use std::sync::Arc;

use embedpack::core::types::SourceDocument;

use crate::common::{
    numbered_tokens, test_pipeline_with_windows, CountingEmbedder, FixedEmbedder, FlakyEmbedder,
};

fn doc(path: &str, raw: &str) -> SourceDocument {
    SourceDocument {
        path: path.to_string(),
        raw: raw.to_string(),
    }
}

#[tokio::test]
async fn test_failed_chunks_are_omitted_not_fatal() {
    // 22 tokens at max=10/overlap=2 chunk as [0,10) [8,18)
    // [16,22); the marker t12 only lands in the middle window.
    let pipeline = test_pipeline_with_windows(Arc::new(FlakyEmbedder { marker: "t12" }), 10, 2);
    let documents = vec![
        doc("first.md", &numbered_tokens(22)),
        doc("second.md", "short and clean"),
    ];

    let (manifest, stats) = pipeline.run(&documents).await.unwrap();

    let ids: Vec<&str> = manifest.items.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["first.md#0", "first.md#2", "second.md#0"]);
    assert_eq!(manifest.chunk_count, 3);
    assert_eq!(stats.chunks_embedded, 3);
    assert_eq!(stats.chunks_failed, 1);
    assert_eq!(stats.files_processed, 2);
}

#[tokio::test]
async fn test_failure_in_one_document_does_not_affect_next() {
    let pipeline = test_pipeline_with_windows(Arc::new(FlakyEmbedder { marker: "poison" }), 10, 2);
    let documents = vec![
        doc("bad.md", "this document is poison throughout"),
        doc("good.md", "this one embeds fine"),
    ];

    let (manifest, stats) = pipeline.run(&documents).await.unwrap();

    assert_eq!(manifest.chunk_count, 1);
    assert_eq!(manifest.items[0].id, "good.md#0");
    assert_eq!(stats.chunks_failed, 1);
}

#[tokio::test]
async fn test_record_identifiers_and_order_survive_failures() {
    // The marker "t25 " (with trailing space) only matches the
    // final window of first.md at max=10/overlap=2.
    let pipeline = test_pipeline_with_windows(Arc::new(FlakyEmbedder { marker: "t25 " }), 10, 2);
    let documents = vec![
        doc("first.md", &(numbered_tokens(30) + " end")),
        doc("second.md", &numbered_tokens(5)),
    ];

    let (manifest, _stats) = pipeline.run(&documents).await.unwrap();

    // Remaining records keep their original indices and order
    let ids: Vec<&str> = manifest.items.iter().map(|r| r.id.as_str()).collect();
    assert!(ids.contains(&"first.md#0"));
    assert!(ids.contains(&"second.md#0"));
    assert!(!ids.contains(&"first.md#3"));
    let first_positions: Vec<usize> = manifest
        .items
        .iter()
        .enumerate()
        .filter(|(_, r)| r.file == "first.md")
        .map(|(i, _)| i)
        .collect();
    let max_first = first_positions.iter().max().copied().unwrap_or(0);
    let second_position = manifest
        .items
        .iter()
        .position(|r| r.file == "second.md")
        .unwrap();
    assert!(max_first < second_position);
}

#[tokio::test]
async fn test_no_documents_means_no_embedding_calls() {
    let embedder = Arc::new(CountingEmbedder::default());
    let pipeline = test_pipeline_with_windows(embedder.clone(), 10, 2);

    let (manifest, stats) = pipeline.run(&[]).await.unwrap();

    assert_eq!(embedder.calls(), 0);
    assert_eq!(manifest.chunk_count, 0);
    assert_eq!(stats.files_processed, 0);
}

#[tokio::test]
async fn test_every_chunk_gets_one_embedding_call() {
    let embedder = Arc::new(CountingEmbedder::default());
    let pipeline = test_pipeline_with_windows(embedder.clone(), 10, 2);
    let documents = vec![doc("a.md", &numbered_tokens(22)), doc("b.md", "one chunk")];

    let (manifest, _stats) = pipeline.run(&documents).await.unwrap();

    assert_eq!(manifest.chunk_count, 4);
    assert_eq!(embedder.calls(), 4);
}

#[tokio::test]
async fn test_fixed_embedder_vector_is_attached() {
    let pipeline = test_pipeline_with_windows(Arc::new(FixedEmbedder), 800, 80);
    let documents = vec![doc("doc.md", &numbered_tokens(1000))];

    let (manifest, _stats) = pipeline.run(&documents).await.unwrap();

    assert_eq!(manifest.chunk_count, 2);
    for record in &manifest.items {
        assert_eq!(record.embedding, vec![1.0, 0.0]);
    }
}
