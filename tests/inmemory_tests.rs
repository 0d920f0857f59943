//! Behavior and property tests for the in-memory vector store.

use std::collections::HashMap;

use proptest::prelude::*;
use ragkit::document::Chunk;
use ragkit::inmemory::InMemoryVectorStore;
use ragkit::vectorstore::{Metric, VectorStore};
use ragkit::RagError;

fn chunk(id: &str, text: &str, embedding: Vec<f32>) -> Chunk {
    Chunk {
        id: id.to_string(),
        text: text.to_string(),
        start: 0,
        end: text.len(),
        embedding,
        document_id: None,
        metadata: HashMap::new(),
    }
}

#[tokio::test]
async fn ensure_collection_is_idempotent() {
    let store = InMemoryVectorStore::new();
    store.ensure_collection("docs", 4, Metric::Cosine).await.unwrap();
    store.ensure_collection("docs", 4, Metric::Cosine).await.unwrap();
}

#[tokio::test]
async fn ensure_collection_rejects_dimension_change() {
    let store = InMemoryVectorStore::new();
    store.ensure_collection("docs", 4, Metric::Cosine).await.unwrap();
    let err = store.ensure_collection("docs", 8, Metric::Cosine).await.unwrap_err();
    assert!(matches!(err, RagError::CollectionConflict { .. }));
}

#[tokio::test]
async fn ensure_collection_rejects_metric_change() {
    let store = InMemoryVectorStore::new();
    store.ensure_collection("docs", 4, Metric::Cosine).await.unwrap();
    let err = store.ensure_collection("docs", 4, Metric::Dot).await.unwrap_err();
    assert!(matches!(err, RagError::CollectionConflict { .. }));
}

#[tokio::test]
async fn search_on_unknown_collection_is_not_found() {
    let store = InMemoryVectorStore::new();
    let err = store.search("missing", &[0.0; 4], 3).await.unwrap_err();
    assert!(matches!(err, RagError::CollectionNotFound { collection } if collection == "missing"));
}

#[tokio::test]
async fn search_on_empty_collection_returns_nothing() {
    let store = InMemoryVectorStore::new();
    store.ensure_collection("docs", 4, Metric::Cosine).await.unwrap();
    let results = store.search("docs", &[1.0, 0.0, 0.0, 0.0], 5).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn empty_upsert_is_a_no_op() {
    let store = InMemoryVectorStore::new();
    store.ensure_collection("docs", 4, Metric::Cosine).await.unwrap();
    store.upsert("docs", &[]).await.unwrap();
}

#[tokio::test]
async fn upsert_rejects_wrong_dimension() {
    let store = InMemoryVectorStore::new();
    store.ensure_collection("docs", 4, Metric::Cosine).await.unwrap();
    let err = store.upsert("docs", &[chunk("a", "text", vec![1.0, 0.0])]).await.unwrap_err();
    assert!(matches!(err, RagError::VectorStoreError { .. }));
}

#[tokio::test]
async fn upsert_replaces_by_id() {
    let store = InMemoryVectorStore::new();
    store.ensure_collection("docs", 2, Metric::Cosine).await.unwrap();
    store.upsert("docs", &[chunk("a", "old", vec![1.0, 0.0])]).await.unwrap();
    store.upsert("docs", &[chunk("a", "new", vec![1.0, 0.0])]).await.unwrap();

    let results = store.search("docs", &[1.0, 0.0], 10).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].text, "new");
}

#[tokio::test]
async fn equal_scores_keep_insertion_order() {
    let store = InMemoryVectorStore::new();
    store.ensure_collection("docs", 2, Metric::Cosine).await.unwrap();
    store
        .upsert(
            "docs",
            &[
                chunk("first", "one", vec![1.0, 0.0]),
                chunk("second", "two", vec![1.0, 0.0]),
                chunk("third", "three", vec![1.0, 0.0]),
            ],
        )
        .await
        .unwrap();

    let results = store.search("docs", &[1.0, 0.0], 10).await.unwrap();
    let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["first", "second", "third"]);
}

#[tokio::test]
async fn dot_metric_scores_by_dot_product() {
    let store = InMemoryVectorStore::new();
    store.ensure_collection("docs", 2, Metric::Dot).await.unwrap();
    store
        .upsert(
            "docs",
            &[chunk("short", "s", vec![1.0, 0.0]), chunk("long", "l", vec![3.0, 0.0])],
        )
        .await
        .unwrap();

    // Under cosine these would tie; under dot the longer vector wins.
    let results = store.search("docs", &[1.0, 0.0], 2).await.unwrap();
    assert_eq!(results[0].id, "long");
}

/// Generate a non-zero L2-normalized embedding of the given dimension.
fn arb_normalized_embedding(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, dim).prop_filter_map(
        "non-zero embedding",
        |mut v| {
            let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm < 1e-8 {
                return None;
            }
            for val in &mut v {
                *val /= norm;
            }
            Some(v)
        },
    )
}

/// Generate a chunk with a normalized embedding.
fn arb_chunk(dim: usize) -> impl Strategy<Value = Chunk> {
    ("[a-z]{3,8}", "[a-z ]{5,30}", arb_normalized_embedding(dim))
        .prop_map(|(id, text, embedding)| chunk(&id, &text, embedding))
}

/// For any set of stored chunks, search returns results ordered by
/// descending similarity score, bounded by both `top_k` and the number of
/// stored chunks.
mod prop_search_ordering {
    use super::*;

    const DIM: usize = 16;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn results_ordered_descending_and_bounded_by_top_k(
            chunks in proptest::collection::vec(arb_chunk(DIM), 1..20),
            query in arb_normalized_embedding(DIM),
            top_k in 1usize..25,
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let (results, unique_count) = rt.block_on(async {
                let store = InMemoryVectorStore::new();
                store.ensure_collection("test", DIM, Metric::Cosine).await.unwrap();

                // Deduplicate chunks by id to avoid upsert overwriting
                let mut deduped: HashMap<String, Chunk> = HashMap::new();
                for c in &chunks {
                    deduped.entry(c.id.clone()).or_insert_with(|| c.clone());
                }
                let unique_chunks: Vec<Chunk> = deduped.into_values().collect();
                let count = unique_chunks.len();

                store.upsert("test", &unique_chunks).await.unwrap();
                let results = store.search("test", &query, top_k).await.unwrap();
                (results, count)
            });

            // Result count is at most top_k and at most the number of stored chunks
            prop_assert!(results.len() <= top_k);
            prop_assert!(results.len() <= unique_count);

            // Results are ordered by descending score
            for window in results.windows(2) {
                prop_assert!(
                    window[0].score >= window[1].score,
                    "results not in descending order: {} < {}",
                    window[0].score,
                    window[1].score,
                );
            }
        }
    }
}
