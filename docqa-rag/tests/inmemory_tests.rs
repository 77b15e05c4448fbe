//! Property and scenario tests for the in-memory vector store.

use std::collections::HashMap;

use docqa_rag::document::Chunk;
use docqa_rag::error::RagError;
use docqa_rag::inmemory::InMemoryVectorStore;
use docqa_rag::vectorstore::VectorStore;
use proptest::prelude::*;

fn chunk_with(id: &str, embedding: Vec<f32>) -> Chunk {
    Chunk {
        id: id.to_string(),
        text: format!("text for {id}"),
        embedding,
        metadata: HashMap::new(),
        document_id: "doc".to_string(),
    }
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
    ("[a-z]{3,8}", "[a-z ]{5,30}", arb_normalized_embedding(dim)).prop_map(
        |(id, text, embedding)| Chunk {
            id,
            text,
            embedding,
            metadata: HashMap::new(),
            document_id: "doc_1".to_string(),
        },
    )
}

mod prop_search_ordering {
    use super::*;

    const DIM: usize = 16;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// For any set of stored chunks, `search` returns results ordered by
        /// descending cosine similarity, bounded by both `top_k` and the
        /// collection size.
        #[test]
        fn results_ordered_descending_and_bounded_by_top_k(
            chunks in proptest::collection::vec(arb_chunk(DIM), 1..20),
            query in arb_normalized_embedding(DIM),
            top_k in 0usize..25,
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let (results, stored) = rt.block_on(async {
                let store = InMemoryVectorStore::new();
                store.create_collection("test", DIM).await.unwrap();
                store.insert("test", &chunks).await.unwrap();
                let results = store.search("test", &query, top_k).await.unwrap();
                (results, chunks.len())
            });

            prop_assert!(results.len() <= top_k);
            prop_assert!(results.len() <= stored);
            if top_k >= stored {
                prop_assert_eq!(results.len(), stored);
            }

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

#[tokio::test]
async fn empty_collection_returns_empty_result() {
    let store = InMemoryVectorStore::new();
    store.create_collection("empty", 4).await.unwrap();
    let results = store.search("empty", &[1.0, 0.0, 0.0, 0.0], 5).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn k_zero_returns_empty_result() {
    let store = InMemoryVectorStore::new();
    store.create_collection("docs", 2).await.unwrap();
    store.insert("docs", &[chunk_with("a", vec![1.0, 0.0])]).await.unwrap();
    let results = store.search("docs", &[1.0, 0.0], 0).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn k_larger_than_collection_returns_all_entries() {
    let store = InMemoryVectorStore::new();
    store.create_collection("docs", 2).await.unwrap();
    store
        .insert(
            "docs",
            &[chunk_with("a", vec![1.0, 0.0]), chunk_with("b", vec![0.0, 1.0])],
        )
        .await
        .unwrap();
    let results = store.search("docs", &[1.0, 0.0], 100).await.unwrap();
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn ties_rank_earlier_inserted_entries_first() {
    let store = InMemoryVectorStore::new();
    store.create_collection("docs", 2).await.unwrap();
    // Identical embeddings: scores tie exactly.
    store
        .insert(
            "docs",
            &[
                chunk_with("first", vec![1.0, 0.0]),
                chunk_with("second", vec![1.0, 0.0]),
                chunk_with("third", vec![1.0, 0.0]),
            ],
        )
        .await
        .unwrap();

    let results = store.search("docs", &[1.0, 0.0], 3).await.unwrap();
    let ids: Vec<&str> = results.iter().map(|r| r.chunk.id.as_str()).collect();
    assert_eq!(ids, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn dimension_mismatch_rejects_insert_and_leaves_store_unchanged() {
    let store = InMemoryVectorStore::new();
    store.create_collection("docs", 3).await.unwrap();
    store.insert("docs", &[chunk_with("ok", vec![1.0, 0.0, 0.0])]).await.unwrap();
    assert_eq!(store.count("docs").await.unwrap(), 1);

    // A batch where the second chunk has the wrong shape: nothing lands.
    let err = store
        .insert(
            "docs",
            &[chunk_with("good", vec![0.0, 1.0, 0.0]), chunk_with("bad", vec![1.0, 0.0])],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RagError::DimensionMismatch { expected: 3, actual: 2 }));
    assert_eq!(store.count("docs").await.unwrap(), 1);
}

#[tokio::test]
async fn reinserting_same_chunks_appends_rather_than_deduplicating() {
    let store = InMemoryVectorStore::new();
    store.create_collection("docs", 2).await.unwrap();
    let chunks = [chunk_with("a", vec![1.0, 0.0])];
    store.insert("docs", &chunks).await.unwrap();
    store.insert("docs", &chunks).await.unwrap();
    assert_eq!(store.count("docs").await.unwrap(), 2);
}
