//! Durability tests for the file-backed vector store.

use std::collections::HashMap;
use std::path::PathBuf;

use docqa_rag::document::Chunk;
use docqa_rag::error::RagError;
use docqa_rag::persist::PersistentVectorStore;
use docqa_rag::vectorstore::VectorStore;

fn scratch_dir(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!("docqa_persist_{label}_{}", std::process::id()))
}

fn chunk_with(id: &str, embedding: Vec<f32>) -> Chunk {
    Chunk {
        id: id.to_string(),
        text: format!("text for {id}"),
        embedding,
        metadata: HashMap::new(),
        document_id: "doc".to_string(),
    }
}

#[tokio::test]
async fn index_survives_reopen() {
    let dir = scratch_dir("reopen");
    let _ = tokio::fs::remove_dir_all(&dir).await;

    {
        let store = PersistentVectorStore::open(&dir).await.unwrap();
        store.create_collection("docs", 2).await.unwrap();
        store
            .insert(
                "docs",
                &[chunk_with("a", vec![1.0, 0.0]), chunk_with("b", vec![0.0, 1.0])],
            )
            .await
            .unwrap();
    }

    let reopened = PersistentVectorStore::open(&dir).await.unwrap();
    assert_eq!(reopened.count("docs").await.unwrap(), 2);

    let results = reopened.search("docs", &[1.0, 0.0], 1).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].chunk.id, "a");

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}

#[tokio::test]
async fn reindexing_after_reopen_appends() {
    let dir = scratch_dir("append");
    let _ = tokio::fs::remove_dir_all(&dir).await;

    {
        let store = PersistentVectorStore::open(&dir).await.unwrap();
        store.create_collection("docs", 2).await.unwrap();
        store.insert("docs", &[chunk_with("a", vec![1.0, 0.0])]).await.unwrap();
    }
    {
        let store = PersistentVectorStore::open(&dir).await.unwrap();
        // Same chunk again: the index appends, it does not deduplicate.
        store.insert("docs", &[chunk_with("a", vec![1.0, 0.0])]).await.unwrap();
        assert_eq!(store.count("docs").await.unwrap(), 2);
    }

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}

#[tokio::test]
async fn dimension_mismatch_is_rejected_before_write() {
    let dir = scratch_dir("mismatch");
    let _ = tokio::fs::remove_dir_all(&dir).await;

    let store = PersistentVectorStore::open(&dir).await.unwrap();
    store.create_collection("docs", 3).await.unwrap();
    store.insert("docs", &[chunk_with("ok", vec![1.0, 0.0, 0.0])]).await.unwrap();

    let err = store.insert("docs", &[chunk_with("bad", vec![1.0])]).await.unwrap_err();
    assert!(matches!(err, RagError::DimensionMismatch { expected: 3, actual: 1 }));
    assert_eq!(store.count("docs").await.unwrap(), 1);

    // The rejected insert must not have reached the file either.
    drop(store);
    let reopened = PersistentVectorStore::open(&dir).await.unwrap();
    assert_eq!(reopened.count("docs").await.unwrap(), 1);

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}

#[tokio::test]
async fn delete_collection_removes_the_file() {
    let dir = scratch_dir("delete");
    let _ = tokio::fs::remove_dir_all(&dir).await;

    let store = PersistentVectorStore::open(&dir).await.unwrap();
    store.create_collection("docs", 2).await.unwrap();
    store.delete_collection("docs").await.unwrap();
    assert!(store.count("docs").await.is_err());

    let reopened = PersistentVectorStore::open(&dir).await.unwrap();
    assert!(reopened.count("docs").await.is_err());

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}
