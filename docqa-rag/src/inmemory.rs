//! In-memory vector store using cosine similarity.
//!
//! This module provides [`InMemoryVectorStore`], a zero-dependency vector
//! store backed by a `Vec` per collection behind a `tokio::sync::RwLock`.
//! Entries keep their insertion order, which is also the tie-break order
//! for equal similarity scores. Suitable for development, testing, and
//! small corpora.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::{Chunk, SearchResult};
use crate::error::{RagError, Result};
use crate::vectorstore::{VectorStore, cosine_similarity};

/// A named collection: fixed dimensionality plus entries in insertion order.
#[derive(Debug, Default)]
pub(crate) struct Collection {
    pub(crate) dimensions: usize,
    pub(crate) chunks: Vec<Chunk>,
}

impl Collection {
    pub(crate) fn new(dimensions: usize) -> Self {
        Self { dimensions, chunks: Vec::new() }
    }

    /// Validate every embedding against the collection's dimensionality
    /// before touching the entry list, so a failed insert changes nothing.
    pub(crate) fn check_dimensions(&self, chunks: &[Chunk]) -> Result<()> {
        for chunk in chunks {
            if chunk.embedding.len() != self.dimensions {
                return Err(RagError::DimensionMismatch {
                    expected: self.dimensions,
                    actual: chunk.embedding.len(),
                });
            }
        }
        Ok(())
    }

    /// Score every entry against the query and return the `top_k` best.
    /// The sort is stable, so ties keep insertion order.
    pub(crate) fn ranked(&self, embedding: &[f32], top_k: usize) -> Vec<SearchResult> {
        let mut scored: Vec<SearchResult> = self
            .chunks
            .iter()
            .map(|chunk| SearchResult {
                chunk: chunk.clone(),
                score: cosine_similarity(&chunk.embedding, embedding),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);
        scored
    }
}

/// An in-memory [`VectorStore`] using cosine similarity for search.
///
/// Collections are `Vec`s of chunks in insertion order; all operations are
/// async-safe via `tokio::sync::RwLock`, and searches take only a read lock
/// so concurrent queries never block each other.
///
/// # Example
///
/// ```rust,ignore
/// use docqa_rag::{InMemoryVectorStore, VectorStore};
///
/// let store = InMemoryVectorStore::new();
/// store.create_collection("docs", 384).await?;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl InMemoryVectorStore {
    /// Create a new empty in-memory vector store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn unknown_collection(name: &str) -> RagError {
    RagError::VectorStoreError {
        backend: "InMemory".to_string(),
        message: format!("collection '{name}' does not exist"),
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn create_collection(&self, name: &str, dimensions: usize) -> Result<()> {
        let mut collections = self.collections.write().await;
        collections.entry(name.to_string()).or_insert_with(|| Collection::new(dimensions));
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        let mut collections = self.collections.write().await;
        collections.remove(name);
        Ok(())
    }

    async fn insert(&self, collection: &str, chunks: &[Chunk]) -> Result<()> {
        let mut collections = self.collections.write().await;
        let entry = collections.get_mut(collection).ok_or_else(|| unknown_collection(collection))?;
        entry.check_dimensions(chunks)?;
        entry.chunks.extend_from_slice(chunks);
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<SearchResult>> {
        let collections = self.collections.read().await;
        let entry = collections.get(collection).ok_or_else(|| unknown_collection(collection))?;
        Ok(entry.ranked(embedding, top_k))
    }

    async fn count(&self, collection: &str) -> Result<usize> {
        let collections = self.collections.read().await;
        let entry = collections.get(collection).ok_or_else(|| unknown_collection(collection))?;
        Ok(entry.chunks.len())
    }
}
