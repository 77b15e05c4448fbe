//! Retrieval pipeline: the ingestion and query paths over a vector store.
//!
//! The [`RetrievalPipeline`] coordinates ingestion (chunk → embed → insert)
//! and retrieval (embed the question → k-nearest-neighbor search) by
//! composing an [`EmbeddingProvider`], a [`VectorStore`], and a [`Chunker`].
//!
//! # Example
//!
//! ```rust,ignore
//! use docqa_rag::{RetrievalPipeline, RagConfig, InMemoryVectorStore, SeparatorChunker};
//!
//! let pipeline = RetrievalPipeline::builder()
//!     .config(RagConfig::default())
//!     .embedding_provider(Arc::new(my_embedder))
//!     .vector_store(Arc::new(InMemoryVectorStore::new()))
//!     .chunker(Arc::new(SeparatorChunker::new(500, 50)?))
//!     .build()?;
//!
//! pipeline.create_collection("docs").await?;
//! pipeline.ingest("docs", &document).await?;
//! let results = pipeline.retrieve("docs", "what does the fund invest in?").await?;
//! ```

use std::sync::Arc;

use tracing::{error, info};

use crate::chunking::Chunker;
use crate::config::RagConfig;
use crate::document::{Chunk, Document, SearchResult};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

/// The retrieval pipeline.
///
/// Owns no state of its own beyond the injected handles; the same pipeline
/// can serve concurrent ingest and retrieve calls. Construct one via
/// [`RetrievalPipeline::builder()`].
pub struct RetrievalPipeline {
    config: RagConfig,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStore>,
    chunker: Arc<dyn Chunker>,
}

impl RetrievalPipeline {
    /// Create a new [`RetrievalPipelineBuilder`].
    pub fn builder() -> RetrievalPipelineBuilder {
        RetrievalPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Return a reference to the embedding provider.
    pub fn embedding_provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.embedding_provider
    }

    /// Return a reference to the vector store.
    pub fn vector_store(&self) -> &Arc<dyn VectorStore> {
        &self.vector_store
    }

    /// Create a named collection in the vector store with the
    /// dimensionality reported by the embedding provider.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::VectorStoreError`] if the store operation fails.
    pub async fn create_collection(&self, name: &str) -> Result<()> {
        let dimensions = self.embedding_provider.dimensions();
        self.vector_store.create_collection(name, dimensions).await
    }

    /// Delete a named collection from the vector store.
    pub async fn delete_collection(&self, name: &str) -> Result<()> {
        self.vector_store.delete_collection(name).await
    }

    /// Ingest a single document: chunk → embed → insert.
    ///
    /// Returns the chunks that were stored (with embeddings attached).
    /// Ingesting the same document twice appends duplicate entries; callers
    /// that need idempotence must deduplicate themselves.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::EmbeddingError`] if embedding fails or the
    /// provider returns malformed output, and propagates store errors
    /// (including [`RagError::DimensionMismatch`]) unchanged.
    pub async fn ingest(&self, collection: &str, document: &Document) -> Result<Vec<Chunk>> {
        let mut chunks = self.chunker.chunk(document);
        if chunks.is_empty() {
            info!(document.id = %document.id, chunk_count = 0, "ingested document (empty)");
            return Ok(chunks);
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embedding_provider.embed_batch(&texts).await.inspect_err(|e| {
            error!(document.id = %document.id, error = %e, "embedding failed during ingestion");
        })?;

        if embeddings.len() != chunks.len() {
            return Err(RagError::EmbeddingError {
                provider: "batch".to_string(),
                message: format!(
                    "provider returned {} embeddings for {} chunks",
                    embeddings.len(),
                    chunks.len()
                ),
            });
        }
        for embedding in &embeddings {
            self.check_shape(embedding)?;
        }

        for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
            chunk.embedding = embedding;
        }

        self.vector_store.insert(collection, &chunks).await.inspect_err(|e| {
            error!(document.id = %document.id, error = %e, "insert failed during ingestion");
        })?;

        info!(document.id = %document.id, chunk_count = chunks.len(), "ingested document");
        Ok(chunks)
    }

    /// Ingest multiple documents through the chunk → embed → insert workflow.
    ///
    /// Returns all chunks that were stored across all documents.
    ///
    /// # Errors
    ///
    /// Fails on the first document that fails; earlier documents stay
    /// inserted.
    pub async fn ingest_batch(
        &self,
        collection: &str,
        documents: &[Document],
    ) -> Result<Vec<Chunk>> {
        let mut all_chunks = Vec::new();
        for document in documents {
            let chunks = self.ingest(collection, document).await?;
            all_chunks.extend(chunks);
        }
        Ok(all_chunks)
    }

    /// Retrieve the chunks most similar to `question`, using the configured
    /// `retrieval_k`.
    ///
    /// Results are ordered by descending similarity; entries below the
    /// configured `similarity_threshold` are filtered out. Embedding
    /// failures propagate to the caller — no retry is performed here.
    pub async fn retrieve(&self, collection: &str, question: &str) -> Result<Vec<SearchResult>> {
        self.retrieve_with_k(collection, question, self.config.retrieval_k).await
    }

    /// Retrieve with an explicit `k`, overriding the configured value.
    pub async fn retrieve_with_k(
        &self,
        collection: &str,
        question: &str,
        k: usize,
    ) -> Result<Vec<SearchResult>> {
        let query_embedding = self.embedding_provider.embed(question).await.inspect_err(|e| {
            error!(error = %e, "embedding failed during retrieval");
        })?;
        self.check_shape(&query_embedding)?;

        let results =
            self.vector_store.search(collection, &query_embedding, k).await.inspect_err(|e| {
                error!(collection, error = %e, "vector store search failed");
            })?;

        let threshold = self.config.similarity_threshold;
        let filtered: Vec<SearchResult> =
            results.into_iter().filter(|r| r.score >= threshold).collect();

        info!(collection, result_count = filtered.len(), "retrieval completed");
        Ok(filtered)
    }

    /// Reject malformed provider output: empty vectors or a dimensionality
    /// that disagrees with what the provider advertises.
    fn check_shape(&self, embedding: &[f32]) -> Result<()> {
        let expected = self.embedding_provider.dimensions();
        if embedding.is_empty() || embedding.len() != expected {
            return Err(RagError::EmbeddingError {
                provider: "embedding".to_string(),
                message: format!(
                    "provider returned a {}-dimensional vector, expected {expected}",
                    embedding.len()
                ),
            });
        }
        Ok(())
    }
}

/// Builder for constructing a [`RetrievalPipeline`].
///
/// All fields are required. Call [`build()`](RetrievalPipelineBuilder::build)
/// to validate and produce the pipeline.
#[derive(Default)]
pub struct RetrievalPipelineBuilder {
    config: Option<RagConfig>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    vector_store: Option<Arc<dyn VectorStore>>,
    chunker: Option<Arc<dyn Chunker>>,
}

impl RetrievalPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the vector store backend.
    pub fn vector_store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.vector_store = Some(store);
        self
    }

    /// Set the document chunker.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Build the [`RetrievalPipeline`], validating that all required fields
    /// are set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if any required field is missing.
    pub fn build(self) -> Result<RetrievalPipeline> {
        let config =
            self.config.ok_or_else(|| RagError::ConfigError("config is required".to_string()))?;
        let embedding_provider = self
            .embedding_provider
            .ok_or_else(|| RagError::ConfigError("embedding_provider is required".to_string()))?;
        let vector_store = self
            .vector_store
            .ok_or_else(|| RagError::ConfigError("vector_store is required".to_string()))?;
        let chunker =
            self.chunker.ok_or_else(|| RagError::ConfigError("chunker is required".to_string()))?;

        Ok(RetrievalPipeline { config, embedding_provider, vector_store, chunker })
    }
}
