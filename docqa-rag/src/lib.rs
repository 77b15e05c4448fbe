//! # docqa-rag
//!
//! Chunking, embedding, and vector retrieval for grounded document QA.
//!
//! ## Overview
//!
//! This crate provides the indexing and retrieval half of the DocQA
//! pipeline:
//!
//! - [`Chunker`] implementations ([`SeparatorChunker`], [`FixedSizeChunker`])
//! - [`EmbeddingProvider`] trait plus an OpenAI-backed implementation
//!   (feature `openai`)
//! - [`VectorStore`] trait with in-memory, file-persistent, and Qdrant
//!   (feature `qdrant`) backends
//! - [`RetrievalPipeline`] tying them together: chunk → embed → insert on
//!   the indexing path, embed → k-NN search on the query path
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docqa_rag::{
//!     Document, InMemoryVectorStore, RagConfig, RetrievalPipeline, SeparatorChunker,
//! };
//!
//! let config = RagConfig::builder().chunk_size(500).chunk_overlap(50).build()?;
//! let pipeline = RetrievalPipeline::builder()
//!     .config(config)
//!     .embedding_provider(Arc::new(embedder))
//!     .vector_store(Arc::new(InMemoryVectorStore::new()))
//!     .chunker(Arc::new(SeparatorChunker::new(500, 50)?))
//!     .build()?;
//!
//! pipeline.create_collection("corpus").await?;
//! pipeline.ingest("corpus", &document).await?;
//! let hits = pipeline.retrieve("corpus", "what is the fund's name?").await?;
//! ```
//!
//! ## Backends
//!
//! | Store | Durability | Feature |
//! |-------|------------|---------|
//! | [`InMemoryVectorStore`] | none (per-process) | — |
//! | [`PersistentVectorStore`] | JSON-lines files under `persist_directory` | — |
//! | `QdrantVectorStore` | Qdrant server | `qdrant` |

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod inmemory;
#[cfg(feature = "openai")]
pub mod openai;
pub mod persist;
pub mod pipeline;
#[cfg(feature = "qdrant")]
pub mod qdrant;
pub mod vectorstore;

pub use chunking::{Chunker, FixedSizeChunker, SeparatorChunker};
pub use config::{RagConfig, RagConfigBuilder};
pub use document::{Chunk, Document, SearchResult, join_context};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use inmemory::InMemoryVectorStore;
#[cfg(feature = "openai")]
pub use openai::OpenAIEmbeddings;
pub use persist::PersistentVectorStore;
pub use pipeline::{RetrievalPipeline, RetrievalPipelineBuilder};
#[cfg(feature = "qdrant")]
pub use qdrant::QdrantVectorStore;
pub use vectorstore::{VectorStore, cosine_similarity};
