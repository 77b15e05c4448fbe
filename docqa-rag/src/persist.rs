//! File-backed vector store for durable local indexes.
//!
//! [`PersistentVectorStore`] keeps the same in-memory layout as
//! [`InMemoryVectorStore`](crate::InMemoryVectorStore) and mirrors every
//! collection to one JSON-lines file under a `persist_directory`. Opening
//! the store reloads whatever was written by previous runs, so an index
//! survives process restarts without an external database.
//!
//! Inserts append to the file as well as to memory — re-running indexing on
//! the same source documents grows the index rather than deduplicating it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::document::{Chunk, SearchResult};
use crate::error::{RagError, Result};
use crate::inmemory::Collection;
use crate::vectorstore::VectorStore;

/// First record of every collection file; pins the dimensionality.
#[derive(Debug, Serialize, Deserialize)]
struct CollectionHeader {
    dimensions: usize,
}

/// A [`VectorStore`] mirrored to JSON-lines files under a directory.
///
/// Each collection maps to `<persist_directory>/<name>.jsonl`: a header
/// record carrying the dimensionality followed by one serialized [`Chunk`]
/// per line. The collection name is used verbatim as the file stem, so it
/// must be a valid file name.
///
/// # Example
///
/// ```rust,ignore
/// use docqa_rag::PersistentVectorStore;
///
/// let store = PersistentVectorStore::open("./index").await?;
/// store.create_collection("factsheet", 1536).await?;
/// ```
#[derive(Debug)]
pub struct PersistentVectorStore {
    dir: PathBuf,
    collections: RwLock<HashMap<String, Collection>>,
}

impl PersistentVectorStore {
    /// Open a store rooted at `dir`, creating the directory if needed and
    /// reloading any collections persisted by earlier runs.
    ///
    /// Files that fail to parse are skipped with a warning rather than
    /// failing the open, so one corrupt collection does not take down the
    /// rest of the index.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await.map_err(|e| io_error(&dir, &e))?;

        let mut collections = HashMap::new();
        let mut entries = tokio::fs::read_dir(&dir).await.map_err(|e| io_error(&dir, &e))?;
        while let Some(entry) = entries.next_entry().await.map_err(|e| io_error(&dir, &e))? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("jsonl") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()).map(String::from) else {
                continue;
            };
            match load_collection(&path).await {
                Ok(collection) => {
                    info!(
                        collection = %name,
                        entries = collection.chunks.len(),
                        "reloaded persisted collection"
                    );
                    collections.insert(name, collection);
                }
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "skipping unreadable collection file");
                }
            }
        }

        Ok(Self { dir, collections: RwLock::new(collections) })
    }

    fn file_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.jsonl"))
    }

    /// Append serialized chunks to the collection file.
    async fn append_lines(&self, collection: &str, chunks: &[Chunk]) -> Result<()> {
        let path = self.file_path(collection);
        let mut lines = String::new();
        for chunk in chunks {
            let line = serde_json::to_string(chunk).map_err(|e| RagError::VectorStoreError {
                backend: "Persistent".to_string(),
                message: format!("failed to serialize chunk '{}': {e}", chunk.id),
            })?;
            lines.push_str(&line);
            lines.push('\n');
        }

        let mut file = tokio::fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .await
            .map_err(|e| io_error(&path, &e))?;
        file.write_all(lines.as_bytes()).await.map_err(|e| io_error(&path, &e))?;
        file.flush().await.map_err(|e| io_error(&path, &e))?;
        Ok(())
    }
}

fn io_error(path: &Path, e: &std::io::Error) -> RagError {
    RagError::VectorStoreError {
        backend: "Persistent".to_string(),
        message: format!("{}: {e}", path.display()),
    }
}

fn unknown_collection(name: &str) -> RagError {
    RagError::VectorStoreError {
        backend: "Persistent".to_string(),
        message: format!("collection '{name}' does not exist"),
    }
}

/// Parse a collection file: header line, then one chunk per line.
async fn load_collection(path: &Path) -> Result<Collection> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| io_error(path, &e))?;
    let mut lines = content.lines().filter(|l| !l.trim().is_empty());

    let header_line = lines.next().ok_or_else(|| RagError::VectorStoreError {
        backend: "Persistent".to_string(),
        message: format!("{}: missing header line", path.display()),
    })?;
    let header: CollectionHeader =
        serde_json::from_str(header_line).map_err(|e| RagError::VectorStoreError {
            backend: "Persistent".to_string(),
            message: format!("{}: invalid header: {e}", path.display()),
        })?;

    let mut collection = Collection::new(header.dimensions);
    for line in lines {
        let chunk: Chunk = serde_json::from_str(line).map_err(|e| RagError::VectorStoreError {
            backend: "Persistent".to_string(),
            message: format!("{}: invalid chunk record: {e}", path.display()),
        })?;
        collection.chunks.push(chunk);
    }
    Ok(collection)
}

#[async_trait]
impl VectorStore for PersistentVectorStore {
    async fn create_collection(&self, name: &str, dimensions: usize) -> Result<()> {
        let mut collections = self.collections.write().await;
        if collections.contains_key(name) {
            return Ok(());
        }

        let header = serde_json::to_string(&CollectionHeader { dimensions }).map_err(|e| {
            RagError::VectorStoreError {
                backend: "Persistent".to_string(),
                message: format!("failed to serialize header: {e}"),
            }
        })?;
        let path = self.file_path(name);
        tokio::fs::write(&path, format!("{header}\n")).await.map_err(|e| io_error(&path, &e))?;

        collections.insert(name.to_string(), Collection::new(dimensions));
        debug!(collection = name, dimensions, "created persistent collection");
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        let mut collections = self.collections.write().await;
        collections.remove(name);
        let path = self.file_path(name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path, &e)),
        }
    }

    async fn insert(&self, collection: &str, chunks: &[Chunk]) -> Result<()> {
        let mut collections = self.collections.write().await;
        let entry = collections.get_mut(collection).ok_or_else(|| unknown_collection(collection))?;
        entry.check_dimensions(chunks)?;

        // File first: if the append fails the in-memory view stays unchanged.
        drop(collections);
        self.append_lines(collection, chunks).await?;

        let mut collections = self.collections.write().await;
        let entry = collections.get_mut(collection).ok_or_else(|| unknown_collection(collection))?;
        entry.chunks.extend_from_slice(chunks);
        debug!(collection, count = chunks.len(), "appended chunks to persistent collection");
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
