//! # Basic QA Demo
//!
//! Demonstrates the full pipeline — index a small corpus, then answer
//! questions against it — with **zero API keys**: embeddings come from a
//! deterministic hash, and the "chat model" is a tiny keyword heuristic.
//!
//! Run: `cargo run -p docqa-demos --example qa_basic`

use std::sync::Arc;

use async_trait::async_trait;
use docqa_agent::{QaPipeline, QaRequest};
use docqa_model::{ChatModel, ModelError};
use docqa_rag::{
    Document, EmbeddingProvider, InMemoryVectorStore, RagConfig, RetrievalPipeline,
    SeparatorChunker,
};

// ---------------------------------------------------------------------------
// HashEmbeddings — deterministic hash-based embeddings for demos/tests
// ---------------------------------------------------------------------------

struct HashEmbeddings {
    dimensions: usize,
}

#[async_trait]
impl EmbeddingProvider for HashEmbeddings {
    async fn embed(&self, text: &str) -> docqa_rag::Result<Vec<f32>> {
        // Deterministic embedding: hash the text bytes, then generate a
        // normalised vector whose direction depends on the content.
        let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let mut emb = vec![0.0f32; self.dimensions];
        for (i, v) in emb.iter_mut().enumerate() {
            *v = ((hash.wrapping_add(i as u64)) as f32).sin();
        }
        let norm: f32 = emb.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            emb.iter_mut().for_each(|x| *x /= norm);
        }
        Ok(emb)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

// ---------------------------------------------------------------------------
// KeywordChatModel — a toy model good enough to drive the pipeline offline.
// The gate prompt gets a yes/no based on word overlap; the synthesis prompt
// gets the context echoed back.
// ---------------------------------------------------------------------------

struct KeywordChatModel;

#[async_trait]
impl ChatModel for KeywordChatModel {
    fn name(&self) -> &str {
        "keyword-demo"
    }

    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        let lower = prompt.to_lowercase();
        if lower.contains("yes or no") {
            // Crude relevance: does any long question word appear in the context?
            let question = lower.lines().find(|l| l.starts_with("question:")).unwrap_or("");
            let context: String =
                lower.lines().filter(|l| !l.starts_with("question:")).collect::<Vec<_>>().join(" ");
            let overlap = question
                .split_whitespace()
                .filter(|w| w.len() > 5)
                .any(|w| context.contains(w));
            return Ok(if overlap { "yes".to_string() } else { "no".to_string() });
        }
        // Synthesis: echo the first context paragraph.
        let answer = prompt
            .split("Context:\n")
            .nth(1)
            .and_then(|rest| rest.split("\n\n").next())
            .unwrap_or("Information not found in the document")
            .to_string();
        Ok(answer)
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    // -- 1. Configure the retrieval pipeline -------------------------------
    let config = RagConfig::builder()
        .chunk_size(200)
        .chunk_overlap(50)
        .retrieval_k(3)
        .build()?;

    let retrieval = Arc::new(
        RetrievalPipeline::builder()
            .config(config)
            .embedding_provider(Arc::new(HashEmbeddings { dimensions: 64 }))
            .vector_store(Arc::new(InMemoryVectorStore::new()))
            .chunker(Arc::new(SeparatorChunker::new(200, 50)?))
            .build()?,
    );

    // -- 2. Ingest a small corpus ------------------------------------------
    let collection = "demo_corpus";
    retrieval.create_collection(collection).await?;

    let documents = vec![
        Document::new(
            "retirement",
            "Retirement planning starts with consistent savings and a clear \
             view of Social Security benefits.\n\nHealthcare costs and estate \
             planning round out the picture.",
        ),
        Document::new(
            "investing",
            "Diversification spreads risk across asset classes.\n\nLow-cost \
             index funds are a common core holding.",
        ),
    ];
    println!("Ingesting {} documents...", documents.len());
    for doc in &documents {
        let chunks = retrieval.ingest(collection, doc).await?;
        println!("  {} → {} chunk(s)", doc.id, chunks.len());
    }

    // -- 3. Wire the QA pipeline -------------------------------------------
    let qa = QaPipeline::builder()
        .retrieval(retrieval)
        .collection(collection)
        .chat_model(Arc::new(KeywordChatModel))
        .build()?;

    // -- 4. Ask questions ---------------------------------------------------
    let questions = [
        "What are the key factors when planning for retirement?",
        "What's the best recipe for chocolate chip cookies?",
    ];
    for question in questions {
        let response = qa.answer(QaRequest::new(question)).await?;
        println!("\nQ: {}", response.input);
        println!("A: {}", response.output);
    }

    Ok(())
}
