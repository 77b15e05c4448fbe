//! # Fund Fact Sheet QA Demo
//!
//! Indexes a real corpus — a web page plus a PDF fund fact sheet — and
//! answers questions grounded in it, using OpenAI for embeddings and chat.
//!
//! Requires: `OPENAI_API_KEY` environment variable.
//!
//! Run: `cargo run -p docqa-demos --example factsheet_qa --features providers -- \
//!       <page-url> <factsheet.pdf>`

use std::sync::Arc;

use docqa_agent::{QaPipeline, QaRequest};
use docqa_extract::{HtmlExtractor, PdfExtractor, TextExtractor};
use docqa_model::OpenAIChatModel;
use docqa_rag::{
    Document, OpenAIEmbeddings, PersistentVectorStore, RagConfig, RetrievalPipeline,
    SeparatorChunker,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (for OPENAI_API_KEY).
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().init();

    let mut args = std::env::args().skip(1);
    let page_url = args.next().unwrap_or_else(|| "https://www.example.com/retirement".to_string());
    let pdf_path = args.next().unwrap_or_else(|| "./factsheet.pdf".to_string());

    // -- 1. Extract the corpus ---------------------------------------------
    println!("Extracting {page_url} and {pdf_path}...");
    let page_text = HtmlExtractor::new().extract(&page_url).await?;
    let sheet_text = PdfExtractor::new().extract(&pdf_path).await?;

    let documents = vec![
        Document::new("overview_page", page_text)
            .with_metadata("source", page_url.clone())
            .with_metadata("doc_type", "web_page"),
        Document::new("fund_factsheet", sheet_text)
            .with_metadata("source", pdf_path.clone())
            .with_metadata("doc_type", "pdf"),
    ];

    // -- 2. Configure the retrieval pipeline -------------------------------
    // chunk_size=500/overlap=50 are the defaults; the persistent store keeps
    // the index on disk so re-runs skip nothing but also re-append — delete
    // the directory to start clean.
    let config = RagConfig::builder()
        .chunk_size(500)
        .chunk_overlap(50)
        .retrieval_k(4)
        .persist_directory("./docqa_index")
        .build()?;

    let store = PersistentVectorStore::open(
        config.persist_directory.clone().expect("persist_directory was set above"),
    )
    .await?;

    let retrieval = Arc::new(
        RetrievalPipeline::builder()
            .config(config)
            .embedding_provider(Arc::new(OpenAIEmbeddings::from_env()?))
            .vector_store(Arc::new(store))
            .chunker(Arc::new(SeparatorChunker::new(500, 50)?))
            .build()?,
    );

    // -- 3. Ingest ----------------------------------------------------------
    let collection = "corpus";
    retrieval.create_collection(collection).await?;
    for doc in &documents {
        let chunks = retrieval.ingest(collection, doc).await?;
        println!("  {} → {} chunk(s)", doc.id, chunks.len());
    }

    // -- 4. Answer questions -------------------------------------------------
    let model = Arc::new(OpenAIChatModel::from_env("gpt-4o-mini")?);
    let qa = QaPipeline::builder()
        .retrieval(retrieval)
        .collection(collection)
        .chat_model(model)
        .build()?;

    let questions = [
        "What are the key factors to consider when planning for retirement?",
        "What is the name of this fund?",
        "What's the best recipe for chocolate chip cookies?",
    ];
    for question in questions {
        let response = qa.answer(QaRequest::new(question)).await?;
        println!("\nQ: {}", response.input);
        println!("A: {}", response.output);
    }

    Ok(())
}
