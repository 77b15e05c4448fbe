//! End-to-end pipeline scenarios with deterministic mock providers.
//!
//! The embedding provider hashes text into normalized vectors, so retrieval
//! behaves consistently across runs; the chat model replays a script, so
//! gate verdicts and synthesized answers are exact.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use docqa_agent::{AgentError, FALLBACK_ANSWER, NOT_FOUND_ANSWER, QaPipeline, QaRequest, QaState};
use docqa_model::MockChatModel;
use docqa_rag::{
    Document, EmbeddingProvider, InMemoryVectorStore, RagConfig, RagError, RetrievalPipeline,
    SeparatorChunker,
};

/// Deterministic hash-based embeddings: same text, same vector.
struct HashEmbeddings {
    dimensions: usize,
    fail: AtomicBool,
}

impl HashEmbeddings {
    fn new(dimensions: usize) -> Self {
        Self { dimensions, fail: AtomicBool::new(false) }
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbeddings {
    async fn embed(&self, text: &str) -> docqa_rag::Result<Vec<f32>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RagError::EmbeddingError {
                provider: "hash".to_string(),
                message: "provider unreachable".to_string(),
            });
        }
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

const COLLECTION: &str = "corpus";

fn retirement_overview() -> Document {
    Document::new(
        "retirement_overview",
        "Key factors in retirement planning include consistent savings, \
         understanding Social Security benefits, budgeting for healthcare \
         costs, and estate planning.\n\n\
         Starting early lets compound growth do most of the work, and \
         reviewing the plan annually keeps it aligned with life changes.",
    )
    .with_metadata("source", "retirement-overview")
}

fn fund_factsheet() -> Document {
    Document::new(
        "fund_factsheet",
        "Example Global Equity Fund invests in large-capitalization companies \
         across developed markets.\n\n\
         The fund's ongoing charge is 0.45% per year and the benchmark is the \
         MSCI World Index.\n\n\
         The minimum initial investment is 1,000 EUR.",
    )
    .with_metadata("source", "factsheet-pdf")
}

/// Index the given documents and wire a QA pipeline over the scripted model.
async fn build_qa(
    documents: &[Document],
    model: Arc<MockChatModel>,
    provider: Arc<HashEmbeddings>,
) -> QaPipeline {
    let config = RagConfig::builder()
        .chunk_size(200)
        .chunk_overlap(20)
        .retrieval_k(3)
        .build()
        .unwrap();

    let retrieval = Arc::new(
        RetrievalPipeline::builder()
            .config(config)
            .embedding_provider(provider)
            .vector_store(Arc::new(InMemoryVectorStore::new()))
            .chunker(Arc::new(SeparatorChunker::new(200, 20).unwrap()))
            .build()
            .unwrap(),
    );

    retrieval.create_collection(COLLECTION).await.unwrap();
    retrieval.ingest_batch(COLLECTION, documents).await.unwrap();

    QaPipeline::builder()
        .retrieval(retrieval)
        .collection(COLLECTION)
        .chat_model(model)
        .build()
        .unwrap()
}

#[tokio::test]
async fn relevant_question_gets_a_grounded_answer() {
    let model = Arc::new(MockChatModel::new());
    model.push_reply("yes");
    model.push_reply(
        "Key factors include consistent savings, Social Security benefits, \
         healthcare costs, and estate planning.",
    );

    let provider = Arc::new(HashEmbeddings::new(32));
    let qa = build_qa(&[retirement_overview()], model.clone(), provider).await;

    let response = qa
        .answer(QaRequest::new(
            "What are the key factors to consider when planning for retirement?",
        ))
        .await
        .unwrap();

    assert!(response.output.contains("savings"));
    assert_ne!(response.output, FALLBACK_ANSWER);
    // One gate call plus one synthesis call.
    assert_eq!(model.calls(), 2);
    assert_eq!(
        response.trace,
        vec![
            QaState::Received,
            QaState::Retrieving,
            QaState::Gating,
            QaState::Synthesizing,
            QaState::Done,
        ]
    );
}

#[tokio::test]
async fn off_topic_question_short_circuits_to_fallback() {
    let model = Arc::new(MockChatModel::new());
    model.push_reply("no");

    let provider = Arc::new(HashEmbeddings::new(32));
    let qa = build_qa(&[retirement_overview()], model.clone(), provider).await;

    let response = qa
        .answer(QaRequest::new("What's the best recipe for chocolate chip cookies?"))
        .await
        .unwrap();

    assert_eq!(response.output, FALLBACK_ANSWER);
    // The synthesizer must never have been called.
    assert_eq!(model.calls(), 1);
    assert_eq!(
        response.trace,
        vec![QaState::Received, QaState::Retrieving, QaState::Gating, QaState::Done]
    );
}

#[tokio::test]
async fn factsheet_question_answers_with_the_fund_name() {
    let model = Arc::new(MockChatModel::new());
    model.push_reply("yes");
    model.push_reply("The fund is the Example Global Equity Fund.");

    let provider = Arc::new(HashEmbeddings::new(32));
    let qa = build_qa(&[fund_factsheet()], model.clone(), provider).await;

    let response = qa.answer(QaRequest::new("What is the name of this fund?")).await.unwrap();
    assert!(response.output.contains("Example Global Equity Fund"));
}

#[tokio::test]
async fn absent_field_reports_information_not_found() {
    let model = Arc::new(MockChatModel::new());
    // Context retrieved and judged relevant, but the specific metric is not
    // disclosed anywhere in the document.
    model.push_reply("yes");
    model.push_reply(NOT_FOUND_ANSWER);

    let provider = Arc::new(HashEmbeddings::new(32));
    let qa = build_qa(&[fund_factsheet()], model.clone(), provider).await;

    let response =
        qa.answer(QaRequest::new("What was the fund's tracking error last year?")).await.unwrap();
    assert!(response.output.contains(NOT_FOUND_ANSWER));
}

#[tokio::test]
async fn gate_failure_falls_closed_to_fallback() {
    let model = Arc::new(MockChatModel::new());
    model.push_failure("judgment call failed");

    let provider = Arc::new(HashEmbeddings::new(32));
    let qa = build_qa(&[retirement_overview()], model.clone(), provider).await;

    let response = qa.answer(QaRequest::new("What about savings?")).await.unwrap();
    assert_eq!(response.output, FALLBACK_ANSWER);
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn ambiguous_gate_output_is_treated_as_not_relevant() {
    let model = Arc::new(MockChatModel::new());
    model.push_reply("yes and no");

    let provider = Arc::new(HashEmbeddings::new(32));
    let qa = build_qa(&[retirement_overview()], model.clone(), provider).await;

    let response = qa.answer(QaRequest::new("What about savings?")).await.unwrap();
    assert_eq!(response.output, FALLBACK_ANSWER);
}

#[tokio::test]
async fn embedding_failure_is_a_hard_error_not_a_fallback() {
    let model = Arc::new(MockChatModel::new());
    let provider = Arc::new(HashEmbeddings::new(32));
    let qa = build_qa(&[retirement_overview()], model.clone(), provider.clone()).await;

    provider.fail.store(true, Ordering::SeqCst);
    let err = qa.answer(QaRequest::new("any question")).await.unwrap_err();

    assert!(matches!(err, AgentError::Retrieval(RagError::EmbeddingError { .. })));
    // The failure message is an error, not the corpus-lacks-it sentence.
    assert_ne!(err.to_string(), FALLBACK_ANSWER);
    // Neither the gate nor the synthesizer ran.
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn synthesis_failure_is_a_hard_error() {
    let model = Arc::new(MockChatModel::new());
    model.push_reply("yes");
    model.push_failure("generation failed");

    let provider = Arc::new(HashEmbeddings::new(32));
    let qa = build_qa(&[retirement_overview()], model.clone(), provider).await;

    let err = qa.answer(QaRequest::new("What about savings?")).await.unwrap_err();
    assert!(matches!(err, AgentError::Model(_)));
}

#[tokio::test]
async fn response_serializes_to_input_output_envelope() {
    let model = Arc::new(MockChatModel::new());
    model.push_reply("no");

    let provider = Arc::new(HashEmbeddings::new(32));
    let qa = build_qa(&[retirement_overview()], model, provider).await;

    let response = qa.answer(QaRequest::new("off-topic")).await.unwrap();
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["input"], "off-topic");
    assert_eq!(json["output"], FALLBACK_ANSWER);
    assert!(json.get("trace").is_none());
}
