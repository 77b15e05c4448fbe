//! Policy constants: the fallback sentence, the not-found marker, and the
//! prompt templates.
//!
//! These are named values rather than inline literals so tests and callers
//! assert against a single source of truth.

/// The fixed answer returned when retrieved context does not cover the
/// question. Callers can compare against this verbatim.
pub const FALLBACK_ANSWER: &str = "I apologize, but I don't have relevant information to answer \
     this question based on the available documents.";

/// The sentence the synthesizer is instructed to emit when the context is
/// insufficient to answer.
pub const NOT_FOUND_ANSWER: &str = "Information not found in the document";

/// Build the relevance-gate prompt: a binary judgment with a one-token
/// answer contract.
pub fn relevance_prompt(question: &str, context: &str) -> String {
    format!(
        "You are a relevance judge. Decide whether the context below contains \
         the information needed to answer the question.\n\n\
         Context:\n{context}\n\n\
         Question: {question}\n\n\
         Reply with exactly one word: yes or no."
    )
}

/// Build the answer-synthesis prompt: grounded generation with an explicit
/// not-found instruction.
pub fn synthesis_prompt(question: &str, context: &str) -> String {
    format!(
        "Answer the question using only the context below. Do not use any \
         other knowledge. If the context does not contain the answer, reply \
         exactly: \"{NOT_FOUND_ANSWER}\".\n\n\
         Context:\n{context}\n\n\
         Question: {question}\n\n\
         Answer:"
    )
}
