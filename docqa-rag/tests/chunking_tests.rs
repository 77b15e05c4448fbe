//! Property tests for chunker coverage and determinism.

use docqa_rag::chunking::{Chunker, SeparatorChunker};
use docqa_rag::document::{Chunk, Document, META_OFFSET};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

/// Check the coverage invariants against the source text: every chunk is a
/// verbatim substring at its recorded offset, offsets increase, consecutive
/// chunks leave no gap, and the final chunk reaches the end of the text.
fn check_coverage(chunks: &[Chunk], text: &str, chunk_size: usize) -> Result<(), TestCaseError> {
    prop_assert!(!chunks.is_empty());
    let mut prev_end = 0usize;
    let mut prev_offset: Option<usize> = None;

    for chunk in chunks {
        prop_assert!(!chunk.text.is_empty(), "chunk must not be empty");
        prop_assert!(chunk.text.len() <= chunk_size, "chunk exceeds chunk_size");

        let offset: usize = chunk.metadata[META_OFFSET].parse().unwrap();
        prop_assert_eq!(&text[offset..offset + chunk.text.len()], chunk.text.as_str());

        match prev_offset {
            None => prop_assert_eq!(offset, 0, "first chunk must start at offset 0"),
            Some(prev) => {
                prop_assert!(offset > prev, "offsets must strictly increase");
                prop_assert!(offset <= prev_end, "gap between consecutive chunks");
            }
        }
        prev_offset = Some(offset);
        prev_end = offset + chunk.text.len();
    }

    prop_assert_eq!(prev_end, text.len(), "chunks must cover the full text");
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Chunks reconstruct the source text exactly once overlap is removed,
    /// for any text and any valid (chunk_size, overlap) pair.
    #[test]
    fn chunks_cover_source_text(
        text in "[a-zA-Z0-9 \n.,]{1,400}",
        chunk_size in 8usize..64,
        overlap_frac in 0usize..4,
    ) {
        let overlap = (chunk_size * overlap_frac) / 8; // always < chunk_size
        let chunker = SeparatorChunker::new(chunk_size, overlap).unwrap();
        let document = Document::new("prop_doc", text.clone());
        let chunks = chunker.chunk(&document);
        check_coverage(&chunks, &text, chunk_size)?;
    }

    /// The same input and config always produce the same chunks.
    #[test]
    fn chunking_is_idempotent(
        text in "[a-z \n]{1,300}",
        chunk_size in 8usize..48,
    ) {
        let chunker = SeparatorChunker::new(chunk_size, chunk_size / 4).unwrap();
        let document = Document::new("prop_doc", text);
        let first = chunker.chunk(&document);
        let second = chunker.chunk(&document);
        prop_assert_eq!(first, second);
    }

    /// Unicode input never panics and never splits a code point.
    #[test]
    fn multibyte_input_is_handled(
        text in "[a-zé日本語 ]{1,120}",
        chunk_size in 8usize..32,
    ) {
        let chunker = SeparatorChunker::new(chunk_size, 2).unwrap();
        let document = Document::new("prop_doc", text);
        for chunk in chunker.chunk(&document) {
            prop_assert!(!chunk.text.is_empty());
            prop_assert!(chunk.text.len() <= chunk_size);
        }
    }
}
