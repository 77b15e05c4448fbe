//! Web page extraction: fetch a URL and strip the markup to plain text.
//!
//! This module is only available when the `html` feature is enabled.
//!
//! The stripper is deliberately small: it drops `<script>`/`<style>`
//! subtrees, turns block-level tags into line breaks, decodes the common
//! character entities, and normalizes whitespace. It does not attempt
//! readability heuristics — boilerplate removal is out of scope here.

use async_trait::async_trait;
use tracing::{debug, error};

use crate::{ExtractError, Result, TextExtractor, normalize_whitespace};

/// Tags whose entire content is dropped.
const DROPPED_TAGS: [&str; 2] = ["script", "style"];

/// Tags that imply a line break in the extracted text.
const BLOCK_TAGS: [&str; 16] = [
    "p", "br", "div", "li", "tr", "h1", "h2", "h3", "h4", "h5", "h6", "table", "ul", "ol",
    "section", "article",
];

/// A [`TextExtractor`] that fetches a URL and strips the HTML to text.
///
/// # Example
///
/// ```rust,ignore
/// use docqa_extract::{HtmlExtractor, TextExtractor};
///
/// let extractor = HtmlExtractor::new();
/// let text = extractor.extract("https://example.com/page").await?;
/// ```
#[derive(Debug, Default)]
pub struct HtmlExtractor {
    client: reqwest::Client,
}

impl HtmlExtractor {
    /// Create a new extractor with a default HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor reusing an existing HTTP client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Strip markup from an HTML string without fetching anything.
    pub fn text_from_html(html: &str) -> String {
        normalize_whitespace(&decode_entities(&strip_tags(html)))
    }
}

/// ASCII-case-insensitive substring search. The needle must be ASCII.
fn find_ascii_ci(haystack: &str, needle_lower: &str) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle_lower.as_bytes();
    if n.is_empty() || h.len() < n.len() {
        return None;
    }
    (0..=h.len() - n.len())
        .find(|&i| h[i..i + n.len()].iter().zip(n).all(|(a, b)| a.to_ascii_lowercase() == *b))
}

/// Remove tags, dropping `<script>`/`<style>` subtrees and inserting line
/// breaks for block-level elements.
fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len() / 2);
    let mut i = 0;

    while i < html.len() {
        if html[i..].starts_with('<') {
            let tag_end = html[i..].find('>').map(|p| i + p + 1).unwrap_or(html.len());
            let body_end = tag_end.saturating_sub(1).max(i + 1);
            let tag_body = html[i + 1..body_end].trim();
            let is_closing = tag_body.starts_with('/');
            let name: String = tag_body
                .trim_start_matches('/')
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_ascii_lowercase();

            if !is_closing && DROPPED_TAGS.contains(&name.as_str()) {
                // Skip everything up to and including the matching close tag.
                let close_pattern = format!("</{name}");
                match find_ascii_ci(&html[tag_end..], &close_pattern) {
                    Some(p) => {
                        let after = tag_end + p;
                        i = html[after..].find('>').map(|q| after + q + 1).unwrap_or(html.len());
                    }
                    None => break,
                }
                continue;
            }

            if BLOCK_TAGS.contains(&name.as_str()) {
                out.push('\n');
            }
            i = tag_end;
        } else {
            let Some(ch) = html[i..].chars().next() else { break };
            out.push(ch);
            i += ch.len_utf8();
        }
    }

    out
}

/// Decode the handful of entities that matter for plain text.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[async_trait]
impl TextExtractor for HtmlExtractor {
    async fn extract(&self, source: &str) -> Result<String> {
        debug!(url = source, "fetching page");

        let response = self.client.get(source).send().await.map_err(|e| {
            error!(url = source, error = %e, "page fetch failed");
            ExtractError::Fetch { source: source.to_string(), message: e.to_string() }
        })?;

        if !response.status().is_success() {
            return Err(ExtractError::Fetch {
                source: source.to_string(),
                message: format!("HTTP status {}", response.status()),
            });
        }

        let html = response.text().await.map_err(|e| ExtractError::Fetch {
            source: source.to_string(),
            message: e.to_string(),
        })?;

        let text = Self::text_from_html(&html);
        if text.is_empty() {
            return Err(ExtractError::Empty { source: source.to_string() });
        }

        debug!(url = source, text_len = text.len(), "extracted page text");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_to_text() {
        let html = "<html><body><h1>Title</h1><p>Hello <b>world</b>.</p></body></html>";
        assert_eq!(HtmlExtractor::text_from_html(html), "Title\n\nHello world.");
    }

    #[test]
    fn drops_script_and_style_content() {
        let html = "<p>Keep</p><script>var x = 'drop';</script><style>p { color: red }</style><p>This</p>";
        assert_eq!(HtmlExtractor::text_from_html(html), "Keep\n\nThis");
    }

    #[test]
    fn drops_mixed_case_script_tags() {
        let html = "<p>a</p><SCRIPT>alert(1)</SCRIPT><p>b</p>";
        assert_eq!(HtmlExtractor::text_from_html(html), "a\n\nb");
    }

    #[test]
    fn decodes_common_entities() {
        let html = "<p>Fish &amp; Chips &lt;fresh&gt;</p>";
        assert_eq!(HtmlExtractor::text_from_html(html), "Fish & Chips <fresh>");
    }

    #[test]
    fn unterminated_dropped_tag_truncates_cleanly() {
        let html = "<p>before</p><script>never closed";
        assert_eq!(HtmlExtractor::text_from_html(html), "before");
    }
}
