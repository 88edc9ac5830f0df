//! Ingestion-document preparation for the external search collaborators.
//!
//! The vector-search service consumes `{title, text, source}` documents;
//! chunking oversized text before insertion is the caller's
//! responsibility, so the chunker lives here. The graph backend models
//! term co-occurrence over tokenized questions; the tokenizer lives here
//! for the same reason.

use scraper::{Html, Selector};

use crate::text::normalize_whitespace;

/// A document prepared for vector-search ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestDocument {
    /// Page title, `"Untitled"` when the artifact carries none.
    pub title: String,
    /// Section headings, in document order.
    pub headers: Vec<String>,
    /// Joined paragraph text.
    pub text: String,
    /// Artifact key the document came from.
    pub source: String,
}

/// Build an ingestion document from an archived HTML artifact.
pub fn document_from_html(html: &str, source: &str) -> IngestDocument {
    let doc = Html::parse_document(html);

    let title_sel = Selector::parse("title").unwrap();
    let heading_sel = Selector::parse("h1, h2, h3").unwrap();
    let p_sel = Selector::parse("p").unwrap();

    let title = doc
        .select(&title_sel)
        .next()
        .map(|el| normalize_whitespace(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Untitled".to_string());

    let headers: Vec<String> = doc
        .select(&heading_sel)
        .map(|el| normalize_whitespace(&el.text().collect::<String>()))
        .filter(|h| !h.is_empty())
        .collect();

    let text = doc
        .select(&p_sel)
        .map(|el| normalize_whitespace(&el.text().collect::<String>()))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    IngestDocument {
        title,
        headers,
        text,
        source: source.to_string(),
    }
}

/// Split text into chunks of at most `max_chars`, breaking on word
/// boundaries. A single word longer than `max_chars` becomes its own
/// chunk rather than being split.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > max_chars {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Common English stopwords excluded from question terms.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "can", "do", "does", "for", "from", "how",
    "i", "in", "is", "it", "my", "of", "on", "or", "the", "to", "was", "what", "when", "where",
    "which", "who", "why", "will", "with", "you", "your",
];

/// Tokenize a question into lowercase terms for the graph backend:
/// alphanumeric words, stopwords and single characters removed.
pub fn tokenize_question(question: &str) -> Vec<String> {
    question
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|term| term.len() > 1 && !STOPWORDS.contains(term))
        .map(str::to_string)
        .collect()
}
