//! External search-backend boundaries.
//!
//! The vector-search service and the graph database are external
//! collaborators; this module owns only their interface traits and the
//! preparation drivers that feed them — document chunking and id
//! assignment happen on this side of the boundary.

use tracing::{info, warn};

use faqharvest_corpus::extract::{artifact_files, artifact_key};
use faqharvest_corpus::{IngestDocument, chunk_text, document_from_html};
use faqharvest_shared::{ArchiveLayout, FaqEntry, Result};

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Vector-search ingestion service boundary.
pub trait VectorSink {
    /// Insert one document into the index.
    fn insert(&mut self, document: &IngestDocument) -> Result<()>;

    /// Similarity search returning up to `limit` ranked candidates.
    fn near_text(&self, text: &str, limit: usize) -> Result<Vec<IngestDocument>>;
}

/// Graph-database backend boundary.
pub trait GraphSink {
    /// Insert one FAQ entry under a caller-assigned id.
    fn insert_entry(&mut self, id: u64, entry: &FaqEntry) -> Result<()>;

    /// Substring-match query over stored answers.
    fn answers_matching(&self, needle: &str) -> Result<Vec<String>>;
}

// ---------------------------------------------------------------------------
// Drivers
// ---------------------------------------------------------------------------

/// Feed every archived HTML artifact into a vector sink.
///
/// Oversized text is chunked to `max_chars` before insertion — chunking
/// is this side's responsibility, not the service's. Returns the number
/// of documents inserted.
pub fn ingest_html_artifacts(
    layout: &ArchiveLayout,
    sink: &mut dyn VectorSink,
    max_chars: usize,
) -> Result<usize> {
    let mut inserted = 0;

    for path in artifact_files(&layout.html_dir(), "html")? {
        let key = artifact_key(&path);

        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable HTML artifact, skipping");
                continue;
            }
        };

        let document = document_from_html(&raw, &key);

        if document.text.len() <= max_chars {
            sink.insert(&document)?;
            inserted += 1;
            continue;
        }

        for chunk in chunk_text(&document.text, max_chars) {
            sink.insert(&IngestDocument {
                title: document.title.clone(),
                headers: document.headers.clone(),
                text: chunk,
                source: document.source.clone(),
            })?;
            inserted += 1;
        }
    }

    info!(inserted, "HTML artifacts ingested into vector sink");
    Ok(inserted)
}

/// Load FAQ entries into a graph sink under monotonically increasing ids
/// starting at 1. Returns the number of entries loaded.
pub fn load_graph(sink: &mut dyn GraphSink, entries: &[FaqEntry]) -> Result<usize> {
    for (i, entry) in entries.iter().enumerate() {
        sink.insert_entry(i as u64 + 1, entry)?;
    }

    info!(entries = entries.len(), "FAQ entries loaded into graph sink");
    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use faqharvest_shared::StrategyKind;

    // -----------------------------------------------------------------------
    // In-memory fakes
    // -----------------------------------------------------------------------

    #[derive(Default)]
    struct FakeVectorSink {
        documents: Vec<IngestDocument>,
    }

    impl VectorSink for FakeVectorSink {
        fn insert(&mut self, document: &IngestDocument) -> Result<()> {
            self.documents.push(document.clone());
            Ok(())
        }

        fn near_text(&self, text: &str, limit: usize) -> Result<Vec<IngestDocument>> {
            // Naive substring ranking, good enough for a fake.
            Ok(self
                .documents
                .iter()
                .filter(|d| d.text.contains(text))
                .take(limit)
                .cloned()
                .collect())
        }
    }

    #[derive(Default)]
    struct FakeGraphSink {
        entries: Vec<(u64, FaqEntry)>,
    }

    impl GraphSink for FakeGraphSink {
        fn insert_entry(&mut self, id: u64, entry: &FaqEntry) -> Result<()> {
            self.entries.push((id, entry.clone()));
            Ok(())
        }

        fn answers_matching(&self, needle: &str) -> Result<Vec<String>> {
            Ok(self
                .entries
                .iter()
                .filter(|(_, e)| e.answer.contains(needle))
                .map(|(_, e)| e.answer.clone())
                .collect())
        }
    }

    fn temp_layout() -> ArchiveLayout {
        let dir = std::env::temp_dir().join(format!("faqharvest-sinks-{}", uuid::Uuid::now_v7()));
        let layout = ArchiveLayout::new(dir);
        layout.ensure_dirs().unwrap();
        layout
    }

    fn entry(question: &str, answer: &str) -> FaqEntry {
        FaqEntry {
            question: question.into(),
            answer: answer.into(),
            strategy: StrategyKind::Markup,
            artifact_key: "test".into(),
        }
    }

    #[test]
    fn ingests_artifacts_as_documents() {
        let layout = temp_layout();
        std::fs::write(
            layout.html_dir().join("example_com_faq.html"),
            "<html><head><title>FAQ</title></head><body><p>Short answer text.</p></body></html>",
        )
        .unwrap();

        let mut sink = FakeVectorSink::default();
        let inserted = ingest_html_artifacts(&layout, &mut sink, 1000).unwrap();

        assert_eq!(inserted, 1);
        assert_eq!(sink.documents[0].title, "FAQ");
        assert_eq!(sink.documents[0].source, "example_com_faq");

        let hits = sink.near_text("answer", 5).unwrap();
        assert_eq!(hits.len(), 1);

        let _ = std::fs::remove_dir_all(layout.root());
    }

    #[test]
    fn oversized_text_is_chunked_before_insertion() {
        let layout = temp_layout();
        let long_text = "word ".repeat(100);
        std::fs::write(
            layout.html_dir().join("long.html"),
            format!("<html><body><p>{long_text}</p></body></html>"),
        )
        .unwrap();

        let mut sink = FakeVectorSink::default();
        let inserted = ingest_html_artifacts(&layout, &mut sink, 50).unwrap();

        assert!(inserted > 1);
        for doc in &sink.documents {
            assert!(doc.text.len() <= 50);
            assert_eq!(doc.source, "long");
        }

        let _ = std::fs::remove_dir_all(layout.root());
    }

    #[test]
    fn graph_ids_are_monotonic_from_one() {
        let entries = vec![entry("Q1", "A1"), entry("Q2", "A2"), entry("Q3", "A3")];

        let mut sink = FakeGraphSink::default();
        let loaded = load_graph(&mut sink, &entries).unwrap();

        assert_eq!(loaded, 3);
        let ids: Vec<u64> = sink.entries.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let matches = sink.answers_matching("A2").unwrap();
        assert_eq!(matches, vec!["A2"]);
    }
}
