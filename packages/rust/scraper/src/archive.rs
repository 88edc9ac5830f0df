//! URL normalization and artifact archiving.
//!
//! Detected pages produce two artifacts keyed by [`canonical_key`]: the
//! HTML fragment selected by the template's archive locator, and the full
//! parsed JSON-LD document list. Write failures are logged, never fatal;
//! two distinct URLs normalizing to the same key silently overwrite each
//! other (last write wins).

use scraper::{Html, Selector};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use faqharvest_shared::{ArchiveLayout, TemplateConfig};

// ---------------------------------------------------------------------------
// Filename normalization
// ---------------------------------------------------------------------------

/// Derive the canonical artifact key for a URL.
///
/// Pure function of the URL text: every non-alphanumeric character of the
/// host and path maps to `_`, leading and trailing separators are trimmed.
/// Collisions between distinct URLs are accepted and not detected.
pub fn canonical_key(url: &Url) -> String {
    let host = url.host_str().unwrap_or("");
    let key: String = host
        .chars()
        .chain(url.path().chars())
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    key.trim_matches('_').to_string()
}

// ---------------------------------------------------------------------------
// Archiver
// ---------------------------------------------------------------------------

/// Outcome of one archive call. Both flags false means nothing was
/// persisted for the page.
#[derive(Debug, Clone)]
pub struct ArchiveOutcome {
    /// Canonical key both artifacts were written under.
    pub key: String,
    /// Whether the HTML fragment artifact was written.
    pub html_written: bool,
    /// Whether the JSON-LD document list artifact was written.
    pub jsonld_written: bool,
}

/// Writes the two per-page artifacts for detected pages.
#[derive(Debug, Clone)]
pub struct Archiver {
    layout: ArchiveLayout,
    archive_selector: String,
}

impl Archiver {
    pub fn new(layout: ArchiveLayout, template: &TemplateConfig) -> Self {
        Self {
            layout,
            archive_selector: template.archive_selector.clone(),
        }
    }

    /// Archive a detected page.
    ///
    /// Each artifact write is independent: a failure is logged and the
    /// sibling write still proceeds.
    pub fn archive(&self, url: &Url, raw_html: &str, documents: &[Value]) -> ArchiveOutcome {
        let key = canonical_key(url);
        debug!(%url, key, "archiving detected page");

        let html_written = self.write_html_fragment(&key, raw_html);
        let jsonld_written = self.write_documents(&key, documents);

        ArchiveOutcome {
            key,
            html_written,
            jsonld_written,
        }
    }

    /// Write the page fragment matched by the template's archive selector.
    ///
    /// A template mismatch (selector matches nothing) skips the artifact
    /// explicitly rather than archiving the wrong fragment.
    fn write_html_fragment(&self, key: &str, raw_html: &str) -> bool {
        let selector = match Selector::parse(&self.archive_selector) {
            Ok(s) => s,
            Err(e) => {
                warn!(
                    selector = %self.archive_selector,
                    error = ?e,
                    "invalid archive selector, skipping HTML artifact"
                );
                return false;
            }
        };

        let doc = Html::parse_document(raw_html);
        let Some(fragment) = doc.select(&selector).next() else {
            warn!(
                key,
                selector = %self.archive_selector,
                "archive selector matched nothing, skipping HTML artifact"
            );
            return false;
        };

        let path = self.layout.html_dir().join(format!("{key}.html"));
        match std::fs::write(&path, fragment.html()) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to write HTML artifact");
                false
            }
        }
    }

    /// Write the full parsed document list, pretty-printed.
    fn write_documents(&self, key: &str, documents: &[Value]) -> bool {
        let payload = match serde_json::to_string_pretty(documents) {
            Ok(p) => p,
            Err(e) => {
                warn!(key, error = %e, "failed to serialize JSON-LD documents");
                return false;
            }
        };

        let path = self.layout.jsonld_dir().join(format!("{key}.json"));
        match std::fs::write(&path, payload) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to write JSON-LD artifact");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faqharvest_shared::default_template;
    use serde_json::json;

    fn temp_layout() -> ArchiveLayout {
        let dir = std::env::temp_dir().join(format!("faqharvest-archive-{}", uuid::Uuid::now_v7()));
        let layout = ArchiveLayout::new(dir);
        layout.ensure_dirs().expect("create dirs");
        layout
    }

    #[test]
    fn canonical_key_is_deterministic() {
        let url = Url::parse("https://docs.example.com/faq/billing").unwrap();
        let a = canonical_key(&url);
        let b = canonical_key(&url);
        assert_eq!(a, b);
        assert_eq!(a, "docs_example_com_faq_billing");
    }

    #[test]
    fn canonical_key_trims_trailing_separators() {
        let url = Url::parse("https://example.com/faq/").unwrap();
        assert_eq!(canonical_key(&url), "example_com_faq");
    }

    #[test]
    fn canonical_key_accepts_collisions() {
        // Two distinct URLs normalizing identically — a known hazard.
        let a = Url::parse("https://example.com/faq-page").unwrap();
        let b = Url::parse("https://example.com/faq_page").unwrap();
        assert_eq!(canonical_key(&a), canonical_key(&b));
    }

    #[test]
    fn archives_both_artifacts() {
        let layout = temp_layout();
        let archiver = Archiver::new(layout.clone(), &default_template());

        let html = r#"<html><body><div id="main">
            <div>nav</div><div>hero</div>
            <div><section id="faq-content-container"><h3>Q?</h3></section></div>
        </div></body></html>"#;
        let documents = vec![json!({"@type": "FAQPage", "mainEntity": []})];

        let url = Url::parse("https://example.com/faq").unwrap();
        let outcome = archiver.archive(&url, html, &documents);

        assert!(outcome.html_written);
        assert!(outcome.jsonld_written);
        assert!(layout.html_dir().join("example_com_faq.html").exists());
        assert!(layout.jsonld_dir().join("example_com_faq.json").exists());

        let _ = std::fs::remove_dir_all(layout.root());
    }

    #[test]
    fn jsonld_artifact_round_trips_documents() {
        let layout = temp_layout();
        let archiver = Archiver::new(layout.clone(), &default_template());

        let documents = vec![
            json!({"@type": "FAQPage", "mainEntity": [{"@type": "Question", "name": "Q1"}]}),
            json!([{"@type": "Organization", "name": "Acme"}]),
        ];

        let url = Url::parse("https://example.com/faq").unwrap();
        let outcome = archiver.archive(&url, "<html><body></body></html>", &documents);
        assert!(outcome.jsonld_written);

        let raw = std::fs::read_to_string(layout.jsonld_dir().join("example_com_faq.json"))
            .expect("read artifact");
        let parsed: Vec<Value> = serde_json::from_str(&raw).expect("parse artifact");
        assert_eq!(parsed, documents);

        let _ = std::fs::remove_dir_all(layout.root());
    }

    #[test]
    fn missing_fragment_skips_html_but_writes_jsonld() {
        let layout = temp_layout();
        let archiver = Archiver::new(layout.clone(), &default_template());

        // No #main container anywhere — a foreign template.
        let html = "<html><body><p>different layout</p></body></html>";
        let documents = vec![json!({"@type": "FAQPage"})];

        let url = Url::parse("https://example.com/other").unwrap();
        let outcome = archiver.archive(&url, html, &documents);

        assert!(!outcome.html_written);
        assert!(outcome.jsonld_written);
        assert!(!layout.html_dir().join("example_com_other.html").exists());
        assert!(layout.jsonld_dir().join("example_com_other.json").exists());

        let _ = std::fs::remove_dir_all(layout.root());
    }
}
