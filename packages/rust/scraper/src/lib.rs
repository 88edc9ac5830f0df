//! Fetching, FAQ schema detection, archiving, and run reporting.
//!
//! This crate provides:
//! - [`jsonld`] — JSON-LD block extraction and FAQPage detection
//! - [`pool`] — the bounded-concurrency fetch worker pool
//! - [`archive`] — URL normalization and per-page artifact writes
//! - [`report`] — the tabular run report

pub mod archive;
pub mod jsonld;
pub mod pool;
pub mod report;

pub use archive::{ArchiveOutcome, Archiver, canonical_key};
pub use pool::FetchPool;
pub use report::{ReportRow, build_rows, report_path, write_report};

#[cfg(test)]
mod tests {
    use super::*;
    use faqharvest_shared::{ArchiveLayout, default_template};
    use url::Url;

    fn load_fixture(name: &str) -> String {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(name);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {name}: {e}"))
    }

    // -----------------------------------------------------------------------
    // Detection tests against a realistic page
    // -----------------------------------------------------------------------

    #[test]
    fn detects_support_site_fixture() {
        let html = load_fixture("html/support_site.html");
        let blocks = jsonld::extract_blocks(&html);

        assert_eq!(blocks.len(), 1);
        assert!(jsonld::detect(&blocks));
    }

    #[test]
    fn docs_site_fixture_has_no_schema() {
        let html = load_fixture("html/docs_site.html");
        let blocks = jsonld::extract_blocks(&html);

        assert!(blocks.is_empty());
        assert!(!jsonld::detect(&blocks));
    }

    // -----------------------------------------------------------------------
    // Archiver tests against a realistic page
    // -----------------------------------------------------------------------

    #[test]
    fn archives_support_site_fixture() {
        let dir = std::env::temp_dir().join(format!("faqharvest-fixture-{}", uuid::Uuid::now_v7()));
        let layout = ArchiveLayout::new(&dir);
        layout.ensure_dirs().unwrap();

        let html = load_fixture("html/support_site.html");
        let blocks = jsonld::extract_blocks(&html);
        let url = Url::parse("https://support.acme.example/billing/faq").unwrap();

        let archiver = Archiver::new(layout.clone(), &default_template());
        let outcome = archiver.archive(&url, &html, &blocks);

        assert!(outcome.html_written);
        assert!(outcome.jsonld_written);

        // The archived fragment is the FAQ section, not the whole page.
        let fragment = std::fs::read_to_string(
            layout.html_dir().join(format!("{}.html", outcome.key)),
        )
        .unwrap();
        assert!(fragment.contains("faq-content-container"));
        assert!(!fragment.contains("Copyright Acme"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
