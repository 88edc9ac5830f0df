//! Structured-data extraction strategy.
//!
//! Reads JSON-LD artifacts, flattens each document list to its FAQPage
//! nodes, and walks their `mainEntity` question lists. Answers are
//! stripped of embedded markup before validation.

use serde_json::Value;
use tracing::{debug, warn};

use faqharvest_scraper::jsonld;
use faqharvest_shared::{ArchiveLayout, FaqEntry, Result, StrategyKind};

use super::{CorpusExtractor, artifact_files, artifact_key};
use crate::text::strip_markup;

/// The `@type` discriminator for question entities within an FAQPage.
const QUESTION_TYPE: &str = "Question";

/// Extracts entries from archived JSON-LD document lists.
pub struct StructuredDataExtractor;

impl CorpusExtractor for StructuredDataExtractor {
    fn name(&self) -> &str {
        "structured-data"
    }

    fn extract(&self, layout: &ArchiveLayout) -> Result<Vec<FaqEntry>> {
        let mut entries = Vec::new();

        for path in artifact_files(&layout.jsonld_dir(), "json")? {
            let key = artifact_key(&path);

            let raw = match std::fs::read_to_string(&path) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "unreadable JSON-LD artifact, skipping");
                    continue;
                }
            };

            let documents: Value = match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "malformed JSON-LD artifact, skipping");
                    continue;
                }
            };

            let before = entries.len();
            collect_entries(&documents, &key, &mut entries);
            debug!(key, extracted = entries.len() - before, "structured-data artifact processed");
        }

        Ok(entries)
    }
}

/// Collect valid question/answer pairs from every FAQPage node.
fn collect_entries(documents: &Value, key: &str, out: &mut Vec<FaqEntry>) {
    for node in jsonld::flatten_nodes(documents) {
        if !jsonld::is_faq_node(node) {
            continue;
        }

        let Some(main_entity) = node.get("mainEntity").and_then(Value::as_array) else {
            continue;
        };

        for qa in main_entity {
            let Some(qa) = qa.as_object() else { continue };
            if qa.get("@type").and_then(Value::as_str) != Some(QUESTION_TYPE) {
                continue;
            }

            let question = qa
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .trim()
                .to_string();

            let raw_answer = qa
                .get("acceptedAnswer")
                .and_then(Value::as_object)
                .and_then(|answer| answer.get("text"))
                .and_then(Value::as_str)
                .unwrap_or_default();

            let answer = strip_markup(raw_answer);

            if question.is_empty() || answer.is_empty() {
                continue;
            }

            out.push(FaqEntry {
                question,
                answer,
                strategy: StrategyKind::StructuredData,
                artifact_key: key.to_string(),
            });
        }
    }
}
