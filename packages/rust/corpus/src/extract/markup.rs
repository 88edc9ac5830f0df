//! Markup extraction strategy.
//!
//! Reads HTML artifacts through a per-template configuration: a FAQ
//! container locator, a question-heading selector, and an answer rule.
//! Source templates disagree on where answers live — a sibling block per
//! heading, or a run of paragraphs up to the next heading — so the rule
//! is supplied per template rather than hard-coded.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use faqharvest_shared::{
    AnswerRule, ArchiveLayout, FaqEntry, FaqHarvestError, Result, StrategyKind, TemplateConfig,
};

use super::{CorpusExtractor, artifact_files, artifact_key};
use crate::text::normalize_whitespace;

/// Extracts entries from archived HTML fragments for one template.
pub struct MarkupExtractor {
    template: TemplateConfig,
}

impl MarkupExtractor {
    pub fn new(template: TemplateConfig) -> Self {
        Self { template }
    }

    fn parse_selector(&self, raw: &str) -> Result<Selector> {
        Selector::parse(raw).map_err(|e| {
            FaqHarvestError::config(format!(
                "template '{}': invalid selector '{raw}': {e}",
                self.template.name
            ))
        })
    }
}

impl CorpusExtractor for MarkupExtractor {
    fn name(&self) -> &str {
        "markup"
    }

    fn extract(&self, layout: &ArchiveLayout) -> Result<Vec<FaqEntry>> {
        let container_sel = self.parse_selector(&self.template.faq_container)?;
        let question_sel = self.parse_selector(&self.template.question_selector)?;
        let answer_sel = match &self.template.answer {
            AnswerRule::SiblingBlock { selector } => Some(self.parse_selector(selector)?),
            AnswerRule::FollowingParagraphs => None,
        };

        let mut entries = Vec::new();

        for path in artifact_files(&layout.html_dir(), "html")? {
            let key = artifact_key(&path);

            let raw = match std::fs::read_to_string(&path) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "unreadable HTML artifact, skipping");
                    continue;
                }
            };

            let doc = Html::parse_document(&raw);
            let Some(container) = doc.select(&container_sel).next() else {
                debug!(key, container = %self.template.faq_container, "no FAQ container in artifact");
                continue;
            };

            let before = entries.len();
            for heading in container.select(&question_sel) {
                let question = normalize_whitespace(&heading.text().collect::<String>());

                let answer = match (&self.template.answer, &answer_sel) {
                    (AnswerRule::SiblingBlock { .. }, Some(sel)) => {
                        sibling_block_answer(heading, sel)
                    }
                    _ => following_paragraphs_answer(heading, &question_sel),
                };

                if question.is_empty() || answer.is_empty() {
                    continue;
                }

                entries.push(FaqEntry {
                    question,
                    answer,
                    strategy: StrategyKind::Markup,
                    artifact_key: key.clone(),
                });
            }
            debug!(key, extracted = entries.len() - before, "markup artifact processed");
        }

        Ok(entries)
    }
}

/// Answer text for the sibling-block convention: the joined `<p>` texts of
/// the next sibling element matching the answer selector.
fn sibling_block_answer(heading: ElementRef<'_>, answer_sel: &Selector) -> String {
    let p_sel = Selector::parse("p").unwrap();

    let Some(block) = heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| answer_sel.matches(sibling))
    else {
        return String::new();
    };

    let paragraphs: Vec<String> = block
        .select(&p_sel)
        .map(|p| normalize_whitespace(&p.text().collect::<String>()))
        .filter(|text| !text.is_empty())
        .collect();

    paragraphs.join(" ")
}

/// Answer text for the paragraph-run convention: the joined texts of `<p>`
/// siblings following the heading, up to the next question heading.
fn following_paragraphs_answer(heading: ElementRef<'_>, question_sel: &Selector) -> String {
    let mut paragraphs = Vec::new();

    for sibling in heading.next_siblings().filter_map(ElementRef::wrap) {
        if question_sel.matches(&sibling) {
            break;
        }
        if sibling.value().name() == "p" {
            let text = normalize_whitespace(&sibling.text().collect::<String>());
            if !text.is_empty() {
                paragraphs.push(text);
            }
        }
    }

    paragraphs.join(" ")
}
