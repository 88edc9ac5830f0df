//! Retrieval-quality evaluation boundary.
//!
//! The answer source (the retrieval system under test) and the similarity
//! scorer (an embedding model) are external collaborators behind traits;
//! this module owns the evaluation loop, the aggregate mean, and the
//! persisted result file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use faqharvest_corpus::GoldenDataset;
use faqharvest_shared::{FaqHarvestError, Result};

// ---------------------------------------------------------------------------
// Collaborator traits
// ---------------------------------------------------------------------------

/// The retrieval system under evaluation.
pub trait AnswerSource {
    /// Return the best answer text for a question.
    fn query(&self, question: &str) -> Result<String>;
}

/// Semantic similarity between a retrieved and an expected answer,
/// typically embedding cosine similarity in `[0, 1]`.
pub trait SimilarityScorer {
    fn score(&self, predicted: &str, expected: &str) -> Result<f64>;
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// One evaluated golden pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalRow {
    pub question: String,
    pub expected_answer: String,
    pub retrieved_answer: String,
    pub f1_score: f64,
}

/// The persisted evaluation result file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalReport {
    pub results: Vec<EvalRow>,
    pub average_f1: f64,
}

// ---------------------------------------------------------------------------
// Evaluation loop
// ---------------------------------------------------------------------------

/// Score every golden pair against the answer source.
///
/// A failed query scores the pair against an empty retrieved answer
/// rather than aborting the evaluation. An empty dataset is a validation
/// error — the mean would be undefined.
#[instrument(skip_all, fields(pairs = golden.len()))]
pub fn evaluate(
    golden: &GoldenDataset,
    source: &dyn AnswerSource,
    scorer: &dyn SimilarityScorer,
) -> Result<EvalReport> {
    if golden.is_empty() {
        return Err(FaqHarvestError::validation(
            "cannot evaluate an empty golden dataset",
        ));
    }

    let mut results = Vec::with_capacity(golden.len());

    for pair in golden.iter() {
        let retrieved = match source.query(&pair.question) {
            Ok(answer) => answer,
            Err(e) => {
                warn!(question = %pair.question, error = %e, "query failed, scoring empty answer");
                String::new()
            }
        };

        let f1_score = scorer.score(&retrieved, &pair.expected_answer)?;
        results.push(EvalRow {
            question: pair.question.clone(),
            expected_answer: pair.expected_answer.clone(),
            retrieved_answer: retrieved,
            f1_score,
        });
    }

    let average_f1 = results.iter().map(|r| r.f1_score).sum::<f64>() / results.len() as f64;

    info!(pairs = results.len(), average_f1, "evaluation complete");

    Ok(EvalReport {
        results,
        average_f1,
    })
}

/// Persist an evaluation report as pretty-printed JSON.
pub fn write_eval_report(path: &Path, report: &EvalReport) -> Result<()> {
    let payload = serde_json::to_string_pretty(report)
        .map_err(|e| FaqHarvestError::validation(format!("serialize eval report: {e}")))?;
    std::fs::write(path, payload).map_err(|e| FaqHarvestError::io(path, e))
}

/// Load a previously persisted evaluation report.
pub fn load_eval_report(path: &Path) -> Result<EvalReport> {
    let raw = std::fs::read_to_string(path).map_err(|e| FaqHarvestError::io(path, e))?;
    serde_json::from_str(&raw).map_err(|e| {
        FaqHarvestError::validation(format!("malformed eval report {}: {e}", path.display()))
    })
}
