//! Golden dataset assembly: ordered, deduplicated question → answer merge.
//!
//! Question equality is exact-string, case-sensitive, on trimmed text —
//! near-duplicate questions with differing punctuation stay separate
//! entries.

use std::collections::HashMap;

use tracing::info;

use faqharvest_shared::{FaqEntry, GoldenPair};

// ---------------------------------------------------------------------------
// GoldenDataset
// ---------------------------------------------------------------------------

/// An ordered mapping from question to expected answer.
///
/// Insertion order reflects first-seen key order; the value reflects the
/// last writer of that key.
#[derive(Debug, Clone, Default)]
pub struct GoldenDataset {
    pairs: Vec<GoldenPair>,
    index: HashMap<String, usize>,
}

impl GoldenDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a dataset from serialized pairs, preserving their order.
    pub fn from_pairs(pairs: Vec<GoldenPair>) -> Self {
        let mut dataset = Self::new();
        for pair in pairs {
            dataset.upsert(pair.question, pair.expected_answer);
        }
        dataset
    }

    /// Insert or replace an answer.
    ///
    /// An existing question keeps its position and takes the new answer;
    /// a new question is appended at the end.
    pub fn upsert(&mut self, question: String, expected_answer: String) {
        match self.index.get(&question) {
            Some(&pos) => self.pairs[pos].expected_answer = expected_answer,
            None => {
                self.index.insert(question.clone(), self.pairs.len());
                self.pairs.push(GoldenPair {
                    question,
                    expected_answer,
                });
            }
        }
    }

    pub fn get(&self, question: &str) -> Option<&str> {
        self.index
            .get(question)
            .map(|&pos| self.pairs[pos].expected_answer.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The ordered pairs, for serialization.
    pub fn as_pairs(&self) -> &[GoldenPair] {
        &self.pairs
    }

    pub fn iter(&self) -> impl Iterator<Item = &GoldenPair> {
        self.pairs.iter()
    }
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// Merge two entry lists into one ordered, deduplicated dataset.
///
/// The baseline seeds the mapping in its given order; each override entry
/// replaces an existing question's answer in place, or appends a new
/// question at the end. Applying the same override list twice yields the
/// same result as applying it once.
pub fn merge(baseline: &[FaqEntry], overrides: &[FaqEntry]) -> GoldenDataset {
    let mut dataset = GoldenDataset::new();

    for entry in baseline.iter().chain(overrides) {
        dataset.upsert(entry.question.clone(), entry.answer.clone());
    }

    info!(
        baseline = baseline.len(),
        overrides = overrides.len(),
        merged = dataset.len(),
        "merged entry lists"
    );

    dataset
}
