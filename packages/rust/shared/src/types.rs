//! Core domain types for FaqHarvest scrape runs and the golden corpus.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// RunId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper identifying one scrape run (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Generate a new time-sortable run identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RunId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ---------------------------------------------------------------------------
// FetchStatus
// ---------------------------------------------------------------------------

/// Terminal outcome of a single fetch attempt.
///
/// Transport failures and timeouts collapse into [`FetchStatus::Error`];
/// anything that produced an HTTP response keeps its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FetchStatus {
    /// An HTTP response was received with this status code.
    Http(u16),
    /// Network error or timeout — no response.
    Error,
}

impl FetchStatus {
    /// Whether this status is on the 2xx success path.
    pub fn is_success(&self) -> bool {
        matches!(self, FetchStatus::Http(code) if (200..300).contains(code))
    }
}

impl std::fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchStatus::Http(code) => write!(f, "{code}"),
            FetchStatus::Error => write!(f, "Error"),
        }
    }
}

// ---------------------------------------------------------------------------
// UrlRecord
// ---------------------------------------------------------------------------

/// One row of a scrape run: the outcome for a single input URL.
///
/// Created once per input URL (duplicates included) and immutable after
/// creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlRecord {
    /// The URL exactly as submitted.
    pub url: String,
    /// When the fetch attempt was made.
    pub fetch_date: DateTime<Utc>,
    /// Terminal fetch outcome.
    pub status: FetchStatus,
    /// Whether a JSON-LD FAQPage schema was detected on the page.
    pub detected: bool,
}

// ---------------------------------------------------------------------------
// Artifacts
// ---------------------------------------------------------------------------

/// The two artifact kinds the archiver writes per detected page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    /// The extracted HTML FAQ fragment (`HTML/<key>.html`).
    Html,
    /// The full parsed JSON-LD document list (`JSONLD/<key>.json`).
    StructuredData,
}

// ---------------------------------------------------------------------------
// FAQ entries
// ---------------------------------------------------------------------------

/// Which extraction strategy produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Extracted from a JSON-LD artifact.
    StructuredData,
    /// Extracted from an HTML artifact.
    Markup,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::StructuredData => "structured-data",
            StrategyKind::Markup => "markup",
        }
    }
}

/// A single question/answer pair with its extraction provenance.
///
/// Only valid with non-empty question and answer; extractors drop invalid
/// entries rather than emitting them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
    /// Strategy that produced this entry.
    pub strategy: StrategyKind,
    /// Canonical key of the artifact the entry came from.
    pub artifact_key: String,
}

/// A golden question/answer pair, as serialized in `golden_questions.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldenPair {
    pub question: String,
    pub expected_answer: String,
}
