//! Extraction strategy trait and built-in strategies.
//!
//! A strategy turns an archived artifact set into a list of question/
//! answer entries. The structured-data strategy reads JSON-LD artifacts;
//! the markup strategy reads HTML artifacts through a per-template
//! configuration. Entries with an empty question or answer are dropped,
//! never surfaced.

mod markup;
mod structured;

use std::path::{Path, PathBuf};

use faqharvest_shared::{ArchiveLayout, FaqEntry, FaqHarvestError, Result};

pub use markup::MarkupExtractor;
pub use structured::StructuredDataExtractor;

/// Capability: produce FAQ entries from an artifact set.
pub trait CorpusExtractor {
    /// Human-readable strategy name for tracing.
    fn name(&self) -> &str;

    /// Extract every valid entry from the archive.
    fn extract(&self, layout: &ArchiveLayout) -> Result<Vec<FaqEntry>>;
}

/// List artifact files with the given extension, sorted by file name so
/// extraction order is stable across runs.
pub fn artifact_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(dir).map_err(|e| FaqHarvestError::io(dir, e))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(extension))
        .collect();

    files.sort();
    Ok(files)
}

/// The canonical key an artifact file was written under.
pub fn artifact_key(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}
