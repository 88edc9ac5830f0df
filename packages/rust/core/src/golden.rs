//! Golden dataset build: archived artifacts → merged reference corpus.
//!
//! The structured-data strategy is the baseline; the markup strategy
//! overrides it, since rendered answers may differ slightly from the
//! schema payload.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use faqharvest_corpus::{
    CorpusExtractor, GoldenDataset, MarkupExtractor, StructuredDataExtractor, merge,
};
use faqharvest_shared::{
    ArchiveLayout, FaqHarvestError, GoldenPair, Result, TemplateConfig,
};

/// Configuration for a golden dataset build.
#[derive(Debug, Clone)]
pub struct GoldenConfig {
    /// Archive root holding `HTML/` and `JSONLD/` artifacts.
    pub archive_dir: PathBuf,
    /// Markup template for the HTML strategy.
    pub template: TemplateConfig,
    /// Output file for the merged dataset.
    pub output_file: PathBuf,
}

/// Summary of a golden dataset build.
#[derive(Debug)]
pub struct GoldenSummary {
    /// Entries produced by the structured-data baseline.
    pub structured_entries: usize,
    /// Entries produced by the markup override.
    pub markup_entries: usize,
    /// Final deduplicated dataset size.
    pub merged: usize,
    /// Where the dataset was written.
    pub output_file: PathBuf,
}

/// Build and persist the golden dataset.
#[instrument(skip_all, fields(archive = %config.archive_dir.display()))]
pub fn build_golden(config: &GoldenConfig) -> Result<GoldenSummary> {
    let layout = ArchiveLayout::new(&config.archive_dir);

    let baseline = StructuredDataExtractor.extract(&layout)?;
    info!(strategy = "structured-data", entries = baseline.len(), "baseline extraction complete");

    let overrides = MarkupExtractor::new(config.template.clone()).extract(&layout)?;
    info!(strategy = "markup", entries = overrides.len(), "override extraction complete");

    let dataset = merge(&baseline, &overrides);
    write_golden(&config.output_file, &dataset)?;

    let summary = GoldenSummary {
        structured_entries: baseline.len(),
        markup_entries: overrides.len(),
        merged: dataset.len(),
        output_file: config.output_file.clone(),
    };

    info!(
        merged = summary.merged,
        output = %summary.output_file.display(),
        "golden dataset written"
    );

    Ok(summary)
}

/// Persist a dataset as a pretty-printed array of question/answer pairs.
pub fn write_golden(path: &Path, dataset: &GoldenDataset) -> Result<()> {
    let payload = serde_json::to_string_pretty(dataset.as_pairs())
        .map_err(|e| FaqHarvestError::validation(format!("serialize golden dataset: {e}")))?;
    std::fs::write(path, payload).map_err(|e| FaqHarvestError::io(path, e))
}

/// Load a previously written golden dataset.
pub fn load_golden(path: &Path) -> Result<GoldenDataset> {
    let raw = std::fs::read_to_string(path).map_err(|e| FaqHarvestError::io(path, e))?;
    let pairs: Vec<GoldenPair> = serde_json::from_str(&raw).map_err(|e| {
        FaqHarvestError::validation(format!("malformed golden dataset {}: {e}", path.display()))
    })?;
    Ok(GoldenDataset::from_pairs(pairs))
}
