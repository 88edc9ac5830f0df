//! End-to-end scrape run: URL file → fetch pool → archive → run report.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{info, instrument, warn};

use faqharvest_scraper::{Archiver, FetchPool, report};
use faqharvest_shared::{
    ArchiveLayout, FaqHarvestError, Result, RunId, ScrapeConfig, TemplateConfig, UrlRecord,
};

/// Configuration for one scrape run.
#[derive(Debug, Clone)]
pub struct ScrapeRunConfig {
    /// Newline-delimited URL list file.
    pub url_file: PathBuf,
    /// Archive output root.
    pub target_dir: PathBuf,
    /// Fetch pool configuration.
    pub scrape: ScrapeConfig,
    /// Markup template for the archiver's fragment locator.
    pub template: TemplateConfig,
}

/// Result of one scrape run.
#[derive(Debug)]
pub struct ScrapeRunResult {
    /// Run identifier.
    pub run_id: RunId,
    /// One record per submitted URL, in completion order.
    pub records: Vec<UrlRecord>,
    /// How many records detected FAQ schema.
    pub detected: usize,
    /// Written report path, `None` when the report write failed.
    pub report_path: Option<PathBuf>,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting run status.
pub trait ScrapeProgress: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when the run completes.
    fn done(&self, result: &ScrapeRunResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ScrapeProgress for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn done(&self, _result: &ScrapeRunResult) {}
}

/// Load the newline-delimited URL list, ignoring blank lines.
///
/// A missing or unreadable file is the run's only fatal condition and is
/// surfaced before any fetch work begins.
pub fn load_urls(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| FaqHarvestError::io(path, e))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

/// Run the full scrape pipeline.
///
/// 1. Load the URL file (fatal if missing)
/// 2. Bootstrap the archive directories
/// 3. Fetch, detect, and archive concurrently
/// 4. Write the run report (logged, not fatal, on failure)
#[instrument(skip_all, fields(url_file = %config.url_file.display()))]
pub async fn run_scrape(
    config: &ScrapeRunConfig,
    progress: &dyn ScrapeProgress,
) -> Result<ScrapeRunResult> {
    let start = Instant::now();
    let run_id = RunId::new();

    let urls = load_urls(&config.url_file)?;
    info!(%run_id, urls = urls.len(), "starting scrape run");

    progress.phase("Preparing archive directories");
    let layout = ArchiveLayout::new(&config.target_dir);
    layout.ensure_dirs()?;

    progress.phase("Fetching URLs");
    let pool = FetchPool::new(config.scrape.clone())?;
    let archiver = Archiver::new(layout.clone(), &config.template);
    let records = pool.run(&urls, &archiver).await;

    progress.phase("Writing run report");
    let path = report::report_path(&layout, Utc::now());
    let report_path = match report::write_report(&path, &records) {
        Ok(()) => Some(path),
        Err(e) => {
            warn!(error = %e, "failed to write run report");
            None
        }
    };

    let detected = records.iter().filter(|r| r.detected).count();
    let result = ScrapeRunResult {
        run_id,
        detected,
        records,
        report_path,
        elapsed: start.elapsed(),
    };

    progress.done(&result);

    info!(
        run_id = %result.run_id,
        records = result.records.len(),
        detected = result.detected,
        elapsed_ms = result.elapsed.as_millis(),
        "scrape run complete"
    );

    Ok(result)
}
