//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use faqharvest_core::golden::{GoldenConfig, build_golden};
use faqharvest_core::pipeline::{ScrapeProgress, ScrapeRunConfig, ScrapeRunResult, run_scrape};
use faqharvest_shared::{AppConfig, ScrapeConfig, TemplateConfig, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// FaqHarvest — build golden FAQ corpora from the live web.
#[derive(Parser)]
#[command(
    name = "faqharvest",
    version,
    about = "Scrape URLs for FAQPage schema, archive matches, and build a golden Q/A dataset.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Fetch a URL list, detect FAQ schema, and archive matching pages.
    Scrape {
        /// Path to the newline-delimited URL list file.
        url_file: PathBuf,

        /// Archive output directory (defaults to the configured target_dir).
        #[arg(short, long)]
        target_dir: Option<PathBuf>,

        /// Fetch worker pool width.
        #[arg(long)]
        workers: Option<usize>,

        /// Per-request timeout in seconds.
        #[arg(long)]
        timeout: Option<u64>,

        /// Markup template name from the config's [[templates]].
        #[arg(long)]
        template: Option<String>,
    },

    /// Build the golden question/answer dataset from an archive.
    Golden {
        /// Archive directory holding HTML/ and JSONLD/ artifacts.
        archive_dir: PathBuf,

        /// Output file for the merged dataset.
        #[arg(short, long, default_value = "golden_questions.json")]
        out: PathBuf,

        /// Markup template name from the config's [[templates]].
        #[arg(long)]
        template: Option<String>,
    },

    /// Export a persisted evaluation result file to CSV.
    Export {
        /// Evaluation result JSON file.
        results: PathBuf,

        /// Output CSV file.
        out: PathBuf,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "faqharvest=info",
        1 => "faqharvest=debug",
        _ => "faqharvest=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Scrape {
            url_file,
            target_dir,
            workers,
            timeout,
            template,
        } => cmd_scrape(url_file, target_dir, workers, timeout, template.as_deref()).await,
        Command::Golden {
            archive_dir,
            out,
            template,
        } => cmd_golden(archive_dir, out, template.as_deref()).await,
        Command::Export { results, out } => cmd_export(&results, &out).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_scrape(
    url_file: PathBuf,
    target_dir: Option<PathBuf>,
    workers: Option<usize>,
    timeout: Option<u64>,
    template: Option<&str>,
) -> Result<()> {
    let config = load_config()?;

    let mut scrape = ScrapeConfig::from(&config);
    if let Some(workers) = workers {
        scrape.workers = workers;
    }
    if let Some(timeout) = timeout {
        scrape.timeout_secs = timeout;
    }

    let target_dir = match target_dir {
        Some(dir) => dir,
        None => expand_home(&config.defaults.target_dir),
    };

    let run_config = ScrapeRunConfig {
        url_file,
        target_dir,
        scrape,
        template: resolve_template(&config, template)?,
    };

    info!(
        url_file = %run_config.url_file.display(),
        target_dir = %run_config.target_dir.display(),
        workers = run_config.scrape.workers,
        "starting scrape"
    );

    let reporter = CliProgress::new();
    let result = run_scrape(&run_config, &reporter).await?;

    println!();
    println!("  Scrape run complete!");
    println!("  Run:      {}", result.run_id);
    println!("  URLs:     {}", result.records.len());
    println!("  Detected: {}", result.detected);
    match &result.report_path {
        Some(path) => println!("  Report:   {}", path.display()),
        None => println!("  Report:   write failed (see logs)"),
    }
    println!("  Time:     {:.1}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}

async fn cmd_golden(
    archive_dir: PathBuf,
    out: PathBuf,
    template: Option<&str>,
) -> Result<()> {
    let config = load_config()?;

    let golden_config = GoldenConfig {
        archive_dir,
        template: resolve_template(&config, template)?,
        output_file: out,
    };

    info!(
        archive = %golden_config.archive_dir.display(),
        output = %golden_config.output_file.display(),
        "building golden dataset"
    );

    let summary = build_golden(&golden_config)?;

    println!();
    println!("  Golden dataset built!");
    println!("  Structured entries: {}", summary.structured_entries);
    println!("  Markup entries:     {}", summary.markup_entries);
    println!("  Merged questions:   {}", summary.merged);
    println!("  Output:             {}", summary.output_file.display());
    println!();

    Ok(())
}

async fn cmd_export(results: &PathBuf, out: &PathBuf) -> Result<()> {
    info!(results = %results.display(), out = %out.display(), "exporting evaluation results");
    faqharvest_core::export::export_eval_csv(results, out)?;
    println!("Exported {} -> {}", results.display(), out.display());
    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve a template by name, defaulting to the configured default.
fn resolve_template(config: &AppConfig, name: Option<&str>) -> Result<TemplateConfig> {
    let name = name.unwrap_or(&config.defaults.template);
    config
        .template_named(name)
        .cloned()
        .ok_or_else(|| eyre!("no template named '{name}' in configuration"))
}

/// Expand a leading `~/` against the user's home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ScrapeProgress for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn done(&self, _result: &ScrapeRunResult) {
        self.spinner.finish_and_clear();
    }
}
