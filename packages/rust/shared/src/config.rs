//! Application configuration for FaqHarvest.
//!
//! User config lives at `~/.faqharvest/faqharvest.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FaqHarvestError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "faqharvest.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".faqharvest";

// ---------------------------------------------------------------------------
// Config structs (matching faqharvest.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Markup extraction templates, selected per source.
    #[serde(default = "default_templates")]
    pub templates: Vec<TemplateConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: DefaultsConfig::default(),
            templates: default_templates(),
        }
    }
}

impl AppConfig {
    /// Look up a template by name.
    pub fn template_named(&self, name: &str) -> Option<&TemplateConfig> {
        self.templates.iter().find(|t| t.name == name)
    }
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default archive output directory.
    #[serde(default = "default_target_dir")]
    pub target_dir: String,

    /// Default fetch worker pool width.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Default per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Default markup template name.
    #[serde(default = "default_template_name")]
    pub template: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            target_dir: default_target_dir(),
            workers: default_workers(),
            timeout_secs: default_timeout_secs(),
            template: default_template_name(),
        }
    }
}

fn default_target_dir() -> String {
    "~/faqharvest-archive".into()
}
fn default_workers() -> usize {
    10
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_template_name() -> String {
    "support-site".into()
}

// ---------------------------------------------------------------------------
// Markup templates
// ---------------------------------------------------------------------------

/// How a template locates the answer for a question heading.
///
/// The two conventions seen across source templates: a single sibling
/// block after each heading, or a run of paragraph elements up to the
/// next heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum AnswerRule {
    /// The answer is the next sibling element matching `selector`;
    /// its text is the joined text of its `<p>` descendants.
    SiblingBlock { selector: String },
    /// The answer is the run of `<p>` siblings following the heading,
    /// up to the next question heading.
    FollowingParagraphs,
}

/// `[[templates]]` entry — per-source-template extraction locators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Template name, referenced from `[defaults]` and CLI flags.
    pub name: String,
    /// CSS selector for the page fragment the archiver persists.
    pub archive_selector: String,
    /// CSS selector for the FAQ container in archived HTML.
    pub faq_container: String,
    /// CSS selector for question headings within the container.
    pub question_selector: String,
    /// How answers relate to question headings in this template.
    pub answer: AnswerRule,
}

/// The built-in template matching the original support-site layout.
pub fn default_template() -> TemplateConfig {
    TemplateConfig {
        name: default_template_name(),
        archive_selector: "#main > div:nth-child(3)".into(),
        faq_container: "section#faq-content-container".into(),
        question_selector: "h3".into(),
        answer: AnswerRule::SiblingBlock {
            selector: "div.content".into(),
        },
    }
}

fn default_templates() -> Vec<TemplateConfig> {
    vec![default_template()]
}

// ---------------------------------------------------------------------------
// Archive layout
// ---------------------------------------------------------------------------

/// Directory layout of a scrape archive.
///
/// HTML fragments live under `HTML/`, JSON-LD document lists under
/// `JSONLD/`, run reports at the root.
#[derive(Debug, Clone)]
pub struct ArchiveLayout {
    root: PathBuf,
}

impl ArchiveLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn html_dir(&self) -> PathBuf {
        self.root.join("HTML")
    }

    pub fn jsonld_dir(&self) -> PathBuf {
        self.root.join("JSONLD")
    }

    /// Create the root and artifact subdirectories if missing.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [self.root.clone(), self.html_dir(), self.jsonld_dir()] {
            std::fs::create_dir_all(&dir).map_err(|e| FaqHarvestError::io(&dir, e))?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Scrape config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime fetch configuration — merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Fetch worker pool width.
    pub workers: usize,
    /// Hard per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl From<&AppConfig> for ScrapeConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            workers: config.defaults.workers,
            timeout_secs: config.defaults.timeout_secs,
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.faqharvest/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| FaqHarvestError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.faqharvest/faqharvest.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| FaqHarvestError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        FaqHarvestError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| FaqHarvestError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| FaqHarvestError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| FaqHarvestError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("target_dir"));
        assert!(toml_str.contains("faq-content-container"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.defaults.workers, 10);
        assert_eq!(parsed.defaults.timeout_secs, 10);
        assert_eq!(parsed.templates.len(), 1);
        assert_eq!(parsed.templates[0], default_template());
    }

    #[test]
    fn template_with_following_paragraphs() {
        let toml_str = r#"
[defaults]
template = "docs-site"

[[templates]]
name = "docs-site"
archive_selector = "main"
faq_container = "div.faq"
question_selector = "h2"
answer = { mode = "following-paragraphs" }
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        let template = config.template_named("docs-site").expect("template");
        assert_eq!(template.answer, AnswerRule::FollowingParagraphs);
    }

    #[test]
    fn scrape_config_from_app_config() {
        let app = AppConfig::default();
        let scrape = ScrapeConfig::from(&app);
        assert_eq!(scrape.workers, 10);
        assert_eq!(scrape.timeout_secs, 10);
    }

    #[test]
    fn archive_layout_paths() {
        let layout = ArchiveLayout::new("/tmp/archive");
        assert_eq!(layout.html_dir(), PathBuf::from("/tmp/archive/HTML"));
        assert_eq!(layout.jsonld_dir(), PathBuf::from("/tmp/archive/JSONLD"));
    }
}
