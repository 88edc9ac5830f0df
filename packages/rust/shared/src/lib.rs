//! Shared types, error model, and configuration for FaqHarvest.
//!
//! This crate is the foundation depended on by all other FaqHarvest crates.
//! It provides:
//! - [`FaqHarvestError`] — the unified error type
//! - Domain types ([`UrlRecord`], [`FaqEntry`], [`GoldenPair`], [`RunId`])
//! - Configuration ([`AppConfig`], [`ScrapeConfig`], [`TemplateConfig`],
//!   [`ArchiveLayout`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AnswerRule, AppConfig, ArchiveLayout, DefaultsConfig, ScrapeConfig, TemplateConfig,
    config_dir, config_file_path, default_template, init_config, load_config, load_config_from,
};
pub use error::{FaqHarvestError, Result};
pub use types::{
    ArtifactKind, FaqEntry, FetchStatus, GoldenPair, RunId, StrategyKind, UrlRecord,
};
