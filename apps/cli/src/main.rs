//! FaqHarvest CLI — FAQ schema scraping and golden dataset builds.
//!
//! Crawls URL lists for JSON-LD FAQPage schema, archives detected pages,
//! and assembles a deduplicated reference question/answer corpus.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
