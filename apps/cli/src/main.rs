//! docgrounder CLI — local Java documentation cache for AI grounding.
//!
//! Extracts reference pages into a JSON corpus and answers free-text
//! queries with ranked, prompt-ready documentation context.

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
