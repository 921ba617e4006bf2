//! Docweave CLI — batch document assembly from extracted content fragments.
//!
//! Merges extracted text, tables, and structured content into placeholder
//! templates, producing the final document set plus chart series and run
//! summaries.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
