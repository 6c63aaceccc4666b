//! DGML command-line interface

use anyhow::Result;
use clap::Parser;
use dgml_cli::commands::Commands;

/// Split DGML documents into structural chunks
#[derive(Debug, Parser)]
#[command(name = "dgml", version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
