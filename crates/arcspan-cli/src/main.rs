//! Workbench driver: `generate` writes a coordinate corpus plus its binary
//! answer file, `process` replays it under the cycle profiler.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod generate;
mod process;

#[derive(Parser)]
#[command(
    name = "arcspan",
    version,
    about = "Generate haversine coordinate corpora and replay them under the cycle profiler"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a JSON corpus of coordinate pairs and its answer file.
    Generate(generate::GenerateArgs),
    /// Parse a corpus, recompute distances, verify answers, report cycles.
    Process(process::ProcessArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Commands::Generate(args) => generate::run(&args),
        Commands::Process(args) => process::run(&args),
    }
}
