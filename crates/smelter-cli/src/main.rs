//! Smelter CLI - data quality and standardization pipeline.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Process {
            files,
            stages,
            out,
            model,
            token,
        } => commands::process::run(files, stages, out, model, token),

        Commands::Status { out } => commands::status::run(out),

        Commands::Reset { out, basename } => commands::reset::run(out, basename),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
