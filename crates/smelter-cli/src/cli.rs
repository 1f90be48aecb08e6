//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Smelter: data quality and standardization pipeline
#[derive(Parser)]
#[command(name = "smelter")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the pipeline over one or more comma-separated files
    Process {
        /// Input files
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Stage groups to run (comma-separated: quality, metadata,
        /// standardize, ai)
        #[arg(long, default_value = "quality,metadata,standardize,ai", value_delimiter = ',')]
        stages: Vec<String>,

        /// Output directory for generated artifacts
        #[arg(short, long, default_value = "smelter_out")]
        out: PathBuf,

        /// Generation model to request
        #[arg(long)]
        model: Option<String>,

        /// Generation API token (falls back to SMELTER_HF_TOKEN / HF_TOKEN)
        #[arg(long)]
        token: Option<String>,
    },

    /// Show persisted run state and generated artifacts
    Status {
        /// Output directory holding artifacts
        #[arg(short, long, default_value = "smelter_out")]
        out: PathBuf,
    },

    /// Remove generated artifacts and run state
    Reset {
        /// Output directory holding artifacts
        #[arg(short, long, default_value = "smelter_out")]
        out: PathBuf,

        /// Only clear artifacts for this dataset basename
        #[arg(value_name = "BASENAME")]
        basename: Option<String>,
    },
}
