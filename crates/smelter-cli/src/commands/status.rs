//! Status command - show persisted run state and artifacts.

use std::path::PathBuf;

use colored::Colorize;
use smelter::pipeline::{PipelineRun, Stage, StageStatus};
use smelter::store::{ArtifactStore, DirStore};
use smelter::text::format_bytes;

const STATE_SUFFIX: &str = "_pipeline_state.json";

pub fn run(out: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let store = DirStore::open(&out)?;
    let keys = store.keys();

    if keys.is_empty() {
        println!("No generated files in '{}'.", out.display());
        return Ok(());
    }

    let mut shown_runs = 0;
    for key in &keys {
        if !key.ends_with(STATE_SUFFIX) {
            continue;
        }
        let Some(raw) = store.get(key) else { continue };
        let run: PipelineRun = match serde_json::from_str(&raw) {
            Ok(run) => run,
            Err(e) => {
                println!("{} unreadable run state '{}': {}", "Warning:".yellow(), key, e);
                continue;
            }
        };

        shown_runs += 1;
        println!("{} {}", "Dataset:".cyan().bold(), run.basename);
        for stage in Stage::ALL {
            if let Some(state) = run.state(stage) {
                let marker = match state.status {
                    StageStatus::Complete => "✓".green(),
                    StageStatus::Processing => "…".yellow(),
                    StageStatus::Pending => "·".dimmed(),
                };
                println!("  {} {} - {}", marker, stage.label(), state.message);
            }
        }
        println!();
    }

    if shown_runs == 0 {
        println!("No run state recorded yet.");
        println!();
    }

    println!("{}", "Generated files:".cyan().bold());
    for key in &keys {
        if key.ends_with(STATE_SUFFIX) {
            continue;
        }
        let size = store.get(key).map(|v| v.len() as u64).unwrap_or(0);
        println!("  {} ({})", key, format_bytes(size));
    }

    Ok(())
}
