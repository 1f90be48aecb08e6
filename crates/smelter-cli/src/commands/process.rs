//! Process command - run the pipeline over input files.

use std::path::PathBuf;

use colored::Colorize;
use smelter::llm::GenConfig;
use smelter::pipeline::{Pipeline, PipelineConfig, Stage, StageGroup, StageSelection, StageStatus};
use smelter::store::{ArtifactStore, DirStore};
use smelter::text::format_bytes;
use smelter::HfProvider;

pub fn run(
    files: Vec<PathBuf>,
    stages: Vec<String>,
    out: PathBuf,
    model: Option<String>,
    token: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let groups = stages
        .iter()
        .map(|name| StageGroup::parse(name))
        .collect::<smelter::Result<Vec<_>>>()?;
    let selection = StageSelection::new(groups)?;

    let mut generation = GenConfig::default();
    if let Some(model) = model {
        generation.model = model;
    }

    let config = PipelineConfig { selection, generation };
    let provider = match token {
        Some(token) => Some(HfProvider::new(token)?),
        None => HfProvider::from_env().ok(),
    };

    let pipeline = match provider {
        Some(provider) => Pipeline::new(config).with_generator(provider),
        None => {
            println!(
                "{} no generation token found, using deterministic fallbacks",
                "Note:".yellow()
            );
            Pipeline::new(config)
        }
    };

    let mut store = DirStore::open(&out)?;
    let reports = pipeline.process_files(&files, &mut store);

    let mut failures = 0;
    for report in &reports {
        let name = report.path.display();
        match &report.result {
            Ok(outcome) if outcome.skipped => {
                println!(
                    "{} {} (selected artifacts already exist)",
                    "Skipped:".cyan().bold(),
                    name
                );
            }
            Ok(outcome) => {
                println!("{} {}", "Processed:".green().bold(), name);
                if let Some(run) = &outcome.run {
                    for stage in Stage::ALL {
                        if let Some(state) = run.state(stage) {
                            if state.status == StageStatus::Complete {
                                println!("  {} {} - {}", "✓".green(), stage.label(), state.message);
                            }
                        }
                    }
                }
                for key in &outcome.artifacts {
                    let size = store.get(key).map(|v| v.len() as u64).unwrap_or(0);
                    println!("  {} {} ({})", "•".dimmed(), key, format_bytes(size));
                }
            }
            Err(error) => {
                failures += 1;
                println!("{} {}: {}", "Invalid:".red().bold(), name, error);
            }
        }
    }

    println!();
    println!(
        "{} {} file(s), {} failure(s), artifacts in '{}'",
        "Done:".green().bold(),
        reports.len(),
        failures,
        out.display()
    );

    Ok(())
}
