//! Reset command - clear generated artifacts and run state.

use std::path::PathBuf;

use colored::Colorize;
use smelter::store::{ArtifactStore, DirStore};

pub fn run(out: PathBuf, basename: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = DirStore::open(&out)?;
    let keys = store.keys();

    let prefix = basename.as_ref().map(|b| format!("{b}_"));
    let mut removed = 0;
    for key in keys {
        let matches = match &prefix {
            Some(prefix) => key.starts_with(prefix),
            None => true,
        };
        if matches {
            store.remove(&key)?;
            removed += 1;
        }
    }

    match basename {
        Some(basename) => println!(
            "{} cleared {} file(s) for '{}'",
            "Done:".green().bold(),
            removed,
            basename
        ),
        None => println!("{} cleared {} file(s)", "Done:".green().bold(), removed),
    }

    Ok(())
}
