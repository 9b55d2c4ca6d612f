use anyhow::{Context, Result};
use filekind_core::Classification;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::display::format_classification;
use crate::session::Session;

pub fn classify_command(
    session: &Session,
    paths: &[PathBuf],
    json: bool,
    explain: bool,
    recursive: bool,
) -> Result<()> {
    let mut results: Vec<(PathBuf, Classification)> = Vec::new();
    for path in paths {
        for target in expand(path, recursive) {
            debug!("Classifying: {}", target.display());
            let classification = session.registry.explain(&target);
            results.push((target, classification));
        }
    }

    if json {
        let classifications: Vec<&Classification> = results.iter().map(|(_, c)| c).collect();
        let output = serde_json::to_string_pretty(&classifications)
            .context("Failed to serialize classifications")?;
        println!("{output}");
    } else {
        for (path, classification) in &results {
            println!("{}", format_classification(path, classification, explain));
        }
    }
    Ok(())
}

/// The path itself, plus every visible entry below it when `recursive`.
fn expand(path: &Path, recursive: bool) -> Vec<PathBuf> {
    if !recursive || !path.is_dir() {
        return vec![path.to_path_buf()];
    }
    WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_dot_entry(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.into_path()),
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .collect()
}

fn is_dot_entry(entry: &walkdir::DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}
