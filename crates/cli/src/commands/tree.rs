use anyhow::{Context, Result, bail};
use filekind_core::handles::Folder;
use std::path::Path;

use crate::display::kind_icon;
use crate::session::Session;

pub fn tree_command(session: &Session, dir: &Path, depth: usize, all: bool) -> Result<()> {
    let classification = session.registry.explain(dir);
    if !dir.is_dir() {
        bail!("Not a directory: {} ({})", dir.display(), classification.kind);
    }

    println!(
        "{} {}  [{}]",
        kind_icon(&classification.kind),
        dir.display(),
        classification.kind
    );
    let folder = Folder::new(classification.path, classification.kind);
    let entries = folder
        .tree(&session.registry, depth, all)
        .with_context(|| format!("Failed to list {}", dir.display()))?;
    for entry in entries {
        println!(
            "{}{} {}  [{}]",
            "  ".repeat(entry.depth + 1),
            kind_icon(&entry.kind),
            entry.name,
            entry.kind
        );
    }
    Ok(())
}
