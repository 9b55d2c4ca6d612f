use serde::Serialize;
use std::any::Any;
use std::fs;
use std::path::{Path, PathBuf};

use super::Handle;
use crate::error::Result;
use crate::registry::ClassificationRegistry;
use crate::types::Kind;
use crate::utils::is_hidden;

/// A classified child of a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: Kind,
    /// Nesting level below the listed folder; direct children are 0
    pub depth: usize,
}

impl FolderEntry {
    fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// Any directory: plain folders, packages, projects and custom folder kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    path: PathBuf,
    kind: Kind,
}

impl Folder {
    pub fn new(path: impl Into<PathBuf>, kind: Kind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Direct children, classified, sorted by name.
    pub fn list(&self, registry: &ClassificationRegistry) -> Result<Vec<FolderEntry>> {
        list_dir(&self.path, registry, 0)
    }

    /// Children down to `depth` levels below the direct ones, depth-first in
    /// name order. Hidden entries are skipped unless `include_hidden`.
    pub fn tree(
        &self,
        registry: &ClassificationRegistry,
        depth: usize,
        include_hidden: bool,
    ) -> Result<Vec<FolderEntry>> {
        let mut out = Vec::new();
        walk(&self.path, registry, 0, depth, include_hidden, &mut out)?;
        Ok(out)
    }

    /// Render [`Folder::tree`] with two spaces of indent per level.
    pub fn render_tree(
        &self,
        registry: &ClassificationRegistry,
        depth: usize,
        include_hidden: bool,
    ) -> Result<String> {
        let mut out = String::new();
        for entry in self.tree(registry, depth, include_hidden)? {
            out.push_str(&"  ".repeat(entry.depth));
            out.push_str(&entry.name);
            out.push_str(&format!("  [{}]\n", entry.kind));
        }
        Ok(out)
    }

    pub fn is_hidden(&self) -> bool {
        is_hidden(&self.path)
    }
}

fn list_dir(dir: &Path, registry: &ClassificationRegistry, depth: usize) -> Result<Vec<FolderEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        entries.push(FolderEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            kind: registry.classify(&path),
            path,
            depth,
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

fn walk(
    dir: &Path,
    registry: &ClassificationRegistry,
    depth: usize,
    max_depth: usize,
    include_hidden: bool,
    out: &mut Vec<FolderEntry>,
) -> Result<()> {
    for entry in list_dir(dir, registry, depth)? {
        if !include_hidden && entry.is_hidden() {
            continue;
        }
        let descend = depth < max_depth && entry.path.is_dir();
        let path = entry.path.clone();
        out.push(entry);
        if descend {
            walk(&path, registry, depth + 1, max_depth, include_hidden, out)?;
        }
    }
    Ok(())
}

impl Handle for Folder {
    fn path(&self) -> &Path {
        &self.path
    }

    fn kind(&self) -> &Kind {
        &self.kind
    }

    fn details(&self) -> Result<Vec<(String, String)>> {
        let count = fs::read_dir(&self.path)?.count();
        Ok(vec![("entries".to_string(), count.to_string())])
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
