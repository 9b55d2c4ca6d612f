//! Folder predicates decide whether a directory belongs to a kind.

use std::fs;
use std::io;
use std::path::Path;

/// A test on a directory's contents or structure.
///
/// Errors are treated as "did not match" by the registry; they never reach
/// the caller of `classify`.
pub trait FolderPredicate: Send + Sync {
    fn matches(&self, dir: &Path) -> io::Result<bool>;

    /// Human-readable name for listings and logs.
    ///
    /// Defaults to the short (unqualified) type name.
    fn name(&self) -> &str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }
}

/// Matches when the directory has a child with this exact name.
#[derive(Debug, Clone)]
pub struct ContainsEntry {
    entry: String,
    label: String,
}

impl ContainsEntry {
    pub fn new(entry: impl Into<String>) -> Self {
        let entry = entry.into();
        let label = format!("contains {entry}");
        Self { entry, label }
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }
}

impl FolderPredicate for ContainsEntry {
    fn matches(&self, dir: &Path) -> io::Result<bool> {
        dir.join(&self.entry).try_exists()
    }

    fn name(&self) -> &str {
        &self.label
    }
}

/// Matches when any direct child has the given extension (case-insensitive).
#[derive(Debug, Clone)]
pub struct HasChildWithExtension {
    extension: String,
    label: String,
}

impl HasChildWithExtension {
    pub fn new(extension: impl AsRef<str>) -> Self {
        let extension = extension.as_ref().trim_start_matches('.').to_string();
        let label = format!("has *.{extension}");
        Self { extension, label }
    }
}

impl FolderPredicate for HasChildWithExtension {
    fn matches(&self, dir: &Path) -> io::Result<bool> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let matched = path
                .extension()
                .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(&self.extension));
            if matched {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn name(&self) -> &str {
        &self.label
    }
}

/// Matches when any inner predicate matches.
///
/// An inner error only surfaces when no other inner predicate matched.
pub struct AnyOf {
    predicates: Vec<Box<dyn FolderPredicate>>,
    label: String,
}

impl AnyOf {
    pub fn new(predicates: Vec<Box<dyn FolderPredicate>>) -> Self {
        let names: Vec<&str> = predicates.iter().map(|p| p.name()).collect();
        let label = names.join(" or ");
        Self { predicates, label }
    }
}

impl FolderPredicate for AnyOf {
    fn matches(&self, dir: &Path) -> io::Result<bool> {
        let mut first_error = None;
        for predicate in &self.predicates {
            match predicate.matches(dir) {
                Ok(true) => return Ok(true),
                Ok(false) => {}
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(false),
        }
    }

    fn name(&self) -> &str {
        &self.label
    }
}

/// Adapts a closure into a named predicate.
pub struct FnPredicate<F> {
    name: String,
    f: F,
}

impl<F> FnPredicate<F>
where
    F: Fn(&Path) -> io::Result<bool> + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> FolderPredicate for FnPredicate<F>
where
    F: Fn(&Path) -> io::Result<bool> + Send + Sync,
{
    fn matches(&self, dir: &Path) -> io::Result<bool> {
        (self.f)(dir)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
