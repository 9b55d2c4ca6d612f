use std::cell::OnceCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::sniff::MimeSniffer;

/// What a single `stat` told us about the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Missing,
    Directory,
    File,
    /// The entry could not be stat-ed for another reason (e.g. permissions).
    /// Classified through the file tiers.
    Unreadable,
}

/// Per-call facts about the path being classified.
///
/// The MIME type is only detected the first time it is asked for.
pub struct ClassificationContext<'a> {
    path: PathBuf,
    state: EntryState,
    suffix: Option<String>,
    mime: OnceCell<Option<String>>,
    sniffer: &'a dyn MimeSniffer,
}

impl<'a> ClassificationContext<'a> {
    pub fn inspect(path: &Path, sniffer: &'a dyn MimeSniffer) -> Self {
        let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        let state = match fs::metadata(&path) {
            Ok(metadata) if metadata.is_dir() => EntryState::Directory,
            Ok(_) => EntryState::File,
            Err(e) if is_not_found(&e) => EntryState::Missing,
            Err(e) => {
                tracing::trace!("Cannot stat {:?}: {}", path, e);
                EntryState::Unreadable
            }
        };
        let suffix = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .filter(|ext| !ext.is_empty())
            .map(|ext| format!(".{ext}"));

        Self {
            path,
            state,
            suffix,
            mime: OnceCell::new(),
            sniffer,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }

    pub fn state(&self) -> EntryState {
        self.state
    }

    /// Lower-cased suffix with its leading dot, e.g. `.py`.
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// Lower-cased detected MIME type.
    pub fn mime(&self) -> Option<&str> {
        self.mime
            .get_or_init(|| self.sniffer.sniff(&self.path).map(|m| m.to_lowercase()))
            .as_deref()
    }

    /// MIME type if it has already been detected; never triggers detection.
    pub fn detected_mime(&self) -> Option<String> {
        self.mime.get().cloned().flatten()
    }

    /// Re-check existence after a tier failed, so that an entry removed
    /// mid-classification reports as missing.
    pub fn vanished(&self) -> bool {
        matches!(self.path.try_exists(), Ok(false))
    }
}

fn is_not_found(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}
