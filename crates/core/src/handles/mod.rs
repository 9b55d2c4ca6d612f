//! Kind-specific wrappers around classified paths.
//!
//! Classification and construction are separate steps: a
//! [`ClassificationRegistry`] decides the [`Kind`], then a [`HandleFactory`]
//! builds the matching [`Handle`]. [`open`] does both.

mod c_source;
mod factory;
mod file;
mod folder;
mod python;

pub use c_source::CSourceFile;
pub use factory::{Constructor, HandleFactory, Toolchain};
pub use file::{ConfigFile, ExecutableFile, JsonFile, MissingPath, PlainFile, TextAccess, TextFile};
pub use folder::{Folder, FolderEntry};
pub use python::PythonFile;

use std::any::Any;
use std::fmt;
use std::path::Path;

use crate::command::ToolCommand;
use crate::error::{Error, Result};
use crate::registry::ClassificationRegistry;
use crate::types::{Capability, Kind};

/// A classified filesystem entry with operations for its kind.
pub trait Handle: fmt::Debug + Send + Sync {
    fn path(&self) -> &Path;

    fn kind(&self) -> &Kind;

    /// One-line summary, e.g. `src/app (Python package folder)`.
    fn describe(&self) -> String {
        format!("{} ({})", self.path().display(), self.kind().label())
    }

    fn capabilities(&self) -> &'static [Capability] {
        self.kind().capabilities()
    }

    /// Kind-specific facts as label/value pairs, for display.
    fn details(&self) -> Result<Vec<(String, String)>> {
        Ok(Vec::new())
    }

    /// The process that runs (or builds) this entry.
    fn run_command(&self, _args: &[String]) -> Result<ToolCommand> {
        Err(self.unsupported("run"))
    }

    fn as_any(&self) -> &dyn Any;

    fn unsupported(&self, operation: &str) -> Error {
        Error::Unsupported {
            kind: self.kind().to_string(),
            operation: operation.to_string(),
        }
    }
}

impl dyn Handle {
    pub fn downcast_ref<T: Handle + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Classify `path` and build the handle for its kind.
pub fn open(
    registry: &ClassificationRegistry,
    factory: &HandleFactory,
    path: impl AsRef<Path>,
) -> Box<dyn Handle> {
    let classification = registry.explain(path);
    factory.build(classification.path, classification.kind)
}
