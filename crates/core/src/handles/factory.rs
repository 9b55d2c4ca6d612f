use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use super::{
    CSourceFile, ConfigFile, ExecutableFile, Folder, Handle, JsonFile, MissingPath, PlainFile,
    PythonFile, TextFile,
};
use crate::types::Kind;

/// External programs that handles hand their files to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toolchain {
    pub python: String,
    pub c_compiler: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            python: "python3".to_string(),
            c_compiler: "gcc".to_string(),
        }
    }
}

pub type Constructor = Box<dyn Fn(PathBuf, Kind, &Toolchain) -> Box<dyn Handle> + Send + Sync>;

/// Maps kinds to handle constructors.
///
/// Kinds without a constructor get a [`Folder`] when the path is a directory
/// and a [`PlainFile`] otherwise.
pub struct HandleFactory {
    constructors: HashMap<Kind, Constructor>,
    toolchain: Toolchain,
}

impl HandleFactory {
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
            toolchain: Toolchain::default(),
        }
    }

    pub fn with_builtin() -> Self {
        let mut factory = Self::new();
        factory.register(Kind::MISSING, |path, _, _| Box::new(MissingPath::new(path)));
        factory.register(Kind::FILE, |path, kind, _| Box::new(PlainFile::new(path, kind)));
        factory.register(Kind::TEXT_FILE, |path, kind, _| Box::new(TextFile::new(path, kind)));
        factory.register(Kind::CONFIG_FILE, |path, kind, _| {
            Box::new(ConfigFile::new(path, kind))
        });
        factory.register(Kind::JSON_FILE, |path, kind, _| Box::new(JsonFile::new(path, kind)));
        factory.register(Kind::PYTHON_FILE, |path, kind, tools| {
            Box::new(PythonFile::new(path, kind).with_interpreter(&tools.python))
        });
        factory.register(Kind::C_SOURCE_FILE, |path, kind, tools| {
            Box::new(CSourceFile::new(path, kind).with_compiler(&tools.c_compiler))
        });
        factory.register(Kind::EXECUTABLE_FILE, |path, kind, _| {
            Box::new(ExecutableFile::new(path, kind))
        });
        for kind in [
            Kind::FOLDER,
            Kind::PYTHON_PACKAGE,
            Kind::C_PROJECT,
            Kind::WEBSITE_FOLDER,
        ] {
            factory.register(kind, |path, kind, _| Box::new(Folder::new(path, kind)));
        }
        factory
    }

    pub fn with_toolchain(mut self, toolchain: Toolchain) -> Self {
        self.toolchain = toolchain;
        self
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    /// Set the constructor for a kind, replacing any earlier one.
    pub fn register<F>(&mut self, kind: Kind, constructor: F)
    where
        F: Fn(PathBuf, Kind, &Toolchain) -> Box<dyn Handle> + Send + Sync + 'static,
    {
        tracing::debug!("Registering handle constructor for {}", kind);
        self.constructors.insert(kind, Box::new(constructor));
    }

    pub fn has_constructor(&self, kind: &Kind) -> bool {
        self.constructors.contains_key(kind)
    }

    pub fn build(&self, path: PathBuf, kind: Kind) -> Box<dyn Handle> {
        if let Some(constructor) = self.constructors.get(&kind) {
            return constructor(path, kind, &self.toolchain);
        }
        tracing::trace!("No constructor for {}, using generic handle", kind);
        if path.is_dir() {
            Box::new(Folder::new(path, kind))
        } else {
            Box::new(PlainFile::new(path, kind))
        }
    }
}

impl Default for HandleFactory {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl fmt::Debug for HandleFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&str> = self.constructors.keys().map(Kind::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("HandleFactory")
            .field("kinds", &kinds)
            .field("toolchain", &self.toolchain)
            .finish()
    }
}
