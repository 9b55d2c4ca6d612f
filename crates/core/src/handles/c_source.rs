use std::any::Any;
use std::path::{Path, PathBuf};

use super::{Handle, TextAccess};
use crate::command::ToolCommand;
use crate::error::Result;
use crate::types::Kind;

/// A C source or header file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CSourceFile {
    path: PathBuf,
    kind: Kind,
    compiler: String,
}

impl CSourceFile {
    pub fn new(path: impl Into<PathBuf>, kind: Kind) -> Self {
        Self {
            path: path.into(),
            kind,
            compiler: "gcc".to_string(),
        }
    }

    pub fn with_compiler(mut self, compiler: impl Into<String>) -> Self {
        self.compiler = compiler.into();
        self
    }

    /// `gcc <src> -o <output>`; the output defaults to the file stem.
    pub fn compile_command(&self, output: Option<&Path>) -> ToolCommand {
        let output = match output {
            Some(output) => output.to_path_buf(),
            None => PathBuf::from(self.path.file_stem().unwrap_or(self.path.as_os_str())),
        };
        ToolCommand::compiler(
            self.compiler.clone(),
            vec![
                self.path.to_string_lossy().into_owned(),
                "-o".to_string(),
                output.to_string_lossy().into_owned(),
            ],
        )
    }
}

impl Handle for CSourceFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn kind(&self) -> &Kind {
        &self.kind
    }

    fn details(&self) -> Result<Vec<(String, String)>> {
        Ok(vec![(
            "compile".to_string(),
            self.compile_command(None).to_shell_command(),
        )])
    }

    /// Compiling is how a C source is "run"; extra args go to the compiler.
    fn run_command(&self, args: &[String]) -> Result<ToolCommand> {
        Ok(self.compile_command(None).with_args(args.iter().cloned()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TextAccess for CSourceFile {}
