use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    /// Source handed to an interpreter (python3 script.py)
    Interpreter,
    /// Source handed to a compiler (gcc main.c -o main)
    Compiler,
    /// The file itself is the program
    Executable,
}

impl CommandType {
    /// What running the command does to the source, for user-facing output.
    pub fn action(&self) -> &'static str {
        match self {
            CommandType::Interpreter => "interpret",
            CommandType::Compiler => "compile",
            CommandType::Executable => "execute",
        }
    }
}

/// A fully specified process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub command_type: CommandType,
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl ToolCommand {
    pub fn new(command_type: CommandType, program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command_type,
            program: program.into(),
            args,
            working_dir: None,
        }
    }

    pub fn interpreter(program: impl Into<String>, args: Vec<String>) -> Self {
        Self::new(CommandType::Interpreter, program, args)
    }

    pub fn compiler(program: impl Into<String>, args: Vec<String>) -> Self {
        Self::new(CommandType::Compiler, program, args)
    }

    pub fn executable(path: &Path, args: Vec<String>) -> Self {
        Self::new(
            CommandType::Executable,
            path.to_string_lossy().into_owned(),
            args,
        )
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn to_shell_command(&self) -> String {
        let mut cmd = quote(&self.program);
        for arg in &self.args {
            cmd.push(' ');
            cmd.push_str(&quote(arg));
        }
        cmd
    }

    /// Run with inherited stdio.
    pub fn execute(&self) -> io::Result<ExitStatus> {
        tracing::debug!("Executing: {}", self.to_shell_command());
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref dir) = self.working_dir {
            tracing::trace!("Working directory: {:?}", dir);
            cmd.current_dir(dir);
        }

        cmd.status()
    }
}

/// POSIX single-quote `arg` unless every character is shell-safe.
fn quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./=:,+@%".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', "'\\''"))
    }
}
