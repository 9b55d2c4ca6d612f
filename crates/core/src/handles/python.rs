use regex::Regex;
use std::any::Any;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::{Handle, TextAccess};
use crate::command::ToolCommand;
use crate::error::Result;
use crate::types::Kind;

fn import_re() -> &'static Regex {
    static IMPORT_RE: OnceLock<Regex> = OnceLock::new();
    IMPORT_RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*(?:import|from)\s+([A-Za-z_][A-Za-z0-9_.]*)")
            .expect("valid import regex")
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonFile {
    path: PathBuf,
    kind: Kind,
    interpreter: String,
}

impl PythonFile {
    pub fn new(path: impl Into<PathBuf>, kind: Kind) -> Self {
        Self {
            path: path.into(),
            kind,
            interpreter: "python3".to_string(),
        }
    }

    pub fn with_interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    /// Whether an `__init__.py` sits beside this file.
    pub fn is_in_package(&self) -> bool {
        self.sibling_exists("__init__.py")
    }

    /// Whether a `__main__.py` sits beside this file.
    pub fn is_in_program(&self) -> bool {
        self.sibling_exists("__main__.py")
    }

    fn sibling_exists(&self, name: &str) -> bool {
        self.path
            .parent()
            .is_some_and(|dir| dir.join(name).is_file())
    }

    /// Top-level module names of every `import x` / `from x import y`.
    pub fn find_imports(&self) -> Result<BTreeSet<String>> {
        let text = self.read_text()?;
        Ok(import_re()
            .captures_iter(&text)
            .filter_map(|caps| caps.get(1))
            .filter_map(|m| m.as_str().split('.').next())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Package members run as `-m package.module` from the package's
    /// parent directory so relative imports resolve; anything else runs by
    /// absolute path.
    pub fn interpreter_command(&self, args: &[String]) -> Result<ToolCommand> {
        let path = std::path::absolute(&self.path)?;
        let package = path.parent().filter(|_| self.is_in_package());

        let command = match package {
            Some(package_dir) => {
                let package_name = package_dir
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let stem = path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let module = match stem.as_str() {
                    "__main__" | "__init__" => package_name,
                    _ => format!("{package_name}.{stem}"),
                };
                let cmd = ToolCommand::interpreter(
                    self.interpreter.clone(),
                    vec!["-m".to_string(), module],
                );
                match package_dir.parent() {
                    Some(root) => cmd.with_working_dir(root),
                    None => cmd,
                }
            }
            None => ToolCommand::interpreter(
                self.interpreter.clone(),
                vec![path.to_string_lossy().into_owned()],
            ),
        };
        Ok(command.with_args(args.iter().cloned()))
    }
}

impl Handle for PythonFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn kind(&self) -> &Kind {
        &self.kind
    }

    fn details(&self) -> Result<Vec<(String, String)>> {
        let imports: Vec<String> = self.find_imports()?.into_iter().collect();
        Ok(vec![
            ("in package".to_string(), self.is_in_package().to_string()),
            ("in program".to_string(), self.is_in_program().to_string()),
            ("imports".to_string(), imports.join(", ")),
        ])
    }

    fn run_command(&self, args: &[String]) -> Result<ToolCommand> {
        self.interpreter_command(args)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TextAccess for PythonFile {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_imports() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.py");
        fs::write(
            &path,
            "import os\nimport os.path\nfrom collections import OrderedDict\n    import json\nfrom . import sibling\nx = 'import nothing'\n",
        )
        .unwrap();

        let imports = PythonFile::new(&path, Kind::PYTHON_FILE)
            .find_imports()
            .unwrap();
        let expected: BTreeSet<String> = ["collections", "json", "os"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(imports, expected);
    }

    #[test]
    fn test_package_and_program_membership() {
        let temp_dir = TempDir::new().unwrap();
        let pkg = temp_dir.path().join("pkg");
        fs::create_dir(&pkg).unwrap();
        fs::write(pkg.join("__init__.py"), "").unwrap();
        fs::write(pkg.join("__main__.py"), "").unwrap();
        fs::write(pkg.join("mod.py"), "").unwrap();
        fs::write(temp_dir.path().join("loose.py"), "").unwrap();

        let member = PythonFile::new(pkg.join("mod.py"), Kind::PYTHON_FILE);
        assert!(member.is_in_package());
        assert!(member.is_in_program());

        let loose = PythonFile::new(temp_dir.path().join("loose.py"), Kind::PYTHON_FILE);
        assert!(!loose.is_in_package());
        assert!(!loose.is_in_program());
    }

    #[test]
    fn test_run_command_inside_package() {
        let temp_dir = TempDir::new().unwrap();
        let pkg = temp_dir.path().join("pkg");
        fs::create_dir(&pkg).unwrap();
        fs::write(pkg.join("__init__.py"), "").unwrap();

        let member = PythonFile::new(pkg.join("mod.py"), Kind::PYTHON_FILE);
        let cmd = member.run_command(&["--verbose".to_string()]).unwrap();
        assert_eq!(cmd.program, "python3");
        assert_eq!(cmd.args, vec!["-m", "pkg.mod", "--verbose"]);
        assert_eq!(cmd.working_dir.as_deref(), Some(temp_dir.path()));

        let main = PythonFile::new(pkg.join("__main__.py"), Kind::PYTHON_FILE);
        assert_eq!(main.run_command(&[]).unwrap().args, vec!["-m", "pkg"]);
    }

    #[test]
    fn test_run_command_standalone_script() {
        let temp_dir = TempDir::new().unwrap();
        let script = temp_dir.path().join("script.py");
        let cmd = PythonFile::new(&script, Kind::PYTHON_FILE)
            .with_interpreter("python3.12")
            .run_command(&[])
            .unwrap();
        assert_eq!(cmd.program, "python3.12");
        assert_eq!(cmd.args, vec![script.to_string_lossy().into_owned()]);
        assert_eq!(cmd.working_dir, None);
    }
}
