use std::any::Any;
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::Handle;
use crate::command::ToolCommand;
use crate::error::{Error, Result};
use crate::sniff::MimeSniffer;
use crate::types::Kind;

/// Line-oriented access shared by every text-bearing handle.
pub trait TextAccess: Handle {
    /// Whole contents, with invalid UTF-8 replaced.
    fn read_text(&self) -> Result<String> {
        let bytes = fs::read(self.path())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn read_lines(&self) -> Result<Vec<String>> {
        Ok(self.read_text()?.lines().map(str::to_string).collect())
    }

    /// Overwrite the file with `lines` joined by `\n`.
    fn write_lines<I, S>(&self, lines: I) -> Result<()>
    where
        Self: Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = lines
            .into_iter()
            .map(|line| line.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        fs::write(self.path(), joined)?;
        Ok(())
    }
}

fn line_count_detail(handle: &impl TextAccess) -> Result<(String, String)> {
    Ok(("lines".to_string(), handle.read_lines()?.len().to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPath {
    path: PathBuf,
    kind: Kind,
}

impl MissingPath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: Kind::MISSING,
        }
    }
}

impl Handle for MissingPath {
    fn path(&self) -> &Path {
        &self.path
    }

    fn kind(&self) -> &Kind {
        &self.kind
    }

    fn describe(&self) -> String {
        format!("{} (missing)", self.path.display())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Any regular file, including kinds with no dedicated handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainFile {
    path: PathBuf,
    kind: Kind,
}

impl PlainFile {
    pub fn new(path: impl Into<PathBuf>, kind: Kind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn mime(&self, sniffer: &dyn MimeSniffer) -> Option<String> {
        sniffer.sniff(&self.path)
    }

    pub fn size(&self) -> Result<u64> {
        Ok(fs::metadata(&self.path)?.len())
    }
}

impl Handle for PlainFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn kind(&self) -> &Kind {
        &self.kind
    }

    fn details(&self) -> Result<Vec<(String, String)>> {
        Ok(vec![("size".to_string(), format!("{} bytes", self.size()?))])
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFile {
    path: PathBuf,
    kind: Kind,
}

impl TextFile {
    pub fn new(path: impl Into<PathBuf>, kind: Kind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

impl Handle for TextFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn kind(&self) -> &Kind {
        &self.kind
    }

    fn details(&self) -> Result<Vec<(String, String)>> {
        Ok(vec![line_count_detail(self)?])
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TextAccess for TextFile {}

/// `key = value` settings file. `#` starts a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    path: PathBuf,
    kind: Kind,
}

impl ConfigFile {
    pub fn new(path: impl Into<PathBuf>, kind: Kind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Parse the file. A missing file reads as empty; for repeated keys the
    /// last one wins.
    pub fn read(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.try_exists()? {
            return Ok(BTreeMap::new());
        }
        Ok(parse_key_values(&self.read_text()?))
    }

    pub fn write(&self, data: &BTreeMap<String, String>) -> Result<()> {
        self.write_lines(data.iter().map(|(key, value)| format!("{key} = {value}")))
    }
}

fn parse_key_values(text: &str) -> BTreeMap<String, String> {
    let mut data = BTreeMap::new();
    for line in text.lines() {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            data.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    data
}

impl Handle for ConfigFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn kind(&self) -> &Kind {
        &self.kind
    }

    fn details(&self) -> Result<Vec<(String, String)>> {
        let keys: Vec<String> = self.read()?.into_keys().collect();
        Ok(vec![("keys".to_string(), keys.join(", "))])
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TextAccess for ConfigFile {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFile {
    path: PathBuf,
    kind: Kind,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>, kind: Kind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn load(&self) -> Result<serde_json::Value> {
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Serialize `value` compactly, replacing the file.
    pub fn dump<T: serde::Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let mut writer = BufWriter::new(fs::File::create(&self.path)?);
        serde_json::to_writer(&mut writer, value)?;
        writer.flush()?;
        Ok(())
    }
}

impl Handle for JsonFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn kind(&self) -> &Kind {
        &self.kind
    }

    fn details(&self) -> Result<Vec<(String, String)>> {
        let summary = match self.load()? {
            serde_json::Value::Object(map) => format!("object with {} keys", map.len()),
            serde_json::Value::Array(items) => format!("array of {} items", items.len()),
            serde_json::Value::Null => "null".to_string(),
            serde_json::Value::Bool(_) => "boolean".to_string(),
            serde_json::Value::Number(_) => "number".to_string(),
            serde_json::Value::String(_) => "string".to_string(),
        };
        Ok(vec![("document".to_string(), summary)])
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TextAccess for JsonFile {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableFile {
    path: PathBuf,
    kind: Kind,
}

impl ExecutableFile {
    pub fn new(path: impl Into<PathBuf>, kind: Kind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

impl Handle for ExecutableFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn kind(&self) -> &Kind {
        &self.kind
    }

    fn run_command(&self, args: &[String]) -> Result<ToolCommand> {
        if !self.path.try_exists()? {
            return Err(Error::NotFound(self.path.clone()));
        }
        let program = std::path::absolute(&self.path)?;
        Ok(ToolCommand::executable(&program, args.to_vec()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
