use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use super::Kind;

/// Which rule tier produced a classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tier", rename_all = "snake_case")]
pub enum RuleSource {
    /// The path did not exist (or vanished while being inspected)
    Missing,
    /// A folder predicate matched; `index` is its registration position
    Folder { index: usize, name: String },
    /// The lower-cased suffix was found in the extension map
    Extension { extension: String },
    /// The longest registered prefix of the detected MIME type
    Mime { prefix: String, mime: String },
    /// No rule matched; generic file or folder
    Fallback,
}

impl fmt::Display for RuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSource::Missing => write!(f, "missing"),
            RuleSource::Folder { index, name } => write!(f, "folder rule #{index} ({name})"),
            RuleSource::Extension { extension } => write!(f, "extension {extension}"),
            RuleSource::Mime { prefix, mime } => write!(f, "mime prefix {prefix} ({mime})"),
            RuleSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// Detailed result of classifying one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// The path as resolved against the working directory at call time
    pub path: PathBuf,
    pub kind: Kind,
    pub source: RuleSource,
    /// Detected MIME type, present only when the MIME tier was consulted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
}

impl Classification {
    pub fn new(path: PathBuf, kind: Kind, source: RuleSource) -> Self {
        Self {
            path,
            kind,
            source,
            mime: None,
        }
    }

    pub fn with_mime(mut self, mime: Option<String>) -> Self {
        self.mime = mime;
        self
    }
}
