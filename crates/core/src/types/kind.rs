use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

use super::Capability;

/// Identifier naming a category of filesystem entry.
///
/// Built-in kinds are exposed as associated constants. Any other id is a
/// custom kind (from a config file or a late registration) and carries no
/// capability tags. Ids are compared case-insensitively by normalizing to
/// lowercase on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Kind(Cow<'static, str>);

struct BuiltinKind {
    kind: Kind,
    label: &'static str,
    capabilities: &'static [Capability],
}

const TEXT_CAPS: &[Capability] = &[Capability::ReadText, Capability::WriteText];
const FOLDER_CAPS: &[Capability] = &[Capability::ListEntries];

const BUILTIN_KINDS: &[BuiltinKind] = &[
    BuiltinKind {
        kind: Kind::MISSING,
        label: "missing path",
        capabilities: &[],
    },
    BuiltinKind {
        kind: Kind::FILE,
        label: "plain file",
        capabilities: &[],
    },
    BuiltinKind {
        kind: Kind::FOLDER,
        label: "folder",
        capabilities: FOLDER_CAPS,
    },
    BuiltinKind {
        kind: Kind::TEXT_FILE,
        label: "text file",
        capabilities: TEXT_CAPS,
    },
    BuiltinKind {
        kind: Kind::CONFIG_FILE,
        label: "config file",
        capabilities: &[
            Capability::ReadText,
            Capability::WriteText,
            Capability::KeyValue,
        ],
    },
    BuiltinKind {
        kind: Kind::PYTHON_FILE,
        label: "Python source file",
        capabilities: &[Capability::ReadText, Capability::WriteText, Capability::Run],
    },
    BuiltinKind {
        kind: Kind::C_SOURCE_FILE,
        label: "C source file",
        capabilities: &[
            Capability::ReadText,
            Capability::WriteText,
            Capability::Compile,
        ],
    },
    BuiltinKind {
        kind: Kind::JSON_FILE,
        label: "JSON file",
        capabilities: &[Capability::ReadText, Capability::WriteText, Capability::Json],
    },
    BuiltinKind {
        kind: Kind::PICKLE_FILE,
        label: "pickle file",
        capabilities: &[],
    },
    BuiltinKind {
        kind: Kind::IMAGE_FILE,
        label: "image file",
        capabilities: &[],
    },
    BuiltinKind {
        kind: Kind::AUDIO_FILE,
        label: "audio file",
        capabilities: &[],
    },
    BuiltinKind {
        kind: Kind::VIDEO_FILE,
        label: "video file",
        capabilities: &[],
    },
    BuiltinKind {
        kind: Kind::ARCHIVE_FILE,
        label: "archive file",
        capabilities: &[],
    },
    BuiltinKind {
        kind: Kind::EXECUTABLE_FILE,
        label: "executable file",
        capabilities: &[Capability::Run],
    },
    BuiltinKind {
        kind: Kind::PYTHON_PACKAGE,
        label: "Python package folder",
        capabilities: FOLDER_CAPS,
    },
    BuiltinKind {
        kind: Kind::C_PROJECT,
        label: "C project folder",
        capabilities: FOLDER_CAPS,
    },
    BuiltinKind {
        kind: Kind::WEBSITE_FOLDER,
        label: "website folder",
        capabilities: FOLDER_CAPS,
    },
];

impl Kind {
    pub const MISSING: Kind = Kind(Cow::Borrowed("missing_path"));
    pub const FILE: Kind = Kind(Cow::Borrowed("file"));
    pub const FOLDER: Kind = Kind(Cow::Borrowed("folder"));
    pub const TEXT_FILE: Kind = Kind(Cow::Borrowed("text_file"));
    pub const CONFIG_FILE: Kind = Kind(Cow::Borrowed("config_file"));
    pub const PYTHON_FILE: Kind = Kind(Cow::Borrowed("python_file"));
    pub const C_SOURCE_FILE: Kind = Kind(Cow::Borrowed("c_source_file"));
    pub const JSON_FILE: Kind = Kind(Cow::Borrowed("json_file"));
    pub const PICKLE_FILE: Kind = Kind(Cow::Borrowed("pickle_file"));
    pub const IMAGE_FILE: Kind = Kind(Cow::Borrowed("image_file"));
    pub const AUDIO_FILE: Kind = Kind(Cow::Borrowed("audio_file"));
    pub const VIDEO_FILE: Kind = Kind(Cow::Borrowed("video_file"));
    pub const ARCHIVE_FILE: Kind = Kind(Cow::Borrowed("archive_file"));
    pub const EXECUTABLE_FILE: Kind = Kind(Cow::Borrowed("executable_file"));
    pub const PYTHON_PACKAGE: Kind = Kind(Cow::Borrowed("python_package"));
    pub const C_PROJECT: Kind = Kind(Cow::Borrowed("c_project"));
    pub const WEBSITE_FOLDER: Kind = Kind(Cow::Borrowed("website_folder"));

    /// Create a kind from an id. Built-in ids resolve to their constants.
    pub fn new(id: impl AsRef<str>) -> Self {
        let id = id.as_ref().trim().to_lowercase();
        match BUILTIN_KINDS.iter().find(|b| b.kind.as_str() == id) {
            Some(builtin) => builtin.kind.clone(),
            None => Kind(Cow::Owned(id)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// All built-in kinds in declaration order.
    pub fn builtins() -> impl Iterator<Item = &'static Kind> {
        BUILTIN_KINDS.iter().map(|b| &b.kind)
    }

    pub fn is_builtin(&self) -> bool {
        self.builtin().is_some()
    }

    /// Human-readable name, e.g. "Python package folder".
    pub fn label(&self) -> Cow<'_, str> {
        match self.builtin() {
            Some(builtin) => Cow::Borrowed(builtin.label),
            None => Cow::Owned(self.0.replace(['_', '-'], " ")),
        }
    }

    pub fn capabilities(&self) -> &'static [Capability] {
        self.builtin().map_or(&[], |b| b.capabilities)
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    fn builtin(&self) -> Option<&'static BuiltinKind> {
        BUILTIN_KINDS.iter().find(|b| b.kind == *self)
    }
}

impl From<String> for Kind {
    fn from(id: String) -> Self {
        Kind::new(id)
    }
}

impl From<&str> for Kind {
    fn from(id: &str) -> Self {
        Kind::new(id)
    }
}

impl From<Kind> for String {
    fn from(kind: Kind) -> Self {
        kind.0.into_owned()
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_resolves_builtin_ids() {
        assert_eq!(Kind::new("python_file"), Kind::PYTHON_FILE);
        assert_eq!(Kind::new("  Python_File "), Kind::PYTHON_FILE);
        assert!(Kind::new("python_file").is_builtin());
    }

    #[test]
    fn test_custom_kind() {
        let kind = Kind::new("Rust-Crate");
        assert_eq!(kind.as_str(), "rust-crate");
        assert!(!kind.is_builtin());
        assert!(kind.capabilities().is_empty());
        assert_eq!(kind.label(), "rust crate");
    }

    #[test]
    fn test_labels() {
        assert_eq!(Kind::PYTHON_PACKAGE.label(), "Python package folder");
        assert_eq!(Kind::MISSING.label(), "missing path");
        assert_eq!(Kind::C_SOURCE_FILE.label(), "C source file");
    }

    #[test]
    fn test_capability_tags() {
        assert!(Kind::CONFIG_FILE.has_capability(Capability::KeyValue));
        assert!(Kind::C_SOURCE_FILE.has_capability(Capability::Compile));
        assert!(Kind::WEBSITE_FOLDER.has_capability(Capability::ListEntries));
        assert!(!Kind::FILE.has_capability(Capability::ReadText));
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&Kind::TEXT_FILE).unwrap();
        assert_eq!(json, r#""text_file""#);

        let kind: Kind = serde_json::from_str(r#""TEXT_FILE""#).unwrap();
        assert_eq!(kind, Kind::TEXT_FILE);
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        let mut ids: Vec<&str> = Kind::builtins().map(Kind::as_str).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }
}
