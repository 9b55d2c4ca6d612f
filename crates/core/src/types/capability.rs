use crate::impl_case_insensitive_deserialize;
use serde::Serialize;
use std::fmt;

/// Operation families a kind's handle supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Read the entry as lines of text
    ReadText,
    /// Overwrite the entry with lines of text
    WriteText,
    /// Parse `key = value` pairs
    KeyValue,
    /// Load and dump JSON documents
    Json,
    /// Build an object file or binary from the entry
    Compile,
    /// Execute the entry or hand it to an interpreter
    Run,
    /// Enumerate directory children
    ListEntries,
}

impl_case_insensitive_deserialize!(
    Capability,
    ReadText => "read_text",
    WriteText => "write_text",
    KeyValue => "key_value",
    Json => "json",
    Compile => "compile",
    Run => "run",
    ListEntries => "list_entries"
);

impl Capability {
    pub fn as_str(self) -> &'static str {
        match self {
            Capability::ReadText => "read_text",
            Capability::WriteText => "write_text",
            Capability::KeyValue => "key_value",
            Capability::Json => "json",
            Capability::Compile => "compile",
            Capability::Run => "run",
            Capability::ListEntries => "list_entries",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
