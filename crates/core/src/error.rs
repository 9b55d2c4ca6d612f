use std::io;
use std::path::PathBuf;

/// Errors that can occur during filekind operations
///
/// Classification itself never fails; these surface from handle operations,
/// configuration loading and command execution.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Operation '{operation}' is not supported for kind '{kind}'")]
    Unsupported { kind: String, operation: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for filekind operations
pub type Result<T> = std::result::Result<T, Error>;
