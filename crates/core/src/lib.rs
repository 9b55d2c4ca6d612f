//! filekind - classify filesystem paths into kinds and work with them
//!
//! This crate provides functionality to:
//! - Classify a path as missing, a plain or typed file, or a typed folder
//! - Register folder, extension and MIME rules at startup or later
//! - Sniff MIME types from file content or names
//! - Build kind-specific handles (text, config, JSON, Python, C, folders)
//! - Load rule files and merge them with a root configuration
pub mod command;
pub mod config;
pub mod error;
pub mod handles;
pub mod registry;
pub mod sniff;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use command::{CommandType, ToolCommand};
pub use config::{Config, ConfigMerger};
pub use handles::{Handle, HandleFactory, open};
pub use registry::{ClassificationRegistry, SharedRegistry, global, register_builtin_kinds};
pub use sniff::{MimeSniffer, SnifferChoice};
pub use utils::{is_hidden, is_visible};
