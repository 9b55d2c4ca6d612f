//! Configuration management for filekind

mod merge;
mod rules;
mod settings;
mod validation;

// Re-export main types
pub use merge::{ConfigInfo, ConfigMerger, ROOT_ENV_VAR};
pub use rules::{FolderRuleConfig, FolderTest, ToolsConfig};
pub use settings::{CONFIG_FILE_NAMES, Config};
pub use validation::{ConfigValidator, RuleValidator, validate};
