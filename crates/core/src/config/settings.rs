use crate::{
    error::{Error, Result},
    handles::Toolchain,
    registry::ClassificationRegistry,
    sniff::SnifferChoice,
    types::Kind,
    utils::find_upward,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{FolderRuleConfig, FolderTest, ToolsConfig};

/// Config file names, in lookup order within each directory.
pub const CONFIG_FILE_NAMES: [&str; 2] = [".filekind.json", "filekind.json"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sniffer: Option<SnifferChoice>,

    // Extension -> kind, e.g. ".rs": "rust_file"
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: BTreeMap<String, Kind>,

    // MIME prefix -> kind
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub mime: BTreeMap<String, Kind>,

    // Consulted before the built-in folder rules, in this order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub folders: Vec<FolderRuleConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsConfig>,
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        find_upward(start_path, &CONFIG_FILE_NAMES)
    }

    /// A starting point written by `filekind init`.
    pub fn template() -> Self {
        Self {
            sniffer: Some(SnifferChoice::Auto),
            extensions: BTreeMap::from([(".rs".to_string(), Kind::new("rust_file"))]),
            mime: BTreeMap::from([("application/pdf".to_string(), Kind::new("pdf_file"))]),
            folders: vec![FolderRuleConfig::new(
                Kind::new("rust_crate"),
                FolderTest::Contains("Cargo.toml".to_string()),
            )],
            tools: Some(ToolsConfig {
                python: Some("python3".to_string()),
                c_compiler: Some("gcc".to_string()),
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Register this config's rules on top of whatever `registry` holds.
    ///
    /// Folder rules go in front of existing ones; extension and MIME entries
    /// replace existing mappings for the same key.
    pub fn apply(&self, registry: &mut ClassificationRegistry) {
        if let Some(choice) = self.sniffer {
            debug!("Using {} sniffer from config", choice);
            registry.set_sniffer(choice.build());
        }
        for (position, rule) in self.folders.iter().enumerate() {
            registry.insert_folder_boxed(position, rule.predicate(), rule.kind.clone());
        }
        for (extension, kind) in &self.extensions {
            registry.register_extension([extension], kind.clone());
        }
        for (prefix, kind) in &self.mime {
            registry.register_mime(prefix, kind.clone());
        }
    }

    pub fn toolchain(&self) -> Toolchain {
        self.tools.clone().unwrap_or_default().toolchain()
    }
}
